use std::{fs, path::PathBuf};

use anyhow::Result;
use clap::Args;
use localframe::{
    Session,
    core::{format_schema, to_type_string},
};

use crate::input::read_rows;

#[derive(Args)]
pub struct SchemaArgs {
    /// JSON Lines file with one row per line (stdin if not specified)
    input: Option<PathBuf>,

    /// Column names for positional rows, comma separated
    #[arg(short, long, value_delimiter = ',')]
    names: Vec<String>,

    /// Print one `NAME TYPE` line per column using warehouse type names
    #[arg(long)]
    type_strings: bool,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let rows = read_rows(self.input.as_deref())?;
        let names = super::column_names(&self.names);
        let frame = Session::new().create_frame(rows, names.as_deref())?;

        let text = if self.type_strings {
            frame
                .schema()
                .iter()
                .map(|field| Ok(format!("{} {}", field.name, to_type_string(&field.data_type)?)))
                .collect::<Result<Vec<_>>>()?
                .join("\n")
        } else {
            format_schema(frame.schema())?.trim_end().to_string()
        };

        match self.output {
            Some(path) => fs::write(path, format!("{text}\n"))?,
            None => println!("{text}"),
        }
        Ok(())
    }
}
