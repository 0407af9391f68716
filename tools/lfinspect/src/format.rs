use std::{
    fs,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Result;
use arrow::record_batch::RecordBatch;
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    Table,
    Jsonl,
    Csv,
}

fn destination(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(fs::File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Write `batch` to `output`, or stdout when `output` is `None`.
pub fn write_batch(format: OutputFormat, batch: &RecordBatch, output: Option<&Path>) -> Result<()> {
    let mut dest = destination(output)?;
    match format {
        OutputFormat::Table => {
            let table = arrow::util::pretty::pretty_format_batches(std::slice::from_ref(batch))?;
            writeln!(dest, "{table}")?;
        }
        OutputFormat::Jsonl => {
            let mut writer = arrow::json::LineDelimitedWriter::new(&mut dest);
            writer.write(batch)?;
            writer.finish()?;
        }
        OutputFormat::Csv => {
            let mut writer = arrow::csv::WriterBuilder::new()
                .with_header(true)
                .build(&mut dest);
            writer.write(batch)?;
        }
    }
    dest.flush()?;
    Ok(())
}
