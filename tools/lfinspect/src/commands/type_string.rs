use anyhow::{Context, Result};
use clap::Args;
use localframe::core::{from_type_string, to_type_string};

#[derive(Args)]
pub struct TypeArgs {
    /// Warehouse type names, e.g. `NUMBER(10, 2)` or `BIGINT`
    #[arg(required = true)]
    types: Vec<String>,
}

impl TypeArgs {
    pub fn run(self) -> Result<()> {
        for input in &self.types {
            let data_type =
                from_type_string(input).with_context(|| format!("cannot parse {input:?}"))?;
            let canonical = to_type_string(&data_type)?;
            println!("{input}\t{data_type}\t{canonical}");
        }
        Ok(())
    }
}
