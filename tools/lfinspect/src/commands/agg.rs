use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use localframe::{AggregateSpec, FuncArgs, Session, core::Value};

use crate::{
    format::{OutputFormat, write_batch},
    input::{json_to_value, read_rows},
};

#[derive(Args)]
pub struct AggArgs {
    /// JSON Lines file with one row per line (stdin if not specified)
    input: Option<PathBuf>,

    /// Column names for positional rows, comma separated
    #[arg(short, long, value_delimiter = ',')]
    names: Vec<String>,

    /// Columns to group by, comma separated
    #[arg(short, long, value_delimiter = ',')]
    group_by: Vec<String>,

    /// Aggregate as `FUNC:COL[,COL..][:KEY=VALUE..]`, may be repeated
    #[arg(short, long = "agg", value_parser = parse_agg_spec, required = true)]
    aggs: Vec<AggregateSpec>,

    /// Evaluate groups in parallel
    #[arg(long)]
    parallel: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl AggArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::builder()
            .with_builtin_aggregates()
            .with_parallelism(self.parallel)
            .build();
        let rows = read_rows(self.input.as_deref())?;
        let names = super::column_names(&self.names);
        let frame = session.create_frame(rows, names.as_deref())?;

        let keys: Vec<&str> = self.group_by.iter().map(String::as_str).collect();
        let result = frame.group_by(&keys).agg(&session, &self.aggs)?;
        if result.num_rows() == 0 {
            tracing::warn!("aggregation produced no rows");
            return Ok(());
        }
        write_batch(self.format, &result.to_record_batch()?, self.output.as_deref())
    }
}

/// Parse `sum:q`, `covar_pop:m,n` or `listagg:v:delimiter=|:is_distinct=true`.
///
/// Argument values are read as JSON and fall back to plain strings.
fn parse_agg_spec(s: &str) -> Result<AggregateSpec, String> {
    let mut sections = s.split(':');
    let function = sections
        .next()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| format!("missing function name in {s:?}"))?;
    let inputs: Vec<&str> = sections
        .next()
        .map(|cols| cols.split(',').filter(|c| !c.is_empty()).collect())
        .unwrap_or_default();
    if inputs.is_empty() {
        return Err(format!("missing input columns in {s:?}"));
    }

    let mut args = FuncArgs::new();
    for section in sections {
        let (key, raw) = section
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, got {section:?}"))?;
        let value = serde_json::from_str(raw)
            .map(json_to_value)
            .unwrap_or_else(|_| Value::string(raw));
        args = args.with_named(key, value);
    }
    Ok(AggregateSpec::new(function, inputs).with_args(args))
}
