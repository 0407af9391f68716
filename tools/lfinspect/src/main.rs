mod commands;
mod format;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{agg::AggArgs, schema::SchemaArgs, type_string::TypeArgs};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "lfinspect", about = "Inspect inferred schemas and run local aggregates")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged schema of JSON Lines rows
    Schema(SchemaArgs),
    /// Parse warehouse type strings
    Type(TypeArgs),
    /// Aggregate JSON Lines rows with the built-in functions
    Agg(AggArgs),
}

fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Schema(args) => args.run(),
        Commands::Type(args) => args.run(),
        Commands::Agg(args) => args.run(),
    }
}
