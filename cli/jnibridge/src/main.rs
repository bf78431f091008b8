//! jnibridge CLI: generate native-boundary bridges from a catalog.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jnibridge", version, about = "Native-boundary bridge generator")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the bridge unit described by a catalog
    Generate {
        /// Catalog file
        #[arg(long, default_value = "bridges.toml")]
        catalog: PathBuf,
        /// Output file (overrides [output].path)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Fail if the output is missing or out of date instead of writing it
        #[arg(long)]
        check: bool,
    },
    /// Validate a catalog and summarize the bridges it would produce
    Check {
        /// Catalog file
        #[arg(long, default_value = "bridges.toml")]
        catalog: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            catalog,
            output,
            check,
        } => commands::generate::run(&catalog, output.as_deref(), check),
        Commands::Check { catalog, json } => commands::check::run(&catalog, json),
    }
}
