//! boardgen: generate board support files from a TOML board description.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "boardgen",
    version,
    about = "Generate CircuitPython board support files from a TOML board description"
)]
struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every artifact for a board
    Generate {
        /// Board description (.toml)
        config: PathBuf,
        /// Write artifacts here instead of ports/<family>/boards/<directory_name>
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Source tree root for the default destination (default: current directory)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Copyright year for the license banner (default: current year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Validate a board description and list the artifacts it would produce
    Check {
        /// Board description (.toml)
        config: PathBuf,
        /// Report format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// List supported hardware families
    Families,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Logs go to stderr so generated-file listings on stdout stay clean.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            config,
            output_dir,
            root,
            year,
        } => commands::generate::run(&config, output_dir.as_deref(), root.as_deref(), year),
        Commands::Check { config, format } => commands::check::run(&config, format.as_deref()),
        Commands::Families => commands::families::run(),
    }
}
