/// Pattern Gallery:
/// Every classic creational pattern, plus the template method, as a small
/// self-narrating demo. Pick one by name or run them all.
use anyhow::Result;
use clap::{Parser, Subcommand};
use pattern_gallery::utils;

#[derive(Parser)]
#[command(name = "pattern-gallery")]
#[command(about = "Runnable demos of classic object-oriented design patterns")]
struct Cli {
    /// Print debug events from the pattern library
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default pattern-gallery.toml in the current directory
    Init,
    /// List the available demos
    List,
    /// Run demos by name (e.g. `builder prototype`)
    Run {
        demos: Vec<String>,
        /// Run every demo enabled in the config
        #[arg(long)]
        all: bool,
    },
    /// Check the configuration for problems
    Validate,
    /// Export the configuration in another format
    Export {
        output: String,
        #[arg(short, long, default_value = "toml")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    match cli.command {
        Commands::Init => utils::initialize_config(),
        Commands::List => utils::list_demos(),
        Commands::Run { demos, all } => utils::run_demos(&demos, all),
        Commands::Validate => utils::validate_config(),
        Commands::Export { output, format } => utils::export_config(&output, &format),
    }
}
