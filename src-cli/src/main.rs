//! SignBridge Command-Line Interface
//!
//! A headless client for the SignBridge service: browse the sign
//! dictionary, normalize text, resolve sign lookups, and manage the
//! generated output directories without the UI.

mod client;
mod colors;
mod commands;
mod exit_codes;

use clap::{Parser, Subcommand};
use exit_codes::ExitCode;

/// SignBridge - Sign Language Lookup CLI
#[derive(Parser, Debug)]
#[command(name = "signbridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List vocabulary words in the dataset
    Words,
    /// Show the full word -> clip dictionary
    Dictionary,
    /// Normalize a text into its cleaned token string
    Normalize {
        /// The text to normalize
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Resolve a text against the dictionary
    Lookup {
        /// The text to look up
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Print a published viewer page
    Page {
        /// Page filename (e.g. isl_video_<id>.html)
        filename: String,
    },
    /// Delete all generated videos and published pages
    Clean,
    /// Show or change service configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show service status
    Status,
    /// Check that the service is reachable
    Ping,
    /// Ask the service to shut down
    Shutdown,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show the current directory configuration
    Show,
    /// Point the service at a different dataset root
    SetDataset {
        /// Dataset root directory (tilde paths are expanded)
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // Build the async runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime");

    let exit_code = runtime.block_on(run(cli));
    std::process::exit(exit_code.as_i32());
}

async fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Commands::Words => commands::words(cli.json, cli.quiet).await,
        Commands::Dictionary => commands::dictionary(cli.json, cli.quiet).await,
        Commands::Normalize { text } => {
            commands::normalize(&text.join(" "), cli.json, cli.quiet).await
        }
        Commands::Lookup { text } => commands::lookup(&text.join(" "), cli.json, cli.quiet).await,
        Commands::Page { filename } => commands::page(&filename, cli.quiet).await,
        Commands::Clean => commands::clean(cli.json, cli.quiet).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_show(cli.json, cli.quiet).await,
            ConfigAction::SetDataset { path } => commands::config_set_dataset(&path, cli.quiet).await,
        },
        Commands::Status => commands::status(cli.json, cli.quiet).await,
        Commands::Ping => commands::ping(cli.quiet).await,
        Commands::Shutdown => commands::shutdown(cli.quiet).await,
    }
}
