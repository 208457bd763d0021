//! xform CLI
//!
//! Developer tool for checking transform configurations and producing the
//! body of a preview request.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// xform - validate and preview transform configurations
#[derive(Parser)]
#[command(name = "xform")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a transform configuration
    Check {
        /// Transform document (JSON, or YAML by extension)
        file: PathBuf,

        /// Ignore unknown fields instead of rejecting them
        #[arg(long)]
        lenient: bool,

        /// Apply the rules for stored transforms (id and dest required)
        #[arg(long)]
        stored: bool,
    },

    /// Validate as a preview request and print the request body
    Preview {
        /// Transform document (JSON, or YAML by extension)
        file: PathBuf,

        /// Ignore unknown fields instead of rejecting them
        #[arg(long)]
        lenient: bool,

        /// Indent the printed body
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Check {
            file,
            lenient,
            stored,
        } => {
            commands::check::run(&file, commands::strictness(lenient), stored)?;
        }
        Commands::Preview {
            file,
            lenient,
            pretty,
        } => {
            commands::preview::run(&file, commands::strictness(lenient), pretty)?;
        }
    }

    Ok(())
}
