//! yamlbind CLI
//!
//! Checks and normalizes YAML documents.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// yamlbind - typed YAML documents
#[derive(Parser)]
#[command(name = "yamlbind")]
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
    /// Parse documents and report any that fail
    Check {
        /// Documents to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Rewrite a document in canonical block style
    Fmt {
        /// Document to format
        file: PathBuf,

        /// Write the result here instead of back to FILE
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only report whether FILE is already formatted
        #[arg(long, conflicts_with = "output")]
        check: bool,

        /// Format FILE even though its comments will be dropped
        #[arg(long, conflicts_with = "check")]
        strip_comments: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
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
        Commands::Check { files } => {
            commands::check::run(&files)?;
        }
        Commands::Fmt {
            file,
            output,
            check,
            strip_comments,
        } => {
            commands::fmt::run(&file, output.as_deref(), check, strip_comments)?;
        }
    }

    Ok(())
}
