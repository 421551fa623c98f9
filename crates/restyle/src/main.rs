//! restyle CLI - rewrite inline style strings in MDX syntax trees.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "restyle")]
#[command(about = "Rewrite inline style strings in MDX syntax trees into JSX style objects")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to restyle.toml config file
    #[arg(short, long, default_value = "restyle.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a single mdast JSON tree
    Rewrite {
        /// Input tree, or "-" for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the output tree
        #[arg(long)]
        pretty: bool,
    },

    /// Parse a style string and print the resulting expression
    Parse {
        /// Inline style, e.g. "color: red; font-size: 20px"
        style: String,
    },

    /// Rewrite every tree file under a directory
    Batch {
        /// Directory containing mdast JSON trees
        dir: PathBuf,

        /// Output directory (defaults to config, or in place)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print written trees
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for tree output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Rewrite {
            input,
            output,
            pretty,
        } => {
            commands::rewrite::run(&config, input, output, pretty).await?;
        }
        Commands::Parse { style } => {
            commands::parse::run(&style)?;
        }
        Commands::Batch { dir, output, pretty } => {
            commands::batch::run(&config, dir, output, pretty).await?;
        }
    }

    Ok(())
}
