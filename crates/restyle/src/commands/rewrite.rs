//! Single tree rewrite command.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use restyle_mdx::{parse_tree, to_json};
use restyle_transform::{spawn_logger, Rewriter};
use tokio::sync::mpsc;

use crate::config::ConfigFile;

/// Run the rewrite command.
pub async fn run(
    config: &ConfigFile,
    input: PathBuf,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let source = read_input(&input)?;
    let mut tree = parse_tree(&source).with_context(|| format!("Reading {}", input.display()))?;

    let (sender, receiver) = mpsc::unbounded_channel();
    let logger = spawn_logger(receiver);

    let stats = Rewriter::new(config.rewrite.clone(), sender).rewrite(&mut tree);

    let json = to_json(&tree, pretty)?;
    match output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("Writing {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    // The rewriter (and its sender) is gone, so the logger finishes once drained.
    logger.await?;

    tracing::info!(
        "Rewrote {} style attributes across {} elements",
        stats.attributes_rewritten,
        stats.elements_visited
    );

    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Reading stdin")?;
        return Ok(source);
    }

    fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}
