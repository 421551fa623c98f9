//! Directory batch command.

use std::path::PathBuf;

use anyhow::Result;
use restyle_batch::{BatchConfig, BatchRewriter};

use crate::config::ConfigFile;

/// Run the batch command.
pub async fn run(
    config: &ConfigFile,
    dir: PathBuf,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    tracing::info!("Rewriting trees in {}...", dir.display());

    let batch = BatchConfig {
        input_dir: dir,
        output_dir: output.or_else(|| config.batch.output.as_ref().map(PathBuf::from)),
        extension: config.batch.extension.clone(),
        pretty: pretty || config.batch.pretty,
        options: config.rewrite.clone(),
    };

    let result = BatchRewriter::new(batch).run().await?;

    tracing::info!(
        "Rewrote {} style attributes in {} files in {}ms",
        result.attributes,
        result.files,
        result.duration_ms
    );

    Ok(())
}
