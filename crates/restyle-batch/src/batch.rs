//! Directory batch rewriter.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedSender};
use walkdir::WalkDir;

use restyle_mdx::{parse_tree, to_json};
use restyle_transform::{spawn_logger, Diagnostic, DiagnosticSink, RewriteOptions, Rewriter};

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory searched recursively for tree files
    pub input_dir: PathBuf,

    /// Output directory mirroring `input_dir`; rewrites in place when `None`
    pub output_dir: Option<PathBuf>,

    /// Extension of tree files
    pub extension: String,

    /// Pretty-print written trees
    pub pretty: bool,

    /// Rewrite options applied to every tree
    pub options: RewriteOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: None,
            extension: "json".to_string(),
            pretty: false,
            options: RewriteOptions::default(),
        }
    }
}

/// Result of a batch run.
#[derive(Debug)]
pub struct BatchResult {
    /// Number of trees rewritten
    pub files: usize,

    /// Number of style attributes converted
    pub attributes: usize,

    /// Number of diagnostics logged
    pub diagnostics: usize,

    /// Total run time in milliseconds
    pub duration_ms: u64,
}

/// Errors that can occur during a batch run.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Failed to read input: {0}")]
    ReadError(String),

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Tags each diagnostic with the file it came from before forwarding it.
struct FileSink<'a> {
    path: &'a Path,
    sender: UnboundedSender<Diagnostic>,
}

impl DiagnosticSink for FileSink<'_> {
    fn emit(&mut self, mut diagnostic: Diagnostic) {
        if let Value::Object(detail) = &mut diagnostic.detail {
            detail.insert(
                "file".to_string(),
                Value::String(self.path.display().to_string()),
            );
        }
        self.sender.emit(diagnostic);
    }
}

/// Rewrites every tree file under a directory.
pub struct BatchRewriter {
    config: BatchConfig,
}

impl BatchRewriter {
    /// Create a new batch rewriter.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Run the batch.
    ///
    /// Trees are rewritten on the rayon pool, one worker per file. Diagnostics go
    /// to a background logging task that is drained before returning.
    pub async fn run(&self) -> Result<BatchResult, BatchError> {
        let start = Instant::now();

        let files = self.discover_files()?;
        tracing::info!(
            "Found {} tree files in {}",
            files.len(),
            self.config.input_dir.display()
        );

        let (sender, receiver) = mpsc::unbounded_channel();
        let logger = spawn_logger(receiver);

        let results: Vec<Result<usize, BatchError>> = files
            .par_iter()
            .map(|path| self.rewrite_file(path, sender.clone()))
            .collect();
        drop(sender);

        // Drain diagnostics before reporting, even when a file failed.
        let diagnostics = logger.await.unwrap_or_else(|e| {
            tracing::warn!("Diagnostic logger stopped: {}", e);
            0
        });

        let mut attributes = 0;
        for result in results {
            attributes += result?;
        }

        Ok(BatchResult {
            files: files.len(),
            attributes,
            diagnostics,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Find all tree files in the input directory, sorted by path.
    fn discover_files(&self) -> Result<Vec<PathBuf>, BatchError> {
        if !self.config.input_dir.is_dir() {
            return Err(BatchError::ReadError(format!(
                "Input directory not found: {}",
                self.config.input_dir.display()
            )));
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.config.input_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|path| {
                path.extension().and_then(|e| e.to_str()) == Some(self.config.extension.as_str())
            })
            .collect();

        files.sort();
        Ok(files)
    }

    /// Rewrite one file, returning the number of converted attributes.
    fn rewrite_file(
        &self,
        path: &Path,
        sender: UnboundedSender<Diagnostic>,
    ) -> Result<usize, BatchError> {
        let content = fs::read_to_string(path)
            .map_err(|e| BatchError::ReadError(format!("{}: {}", path.display(), e)))?;

        let mut tree = parse_tree(&content).map_err(|e| BatchError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let sink = FileSink { path, sender };
        let stats = Rewriter::new(self.config.options.clone(), sink).rewrite(&mut tree);

        let json = to_json(&tree, self.config.pretty)
            .map_err(|e| BatchError::WriteError(format!("{}: {}", path.display(), e)))?;

        let output_path = self.output_path(path);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| BatchError::WriteError(format!("{}: {}", parent.display(), e)))?;
        }
        fs::write(&output_path, json)
            .map_err(|e| BatchError::WriteError(format!("{}: {}", output_path.display(), e)))?;

        tracing::debug!(
            "Rewrote {} attributes in {}",
            stats.attributes_rewritten,
            path.display()
        );

        Ok(stats.attributes_rewritten)
    }

    fn output_path(&self, path: &Path) -> PathBuf {
        match &self.config.output_dir {
            Some(output_dir) => {
                let relative = path.strip_prefix(&self.config.input_dir).unwrap_or(path);
                output_dir.join(relative)
            }
            None => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restyle_mdx::{Attribute, Node};
    use tempfile::tempdir;

    fn write_tree(path: &Path, style: &str) {
        let tree = Node::root(vec![Node::flow_element(
            "Box",
            vec![Attribute::literal("style", style)],
            vec![],
        )]);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, to_json(&tree, true).unwrap()).unwrap();
    }

    fn read_style(path: &Path) -> Attribute {
        let tree = parse_tree(&fs::read_to_string(path).unwrap()).unwrap();
        tree.children.unwrap()[0].attributes.as_ref().unwrap()[0].clone()
    }

    #[tokio::test]
    async fn rewrites_directory_into_output() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("trees");
        let output = temp.path().join("out");

        write_tree(&input.join("index.json"), "color: red");
        write_tree(&input.join("guide/intro.json"), "margin: 0; padding: 1px");
        fs::write(input.join("notes.txt"), "not a tree").unwrap();

        let result = BatchRewriter::new(BatchConfig {
            input_dir: input.clone(),
            output_dir: Some(output.clone()),
            ..Default::default()
        })
        .run()
        .await
        .unwrap();

        assert_eq!(result.files, 2);
        assert_eq!(result.attributes, 2);
        assert_eq!(result.diagnostics, 2);

        let rewritten = read_style(&output.join("guide/intro.json"));
        assert_eq!(
            rewritten.as_expression().unwrap().value,
            r#"{"margin":"0","padding":"1px"}"#
        );
        assert_eq!(read_style(&input.join("index.json")).as_literal(), Some("color: red"));
        assert!(!output.join("notes.txt").exists());
    }

    #[tokio::test]
    async fn rewrites_in_place_without_output() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("page.json");
        write_tree(&file, "font-size: 12px");

        BatchRewriter::new(BatchConfig {
            input_dir: temp.path().to_path_buf(),
            ..Default::default()
        })
        .run()
        .await
        .unwrap();

        assert_eq!(
            read_style(&file).as_expression().unwrap().value,
            r#"{"fontSize":"12px"}"#
        );
    }

    #[tokio::test]
    async fn reports_invalid_tree() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("broken.json"), "{").unwrap();

        let err = BatchRewriter::new(BatchConfig {
            input_dir: temp.path().to_path_buf(),
            ..Default::default()
        })
        .run()
        .await
        .unwrap_err();

        assert!(matches!(err, BatchError::ParseError { .. }));
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let temp = tempdir().unwrap();

        let err = BatchRewriter::new(BatchConfig {
            input_dir: temp.path().join("missing"),
            ..Default::default()
        })
        .run()
        .await
        .unwrap_err();

        assert!(matches!(err, BatchError::ReadError(_)));
    }
}
