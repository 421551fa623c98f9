//! Configuration file (restyle.toml).

use std::fs;
use std::path::Path;

use restyle_transform::RewriteOptions;
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub rewrite: RewriteOptions,
    #[serde(default)]
    pub batch: BatchSettings,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct BatchSettings {
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Output directory; trees are rewritten in place when unset
    pub output: Option<String>,
    #[serde(default)]
    pub pretty: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            output: None,
            pretty: false,
        }
    }
}

fn default_extension() -> String {
    "json".to_string()
}

/// Errors that can occur when loading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load configuration if the file exists.
/// Returns an error if the file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restyle_transform::ElementScope;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("restyle.toml")).unwrap();

        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.rewrite.attribute, "style");
        assert_eq!(config.rewrite.elements, ElementScope::Flow);
    }

    #[test]
    fn reads_partial_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("restyle.toml");
        fs::write(
            &path,
            r#"
[rewrite]
elements = "flow-and-text"
diagnostics = false

[batch]
output = "out"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.rewrite.attribute, "style");
        assert_eq!(config.rewrite.elements, ElementScope::FlowAndText);
        assert!(!config.rewrite.diagnostics);
        assert_eq!(config.batch.output.as_deref(), Some("out"));
        assert_eq!(config.batch.extension, "json");
    }

    #[test]
    fn rejects_malformed_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("restyle.toml");
        fs::write(&path, "[rewrite]\nelements = \"everything\"\n").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }
}
