use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Remove a leading `---` ... `---` block before tokenizing.
    pub strip_frontmatter: bool,
    pub extensions: Extensions,
}

/// Optional syntax. Bold, italic, links, images, code, headings, quotes and
/// plain lists are always recognised.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Extensions {
    pub tables: bool,
    pub task_lists: bool,
    pub strikethrough: bool,
    pub highlight: bool,
    pub subscript: bool,
    pub superscript: bool,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            tables: true,
            task_lists: true,
            strikethrough: true,
            highlight: true,
            subscript: true,
            superscript: true,
        }
    }
}

impl Config {
    /// The config bundled with the crate (validated by the build script).
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found or invalid.
    pub fn load(path: &Path) -> Self {
        match Self::load_from_path(path) {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) => Self::default(),
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
