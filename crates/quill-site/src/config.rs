//! Site configuration.
//!
//! Loads `quill.toml`, discovered upward from a starting directory, with
//! sensible defaults when no file exists:
//!
//! ```toml
//! [content]
//! dir = "content"
//!
//! [render]
//! cache = true
//! shell = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Content location.
    pub content: ContentConfig,
    /// Rendering options.
    pub render: RenderConfig,
}

/// Content location settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory of `*.md` documents, relative to the config file (or the
    /// working directory when no file was found).
    pub dir: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("content"),
        }
    }
}

/// Rendering options.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Keep rendered pages in an in-memory cache, invalidated by source
    /// mtime.
    pub cache: bool,
    /// Wrap rendered bodies in the `<article>` document shell.
    pub shell: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cache: true,
            shell: true,
        }
    }
}

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error when the TOML is malformed.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load configuration, searching for `quill.toml` in `start_dir` and
    /// its ancestors. Returns defaults when no file is found; a file that
    /// exists but does not parse is an error, not a silent fallback.
    ///
    /// Relative `content.dir` is resolved against the config file's
    /// directory (or `start_dir` for defaults).
    pub fn load(start_dir: &Path) -> Result<Self, ConfigError> {
        let Some(path) = discover(start_dir) else {
            let mut config = Self::default();
            config.content.dir = start_dir.join(&config.content.dir);
            return Ok(config);
        };

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let mut config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        if config.content.dir.is_relative() {
            if let Some(base) = path.parent() {
                config.content.dir = base.join(&config.content.dir);
            }
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// Walk `start_dir` and its ancestors looking for the config file.
fn discover(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}
