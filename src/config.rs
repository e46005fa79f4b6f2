//! Configuration loading: TOML file plus environment overrides.
//!
//! Lookup order for the file: `$DOCTREE_CONFIG`, then
//! `<config dir>/doctree-mcp/config.toml`. A missing file means defaults.
//! `DOCTREE_URL`, `DOCTREE_ROOT` and `DOCTREE_BATCH_SIZE` override the file.

use crate::indexer::DEFAULT_BATCH_SIZE;
use crate::search::SnippetOptions;
use crate::source::{ArtifactSource, DirectorySource, HttpSource};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const CONFIG_ENV: &str = "DOCTREE_CONFIG";
pub const ROOT_ENV: &str = "DOCTREE_ROOT";
pub const URL_ENV: &str = "DOCTREE_URL";
pub const BATCH_SIZE_ENV: &str = "DOCTREE_BATCH_SIZE";

/// Where documents are listed and fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// A library directory containing `upload-html/metadata.json`.
    Directory { root: PathBuf },
    /// The conversion service's HTTP API.
    Http { base_url: String },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Directory {
            root: PathBuf::from("."),
        }
    }
}

impl SourceConfig {
    /// Construct the configured artifact source.
    pub fn build(&self) -> Result<Arc<dyn ArtifactSource>> {
        Ok(match self {
            Self::Directory { root } => {
                let root = expand_tilde(&root.to_string_lossy()).into_owned();
                Arc::new(DirectorySource::new(root))
            }
            Self::Http { base_url } => Arc::new(
                HttpSource::new(base_url)
                    .with_context(|| format!("Failed to create HTTP client for {}", base_url))?,
            ),
        })
    }
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    /// Concurrent fetches per indexing batch.
    pub batch_size: usize,
    /// Characters kept on each side of a content match.
    pub snippet_radius: usize,
    /// Leading characters shown for title-only matches.
    pub title_snippet_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        let snippet = SnippetOptions::default();
        Self {
            source: SourceConfig::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            snippet_radius: snippet.radius,
            title_snippet_len: snippet.title_len,
        }
    }
}

impl Config {
    /// Load from the default locations and the process environment.
    pub fn load() -> Result<Self> {
        let lookup = |key: &str| std::env::var(key).ok();

        let mut config = match config_path(lookup) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Apply environment-style overrides. The URL wins over a root directory.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(root) = lookup(ROOT_ENV) {
            self.source = SourceConfig::Directory {
                root: PathBuf::from(root),
            };
        }
        if let Some(base_url) = lookup(URL_ENV) {
            self.source = SourceConfig::Http { base_url };
        }
        if let Some(batch_size) = lookup(BATCH_SIZE_ENV) {
            self.batch_size = batch_size
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer, got '{}'", BATCH_SIZE_ENV, batch_size))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            bail!("batch_size must be at least 1");
        }
        Ok(())
    }

    pub fn snippet_options(&self) -> SnippetOptions {
        SnippetOptions {
            radius: self.snippet_radius,
            title_len: self.title_snippet_len,
        }
    }
}

/// Resolve the config file location.
fn config_path(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    if let Some(path) = lookup(CONFIG_ENV) {
        return Some(PathBuf::from(expand_tilde(&path).into_owned()));
    }
    dirs::config_dir().map(|dir| dir.join("doctree-mcp").join("config.toml"))
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
