/// Configuration loading.
///
/// Settings come from a TOML file.  The first existing file wins, in
/// this order:
///   1. an explicit `--config` path,
///   2. `.graphql-docs.toml` in the workspace root,
///   3. `graphql-docs/config.toml` in the user's config directory.
///
/// No file at all means defaults.
use std::path::{Path, PathBuf};

use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::explorer::DEFAULT_SEARCH_LIMIT;
use crate::overlay::compose::{DEFAULT_FALLBACK_DESCRIPTION, OverlayStyle};

pub const WORKSPACE_CONFIG_FILE: &str = ".graphql-docs.toml";

/// How completion documentation is formatted for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupSetting {
    #[default]
    Markdown,
    Html,
}

impl MarkupSetting {
    pub fn overlay_style(self) -> OverlayStyle {
        match self {
            MarkupSetting::Markdown => OverlayStyle::Markdown,
            MarkupSetting::Html => OverlayStyle::Html,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to an introspection JSON file.
    pub schema: Option<PathBuf>,
    pub fallback_description: String,
    pub search_limit: usize,
    pub markup: MarkupSetting,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: None,
            fallback_description: DEFAULT_FALLBACK_DESCRIPTION.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            markup: MarkupSetting::default(),
        }
    }
}

impl Config {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The schema path, with relative paths taken from `workspace_root`.
    pub fn schema_path(&self, workspace_root: Option<&Path>) -> Option<PathBuf> {
        let path = self.schema.as_ref()?;
        match workspace_root {
            Some(root) if path.is_relative() => Some(root.join(path)),
            _ => Some(path.clone()),
        }
    }
}

/// The user-level config file location, if a home directory is known.
pub fn user_config_file() -> Option<PathBuf> {
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("graphql-docs").join("config.toml"))
}

/// Config files to try, highest priority first.
pub fn candidates(explicit: Option<&Path>, workspace_root: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
    }
    if let Some(root) = workspace_root {
        paths.push(root.join(WORKSPACE_CONFIG_FILE));
    }
    if let Some(path) = user_config_file() {
        paths.push(path);
    }
    paths
}

/// Load the first config file that exists.
///
/// An explicit path that does not exist is an error; the implicit
/// locations are simply skipped.
pub fn load(explicit: Option<&Path>, workspace_root: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit
        && !path.exists()
    {
        return Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
        });
    }

    for path in candidates(explicit, workspace_root) {
        if !path.is_file() {
            continue;
        }
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        return Config::parse(&content, &path);
    }

    Ok(Config::default())
}
