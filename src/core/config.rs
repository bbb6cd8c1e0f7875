//! Configuration.
//!
//! Resolves the process-wide settings (manifest directory, controller
//! namespace, default namespace) once at startup. Values come from command
//! line flags or their environment variables, then an optional `.ssm.toml`
//! (project) or `<config dir>/ssm/config.toml` (user) settings file, then
//! built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Contents of a settings file. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory holding sealed manifests.
    pub dir: Option<PathBuf>,
    /// Namespace of the sealed-secrets controller.
    pub controller_namespace: Option<String>,
    /// Namespace used when a command is given none.
    pub namespace: Option<String>,
}

impl Settings {
    /// Load the project settings file, else the user one, else defaults.
    pub fn discover() -> Result<Self> {
        let project = PathBuf::from(constants::SETTINGS_FILE);
        if project.is_file() {
            return Self::from_path(&project);
        }
        if let Some(user) = Self::user_path() {
            if user.is_file() {
                return Self::from_path(&user);
            }
        }
        Ok(Self::default())
    }

    /// `<config dir>/ssm/config.toml`.
    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ssm").join("config.toml"))
    }

    /// Parse a specific settings file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse`.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading settings");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(settings)
    }
}

/// Resolved configuration threaded through every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where sealed manifests are read and written.
    pub directory: PathBuf,
    /// Passed to the sealing utility.
    pub controller_namespace: String,
    /// Used when a command is given no namespace.
    pub default_namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(None, None, Settings::default())
    }
}

impl Config {
    /// Merge explicit values over a settings file over defaults.
    pub fn resolve(
        dir: Option<PathBuf>,
        controller_namespace: Option<String>,
        settings: Settings,
    ) -> Self {
        let directory = dir
            .or(settings.dir)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let config = Self {
            directory,
            controller_namespace: controller_namespace
                .or(settings.controller_namespace)
                .unwrap_or_else(|| constants::DEFAULT_CONTROLLER_NAMESPACE.to_string()),
            default_namespace: settings
                .namespace
                .unwrap_or_else(|| constants::DEFAULT_NAMESPACE.to_string()),
        };
        debug!(
            directory = %config.directory.display(),
            controller_namespace = %config.controller_namespace,
            "configuration resolved"
        );
        config
    }

    /// `<directory>/<name>.yaml`.
    pub fn manifest_path(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{}.yaml", name))
    }

    /// The given namespace, or the default one.
    pub fn namespace_or_default(&self, namespace: Option<&str>) -> String {
        namespace
            .map(str::to_string)
            .unwrap_or_else(|| self.default_namespace.clone())
    }
}
