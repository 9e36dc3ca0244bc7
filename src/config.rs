//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/mindtree/mindtree.toml`
//! 3. Local config: `<dir>/.mindtree.toml` (usually the working directory)
//! 4. Environment variables: `MINDTREE_*` prefix
//!
//! The command line can override `max_depth` on top of all of these.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::DEFAULT_MAX_DEPTH;

/// Unified configuration for mindtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Deepest item nesting accepted before conversion fails
    pub max_depth: usize,
    /// Emit JSON as the one-element `[root]` sequence chart widgets expect
    pub wrap_output: bool,
    /// Pretty-print JSON output
    pub pretty_json: bool,
    /// Root name used by `new` when none is given
    pub root_template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            wrap_output: true,
            pretty_json: true,
            root_template: "Root".into(),
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_depth: Option<usize>,
    pub wrap_output: Option<bool>,
    pub pretty_json: Option<bool>,
    pub root_template: Option<String>,
}

/// Get the XDG config directory for mindtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mindtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("mindtree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".mindtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            wrap_output: overlay.wrap_output.unwrap_or(self.wrap_output),
            pretty_json: overlay.pretty_json.unwrap_or(self.pretty_json),
            root_template: overlay
                .root_template
                .clone()
                .unwrap_or_else(|| self.root_template.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory searched for `.mindtree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current, Environment::with_prefix("MINDTREE"))?;
        current.validate()?;

        Ok(current)
    }

    /// Apply MINDTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env.try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<usize>("max_depth") {
            settings.max_depth = val;
        }
        if let Ok(val) = config.get_bool("wrap_output") {
            settings.wrap_output = val;
        }
        if let Ok(val) = config.get_bool("pretty_json") {
            settings.pretty_json = val;
        }
        if let Ok(val) = config.get_string("root_template") {
            settings.root_template = val;
        }

        Ok(settings)
    }

    /// Reject values the converter cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_depth == 0 {
            return Err(ApplicationError::Config {
                message: "max_depth must be at least 1".to_string(),
            });
        }
        if self.root_template.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "root_template must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# mindtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/mindtree/mindtree.toml
#   Local:  ./.mindtree.toml
#   Env:    MINDTREE_* environment variables
#   CLI:    --max-depth

# Deepest item nesting accepted before conversion fails
# max_depth = 1000

# Emit JSON wrapped as a one-element list: [ {name, children} ]
# wrap_output = true

# Pretty-print JSON output
# pretty_json = true

# Root name used by `mindtree new` when --root is not given
# root_template = "Root"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
