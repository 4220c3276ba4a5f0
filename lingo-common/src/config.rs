//! Configuration loading and config file resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "LINGO_CONFIG";

/// Config file name looked up in the user config dir and the working directory
pub const CONFIG_FILE_NAME: &str = "lingo.toml";

/// A module (plugin/bundle) that ships its own translation files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// Module name, as accepted by the positional `bundle` argument
    pub name: String,
    /// Module root directory (relative paths resolve against `project_dir`)
    pub path: PathBuf,
    /// Name of the module this one extends, if any
    #[serde(default)]
    pub parent: Option<String>,
}

/// Lingo configuration file contents
///
/// All relative paths are resolved against `project_dir`, which itself is
/// resolved against the directory holding the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LingoConfig {
    /// Application root directory
    pub project_dir: PathBuf,
    /// SQLite translation store
    pub database: PathBuf,
    /// Compiled translation catalogue cache
    pub cache_dir: PathBuf,
    /// Canonical application resources directory (global module overrides live here)
    pub resources_dir: PathBuf,
    /// Application-level translation directory
    pub translations_dir: PathBuf,
    /// Locales imported when the run names none
    pub managed_locales: Vec<String>,
    /// Optional allow-list restricting the supported file formats
    pub formats: Option<Vec<String>>,
    /// Registered modules, in registration order
    pub modules: Vec<ModuleEntry>,
    /// Third-party component name -> translation directory
    pub components: BTreeMap<String, PathBuf>,
}

impl Default for LingoConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            database: PathBuf::from("var/lingo.db"),
            cache_dir: PathBuf::from("var/cache/translations"),
            resources_dir: PathBuf::from("app/Resources"),
            translations_dir: PathBuf::from("translations"),
            managed_locales: Vec::new(),
            formats: None,
            modules: Vec::new(),
            components: BTreeMap::new(),
        }
    }
}

impl LingoConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LingoConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, anchoring a relative `project_dir` at the file's directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        let mut config = Self::from_toml_str(&content)?;

        if config.project_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.project_dir = parent.join(&config.project_dir);
            }
        }

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the resolved config file, or fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check structural consistency (unique, non-empty module names)
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for module in &self.modules {
            if module.name.trim().is_empty() {
                return Err(Error::Config("Module with empty name".to_string()));
            }
            if !seen.insert(module.name.as_str()) {
                return Err(Error::Config(format!(
                    "Module \"{}\" registered twice",
                    module.name
                )));
            }
        }

        if self.managed_locales.iter().any(|l| l.trim().is_empty()) {
            return Err(Error::Config("managed_locales contains an empty locale".to_string()));
        }

        Ok(())
    }

    /// Resolve a configured path against `project_dir`
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.resolve_path(&self.database)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.resolve_path(&self.cache_dir)
    }

    pub fn resources_path(&self) -> PathBuf {
        self.resolve_path(&self.resources_dir)
    }

    pub fn translations_path(&self) -> PathBuf {
        self.resolve_path(&self.translations_dir)
    }
}

/// Config file resolution in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. User config directory (`~/.config/lingo/lingo.toml` on Linux)
/// 4. `lingo.toml` in the working directory
///
/// Returns `None` when nothing exists, meaning built-in defaults apply.
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: User config directory
    if let Some(user_config) = dirs::config_dir().map(|d| d.join("lingo").join(CONFIG_FILE_NAME)) {
        if user_config.exists() {
            return Some(user_config);
        }
    }

    // Priority 4: Working directory
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    None
}
