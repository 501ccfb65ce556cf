//! Catalog configuration
//!
//! ## Configuration Sources (in precedence order)
//!
//! 1. `--data` on the command line (applied by the caller)
//! 2. `CARCOMPARE_DATA` environment variable
//! 3. `./carcompare.yml` - Project-level config
//! 4. `~/.config/carcompare/carcompare.yml` - Global config
//! 5. Built-in defaults
//!
//! ```yaml
//! data_path: Data/cars.json
//! max_compare: 4
//! min_search_year: 1900
//! ```
//!
//! A relative `data_path` is resolved against the directory of the file
//! that set it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::compare::MAX_COMPARED_TRIMS;
use crate::error::CatalogError;
use crate::query::DEFAULT_MIN_SEARCH_YEAR;

/// Environment variable overriding the data file location
pub const DATA_PATH_ENV: &str = "CARCOMPARE_DATA";

/// Config file name looked up in the project and global directories
pub const CONFIG_FILE_NAME: &str = "carcompare.yml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON data file holding the brand tree
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Most trims accepted by one comparison, at most 4
    #[serde(default = "default_max_compare")]
    pub max_compare: usize,

    /// Earliest year accepted in search filters
    #[serde(default = "default_min_search_year")]
    pub min_search_year: i32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            max_compare: default_max_compare(),
            min_search_year: default_min_search_year(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("Data").join("cars.json")
}

fn default_max_compare() -> usize {
    MAX_COMPARED_TRIMS
}

fn default_min_search_year() -> i32 {
    DEFAULT_MIN_SEARCH_YEAR
}

impl CatalogConfig {
    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self =
            serde_yaml_ng::from_str(&content).map_err(|source| CatalogError::Config {
                path: path.to_path_buf(),
                source,
            })?;

        if config.data_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.data_path = dir.join(&config.data_path);
            }
        }

        Ok(config.normalized())
    }

    /// Load a config file, falling back to defaults with a warning
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(config) => {
                debug!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring configuration {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    /// Resolve the configuration from files and the environment
    ///
    /// An explicit config path is used on its own. Otherwise the project
    /// directory is searched first, then the global directory.
    pub fn discover(explicit: Option<&Path>, project_dir: &Path) -> Self {
        Self::discover_in(explicit, project_dir, global_config_dir().as_deref())
    }

    /// [`discover`](Self::discover) with an explicit global directory
    pub fn discover_in(explicit: Option<&Path>, project_dir: &Path, global_dir: Option<&Path>) -> Self {
        let from_files = if let Some(path) = explicit {
            Self::load_or_default(path)
        } else {
            let project_file = project_dir.join(CONFIG_FILE_NAME);
            let global_file = global_dir.map(|dir| dir.join(CONFIG_FILE_NAME));

            if project_file.exists() {
                Self::load_or_default(&project_file)
            } else if let Some(global_file) = global_file.filter(|f| f.exists()) {
                Self::load_or_default(&global_file)
            } else {
                debug!("No configuration file found, using defaults");
                Self::default()
            }
        };

        from_files.with_env_overrides()
    }

    /// Apply `CARCOMPARE_DATA` if set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(path) = std::env::var_os(DATA_PATH_ENV).filter(|v| !v.is_empty()) {
            debug!("Using {} override: {:?}", DATA_PATH_ENV, path);
            self.data_path = PathBuf::from(path);
        }
        self
    }

    /// Apply a command-line data path override
    pub fn with_data_path(mut self, data_path: Option<PathBuf>) -> Self {
        if let Some(path) = data_path {
            self.data_path = path;
        }
        self
    }

    fn normalized(mut self) -> Self {
        self.max_compare = self.max_compare.clamp(1, MAX_COMPARED_TRIMS);
        self
    }
}

/// Platform config directory for carcompare, e.g. `~/.config/carcompare`
pub fn global_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "carcompare").map(|dirs| dirs.config_dir().to_path_buf())
}
