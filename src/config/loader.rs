//! Configuration loading functionality.

use std::fs;
use std::path::Path;

use crate::error::{ImportError, ImportResult};

use super::types::ImportConfig;

impl ImportConfig {
    /// Loads configuration from a YAML file.
    ///
    /// Missing fields fall back to the DONMAN defaults, so a configuration
    /// file only needs to name what it changes.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use member_import::config::ImportConfig;
    ///
    /// let config = ImportConfig::load("./config/import.yaml")?;
    /// # Ok::<(), member_import::error::ImportError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ImportError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ImportError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })
    }
}
