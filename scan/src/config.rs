//! Run configuration.
//!
//! A run is described by a [`ScanConfig`]. It starts from built-in defaults,
//! can be layered with an optional YAML [`ConfigFile`], and the CLI applies
//! its flags last.
//!
//! # Example YAML
//!
//! ```yaml
//! test_files:
//!   - integration_test/app_test.dart
//! requirements: docs/requirements.md
//! spec_map: docs/specifications-map.md
//! store: true
//! test_functions:
//!   - patrolTest
//! tag_mode: prefix
//! ```

use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::extract::DEFAULT_TEST_FUNCTION;
use crate::tag::TagMode;

/// Where the markdown map is written when storing is enabled.
pub const DEFAULT_SPEC_MAP_PATH: &str = "docs/specifications-map.md";

/// Settings for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Test source files, scanned in this order.
    pub test_files: Vec<PathBuf>,
    /// Requirement table to reconcile against. `None` skips reconciliation.
    pub requirements_file: Option<PathBuf>,
    /// Destination of the stored markdown map.
    pub spec_map_output: PathBuf,
    /// Whether to write the markdown map to `spec_map_output`.
    pub store: bool,
    /// Test function names whose first string argument is a description.
    pub test_functions: Vec<String>,
    pub tag_mode: TagMode,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            test_files: Vec::new(),
            requirements_file: None,
            spec_map_output: PathBuf::from(DEFAULT_SPEC_MAP_PATH),
            store: false,
            test_functions: vec![DEFAULT_TEST_FUNCTION.to_string()],
            tag_mode: TagMode::default(),
        }
    }
}

impl ScanConfig {
    /// Overlays every field set in `file` onto this configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use spec_map_scan::config::{ConfigFile, ScanConfig};
    ///
    /// let file: ConfigFile = serde_yaml::from_str("store: true\nrequirements: reqs.md").unwrap();
    /// let config = ScanConfig::default().with_file(file);
    /// assert!(config.store);
    /// assert_eq!(config.requirements_file.unwrap().to_str(), Some("reqs.md"));
    /// assert_eq!(config.test_functions, ["patrolTest"]);
    /// ```
    pub fn with_file(mut self, file: ConfigFile) -> Self {
        if let Some(test_files) = file.test_files {
            self.test_files = test_files;
        }
        if file.requirements.is_some() {
            self.requirements_file = file.requirements;
        }
        if let Some(spec_map) = file.spec_map {
            self.spec_map_output = spec_map;
        }
        if let Some(store) = file.store {
            self.store = store;
        }
        if let Some(test_functions) = file.test_functions {
            self.test_functions = test_functions;
        }
        if let Some(tag_mode) = file.tag_mode {
            self.tag_mode = tag_mode;
        }
        self
    }
}

/// YAML configuration file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_files: Option<Vec<PathBuf>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_map: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_functions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_mode: Option<TagMode>,
}

impl ConfigFile {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Io`] if the file cannot be read, or
    /// [`ScanError::Config`] if it is not valid configuration YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|err| ScanError::io(path, err))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|source| ScanError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
