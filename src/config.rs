//! Configuration for simsync
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority, applied by the command layer)
//! 2. Project config (`.simsync.toml` next to the project)
//! 3. User config (`~/.config/simsync/config.toml`)
//! 4. Built-in defaults (lowest priority)
//!
//! The first config file found wins; project and user files are not merged.
//! Unknown keys are reported as warnings rather than errors so a typo is
//! visible without blocking a run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SimsyncError, SimsyncResult};

/// Project config file name, looked up next to the .xcodeproj bundle
const PROJECT_CONFIG_FILE: &str = ".simsync.toml";

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name of the resource directory next to the project, and of its
    /// mirrors under the build products
    #[serde(default = "default_resource_dir")]
    pub resource_dir: String,

    /// Simulator application-data directory (the Containers/Data/Application
    /// parent); usually passed on the command line instead
    #[serde(default)]
    pub simulator_dir: Option<PathBuf>,

    /// DerivedData root; defaults to the standard per-user location
    #[serde(default)]
    pub derived_data_dir: Option<PathBuf>,

    /// Per-file line output by default
    #[serde(default)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resource_dir: default_resource_dir(),
            simulator_dir: None,
            derived_data_dir: None,
            verbose: false,
        }
    }
}

fn default_resource_dir() -> String {
    "test_resources".to_string()
}

/// Unknown key encountered while reading a config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
}

impl Config {
    /// Load configuration for a project, falling back through the hierarchy.
    /// Missing files are fine; a malformed file is an error.
    pub fn load(project_parent: Option<&Path>) -> SimsyncResult<(Self, Vec<ConfigWarning>)> {
        if let Some(parent) = project_parent {
            let project_file = parent.join(PROJECT_CONFIG_FILE);
            if project_file.is_file() {
                return Self::from_file(&project_file);
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_file = config_dir.join("simsync/config.toml");
            if user_file.is_file() {
                return Self::from_file(&user_file);
            }
        }

        Ok((Self::default(), Vec::new()))
    }

    /// Parse one config file, collecting unknown keys as warnings
    pub fn from_file(path: &Path) -> SimsyncResult<(Self, Vec<ConfigWarning>)> {
        let text = fs::read_to_string(path)?;

        let mut warnings = Vec::new();
        let de = toml::de::Deserializer::new(&text);
        let config = serde_ignored::deserialize(de, |ignored| {
            warnings.push(ConfigWarning {
                key: ignored.to_string(),
            });
        })
        .map_err(|e| SimsyncError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok((config, warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.resource_dir, "test_resources");
        assert!(config.simulator_dir.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_from_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(PROJECT_CONFIG_FILE);
        fs::write(
            &file,
            "resource_dir = \"fixtures\"\nverbose = true\n",
        )
        .unwrap();

        let (config, warnings) = Config::from_file(&file).unwrap();
        assert_eq!(config.resource_dir, "fixtures");
        assert!(config.verbose);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unknown_keys_warn_without_failing() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(PROJECT_CONFIG_FILE);
        fs::write(&file, "resource_dirr = \"fixtures\"\n").unwrap();

        let (config, warnings) = Config::from_file(&file).unwrap();
        assert_eq!(config.resource_dir, "test_resources");
        assert_eq!(
            warnings,
            vec![ConfigWarning {
                key: "resource_dirr".to_string()
            }]
        );
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(PROJECT_CONFIG_FILE);
        fs::write(&file, "resource_dir = [broken\n").unwrap();

        let err = Config::from_file(&file).unwrap_err();
        assert!(matches!(err, SimsyncError::InvalidConfig { .. }));
    }

    #[test]
    fn test_load_prefers_project_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "resource_dir = \"project_resources\"\n",
        )
        .unwrap();

        let (config, _) = Config::load(Some(dir.path())).unwrap();
        assert_eq!(config.resource_dir, "project_resources");
    }
}
