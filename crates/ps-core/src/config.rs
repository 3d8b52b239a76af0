use crate::error::{PlagError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Run-scoped settings, passed explicitly to the runner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Command used to launch the JVM.
    pub java_cmd: String,
    pub jplag_jar: PathBuf,
    /// Directory the detector writes its reports into. Cleared on runner start.
    pub report_dir: PathBuf,
    pub clustering: bool,
    /// Strip same-author comparisons from successful runs.
    pub filter_runs_by_author: bool,
    pub ignore_unsupported_language: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            java_cmd: "java".into(),
            jplag_jar: PathBuf::from("./dependencies/jplag.jar"),
            report_dir: PathBuf::from("./reports"),
            clustering: true,
            filter_runs_by_author: false,
            ignore_unsupported_language: false,
        }
    }
}

impl Settings {
    /// Parse settings from TOML. Missing keys fall back to defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PlagError::Config(e.to_string()))
    }

    /// Load settings from an optional TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    PlagError::Config(format!("read {}: {e}", path.display()))
                })?;
                Self::from_toml(&content)
            }
            None => Ok(Self::default()),
        }
    }
}
