//! Analysis settings.

use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for a dead-function analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Include test-only packages and their entry points
    pub tests: bool,

    /// Package-path filter (regular expression). Empty means: report only
    /// packages at or under the root module's path.
    pub filter: String,

    /// Directory issue file paths are made relative to. Passed explicitly
    /// so the analysis stays reentrant and testable.
    pub working_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tests: false,
            filter: String::new(),
            working_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Load settings from a TOML, YAML, or JSON file, dispatched on the
    /// file extension (TOML when unrecognized).
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let settings = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("failed to parse YAML config")?,
            "json" => serde_json::from_str(&contents)
                .into_diagnostic()
                .wrap_err("failed to parse JSON config")?,
            _ => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("failed to parse TOML config")?,
        };

        Ok(settings)
    }
}
