//! Snapshot deserialization.
//!
//! A *program snapshot* is a JSON document emitted by a compiler front-end
//! after type-checking: one document per module, or one per package spread
//! across a directory tree. The snapshot schema is the program model itself
//! (`LoadedProgram` / `Package`), so loading is deserialization plus merge.

use super::{LoadOptions, LoadedProgram, Package, ProgramLoader};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no snapshot files found under {0}")]
    NoSnapshots(PathBuf),
}

/// One snapshot document as written by the front-end.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SnapshotDoc {
    module: Option<String>,
    packages: Vec<Package>,
}

/// Loads program snapshots from a file or a directory tree.
pub struct SnapshotLoader {
    root: PathBuf,
}

impl SnapshotLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_doc(path: &Path) -> Result<SnapshotDoc, LoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find every `.json` snapshot under a directory, in path order so a
    /// load is deterministic.
    fn discover(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
        let mut found = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| LoadError::Io {
                path: dir.to_path_buf(),
                source: e.into(),
            })?;

            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "json")
            {
                found.push(entry.path().to_path_buf());
            }
        }

        if found.is_empty() {
            return Err(LoadError::NoSnapshots(dir.to_path_buf()));
        }

        Ok(found)
    }
}

impl ProgramLoader for SnapshotLoader {
    fn load(&self, options: &LoadOptions) -> Result<LoadedProgram, LoadError> {
        let files = if self.root.is_dir() {
            Self::discover(&self.root)?
        } else {
            vec![self.root.clone()]
        };

        let mut program = LoadedProgram::default();

        for file in &files {
            debug!("Loading snapshot {}", file.display());
            let doc = Self::read_doc(file)?;

            if let Some(module) = doc.module {
                if !program.modules.contains(&module) {
                    program.modules.push(module);
                }
            }

            for package in doc.packages {
                if package.is_test && !options.include_tests {
                    debug!("Skipping test package {}", package.path);
                    continue;
                }
                program.packages.push(package);
            }
        }

        info!(
            "Loaded {} packages from {} snapshot file(s)",
            program.packages.len(),
            files.len()
        );

        Ok(program)
    }
}
