//! Filtering and report construction.

mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::analysis::DeclaredFunction;
use crate::error::AnalysisError;
use crate::loader::SourcePosition;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Which package paths get reported.
#[derive(Debug, Clone)]
pub enum PackageFilter {
    /// No filter configured and no module known: match everything
    All,

    /// No filter configured: packages at or under the root module's path,
    /// so dependencies outside the analyzed module are never reported
    ModulePrefix(String),

    /// A configured regular expression
    Pattern(Regex),
}

impl PackageFilter {
    /// Derive the filter from the configured pattern and the loaded module
    /// paths. A configured pattern that does not compile is a fatal
    /// configuration error; an absent pattern anchors on the single loaded
    /// module, and refuses to guess when several modules were loaded.
    pub fn from_settings(pattern: &str, modules: &[String]) -> Result<Self, AnalysisError> {
        if !pattern.is_empty() {
            return Ok(Self::Pattern(Regex::new(pattern)?));
        }

        match modules {
            [] => Ok(Self::All),
            [module] => Ok(Self::ModulePrefix(module.clone())),
            _ => Err(AnalysisError::MultipleModules(modules.to_vec())),
        }
    }

    pub fn matches(&self, package: &str) -> bool {
        match self {
            Self::All => true,
            Self::ModulePrefix(module) => {
                package == module
                    || package
                        .strip_prefix(module.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            Self::Pattern(regex) => regex.is_match(package),
        }
    }
}

/// One dead function, as surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Declared function name
    pub func: String,

    /// File path relative to the working directory
    pub file: PathBuf,

    /// Declaration line (1-indexed)
    pub line: u32,

    /// Absolute position, for mapping back into a syntax node
    pub position: SourcePosition,
}

impl Issue {
    /// The diagnostic message a host attaches at the declaration.
    pub fn message(&self) -> String {
        format!("func '{}' is unused", self.func)
    }
}

/// The ordered issue list for one analysis run.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    issues: Vec<Issue>,
}

impl Report {
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether a dead function declaration sits at this line of this file
    /// (path relative to the working directory). Hosts use this to place
    /// diagnostics on concrete syntax nodes.
    pub fn dead_at(&self, file: &Path, line: u32) -> Option<&Issue> {
        self.issues
            .iter()
            .find(|issue| issue.line == line && issue.file == file)
    }
}

/// Builds the final report from the resolver's grouped output.
pub struct ReportBuilder {
    filter: PackageFilter,
    working_dir: PathBuf,
}

impl ReportBuilder {
    pub fn new(filter: PackageFilter, working_dir: PathBuf) -> Self {
        Self {
            filter,
            working_dir,
        }
    }

    /// Apply the package filter and the generated-file exclusion, then
    /// flatten to the ordered issue list: package path ascending, discovery
    /// order within a package.
    pub fn build(
        &self,
        dead: BTreeMap<String, Vec<DeclaredFunction>>,
        generated: &HashSet<PathBuf>,
    ) -> Report {
        let mut issues = Vec::new();

        for (package, functions) in dead {
            if !self.filter.matches(&package) {
                continue;
            }

            for function in functions {
                if generated.contains(&function.position.file) {
                    continue;
                }

                issues.push(Issue {
                    func: function.name,
                    file: self.relativize(&function.position.file),
                    line: function.position.line,
                    position: function.position,
                });
            }
        }

        Report { issues }
    }

    /// Path relative to the working directory; files outside it keep their
    /// absolute path.
    fn relativize(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.working_dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
