//! Declaration collection.
//!
//! Walks the loaded syntax (not the IR) so the output is expressed in terms
//! of what the user actually wrote, then resolves each declaration through
//! the IR's symbol index to its canonical source position. Also records
//! which files carry the standardized generated-file marker.

use crate::error::AnalysisError;
use crate::ir::IrProgram;
use crate::loader::{LoadedProgram, SourcePosition};
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::debug;

/// Header-line marker identifying machine-generated files, per the
/// standard convention.
const GENERATED_MARKER: &str = r"^// Code generated .* DO NOT EDIT\.$";

fn generated_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(GENERATED_MARKER).expect("marker pattern is valid"))
}

/// A literal function or method declaration found in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredFunction {
    pub name: String,

    /// Enclosing package path
    pub package: String,

    /// Canonical position as resolved through the IR
    pub position: SourcePosition,
}

/// Output of the collector pass: the declaration table and the set of
/// generated files.
#[derive(Debug, Default)]
pub struct Declarations {
    pub functions: Vec<DeclaredFunction>,
    pub generated: HashSet<PathBuf>,
}

pub struct DeclarationCollector;

impl DeclarationCollector {
    pub fn new() -> Self {
        Self
    }

    /// Enumerate every declaration in every loaded package.
    ///
    /// A declaration whose symbol has no identity in the IR means the
    /// loader and the IR builder disagree about the program's shape; that
    /// inconsistency is fatal.
    pub fn collect(
        &self,
        program: &LoadedProgram,
        ir: &IrProgram,
    ) -> Result<Declarations, AnalysisError> {
        let mut out = Declarations::default();

        for pkg in &program.packages {
            for file in &pkg.files {
                if Self::is_generated(file.header.iter().map(String::as_str)) {
                    debug!("Generated file: {}", file.path.display());
                    out.generated.insert(file.path.clone());
                }

                for decl in &file.decls {
                    let ids = ir.functions_for(&decl.symbol);
                    let position = ids
                        .first()
                        .and_then(|id| ir.get(*id).position.clone())
                        .ok_or_else(|| AnalysisError::UnresolvedDeclaration {
                            symbol: decl.symbol.clone(),
                            position: decl.position(file),
                        })?;

                    out.functions.push(DeclaredFunction {
                        name: decl.name.clone(),
                        package: pkg.path.clone(),
                        position,
                    });
                }
            }
        }

        debug!(
            "Collected {} declarations, {} generated file(s)",
            out.functions.len(),
            out.generated.len()
        );

        Ok(out)
    }

    fn is_generated<'a>(header: impl IntoIterator<Item = &'a str>) -> bool {
        let marker = generated_marker();
        header.into_iter().any(|line| marker.is_match(line))
    }
}

impl Default for DeclarationCollector {
    fn default() -> Self {
        Self::new()
    }
}
