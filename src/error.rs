//! Terminal error type for an analysis run.
//!
//! Every variant is fatal: dead-code reporting is only correct over a fully
//! consistent whole-program view, so no partial issue list is ever produced.

use crate::loader::{LoadError, SourcePosition};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The program failed to load at all.
    #[error("failed to load program")]
    Load(#[from] LoadError),

    /// The loader returned zero packages.
    #[error("no packages were loaded")]
    NoPackages,

    /// Loaded packages carry compile errors.
    #[error("loaded packages contain errors:\n{}", .0.join("\n"))]
    PackageErrors(Vec<String>),

    /// No main package exists, so reachability has no roots.
    #[error("no main packages found")]
    NoEntryPoints,

    /// The configured package filter does not compile.
    #[error("invalid filter pattern: {0}")]
    InvalidFilter(#[from] regex::Error),

    /// Several modules were loaded but no filter was configured, so the
    /// default root-module filter is ambiguous.
    #[error("multiple modules loaded ({}); configure an explicit filter", .0.join(", "))]
    MultipleModules(Vec<String>),

    /// A syntactic declaration has no identity in the IR. The loader and
    /// the IR builder disagree about the program's shape.
    #[error("cannot resolve declaration `{symbol}` at {position} against the program IR")]
    UnresolvedDeclaration {
        symbol: String,
        position: SourcePosition,
    },
}
