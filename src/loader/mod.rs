//! Program loading.
//!
//! The analysis operates on a *type-checked* program model produced by a
//! compiler front-end. This module defines that model, the [`ProgramLoader`]
//! trait behind which a front-end integration sits, and the default
//! [`SnapshotLoader`] which deserializes program snapshots from disk.

mod snapshot;

pub use snapshot::{LoadError, SnapshotLoader};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Options controlling what the loader includes.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Include test-only packages (and their entry points).
    pub include_tests: bool,
}

/// A position in source code, the unit of identity for correlating IR
/// functions with syntactic declarations: two entities with an equal
/// position are the same declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    /// File path as reported by the front-end (absolute)
    pub file: PathBuf,
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed)
    pub column: u32,
}

impl SourcePosition {
    pub fn new(file: PathBuf, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A fully loaded, type-checked program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadedProgram {
    /// Module paths the loaded packages belong to
    pub modules: Vec<String>,

    /// All loaded packages
    pub packages: Vec<Package>,
}

impl LoadedProgram {
    /// Collect compile errors across all packages.
    pub fn errors(&self) -> Vec<String> {
        self.packages
            .iter()
            .flat_map(|pkg| pkg.errors.iter().cloned())
            .collect()
    }
}

/// One compilation unit with its syntax and type facts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    /// Package path (e.g. "app/internal/util")
    pub path: String,

    /// Whether this package provides a runnable program entry
    #[serde(rename = "main")]
    pub is_main: bool,

    /// Whether this is a test-only package
    #[serde(rename = "test")]
    pub is_test: bool,

    /// Paths of directly imported packages
    pub imports: Vec<String>,

    /// Source files with their declarations
    pub files: Vec<SourceFile>,

    /// Named types declared in this package
    pub types: Vec<TypeDef>,

    /// Interfaces declared in this package
    pub interfaces: Vec<InterfaceDef>,

    /// Compile errors reported by the front-end
    pub errors: Vec<String>,
}

/// A source file: its path, leading header comments, and every literal
/// function or method declaration it contains.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFile {
    pub path: PathBuf,

    /// Comment lines preceding the package clause, used for the
    /// generated-file marker convention
    pub header: Vec<String>,

    pub decls: Vec<FuncDecl>,
}

/// A literal function or method declaration, with the call facts the
/// front-end extracted from its body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FuncDecl {
    /// Declared name ("helper", "M")
    pub name: String,

    /// Compiler-assigned symbol, stable across the whole program
    /// (e.g. "app.helper", "(app.T).M")
    pub symbol: String,

    /// Declaration line (1-indexed)
    pub line: u32,

    /// Declaration column (1-indexed)
    pub column: u32,

    /// Symbols called directly from the body
    pub calls: Vec<String>,

    /// Interface-dispatched call sites in the body
    pub dynamic_calls: Vec<DynamicCall>,

    /// Interface types used in the signature or body (parameter types,
    /// conversions, assertions)
    pub interfaces: Vec<String>,

    /// Generic instantiation labels; empty for non-generic declarations
    pub instantiations: Vec<String>,
}

impl FuncDecl {
    /// The declaration's source position within `file`.
    pub fn position(&self, file: &SourceFile) -> SourcePosition {
        SourcePosition::new(file.path.clone(), self.line, self.column)
    }
}

/// A call dispatched through an interface method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicCall {
    pub interface: String,
    pub method: String,
}

/// A named type and its method set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDef {
    pub name: String,

    /// Interfaces this type satisfies
    pub implements: Vec<String>,

    /// Method name to method symbol
    pub methods: HashMap<String, String>,
}

/// An interface and its method names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceDef {
    pub name: String,
    pub methods: Vec<String>,
}

/// Loads, or fails to load, a complete type-checked program.
///
/// The default implementation is [`SnapshotLoader`]; a host embedding the
/// analysis can substitute its own front-end integration.
pub trait ProgramLoader {
    fn load(&self, options: &LoadOptions) -> Result<LoadedProgram, LoadError>;
}
