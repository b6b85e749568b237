//! deadfunc - Whole-program dead function detection
//!
//! Given a type-checked multi-package program, this library determines
//! which declared functions and methods are never reachable from any
//! program entry point and reports them grouped by package, filtered by a
//! package-path pattern, and excluding generated source.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **Program Loading** - Deserialize type-checked program snapshots
//! 2. **IR Lowering** - Expand generic instantiations, synthesize package
//!    initializers, build dispatch tables
//! 3. **Entry-Point Selection** - Find every main package's roots
//! 4. **Reachability** - Over-approximate call-graph traversal from the roots
//! 5. **Declaration Collection** - Enumerate syntactic declarations and
//!    generated files
//! 6. **Dead-Set Resolution** - Position-keyed complement with dedup
//! 7. **Reporting** - Filter, order, and render issues

pub mod analysis;
pub mod config;
pub mod error;
pub mod ir;
pub mod loader;
pub mod report;

pub use analysis::{Analyzer, CallGraphOracle, DeclaredFunction, RapidTypeOracle};
pub use config::Settings;
pub use error::AnalysisError;
pub use loader::{LoadOptions, LoadedProgram, ProgramLoader, SnapshotLoader, SourcePosition};
pub use report::{Issue, PackageFilter, Report};
