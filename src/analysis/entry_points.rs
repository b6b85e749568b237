//! Entry-point selection.

use crate::error::AnalysisError;
use crate::ir::{FuncId, IrProgram};
use crate::loader::LoadedProgram;
use tracing::{debug, info};

/// Selects the reachability roots: for every main package, its synthesized
/// initializer and its `main` function. Initializers and `main` are invoked
/// by the runtime with no call site in source.
pub struct EntryPointSelector;

impl EntryPointSelector {
    pub fn new() -> Self {
        Self
    }

    /// Enumerate all roots, or fail with [`AnalysisError::NoEntryPoints`]
    /// when the program has no main package. Reachability is undefined
    /// without roots, so there is no partial result.
    pub fn select(
        &self,
        program: &LoadedProgram,
        ir: &IrProgram,
    ) -> Result<Vec<FuncId>, AnalysisError> {
        let mut roots = Vec::new();
        let mut mains = 0usize;

        for pkg in program.packages.iter().filter(|pkg| pkg.is_main) {
            mains += 1;
            debug!("Main package: {}", pkg.path);

            if let Some(init) = ir.init_of(&pkg.path) {
                roots.push(init);
            }

            for file in &pkg.files {
                for decl in &file.decls {
                    if decl.name == "main" {
                        roots.extend(ir.functions_for(&decl.symbol));
                    }
                }
            }
        }

        if mains == 0 {
            return Err(AnalysisError::NoEntryPoints);
        }

        info!(
            "Selected {} entry points from {} main package(s)",
            roots.len(),
            mains
        );

        Ok(roots)
    }
}

impl Default for EntryPointSelector {
    fn default() -> Self {
        Self::new()
    }
}
