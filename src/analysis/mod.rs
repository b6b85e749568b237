//! The analysis pipeline.

mod declarations;
mod entry_points;
mod reachability;
mod resolver;

pub use declarations::{DeclarationCollector, Declarations, DeclaredFunction};
pub use entry_points::EntryPointSelector;
pub use reachability::{CallGraphOracle, RapidTypeOracle, ReachabilityEngine, ReachableSet};
pub use resolver::DeadSetResolver;

use crate::config::Settings;
use crate::error::AnalysisError;
use crate::ir::IrBuilder;
use crate::loader::{LoadOptions, LoadedProgram, ProgramLoader};
use crate::report::{PackageFilter, Report, ReportBuilder};
use tracing::info;

/// Drives the whole pipeline: load, lower, select entry points, compute
/// reachability, collect declarations, resolve the dead set, build the
/// report. One invocation, one consistent whole-program view; every failure
/// is fatal and yields no partial report.
pub struct Analyzer {
    settings: Settings,
    oracle: Box<dyn CallGraphOracle>,
}

impl Analyzer {
    pub fn new(settings: Settings) -> Self {
        Self::with_oracle(settings, Box::new(RapidTypeOracle::new()))
    }

    /// Substitute a different call-graph strategy.
    pub fn with_oracle(settings: Settings, oracle: Box<dyn CallGraphOracle>) -> Self {
        Self { settings, oracle }
    }

    /// Load through the given loader, then analyze.
    pub fn run(&self, loader: &dyn ProgramLoader) -> Result<Report, AnalysisError> {
        let options = LoadOptions {
            include_tests: self.settings.tests,
        };
        let program = loader.load(&options)?;
        self.analyze(&program)
    }

    /// Analyze an already-loaded program.
    pub fn analyze(&self, program: &LoadedProgram) -> Result<Report, AnalysisError> {
        if program.packages.is_empty() {
            return Err(AnalysisError::NoPackages);
        }

        let errors = program.errors();
        if !errors.is_empty() {
            return Err(AnalysisError::PackageErrors(errors));
        }

        // Compile the filter before the heavy passes so a bad pattern fails
        // fast.
        let filter = PackageFilter::from_settings(&self.settings.filter, &program.modules)?;

        let ir = IrBuilder::new().build(program);
        let roots = EntryPointSelector::new().select(program, &ir)?;
        let reachable = ReachabilityEngine::new(self.oracle.as_ref()).compute(&ir, &roots);
        let declarations = DeclarationCollector::new().collect(program, &ir)?;
        let dead = DeadSetResolver::new().resolve(&declarations.functions, &reachable);

        let report = ReportBuilder::new(filter, self.settings.working_dir.clone())
            .build(dead, &declarations.generated);

        info!("Analysis complete: {} issue(s)", report.len());

        Ok(report)
    }
}
