//! Dead-set resolution.

use super::declarations::DeclaredFunction;
use super::reachability::ReachableSet;
use crate::ir::INIT_FUNC;
use std::collections::BTreeMap;
use tracing::debug;

/// Computes the complement of the declaration table against the reachable
/// set, grouped by package path.
///
/// Identity is the source position: the IR may hold several functions for
/// one declaration (one per generic instantiation), so the first unreachable
/// declaration at a position claims it and any later declaration at the same
/// position is suppressed. The guard insertion happens unconditionally,
/// which also makes repeated resolution idempotent.
pub struct DeadSetResolver;

impl DeadSetResolver {
    pub fn new() -> Self {
        Self
    }

    /// Pure function of (declarations, reachable set). The caller's set is
    /// not mutated; the guard set is a local clone. An empty reachable set
    /// is legal and reports every declaration.
    pub fn resolve(
        &self,
        declarations: &[DeclaredFunction],
        reachable: &ReachableSet,
    ) -> BTreeMap<String, Vec<DeclaredFunction>> {
        let mut seen = reachable.clone();
        let mut by_package: BTreeMap<String, Vec<DeclaredFunction>> = BTreeMap::new();

        for decl in declarations {
            // Initializers execute implicitly, with or without a call-graph
            // node.
            if decl.name == INIT_FUNC {
                continue;
            }

            // insert doubles as the lookup and the duplicate guard: false
            // means the position was already live or already claimed.
            if seen.insert(decl.position.clone()) {
                debug!("Unreachable: {} ({})", decl.name, decl.position);
                by_package
                    .entry(decl.package.clone())
                    .or_default()
                    .push(decl.clone());
            }
        }

        by_package
    }
}

impl Default for DeadSetResolver {
    fn default() -> Self {
        Self::new()
    }
}
