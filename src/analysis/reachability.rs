//! Reachability over the whole-program call graph.
//!
//! The call-graph construction itself is a pluggable strategy behind
//! [`CallGraphOracle`]. The default [`RapidTypeOracle`] is over-approximate:
//! it may include call edges never exercised at runtime, but it never omits
//! a true edge. Under-approximation would report live code as dead, the
//! worse failure mode for a linting tool.

use crate::ir::{FuncId, IrProgram};
use crate::loader::SourcePosition;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Every source position transitively invocable from an entry point.
/// Grown while reachability runs, frozen once computed.
pub type ReachableSet = HashSet<SourcePosition>;

/// A conservative call-graph strategy: given the IR and the root set,
/// return every function transitively callable, including virtual and
/// interface-dispatched targets.
pub trait CallGraphOracle {
    fn reachable(&self, program: &IrProgram, roots: &[FuncId]) -> HashSet<FuncId>;
}

/// The default oracle, in the style of rapid type analysis.
///
/// Edges, per function:
/// - its resolved direct callees;
/// - for each interface-dispatched call site, every implementation of that
///   interface method;
/// - for each interface type the function uses at all (parameter types,
///   conversions), every implementation of every method of that interface.
///   A value of the interface type may flow anywhere once the type is in
///   play, so every satisfying method is assumed potentially callable.
pub struct RapidTypeOracle;

impl RapidTypeOracle {
    pub fn new() -> Self {
        Self
    }
}

impl CallGraphOracle for RapidTypeOracle {
    fn reachable(&self, program: &IrProgram, roots: &[FuncId]) -> HashSet<FuncId> {
        let mut graph: DiGraph<FuncId, ()> = DiGraph::new();
        let mut nodes: HashMap<FuncId, NodeIndex> = HashMap::new();

        for function in program.functions() {
            let idx = graph.add_node(function.id);
            nodes.insert(function.id, idx);
        }

        for function in program.functions() {
            let from = nodes[&function.id];

            for callee in &function.callees {
                graph.add_edge(from, nodes[callee], ());
            }

            for call in &function.dynamic_calls {
                for target in program.implementations(&call.interface, &call.method) {
                    graph.add_edge(from, nodes[target], ());
                }
            }

            for interface in &function.interfaces {
                for method in program.interface_methods(interface) {
                    for target in program.implementations(interface, method) {
                        graph.add_edge(from, nodes[target], ());
                    }
                }
            }
        }

        let mut reachable = HashSet::new();
        for root in roots {
            let Some(&start) = nodes.get(root) else {
                continue;
            };
            let mut dfs = Dfs::new(&graph, start);
            while let Some(idx) = dfs.next(&graph) {
                reachable.insert(graph[idx]);
            }
        }

        reachable
    }
}

impl Default for RapidTypeOracle {
    fn default() -> Self {
        Self::new()
    }
}

/// Thin wrapper turning oracle output into the position-keyed
/// [`ReachableSet`] the resolver consumes.
pub struct ReachabilityEngine<'a> {
    oracle: &'a dyn CallGraphOracle,
}

impl<'a> ReachabilityEngine<'a> {
    pub fn new(oracle: &'a dyn CallGraphOracle) -> Self {
        Self { oracle }
    }

    /// Run the oracle from the roots and collect the source position of
    /// every reachable function that has one. Synthesized package
    /// initializers carry no position; declared functions always do.
    pub fn compute(&self, program: &IrProgram, roots: &[FuncId]) -> ReachableSet {
        let reachable = self.oracle.reachable(program, roots);
        debug!(
            "{} of {} IR functions reachable",
            reachable.len(),
            program.len()
        );

        let mut positions = ReachableSet::new();
        for id in reachable {
            if let Some(position) = &program.get(id).position {
                positions.insert(position.clone());
            }
        }

        positions
    }
}
