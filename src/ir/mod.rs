//! Function-level intermediate representation.
//!
//! The IR is what the call-graph oracle consumes: one function node per
//! generic instantiation, a synthesized initializer per package, and the
//! dispatch tables for interface calls. Every declared IR function carries
//! the source position of its declaration; instantiations of one generic
//! declaration all share that declaration's position.

mod lower;

pub use lower::IrBuilder;

use crate::loader::{DynamicCall, SourcePosition};
use std::collections::HashMap;

/// Name of the implicit package initializer. Initializers execute without
/// any call site in source, so they are always treated as reachable.
pub const INIT_FUNC: &str = "init";

/// Index of a function within an [`IrProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FuncId(u32);

impl FuncId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuncKind {
    /// A function lowered from a source declaration
    Declared,
    /// A synthesized package initializer; has no source position
    Init,
}

/// One function in the IR.
#[derive(Debug, Clone)]
pub struct IrFunction {
    pub id: FuncId,
    pub name: String,
    pub package: String,
    pub kind: FuncKind,

    /// Symbol of the originating declaration; `None` for synthesized
    /// initializers
    pub symbol: Option<String>,

    /// Position of the originating declaration; `None` for synthesized
    /// initializers
    pub position: Option<SourcePosition>,

    /// Resolved direct callees
    pub callees: Vec<FuncId>,

    /// Interface-dispatched call sites
    pub dynamic_calls: Vec<DynamicCall>,

    /// Interface types used by this function
    pub interfaces: Vec<String>,
}

/// The lowered whole-program representation.
#[derive(Debug, Default)]
pub struct IrProgram {
    functions: Vec<IrFunction>,

    /// Symbol to every instantiation of its declaration
    by_symbol: HashMap<String, Vec<FuncId>>,

    /// Package path to synthesized initializer
    inits: HashMap<String, FuncId>,

    /// (interface, method) to implementing functions
    dispatch: HashMap<(String, String), Vec<FuncId>>,

    /// Interface name to its method names
    interface_methods: HashMap<String, Vec<String>>,
}

impl IrProgram {
    pub fn functions(&self) -> &[IrFunction] {
        &self.functions
    }

    pub fn get(&self, id: FuncId) -> &IrFunction {
        &self.functions[id.index()]
    }

    /// All IR functions lowered from the declaration with this symbol.
    /// Empty when the symbol is unknown to the IR.
    pub fn functions_for(&self, symbol: &str) -> &[FuncId] {
        self.by_symbol.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The synthesized initializer of a package.
    pub fn init_of(&self, package: &str) -> Option<FuncId> {
        self.inits.get(package).copied()
    }

    /// Implementations of an interface method across all types.
    pub fn implementations(&self, interface: &str, method: &str) -> &[FuncId] {
        self.dispatch
            .get(&(interface.to_string(), method.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Method names of an interface.
    pub fn interface_methods(&self, interface: &str) -> &[String] {
        self.interface_methods
            .get(interface)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub(crate) fn push(&mut self, mut function: IrFunction) -> FuncId {
        let id = FuncId(self.functions.len() as u32);
        function.id = id;

        if let Some(symbol) = &function.symbol {
            self.by_symbol.entry(symbol.clone()).or_default().push(id);
        }
        if function.kind == FuncKind::Init {
            self.inits.insert(function.package.clone(), id);
        }

        self.functions.push(function);
        id
    }

    pub(crate) fn set_callees(&mut self, id: FuncId, callees: Vec<FuncId>) {
        self.functions[id.index()].callees = callees;
    }

    pub(crate) fn add_implementation(&mut self, interface: &str, method: &str, id: FuncId) {
        self.dispatch
            .entry((interface.to_string(), method.to_string()))
            .or_default()
            .push(id);
    }

    pub(crate) fn set_interface_methods(&mut self, interface: String, methods: Vec<String>) {
        self.interface_methods.insert(interface, methods);
    }
}
