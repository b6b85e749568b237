//! Lowering from the loaded program model into the IR.

use super::{FuncId, FuncKind, IrFunction, IrProgram, INIT_FUNC};
use crate::loader::LoadedProgram;
use tracing::debug;

/// Lowers a [`LoadedProgram`] into an [`IrProgram`].
///
/// Lowering expands every generic declaration into one IR function per
/// instantiation (all sharing the declaration's position and symbol),
/// synthesizes one position-less initializer per package, and records the
/// interface dispatch tables.
pub struct IrBuilder;

impl IrBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, program: &LoadedProgram) -> IrProgram {
        let mut ir = IrProgram::default();

        self.lower_declarations(program, &mut ir);
        self.build_dispatch(program, &mut ir);
        self.synthesize_inits(program, &mut ir);
        self.resolve_callees(program, &mut ir);

        debug!("Lowered {} IR functions", ir.len());

        ir
    }

    /// One IR function per instantiation of every declaration.
    fn lower_declarations(&self, program: &LoadedProgram, ir: &mut IrProgram) {
        for pkg in &program.packages {
            for file in &pkg.files {
                for decl in &file.decls {
                    let copies = decl.instantiations.len().max(1);
                    for _ in 0..copies {
                        ir.push(IrFunction {
                            id: FuncId(0),
                            name: decl.name.clone(),
                            package: pkg.path.clone(),
                            kind: FuncKind::Declared,
                            symbol: Some(decl.symbol.clone()),
                            position: Some(decl.position(file)),
                            callees: Vec::new(),
                            dynamic_calls: decl.dynamic_calls.clone(),
                            interfaces: decl.interfaces.clone(),
                        });
                    }
                }
            }
        }
    }

    /// Interface method tables: (interface, method) -> implementing
    /// functions, for every type satisfying the interface.
    fn build_dispatch(&self, program: &LoadedProgram, ir: &mut IrProgram) {
        for pkg in &program.packages {
            for iface in &pkg.interfaces {
                ir.set_interface_methods(iface.name.clone(), iface.methods.clone());
            }
        }

        for pkg in &program.packages {
            for ty in &pkg.types {
                for iface in &ty.implements {
                    let methods = ir.interface_methods(iface).to_vec();
                    for method in &methods {
                        let Some(symbol) = ty.methods.get(method) else {
                            continue;
                        };
                        let impls = ir.functions_for(symbol).to_vec();
                        for id in impls {
                            ir.add_implementation(iface, method, id);
                        }
                    }
                }
            }
        }
    }

    /// Per-package initializer calling the package's declared `init`
    /// functions and the initializers of imported packages.
    fn synthesize_inits(&self, program: &LoadedProgram, ir: &mut IrProgram) {
        for pkg in &program.packages {
            ir.push(IrFunction {
                id: FuncId(0),
                name: INIT_FUNC.to_string(),
                package: pkg.path.clone(),
                kind: FuncKind::Init,
                symbol: None,
                position: None,
                callees: Vec::new(),
                dynamic_calls: Vec::new(),
                interfaces: Vec::new(),
            });
        }

        for pkg in &program.packages {
            let Some(init_id) = ir.init_of(&pkg.path) else {
                continue;
            };

            let mut callees: Vec<FuncId> = pkg
                .imports
                .iter()
                .filter_map(|import| ir.init_of(import))
                .collect();

            for file in &pkg.files {
                for decl in &file.decls {
                    if decl.name == INIT_FUNC {
                        callees.extend(ir.functions_for(&decl.symbol));
                    }
                }
            }

            ir.set_callees(init_id, callees);
        }
    }

    /// Resolve static call symbols to IR functions. Calls to symbols outside
    /// the loaded program resolve to nothing.
    fn resolve_callees(&self, program: &LoadedProgram, ir: &mut IrProgram) {
        for pkg in &program.packages {
            for file in &pkg.files {
                for decl in &file.decls {
                    let ids = ir.functions_for(&decl.symbol).to_vec();
                    let callees: Vec<FuncId> = decl
                        .calls
                        .iter()
                        .flat_map(|symbol| ir.functions_for(symbol).iter().copied())
                        .collect();

                    for id in ids {
                        ir.set_callees(id, callees.clone());
                    }
                }
            }
        }
    }
}

impl Default for IrBuilder {
    fn default() -> Self {
        Self::new()
    }
}
