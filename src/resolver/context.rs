//! The resolution context threaded through the traversal: which modules are
//! visible, the current scope, and what kind of position is being resolved.

use crate::collections::IndexMap;
use crate::ident::Ident;
use crate::scope::Scope;

/// Governs whether `DeclaredType` is an acceptable resolution for a bare
/// identifier: it is a value error (`NotAValue`) everywhere except
/// `ExpressionOrTypeState`, which arises resolving a builtin function
/// call's arguments (`SIZE(INTEGER)`) and a type-guard's subtype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionState {
    Module,
    Declaration,
    Statement,
    Expression,
    ExpressionOrType,
}

impl ResolutionState {
    pub fn allows_type_as_value(self) -> bool {
        matches!(self, ResolutionState::ExpressionOrType)
    }
}

/// The immutable table of visible modules, paired with the current scope
/// and resolution state. Cheap to clone: module table and scope are both
/// backed by cheaply-cloneable maps, matching the traversal's need to carry
/// a fresh `Context` into every nested scope without mutating a shared one.
#[derive(Clone)]
pub struct Context {
    /// Export scope of every module reachable from the module currently
    /// being resolved, keyed by the local alias it was imported under.
    /// A module that itself failed to resolve contributes an empty scope,
    /// so every lookup into it surfaces as `UnknownImport` rather than
    /// `UnknownModule` (it *was* found, it just has nothing usable).
    pub imports: IndexMap<Ident, Scope>,
    pub scope: Scope,
    pub state: ResolutionState,
    /// Whether the language variant being resolved has type-bound
    /// procedures at all (Oberon-2 does, Oberon-1 does not); consulted by
    /// `resolve_heading` to reject a `TypeBound` heading outright when it
    /// doesn't.
    pub supports_type_bound_procedures: bool,
}

impl Context {
    pub fn new(imports: IndexMap<Ident, Scope>, scope: Scope) -> Self {
        Context { imports, scope, state: ResolutionState::Module, supports_type_bound_procedures: true }
    }

    pub fn with_state(&self, state: ResolutionState) -> Self {
        Context { state, ..self.clone() }
    }

    pub fn with_scope(&self, scope: Scope) -> Self {
        Context { scope, ..self.clone() }
    }

    pub fn with_type_bound_support(&self, supports_type_bound_procedures: bool) -> Self {
        Context { supports_type_bound_procedures, ..self.clone() }
    }
}
