//! `DeclarationRHS`: what a name bound in a [`crate::scope::Scope`]
//! actually denotes.

use crate::ast::resolved::ExpressionSite;
use crate::ty::{FormalParams, Type};

/// The resolved right-hand side of a declaration. A `Scope` binding always
/// points to one of these (wrapped in the binding's own `Result`), never to
/// a raw, unresolved AST fragment: by the time a `DeclarationRHS` exists,
/// every name it embeds has itself been name-checked.
#[derive(Clone, Debug)]
pub enum DeclarationRHS {
    DeclaredConstant(ExpressionSite),
    DeclaredType(Type),
    DeclaredVariable(Type),
    DeclaredProcedure {
        is_builtin: bool,
        formal_params: Option<FormalParams>,
    },
}

impl DeclarationRHS {
    pub fn procedure(is_builtin: bool, formal_params: Option<FormalParams>) -> Self {
        DeclarationRHS::DeclaredProcedure { is_builtin, formal_params }
    }

    pub fn is_type(&self) -> bool {
        matches!(self, DeclarationRHS::DeclaredType(_))
    }

    pub fn is_procedure(&self) -> bool {
        matches!(self, DeclarationRHS::DeclaredProcedure { .. })
    }

    /// True for builtin (SYSTEM-module) procedures, which uniquely accept
    /// types as call arguments (`SIZE(INTEGER)`).
    pub fn is_builtin_procedure(&self) -> bool {
        matches!(self, DeclarationRHS::DeclaredProcedure { is_builtin: true, .. })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            DeclarationRHS::DeclaredConstant(_) => "constant",
            DeclarationRHS::DeclaredType(_) => "type",
            DeclarationRHS::DeclaredVariable(_) => "variable",
            DeclarationRHS::DeclaredProcedure { .. } => "procedure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_procedure_is_recognized() {
        let rhs = DeclarationRHS::procedure(true, None);
        assert!(rhs.is_procedure());
        assert!(rhs.is_builtin_procedure());
        assert_eq!(rhs.kind_name(), "procedure");
    }

    #[test]
    fn user_procedure_is_not_builtin() {
        let rhs = DeclarationRHS::procedure(false, None);
        assert!(!rhs.is_builtin_procedure());
    }
}
