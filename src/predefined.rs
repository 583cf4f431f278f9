//! The predefined (universal) environment every module's global scope is
//! layered over (spec §4.5): the basic types, the two boolean constants,
//! and the built-in procedures.
//!
//! Oberon and Oberon-2 share this almost entirely; the source abstracts the
//! difference behind a small [`Dialect`] trait (§9, "Polymorphism over
//! language variants") rather than branching on a language flag throughout
//! the disambiguator.

use crate::decl::DeclarationRHS;
use crate::ident::{Ident, Placed, QualIdent};
use crate::scope::{Bindings, Scope};
use crate::ty::{FormalParam, FormalParams, Type};

/// Factors the language-specific pieces of the resolver: which names are
/// predefined, which of those accept a type as an argument, and whether
/// type-bound procedures and the `WITH` guard form exist at all.
pub trait Dialect {
    fn predefined_scope(&self) -> Scope;
    fn is_builtin_procedure_name(&self, name: &str) -> bool;
    fn supports_type_bound_procedures(&self) -> bool;
}

pub struct Oberon;
pub struct Oberon2;

const BUILTIN_TYPES: &[&str] =
    &["BOOLEAN", "CHAR", "SHORTINT", "INTEGER", "LONGINT", "REAL", "LONGREAL", "SET"];

/// `MAX`, `MIN`, `SIZE` alone accept a type as their argument, e.g.
/// `SIZE(INTEGER)`; every other predefined procedure is ordinary.
const TYPE_ACCEPTING_PROCEDURES: &[&str] = &["MAX", "MIN", "SIZE"];

const ORDINARY_PROCEDURES: &[&str] = &[
    "ABS", "ASH", "CAP", "LEN", "ODD", "ORD", "CHR", "SHORT", "LONG", "ENTIER", "INC", "DEC",
    "INCL", "EXCL", "COPY", "NEW", "HALT",
];

impl Dialect for Oberon {
    fn predefined_scope(&self) -> Scope {
        base_scope()
    }

    fn is_builtin_procedure_name(&self, name: &str) -> bool {
        TYPE_ACCEPTING_PROCEDURES.contains(&name)
    }

    fn supports_type_bound_procedures(&self) -> bool {
        false
    }
}

impl Dialect for Oberon2 {
    fn predefined_scope(&self) -> Scope {
        let mut bindings = base_bindings();
        bindings.insert(Ident::new("ASSERT"), 0, Ok(ordinary_procedure("ASSERT")));
        Scope::layer(&Scope::empty(), bindings)
    }

    fn is_builtin_procedure_name(&self, name: &str) -> bool {
        TYPE_ACCEPTING_PROCEDURES.contains(&name)
    }

    fn supports_type_bound_procedures(&self) -> bool {
        true
    }
}

/// The Oberon-1 predefined environment.
pub fn predefined() -> Scope {
    Oberon.predefined_scope()
}

/// The Oberon-2 predefined environment: `predefined()` plus `ASSERT`.
pub fn predefined2() -> Scope {
    Oberon2.predefined_scope()
}

fn base_scope() -> Scope {
    Scope::layer(&Scope::empty(), base_bindings())
}

fn base_bindings() -> Bindings {
    let mut bindings = Bindings::new();

    for name in BUILTIN_TYPES {
        bindings.insert(
            Ident::new(*name),
            0,
            Ok(DeclarationRHS::DeclaredType(Type::named(0, QualIdent::unqualified(*name)))),
        );
    }

    bindings.insert(Ident::new("TRUE"), 0, Ok(boolean_constant(true)));
    bindings.insert(Ident::new("FALSE"), 0, Ok(boolean_constant(false)));

    for name in TYPE_ACCEPTING_PROCEDURES {
        bindings.insert(Ident::new(*name), 0, Ok(builtin_procedure(name)));
    }
    for name in ORDINARY_PROCEDURES {
        bindings.insert(Ident::new(*name), 0, Ok(ordinary_procedure(name)));
    }

    bindings
}

fn boolean_constant(value: bool) -> DeclarationRHS {
    DeclarationRHS::DeclaredConstant(Placed::new(0, crate::ast::resolved::Expression::BooleanLiteral(value)))
}

/// A predefined procedure's formal parameters are never checked against a
/// call site (no type-checking, by non-goal), so a single opaque parameter
/// named after the pseudo-type it stands in for is enough to keep the
/// binding's `kind_name()` reporting "procedure" and nothing more.
fn opaque_signature(tag: &str) -> FormalParams {
    FormalParams {
        params: vec![FormalParam { name: Ident::new("x"), ty: Type::opaque(0, tag), by_reference: false }],
        return_type: None,
    }
}

fn builtin_procedure(name: &str) -> DeclarationRHS {
    DeclarationRHS::procedure(true, Some(opaque_signature(name)))
}

fn ordinary_procedure(name: &str) -> DeclarationRHS {
    DeclarationRHS::procedure(false, Some(opaque_signature(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_includes_basic_types_and_builtins() {
        let scope = predefined();
        assert!(scope.lookup(&Ident::new("INTEGER")).unwrap().as_ref().unwrap().is_type());
        let size = scope.lookup(&Ident::new("SIZE")).unwrap().as_ref().unwrap();
        assert!(size.is_builtin_procedure());
        let abs = scope.lookup(&Ident::new("ABS")).unwrap().as_ref().unwrap();
        assert!(abs.is_procedure());
        assert!(!abs.is_builtin_procedure());
        assert!(!scope.contains(&Ident::new("ASSERT")));
    }

    #[test]
    fn predefined2_adds_assert_and_nothing_else_changes() {
        let scope = predefined2();
        assert!(scope.contains(&Ident::new("ASSERT")));
        assert!(scope.lookup(&Ident::new("SIZE")).unwrap().as_ref().unwrap().is_builtin_procedure());
    }

    #[test]
    fn oberon2_supports_type_bound_procedures_oberon_does_not() {
        assert!(!Oberon.supports_type_bound_procedures());
        assert!(Oberon2.supports_type_bound_procedures());
    }
}
