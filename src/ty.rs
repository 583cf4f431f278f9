//! Type expressions and access modes.
//!
//! Oberon's type grammar, unlike `Designator`/`Expression`/`Statement`, is
//! not itself ambiguous, so a single `Type` shape serves both as the
//! parser's output and the resolver's output: resolution only has to check
//! that every embedded [`crate::ident::QualIdent`] names something that
//! resolves to a type, it never has to pick among alternative shapes.

use crate::ident::{Ident, Position, QualIdent};

#[derive(Clone, Debug, PartialEq)]
pub struct Type {
    pub position: Position,
    pub kind: TypeKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeKind {
    /// A reference to a named type, e.g. `INTEGER` or `A.Shape`.
    Named(QualIdent),

    /// `RECORD [(base)] field-list END`.
    Record {
        base: Option<QualIdent>,
        fields: Vec<(Ident, Type)>,
    },

    /// `POINTER TO base`.
    Pointer(Box<Type>),

    /// `ARRAY [len] OF elem`. The length is a constant expression in real
    /// Oberon; this crate does not evaluate constants (spec Non-goals), so
    /// only the element type matters for name resolution.
    Array(Box<Type>),

    /// `PROCEDURE (formal-params)`.
    Procedure(FormalParams),

    /// A placeholder type that appears only inside predefined-procedure
    /// signatures (`ARRAY`, `POINTER`, `SET` used generically, e.g. in the
    /// signature of `NEW`). Never added to a type scope; see spec §9 Open
    /// Questions.
    Opaque(Ident),
}

impl Type {
    pub fn named(position: Position, q: QualIdent) -> Self {
        Type { position, kind: TypeKind::Named(q) }
    }

    pub fn opaque(position: Position, name: impl Into<Ident>) -> Self {
        Type { position, kind: TypeKind::Opaque(name.into()) }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct FormalParams {
    pub params: Vec<FormalParam>,
    pub return_type: Option<Box<Type>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormalParam {
    pub name: Ident,
    pub ty: Type,
    /// `VAR` parameters are passed by reference.
    pub by_reference: bool,
}

/// The access mode a declaration is exported under; derived straight from
/// declaration syntax (`*` for exported, `-` for read-only export).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessMode {
    Exported,
    ExportedReadOnly,
    PrivateOnly,
}

impl AccessMode {
    pub fn is_exported(self) -> bool {
        !matches!(self, AccessMode::PrivateOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_only_is_not_exported() {
        assert!(!AccessMode::PrivateOnly.is_exported());
        assert!(AccessMode::Exported.is_exported());
        assert!(AccessMode::ExportedReadOnly.is_exported());
    }
}
