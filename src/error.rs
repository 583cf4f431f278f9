//! The resolver's error taxonomy (spec §7). Every variant is a stable,
//! programmatically inspectable tag; callers match on `Error` rather than
//! parsing messages.

use crate::ident::{Ident, Position, QualIdent};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize)]
pub enum Error {
    #[error("could not find a module named `{module}`")]
    UnknownModule { position: Position, module: Ident },

    #[error("could not find `{name}` in the current scope")]
    UnknownLocal { position: Position, name: Ident },

    #[error("module `{module}` does not export `{name}`")]
    UnknownImport {
        position: Position,
        module: Ident,
        name: Ident,
    },

    #[error("this site still has more than one valid parse after resolution")]
    AmbiguousParses { position: Position },

    #[error("declaration is ambiguous between {alternatives:?}")]
    AmbiguousDeclaration { position: Position, alternatives: Vec<&'static str> },

    #[error("designator is ambiguous between {alternatives:?}")]
    AmbiguousDesignator { position: Position, alternatives: Vec<&'static str> },

    #[error("expression is ambiguous between {alternatives:?}")]
    AmbiguousExpression { position: Position, alternatives: Vec<&'static str> },

    #[error("record designator is ambiguous between {alternatives:?}")]
    AmbiguousRecord { position: Position, alternatives: Vec<&'static str> },

    #[error("statement is ambiguous between {alternatives:?}")]
    AmbiguousStatement { position: Position, alternatives: Vec<&'static str> },

    #[error("no alternative for this expression resolved")]
    InvalidExpression { position: Position, causes: Errors },

    #[error("function call parameters did not resolve")]
    InvalidFunctionParameters { position: Position, causes: Errors },

    #[error("no alternative for this record designator resolved")]
    InvalidRecord { position: Position, causes: Errors },

    #[error("no alternative for this statement resolved")]
    InvalidStatement { position: Position, causes: Errors },

    #[error("`{q}` does not name a record")]
    NotARecord { position: Position, q: QualIdent },

    #[error("`{q}` does not name a type")]
    NotAType { position: Position, q: QualIdent },

    #[error("`{q}` names a type, not a value")]
    NotAValue { position: Position, q: QualIdent },

    #[error("two imports both bind the local name `{name}`")]
    ClashingImports { position: Position, name: Ident },

    #[error("type-bound procedures are not supported in this dialect")]
    UnsupportedTypeBoundProcedure { position: Position },

    #[error("module could not be parsed")]
    UnparseableModule { position: Position, text: String },
}

impl Error {
    /// The source position this error should be reported against.
    pub fn position(&self) -> Position {
        match self {
            Error::UnknownModule { position, .. }
            | Error::UnknownLocal { position, .. }
            | Error::UnknownImport { position, .. }
            | Error::AmbiguousParses { position }
            | Error::AmbiguousDeclaration { position, .. }
            | Error::AmbiguousDesignator { position, .. }
            | Error::AmbiguousExpression { position, .. }
            | Error::AmbiguousRecord { position, .. }
            | Error::AmbiguousStatement { position, .. }
            | Error::InvalidExpression { position, .. }
            | Error::InvalidFunctionParameters { position, .. }
            | Error::InvalidRecord { position, .. }
            | Error::InvalidStatement { position, .. }
            | Error::NotARecord { position, .. }
            | Error::NotAType { position, .. }
            | Error::NotAValue { position, .. }
            | Error::ClashingImports { position, .. }
            | Error::UnsupportedTypeBoundProcedure { position }
            | Error::UnparseableModule { position, .. } => *position,
        }
    }
}

/// A non-empty collection of [`Error`]s. Disambiguation boundaries aggregate
/// one `Errors` per rejected alternative rather than collapsing to a single
/// message, so a caller can report every alternative's failure reason.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Errors(Vec<Error>);

impl Errors {
    pub fn single(error: Error) -> Self {
        Errors(vec![error])
    }

    pub fn new(errors: Vec<Error>) -> Self {
        assert!(!errors.is_empty(), "Errors must carry >=1 error");
        Errors(errors)
    }

    pub fn merge(mut self, other: Errors) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn push(&mut self, error: Error) {
        self.0.push(error);
    }

    pub fn as_slice(&self) -> &[Error] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.0.iter()
    }
}

impl From<Error> for Errors {
    fn from(error: Error) -> Self {
        Errors::single(error)
    }
}

impl std::fmt::Display for Errors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Errors {}

impl IntoIterator for Errors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_concatenates_in_order() {
        let a = Errors::single(Error::UnknownLocal { position: 0, name: "x".into() });
        let b = Errors::single(Error::UnknownLocal { position: 1, name: "y".into() });
        let merged = a.merge(b);
        assert_eq!(merged.as_slice().len(), 2);
        assert_eq!(merged.as_slice()[0].position(), 0);
        assert_eq!(merged.as_slice()[1].position(), 1);
    }

    #[test]
    #[should_panic]
    fn errors_rejects_empty() {
        let _ = Errors::new(vec![]);
    }
}
