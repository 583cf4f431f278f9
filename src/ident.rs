//! Identifiers, qualified names, and the position/ambiguity wrappers every
//! AST node is built from.

use std::fmt;
use std::rc::Rc;

/// An offset into the source text. Owned and assigned by the parser; this
/// crate only ever carries it through for diagnostics.
pub type Position = u32;

/// A non-empty identifier. Equality is case-sensitive, matching Oberon's
/// identifier rules; the empty string is reserved (see [`QualIdent`]) to
/// mean "no alias" for an unrenamed import and is never a real binding name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Ident(Rc<str>);

impl Ident {
    pub fn new(text: impl Into<Rc<str>>) -> Self {
        Ident(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The reserved "no alias" marker used by unrenamed imports.
    pub fn empty() -> Self {
        Ident(Rc::from(""))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Ident {
    fn from(s: &str) -> Self {
        Ident::new(s)
    }
}

impl From<String> for Ident {
    fn from(s: String) -> Self {
        Ident::new(s)
    }
}

/// Either a bare `name` or a two-part `module.name`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize)]
pub enum QualIdent {
    Unqualified(Ident),
    Qualified(Ident, Ident),
}

impl QualIdent {
    pub fn unqualified(name: impl Into<Ident>) -> Self {
        QualIdent::Unqualified(name.into())
    }

    pub fn qualified(module: impl Into<Ident>, name: impl Into<Ident>) -> Self {
        QualIdent::Qualified(module.into(), name.into())
    }

    /// The trailing `name` part, present regardless of qualification.
    pub fn name(&self) -> &Ident {
        match self {
            QualIdent::Unqualified(name) => name,
            QualIdent::Qualified(_, name) => name,
        }
    }

    /// The leading `module` part, if qualified.
    pub fn module(&self) -> Option<&Ident> {
        match self {
            QualIdent::Unqualified(_) => None,
            QualIdent::Qualified(module, _) => Some(module),
        }
    }

    pub fn is_qualified(&self) -> bool {
        matches!(self, QualIdent::Qualified(..))
    }
}

impl fmt::Display for QualIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualIdent::Unqualified(name) => write!(f, "{name}"),
            QualIdent::Qualified(module, name) => write!(f, "{module}.{name}"),
        }
    }
}

/// A non-empty set of alternative parses of one AST site, as produced by the
/// (external) context-free parser. Disambiguation reduces this to a single
/// surviving alternative; see [`crate::resolver`].
#[derive(Clone, Debug)]
pub struct Ambiguous<T>(Vec<T>);

impl<T> Ambiguous<T> {
    /// Panics if `alts` is empty: an ambiguous node with zero alternatives is
    /// ill-formed input, not a resolver-level error (§6 of the spec this
    /// crate implements).
    pub fn new(alts: Vec<T>) -> Self {
        assert!(!alts.is_empty(), "Ambiguous node must carry >=1 alternative");
        Ambiguous(alts)
    }

    pub fn single(alt: T) -> Self {
        Ambiguous(vec![alt])
    }

    pub fn alternatives(&self) -> &[T] {
        &self.0
    }

    pub fn into_alternatives(self) -> Vec<T> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// An AST node before resolution: a position plus every grammatically valid
/// interpretation at that site.
#[derive(Clone, Debug)]
pub struct NodeWrap<T> {
    pub position: Position,
    pub alternatives: Ambiguous<T>,
}

impl<T> NodeWrap<T> {
    pub fn new(position: Position, alternatives: Ambiguous<T>) -> Self {
        NodeWrap { position, alternatives }
    }

    pub fn single(position: Position, alt: T) -> Self {
        NodeWrap { position, alternatives: Ambiguous::single(alt) }
    }
}

/// An AST node after resolution: a position plus the one chosen
/// interpretation.
#[derive(Clone, Debug)]
pub struct Placed<T> {
    pub position: Position,
    pub node: T,
}

impl<T> Placed<T> {
    pub fn new(position: Position, node: T) -> Self {
        Placed { position, node }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qual_ident_name_and_module() {
        let bare = QualIdent::unqualified("x");
        assert_eq!(bare.name().as_str(), "x");
        assert_eq!(bare.module(), None);
        assert!(!bare.is_qualified());

        let qualified = QualIdent::qualified("A", "t");
        assert_eq!(qualified.name().as_str(), "t");
        assert_eq!(qualified.module().unwrap().as_str(), "A");
        assert!(qualified.is_qualified());
    }

    #[test]
    fn empty_ident_is_reserved_no_alias_marker() {
        let empty = Ident::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.as_str(), "");
    }

    #[test]
    #[should_panic]
    fn ambiguous_rejects_empty_alternatives() {
        let _: Ambiguous<i32> = Ambiguous::new(vec![]);
    }
}
