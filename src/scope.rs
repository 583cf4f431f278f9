//! `Scope`: an ordered, chained mapping from identifier to declaration (or
//! to the reason its declaration failed to resolve).

use crate::collections::IndexMap;
use crate::decl::DeclarationRHS;
use crate::error::{Error, Errors};
use crate::ident::{Ident, Position};

/// An immutable, inner-wins layered mapping. Nesting is realized by copying
/// the outer scope's bindings into a new map and then overlaying the local
/// ones, rather than by chaining lookups through parent pointers: this
/// keeps `lookup` a single flat hash/index probe no matter how deeply
/// nested the scope is.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: IndexMap<Ident, Result<DeclarationRHS, Errors>>,
}

impl Scope {
    pub fn empty() -> Self {
        Scope { bindings: IndexMap::default() }
    }

    /// Builds a new scope layering `locals` over `outer`, inner-wins.
    pub fn layer(outer: &Scope, locals: Bindings) -> Self {
        let mut bindings = outer.bindings.clone();
        for (name, value) in locals.into_entries() {
            bindings.insert(name, value);
        }
        Scope { bindings }
    }

    pub fn lookup(&self, name: &Ident) -> Option<&Result<DeclarationRHS, Errors>> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &Ident) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &Ident> {
        self.bindings.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ident, &Result<DeclarationRHS, Errors>)> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Accumulates the bindings for a single scope layer, turning a name bound
/// twice into a `ClashingImports` error on that name rather than silently
/// letting the second binding win.
#[derive(Default)]
pub struct Bindings {
    entries: IndexMap<Ident, Result<DeclarationRHS, Errors>>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings::default()
    }

    pub fn insert(&mut self, name: Ident, position: Position, value: Result<DeclarationRHS, Errors>) {
        if self.entries.contains_key(&name) {
            self.entries.insert(name.clone(), Err(Errors::single(Error::ClashingImports { position, name })));
        } else {
            self.entries.insert(name, value);
        }
    }

    pub fn into_entries(self) -> IndexMap<Ident, Result<DeclarationRHS, Errors>> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::{Type, TypeKind};

    fn sample_type(n: &str) -> DeclarationRHS {
        DeclarationRHS::DeclaredType(Type::named(0, crate::ident::QualIdent::unqualified(n)))
    }

    #[test]
    fn inner_scope_shadows_outer() {
        let mut outer_bindings = Bindings::new();
        outer_bindings.insert(Ident::new("x"), 0, Ok(sample_type("Outer")));
        let outer = Scope::layer(&Scope::empty(), outer_bindings);

        let mut inner_bindings = Bindings::new();
        inner_bindings.insert(Ident::new("x"), 1, Ok(sample_type("Inner")));
        let inner = Scope::layer(&outer, inner_bindings);

        match inner.lookup(&Ident::new("x")).unwrap() {
            Ok(DeclarationRHS::DeclaredType(Type { kind: TypeKind::Named(q), .. })) => {
                assert_eq!(q.name().as_str(), "Inner");
            }
            other => panic!("unexpected binding: {other:?}"),
        }
    }

    #[test]
    fn duplicate_binding_in_one_layer_is_clashing_imports() {
        let mut bindings = Bindings::new();
        bindings.insert(Ident::new("x"), 0, Ok(sample_type("First")));
        bindings.insert(Ident::new("x"), 5, Ok(sample_type("Second")));
        let scope = Scope::layer(&Scope::empty(), bindings);

        match scope.lookup(&Ident::new("x")).unwrap() {
            Err(errs) => {
                assert_eq!(errs.as_slice().len(), 1);
                assert!(matches!(errs.as_slice()[0], Error::ClashingImports { position: 5, .. }));
            }
            other => panic!("expected ClashingImports, got {other:?}"),
        }
    }
}
