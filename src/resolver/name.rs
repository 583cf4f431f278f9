//! `resolveName` / `resolveTypeName` (spec §4.1): the base case every other
//! resolution rule bottoms out at.

use crate::decl::DeclarationRHS;
use crate::error::Error;
use crate::ident::{Position, QualIdent};
use crate::resolver::context::Context;
use crate::ty::Type;

pub fn resolve_name(ctx: &Context, position: Position, q: &QualIdent) -> Result<DeclarationRHS, Error> {
    match q {
        QualIdent::Qualified(module, name) => {
            let exports = ctx.imports.get(module).ok_or_else(|| Error::UnknownModule {
                position,
                module: module.clone(),
            })?;
            match exports.lookup(name) {
                Some(Ok(rhs)) => Ok(rhs.clone()),
                Some(Err(errs)) => Err(errs.as_slice()[0].clone()),
                None => Err(Error::UnknownImport { position, module: module.clone(), name: name.clone() }),
            }
        }
        QualIdent::Unqualified(name) => match ctx.scope.lookup(name) {
            Some(Ok(rhs)) => Ok(rhs.clone()),
            Some(Err(errs)) => Err(errs.as_slice()[0].clone()),
            None => Err(Error::UnknownLocal { position, name: name.clone() }),
        },
    }
}

pub fn resolve_type_name(ctx: &Context, position: Position, q: &QualIdent) -> Result<Type, Error> {
    match resolve_name(ctx, position, q)? {
        DeclarationRHS::DeclaredType(ty) => Ok(ty),
        _ => Err(Error::NotAType { position, q: q.clone() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::IndexMap;
    use crate::ident::Ident;
    use crate::scope::{Bindings, Scope};
    use crate::ty::{Type, TypeKind};

    fn int_type() -> DeclarationRHS {
        DeclarationRHS::DeclaredType(Type::named(0, QualIdent::unqualified("INTEGER")))
    }

    #[test]
    fn unqualified_lookup_finds_local_binding() {
        let mut bindings = Bindings::new();
        bindings.insert(Ident::new("T"), 0, Ok(int_type()));
        let scope = Scope::layer(&Scope::empty(), bindings);
        let ctx = Context::new(IndexMap::default(), scope);

        let rhs = resolve_name(&ctx, 10, &QualIdent::unqualified("T")).unwrap();
        assert!(rhs.is_type());
    }

    #[test]
    fn unqualified_lookup_missing_is_unknown_local() {
        let ctx = Context::new(IndexMap::default(), Scope::empty());
        let err = resolve_name(&ctx, 3, &QualIdent::unqualified("Missing")).unwrap_err();
        assert!(matches!(err, Error::UnknownLocal { position: 3, .. }));
    }

    #[test]
    fn qualified_lookup_missing_module_is_unknown_module() {
        let ctx = Context::new(IndexMap::default(), Scope::empty());
        let err = resolve_name(&ctx, 7, &QualIdent::qualified("A", "x")).unwrap_err();
        assert!(matches!(err, Error::UnknownModule { position: 7, .. }));
    }

    #[test]
    fn qualified_lookup_missing_export_is_unknown_import() {
        let mut imports = IndexMap::default();
        imports.insert(Ident::new("A"), Scope::empty());
        let ctx = Context::new(imports, Scope::empty());
        let err = resolve_name(&ctx, 7, &QualIdent::qualified("A", "x")).unwrap_err();
        assert!(matches!(err, Error::UnknownImport { position: 7, .. }));
    }

    #[test]
    fn resolve_type_name_rejects_non_type() {
        let mut bindings = Bindings::new();
        bindings.insert(
            Ident::new("v"),
            0,
            Ok(DeclarationRHS::DeclaredVariable(Type::named(0, QualIdent::unqualified("INTEGER")))),
        );
        let scope = Scope::layer(&Scope::empty(), bindings);
        let ctx = Context::new(IndexMap::default(), scope);

        let err = resolve_type_name(&ctx, 1, &QualIdent::unqualified("v")).unwrap_err();
        assert!(matches!(err, Error::NotAType { .. }));
    }

    #[test]
    fn resolve_type_name_accepts_type() {
        let mut bindings = Bindings::new();
        bindings.insert(Ident::new("T"), 0, Ok(int_type()));
        let scope = Scope::layer(&Scope::empty(), bindings);
        let ctx = Context::new(IndexMap::default(), scope);

        let ty = resolve_type_name(&ctx, 1, &QualIdent::unqualified("T")).unwrap();
        assert!(matches!(ty.kind, TypeKind::Named(_)));
    }
}
