//! `ProcedureHeading` resolution (spec §4.3, "ProcedureHeading"). Headings
//! are not genuinely ambiguous in practice, so a site with more than one
//! surviving alternative falls back to the generic `AmbiguousParses` (the
//! disambiguator's catch-all for node kinds with no dedicated `Ambiguous…`
//! variant).

use crate::ast::raw::{RawProcedureHeading, RawProcedureHeadingSite};
use crate::ast::resolved::ProcedureHeading;
use crate::decl::DeclarationRHS;
use crate::error::{Error, Errors};
use crate::ident::Ident;
use crate::resolver::context::Context;
use crate::resolver::name::resolve_type_name;
use crate::resolver::types::resolve_formal_params;
use crate::scope::Bindings;
use crate::ty::Type;

/// The resolved heading, the bindings its receiver/parameters contribute to
/// the procedure's own local scope, and the `DeclarationRHS` it binds the
/// procedure's own name to.
pub fn resolve_heading(
    ctx: &Context,
    module_name: &Ident,
    site: &RawProcedureHeadingSite,
) -> Result<(ProcedureHeading, Bindings, DeclarationRHS), Errors> {
    let position = site.position;
    let alts = site.alternatives.alternatives();
    if alts.len() != 1 {
        return Err(Errors::single(Error::AmbiguousParses { position }));
    }

    let is_builtin = module_name.as_str() == "SYSTEM";

    match &alts[0] {
        RawProcedureHeading::Plain { name, access, params } => {
            let params = resolve_formal_params(ctx, params)?;
            let mut bindings = Bindings::new();
            for param in &params.params {
                bindings.insert(
                    param.name.clone(),
                    position,
                    Ok(DeclarationRHS::DeclaredVariable(param.ty.clone())),
                );
            }
            let heading =
                ProcedureHeading::Plain { name: name.clone(), access: *access, params: params.clone() };
            let rhs = DeclarationRHS::procedure(is_builtin, Some(params));
            Ok((heading, bindings, rhs))
        }
        RawProcedureHeading::TypeBound { receiver_name, receiver_type, name, access, params } => {
            if !ctx.supports_type_bound_procedures {
                return Err(Errors::single(Error::UnsupportedTypeBoundProcedure { position }));
            }
            resolve_type_name(ctx, position, receiver_type).map_err(Errors::from)?;
            let params = resolve_formal_params(ctx, params)?;
            let mut bindings = Bindings::new();
            bindings.insert(
                receiver_name.clone(),
                position,
                Ok(DeclarationRHS::DeclaredVariable(Type::named(position, receiver_type.clone()))),
            );
            for param in &params.params {
                bindings.insert(
                    param.name.clone(),
                    position,
                    Ok(DeclarationRHS::DeclaredVariable(param.ty.clone())),
                );
            }
            let heading = ProcedureHeading::TypeBound {
                receiver_name: receiver_name.clone(),
                receiver_type: receiver_type.clone(),
                name: name.clone(),
                access: *access,
                params: params.clone(),
            };
            let rhs = DeclarationRHS::procedure(is_builtin, Some(params));
            Ok((heading, bindings, rhs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::IndexMap;
    use crate::ident::{NodeWrap, QualIdent};
    use crate::scope::Scope;
    use crate::ty::{AccessMode, FormalParams};

    fn type_bound_site() -> RawProcedureHeadingSite {
        NodeWrap::single(
            0,
            RawProcedureHeading::TypeBound {
                receiver_name: "self".into(),
                receiver_type: QualIdent::unqualified("T"),
                name: "Bound".into(),
                access: AccessMode::PrivateOnly,
                params: FormalParams { params: vec![], return_type: None },
            },
        )
    }

    #[test]
    fn type_bound_heading_is_rejected_when_dialect_forbids_it() {
        let ctx = Context::new(IndexMap::default(), Scope::empty()).with_type_bound_support(false);
        let err = resolve_heading(&ctx, &Ident::new("M"), &type_bound_site()).unwrap_err();
        assert!(matches!(err.as_slice()[0], Error::UnsupportedTypeBoundProcedure { .. }));
    }

    #[test]
    fn type_bound_heading_fails_on_unknown_receiver_type_when_dialect_allows_it() {
        let ctx = Context::new(IndexMap::default(), Scope::empty());
        let err = resolve_heading(&ctx, &Ident::new("M"), &type_bound_site()).unwrap_err();
        assert!(!matches!(err.as_slice()[0], Error::UnsupportedTypeBoundProcedure { .. }));
    }
}
