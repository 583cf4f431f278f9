//! The scope builder (spec §4.2): constructs a scope from a declaration
//! list, tying the knot so declarations may reference each other — forward
//! or mutually — within the same scope.
//!
//! This ties together `DeclarationRHS` name-checking with the `Declaration`
//! disambiguation rule from §4.3: building a procedure's local scope
//! necessarily resolves its `ProcedureDeclaration` bodies too, so the two
//! are implemented as one pass rather than two.

use crate::ast::raw::{RawDeclaration, RawDeclarationSite};
use crate::ast::resolved::{Declaration, DeclarationSite};
use crate::decl::DeclarationRHS;
use crate::error::{Error, Errors};
use crate::ident::{Ident, Placed};
use crate::resolver::context::{Context, ResolutionState};
use crate::resolver::expression::resolve_expression;
use crate::resolver::partition;
use crate::resolver::types::{resolve_formal_params, resolve_type};
use crate::scope::{Bindings, Scope};
use crate::ty::Type;

pub struct LocalScopeResult {
    pub scope: Scope,
    pub declarations: Vec<DeclarationSite>,
}

/// `localScope(ctx, moduleName, declarations, outerScope)`.
///
/// Built in two passes, per the spec's "simplest" strategy: first every
/// declared name is registered against a placeholder binding of the right
/// shape (so forward and mutually-recursive references resolve to
/// *something* of the right kind), then each declaration is resolved for
/// real against that placeholder-complete scope and the final bindings
/// replace the placeholders.
#[tracing::instrument(level = "debug", skip_all, fields(module = %module_name, declarations = declarations.len()))]
pub fn local_scope(
    ctx: &Context,
    module_name: &Ident,
    declarations: &[RawDeclarationSite],
    outer: &Scope,
) -> (LocalScopeResult, Option<Errors>) {
    let placeholders = placeholder_bindings(module_name, declarations);
    let placeholder_scope = Scope::layer(outer, placeholders);
    let resolving_ctx = ctx.with_scope(placeholder_scope).with_state(ResolutionState::Declaration);

    let mut final_bindings = Bindings::new();
    let mut declarations_out = Vec::new();
    let mut errors: Option<Errors> = None;

    for site in declarations {
        let results: Vec<Result<(Vec<(Ident, DeclarationRHS)>, Declaration), Errors>> = site
            .alternatives
            .alternatives()
            .iter()
            .map(|alt| resolve_declaration_alt(&resolving_ctx, module_name, alt))
            .collect();
        let (mut oks, causes) = partition(results);

        match oks.len() {
            1 => {
                let (bindings, declaration) = oks.pop().unwrap();
                for (name, rhs) in bindings {
                    final_bindings.insert(name, site.position, Ok(rhs));
                }
                declarations_out.push(Placed::new(site.position, declaration));
            }
            0 => {
                let causes = causes.expect("at least one alternative must have failed");
                for name in declared_names(&site.alternatives.alternatives()[0]) {
                    final_bindings.insert(name, site.position, Err(causes.clone()));
                }
                errors = Some(merge(errors, causes));
            }
            _ => {
                let alternatives = oks.iter().map(|(_, declaration)| declaration.kind_name()).collect();
                let err = Error::AmbiguousDeclaration { position: site.position, alternatives };
                for alt in site.alternatives.alternatives() {
                    for name in declared_names(alt) {
                        final_bindings.insert(name, site.position, Err(Errors::single(err.clone())));
                    }
                }
                errors = Some(merge(errors, Errors::single(err)));
            }
        }
    }

    let scope = Scope::layer(outer, final_bindings);
    (LocalScopeResult { scope, declarations: declarations_out }, errors)
}

fn merge(acc: Option<Errors>, next: Errors) -> Errors {
    match acc {
        Some(existing) => existing.merge(next),
        None => next,
    }
}

/// Every name one raw declaration alternative introduces, independent of
/// whether it resolves — used both to seed placeholders and to bind a
/// failing declaration's name(s) to their failure reason.
fn declared_names(alt: &RawDeclaration) -> Vec<Ident> {
    match alt {
        RawDeclaration::ConstDeclaration { name, .. }
        | RawDeclaration::TypeDeclaration { name, .. }
        | RawDeclaration::ForwardDeclaration { name, .. } => vec![name.clone()],
        RawDeclaration::VarDeclaration { names, .. } => names.iter().map(|(n, _)| n.clone()).collect(),
        RawDeclaration::ProcedureDeclaration { heading, .. } => {
            heading.alternatives.alternatives().iter().map(|h| h.name().clone()).collect()
        }
    }
}

fn placeholder_bindings(module_name: &Ident, declarations: &[RawDeclarationSite]) -> Bindings {
    let mut bindings = Bindings::new();
    for site in declarations {
        for alt in site.alternatives.alternatives() {
            for name in declared_names(alt) {
                let rhs = placeholder_rhs(module_name, &name, alt);
                bindings.insert(name, site.position, Ok(rhs));
            }
        }
    }
    bindings
}

fn placeholder_rhs(module_name: &Ident, name: &Ident, alt: &RawDeclaration) -> DeclarationRHS {
    match alt {
        RawDeclaration::ConstDeclaration { .. } => {
            DeclarationRHS::DeclaredConstant(Placed::new(0, crate::ast::resolved::Expression::Nil))
        }
        RawDeclaration::TypeDeclaration { .. } => DeclarationRHS::DeclaredType(Type::opaque(0, name.clone())),
        RawDeclaration::VarDeclaration { .. } => {
            DeclarationRHS::DeclaredVariable(Type::opaque(0, name.clone()))
        }
        RawDeclaration::ProcedureDeclaration { .. } => {
            DeclarationRHS::procedure(module_name.as_str() == "SYSTEM", None)
        }
        RawDeclaration::ForwardDeclaration { params, .. } => {
            DeclarationRHS::procedure(false, params.clone())
        }
    }
}

fn resolve_declaration_alt(
    ctx: &Context,
    module_name: &Ident,
    alt: &RawDeclaration,
) -> Result<(Vec<(Ident, DeclarationRHS)>, Declaration), Errors> {
    match alt {
        RawDeclaration::ConstDeclaration { name, access, value } => {
            let value = resolve_expression(&ctx.with_state(ResolutionState::Expression), value)
                .map_err(Errors::from)?;
            let rhs = DeclarationRHS::DeclaredConstant(value.clone());
            let declaration = Declaration::ConstDeclaration { name: name.clone(), access: *access, value };
            Ok((vec![(name.clone(), rhs)], declaration))
        }
        RawDeclaration::TypeDeclaration { name, access, ty } => {
            let ty = resolve_type(ctx, ty)?;
            let rhs = DeclarationRHS::DeclaredType(ty.clone());
            let declaration = Declaration::TypeDeclaration { name: name.clone(), access: *access, ty };
            Ok((vec![(name.clone(), rhs)], declaration))
        }
        RawDeclaration::VarDeclaration { names, ty } => {
            let ty = resolve_type(ctx, ty)?;
            let bindings = names
                .iter()
                .map(|(n, _)| (n.clone(), DeclarationRHS::DeclaredVariable(ty.clone())))
                .collect();
            let declaration = Declaration::VarDeclaration { names: names.clone(), ty };
            Ok((bindings, declaration))
        }
        RawDeclaration::ProcedureDeclaration { heading, body } => {
            let (heading, heading_bindings, rhs) =
                crate::resolver::heading::resolve_heading(ctx, module_name, heading)?;
            let heading_scope = Scope::layer(&ctx.scope, heading_bindings);
            let body_ctx = ctx.with_scope(heading_scope);
            let body = crate::resolver::body::resolve_body(&body_ctx, body)?;
            let name = heading.name().clone();
            let declaration = Declaration::ProcedureDeclaration { heading, body };
            Ok((vec![(name, rhs)], declaration))
        }
        RawDeclaration::ForwardDeclaration { name, access, params } => {
            let params = params.as_ref().map(|p| resolve_formal_params(ctx, p)).transpose()?;
            let rhs = DeclarationRHS::procedure(false, params.clone());
            let declaration =
                Declaration::ForwardDeclaration { name: name.clone(), access: *access, params };
            Ok((vec![(name.clone(), rhs)], declaration))
        }
    }
}
