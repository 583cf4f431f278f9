//! Name-checking for `Type` trees. Types are not an ambiguous production
//! (§3.1), so there is nothing to disambiguate here, only embedded
//! `QualIdent`s to resolve against the current scope.

use crate::error::Errors;
use crate::resolver::context::Context;
use crate::resolver::name::resolve_type_name;
use crate::ty::{FormalParam, FormalParams, Type, TypeKind};

pub fn resolve_type(ctx: &Context, ty: &Type) -> Result<Type, Errors> {
    let position = ty.position;
    let kind = match &ty.kind {
        TypeKind::Named(q) => {
            resolve_type_name(ctx, position, q).map_err(Errors::from)?;
            TypeKind::Named(q.clone())
        }
        TypeKind::Record { base, fields } => {
            if let Some(base) = base {
                resolve_type_name(ctx, position, base).map_err(Errors::from)?;
            }
            let mut resolved_fields = Vec::with_capacity(fields.len());
            let mut errors: Option<Errors> = None;
            for (name, field_ty) in fields {
                match resolve_type(ctx, field_ty) {
                    Ok(t) => resolved_fields.push((name.clone(), t)),
                    Err(e) => errors = Some(merge(errors, e)),
                }
            }
            if let Some(e) = errors {
                return Err(e);
            }
            TypeKind::Record { base: base.clone(), fields: resolved_fields }
        }
        TypeKind::Pointer(inner) => TypeKind::Pointer(Box::new(resolve_type(ctx, inner)?)),
        TypeKind::Array(inner) => TypeKind::Array(Box::new(resolve_type(ctx, inner)?)),
        TypeKind::Procedure(params) => TypeKind::Procedure(resolve_formal_params(ctx, params)?),
        TypeKind::Opaque(name) => TypeKind::Opaque(name.clone()),
    };
    Ok(Type { position, kind })
}

pub fn resolve_formal_params(ctx: &Context, params: &FormalParams) -> Result<FormalParams, Errors> {
    let mut resolved = Vec::with_capacity(params.params.len());
    let mut errors: Option<Errors> = None;

    for p in &params.params {
        match resolve_type(ctx, &p.ty) {
            Ok(ty) => resolved.push(FormalParam { name: p.name.clone(), ty, by_reference: p.by_reference }),
            Err(e) => errors = Some(merge(errors, e)),
        }
    }

    let return_type = match &params.return_type {
        Some(rt) => match resolve_type(ctx, rt) {
            Ok(t) => Some(Box::new(t)),
            Err(e) => {
                errors = Some(merge(errors, e));
                None
            }
        },
        None => None,
    };

    if let Some(e) = errors {
        return Err(e);
    }
    Ok(FormalParams { params: resolved, return_type })
}

fn merge(acc: Option<Errors>, next: Errors) -> Errors {
    match acc {
        Some(existing) => existing.merge(next),
        None => next,
    }
}
