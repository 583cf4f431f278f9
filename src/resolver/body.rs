//! `ProcedureBody` resolution (spec §4.3, "ProcedureBody"): opens a fresh
//! local scope over the body's own declarations, then resolves its
//! statements against it.

use crate::ast::raw::RawProcedureBodySite;
use crate::ast::resolved::ProcedureBody;
use crate::error::{Error, Errors};
use crate::ident::Ident;
use crate::resolver::context::Context;
use crate::resolver::scope_builder::local_scope;
use crate::resolver::statement::resolve_statements;

pub fn resolve_body(ctx: &Context, site: &RawProcedureBodySite) -> Result<ProcedureBody, Errors> {
    let position = site.position;
    let alts = site.alternatives.alternatives();
    if alts.len() != 1 {
        return Err(Errors::single(Error::AmbiguousParses { position }));
    }
    let raw_body = &alts[0];

    let (local, scope_errors) = local_scope(ctx, &Ident::empty(), &raw_body.declarations, &ctx.scope);
    let body_ctx = ctx.with_scope(local.scope);

    let (statements, statement_errors) = match resolve_statements(&body_ctx, &raw_body.statements) {
        Ok(statements) => (statements, None),
        Err(e) => (Vec::new(), Some(e)),
    };

    let errors = match (scope_errors, statement_errors) {
        (Some(a), Some(b)) => Some(a.merge(b)),
        (Some(a), None) | (None, Some(a)) => Some(a),
        (None, None) => None,
    };
    if let Some(errors) = errors {
        return Err(errors);
    }

    Ok(ProcedureBody { declarations: local.declarations, statements })
}
