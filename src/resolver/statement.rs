//! Statement disambiguation (spec §4.3, "Statement"). Only `ProcedureCall`
//! is a genuinely ambiguous production; every other form recursively
//! resolves its sub-trees and passes its own shape through unchanged.

use crate::ast::raw::{RawStatement, RawStatementSite};
use crate::ast::resolved::{Statement, StatementSite};
use crate::error::{Error, Errors};
use crate::ident::Placed;
use crate::resolver::context::{Context, ResolutionState};
use crate::resolver::designator::resolve_designator;
use crate::resolver::expression::resolve_expression;
use crate::resolver::partition;

pub fn resolve_statement(ctx: &Context, site: &RawStatementSite) -> Result<StatementSite, Error> {
    let position = site.position;
    let ctx = ctx.with_state(ResolutionState::Statement);
    let results: Vec<Result<Statement, Errors>> =
        site.alternatives.alternatives().iter().map(|alt| resolve_alt(&ctx, alt)).collect();
    let (mut oks, causes) = partition(results);

    match oks.len() {
        1 => Ok(Placed::new(position, oks.pop().unwrap())),
        0 => Err(Error::InvalidStatement {
            position,
            causes: causes.expect("at least one alternative must have failed"),
        }),
        _ => {
            let alternatives = oks.iter().map(Statement::kind_name).collect();
            Err(Error::AmbiguousStatement { position, alternatives })
        }
    }
}

pub fn resolve_statements(ctx: &Context, sites: &[RawStatementSite]) -> Result<Vec<StatementSite>, Errors> {
    let results: Vec<Result<StatementSite, Errors>> =
        sites.iter().map(|site| resolve_statement(ctx, site).map_err(Errors::from)).collect();
    let (oks, causes) = partition(results);
    match causes {
        None => Ok(oks),
        Some(errs) => Err(errs),
    }
}

fn resolve_expr(ctx: &Context, site: &crate::ast::raw::RawExpressionSite) -> Result<crate::ast::resolved::ExpressionSite, Errors> {
    resolve_expression(&ctx.with_state(ResolutionState::Expression), site).map_err(Errors::from)
}

fn resolve_alt(ctx: &Context, alt: &RawStatement) -> Result<Statement, Errors> {
    match alt {
        RawStatement::ProcedureCall(proc, args) => {
            let proc = resolve_designator(ctx, proc)?;
            let args = crate::resolver::expression::resolve_expressions(
                &ctx.with_state(ResolutionState::Expression),
                args,
            )?;
            Ok(Statement::ProcedureCall(proc, args))
        }
        RawStatement::Assignment(lhs, rhs) => {
            let lhs = resolve_designator(ctx, lhs)?;
            let rhs = resolve_expr(ctx, rhs)?;
            Ok(Statement::Assignment(lhs, rhs))
        }
        RawStatement::If(branches, else_) => {
            let mut resolved_branches = Vec::with_capacity(branches.len());
            for (cond, body) in branches {
                let cond = resolve_expr(ctx, cond)?;
                let body = resolve_statements(ctx, body)?;
                resolved_branches.push((cond, body));
            }
            let else_ = else_.as_ref().map(|body| resolve_statements(ctx, body)).transpose()?;
            Ok(Statement::If(resolved_branches, else_))
        }
        RawStatement::While(cond, body) => {
            let cond = resolve_expr(ctx, cond)?;
            let body = resolve_statements(ctx, body)?;
            Ok(Statement::While(cond, body))
        }
        RawStatement::Repeat(body, cond) => {
            let body = resolve_statements(ctx, body)?;
            let cond = resolve_expr(ctx, cond)?;
            Ok(Statement::Repeat(body, cond))
        }
        RawStatement::ForLoop { var, from, to, by, body } => {
            let from = resolve_expr(ctx, from)?;
            let to = resolve_expr(ctx, to)?;
            let by = by.as_ref().map(|e| resolve_expr(ctx, e)).transpose()?;
            let body = resolve_statements(ctx, body)?;
            Ok(Statement::ForLoop { var: var.clone(), from, to, by, body })
        }
        RawStatement::Case(scrutinee, arms) => {
            let scrutinee = resolve_expr(ctx, scrutinee)?;
            let mut resolved_arms = Vec::with_capacity(arms.len());
            for (labels, body) in arms {
                let labels = crate::resolver::expression::resolve_expressions(
                    &ctx.with_state(ResolutionState::Expression),
                    labels,
                )?;
                let body = resolve_statements(ctx, body)?;
                resolved_arms.push((labels, body));
            }
            Ok(Statement::Case(scrutinee, resolved_arms))
        }
        RawStatement::Return(expr) => {
            let expr = expr.as_ref().map(|e| resolve_expr(ctx, e)).transpose()?;
            Ok(Statement::Return(expr))
        }
        RawStatement::Block(body) => {
            let body = resolve_statements(ctx, body)?;
            Ok(Statement::Block(body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::raw::RawDesignator;
    use crate::collections::IndexMap;
    use crate::decl::DeclarationRHS;
    use crate::ident::{Ambiguous, NodeWrap, QualIdent};
    use crate::scope::{Bindings, Scope};
    use crate::ty::Type;

    fn ctx_with_proc(name: &str) -> Context {
        let mut bindings = Bindings::new();
        bindings.insert(name.into(), 0, Ok(DeclarationRHS::procedure(false, None)));
        let scope = Scope::layer(&Scope::empty(), bindings);
        Context::new(IndexMap::default(), scope)
    }

    #[test]
    fn procedure_call_resolves() {
        let ctx = ctx_with_proc("P");
        let proc = NodeWrap::single(0, RawDesignator::Variable(QualIdent::unqualified("P")));
        let site = NodeWrap::single(2, RawStatement::ProcedureCall(proc, vec![]));
        let resolved = resolve_statement(&ctx, &site).unwrap();
        assert!(matches!(resolved.node, Statement::ProcedureCall(..)));
    }

    #[test]
    fn unknown_procedure_is_invalid_statement() {
        let ctx = Context::new(IndexMap::default(), Scope::empty());
        let proc = NodeWrap::single(0, RawDesignator::Variable(QualIdent::unqualified("Missing")));
        let site = NodeWrap::single(2, RawStatement::ProcedureCall(proc, vec![]));
        let err = resolve_statement(&ctx, &site).unwrap_err();
        assert!(matches!(err, Error::InvalidStatement { .. }));
    }

    #[test]
    fn two_surviving_statement_alternatives_are_ambiguous() {
        let ctx = ctx_with_proc("P");
        let proc_a = NodeWrap::single(0, RawDesignator::Variable(QualIdent::unqualified("P")));
        let proc_b = NodeWrap::single(0, RawDesignator::Variable(QualIdent::unqualified("P")));
        let alts = Ambiguous::new(vec![
            RawStatement::ProcedureCall(proc_a, vec![]),
            RawStatement::ProcedureCall(proc_b, vec![]),
        ]);
        let site = NodeWrap::new(2, alts);
        let err = resolve_statement(&ctx, &site).unwrap_err();
        match err {
            Error::AmbiguousStatement { position: 2, alternatives } => assert_eq!(alternatives.len(), 2),
            other => panic!("expected AmbiguousStatement, got {other:?}"),
        }
    }
}
