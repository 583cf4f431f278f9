//! Expression disambiguation (spec §4.3, "Expression").

use crate::ast::raw::{RawExpression, RawExpressionSite};
use crate::ast::resolved::{Designator, Expression, ExpressionSite};
use crate::error::{Error, Errors};
use crate::ident::{Placed, Position};
use crate::resolver::context::{Context, ResolutionState};
use crate::resolver::designator::resolve_designator;
use crate::resolver::partition;

/// Resolves one expression site. Always run with `ctx.state` set to either
/// `Expression` or `ExpressionOrType` by the caller.
pub fn resolve_expression(ctx: &Context, site: &RawExpressionSite) -> Result<ExpressionSite, Error> {
    let position = site.position;
    let results: Vec<Result<Expression, Errors>> =
        site.alternatives.alternatives().iter().map(|alt| resolve_alt(ctx, position, alt)).collect();
    let (mut oks, causes) = partition(results);

    match oks.len() {
        1 => Ok(Placed::new(position, oks.pop().unwrap())),
        0 => Err(Error::InvalidExpression {
            position,
            causes: causes.expect("at least one alternative must have failed"),
        }),
        _ => {
            let alternatives = oks.iter().map(Expression::kind_name).collect();
            Err(Error::AmbiguousExpression { position, alternatives })
        }
    }
}

/// Resolves a list of expression sites (array indices, function-call
/// arguments, `Set` members), aggregating every site's failures rather than
/// stopping at the first.
pub fn resolve_expressions(ctx: &Context, sites: &[RawExpressionSite]) -> Result<Vec<ExpressionSite>, Errors> {
    let results: Vec<Result<ExpressionSite, Errors>> =
        sites.iter().map(|site| resolve_expression(ctx, site).map_err(Errors::from)).collect();
    let (oks, causes) = partition(results);
    match causes {
        None => Ok(oks),
        Some(errs) => Err(errs),
    }
}

fn resolve_alt(ctx: &Context, position: Position, alt: &RawExpression) -> Result<Expression, Errors> {
    match alt {
        RawExpression::Read(designator) => {
            let designator = resolve_designator(ctx, designator)?;
            Ok(Expression::Read(designator))
        }
        RawExpression::FunctionCall(function, args) => {
            let function = resolve_designator(ctx, function)?;
            let is_builtin_call = matches!(&function.node, Designator::Variable(q) if is_builtin_procedure(ctx, q));
            let arg_state = if is_builtin_call { ResolutionState::ExpressionOrType } else { ResolutionState::Expression };
            let args = resolve_expressions(&ctx.with_state(arg_state), args).map_err(|causes| {
                Errors::single(Error::InvalidFunctionParameters { position, causes })
            })?;
            Ok(Expression::FunctionCall(function, args))
        }
        RawExpression::IsA(expr, subtype) => {
            let expr = resolve_expression(ctx, expr).map_err(Errors::from)?;
            crate::resolver::name::resolve_type_name(ctx, position, subtype).map_err(Errors::from)?;
            Ok(Expression::IsA(Box::new(expr), subtype.clone()))
        }
        RawExpression::IntegerLiteral(v) => Ok(Expression::IntegerLiteral(*v)),
        RawExpression::RealLiteral(v) => Ok(Expression::RealLiteral(*v)),
        RawExpression::StringLiteral(v) => Ok(Expression::StringLiteral(v.clone())),
        RawExpression::BooleanLiteral(v) => Ok(Expression::BooleanLiteral(*v)),
        RawExpression::Nil => Ok(Expression::Nil),
        RawExpression::Set(members) => {
            let members = resolve_expressions(ctx, members)?;
            Ok(Expression::Set(members))
        }
        RawExpression::UnaryOp(op, expr) => {
            let expr = resolve_expression(ctx, expr).map_err(Errors::from)?;
            Ok(Expression::UnaryOp(*op, Box::new(expr)))
        }
        RawExpression::BinaryOp(lhs, op, rhs) => {
            let lhs = resolve_expression(ctx, lhs).map_err(Errors::from)?;
            let rhs = resolve_expression(ctx, rhs).map_err(Errors::from)?;
            Ok(Expression::BinaryOp(Box::new(lhs), *op, Box::new(rhs)))
        }
    }
}

fn is_builtin_procedure(ctx: &Context, q: &crate::ident::QualIdent) -> bool {
    crate::resolver::name::resolve_name(ctx, 0, q)
        .map(|rhs| rhs.is_builtin_procedure())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::raw::RawDesignator;
    use crate::collections::IndexMap;
    use crate::decl::DeclarationRHS;
    use crate::ident::{NodeWrap, QualIdent};
    use crate::scope::{Bindings, Scope};
    use crate::ty::Type;

    fn ctx_with(name: &str, rhs: DeclarationRHS) -> Context {
        let mut bindings = Bindings::new();
        bindings.insert(name.into(), 0, Ok(rhs));
        let scope = Scope::layer(&Scope::empty(), bindings);
        Context::new(IndexMap::default(), scope).with_state(ResolutionState::Expression)
    }

    #[test]
    fn read_resolves_designator() {
        let ctx = ctx_with(
            "v",
            DeclarationRHS::DeclaredVariable(Type::named(0, QualIdent::unqualified("INTEGER"))),
        );
        let designator = NodeWrap::single(0, RawDesignator::Variable(QualIdent::unqualified("v")));
        let site = NodeWrap::single(9, RawExpression::Read(designator));
        let resolved = resolve_expression(&ctx, &site).unwrap();
        assert!(matches!(resolved.node, Expression::Read(_)));
    }

    #[test]
    fn function_call_over_builtin_promotes_arguments_to_expression_or_type() {
        let mut bindings = Bindings::new();
        bindings.insert("SIZE".into(), 0, Ok(DeclarationRHS::procedure(true, None)));
        bindings.insert(
            "INTEGER".into(),
            0,
            Ok(DeclarationRHS::DeclaredType(Type::named(0, QualIdent::unqualified("INTEGER")))),
        );
        let scope = Scope::layer(&Scope::empty(), bindings);
        let ctx = Context::new(IndexMap::default(), scope).with_state(ResolutionState::Expression);

        let function = NodeWrap::single(0, RawDesignator::Variable(QualIdent::unqualified("SIZE")));
        let type_arg_designator =
            NodeWrap::single(0, RawDesignator::Variable(QualIdent::unqualified("INTEGER")));
        let args = vec![NodeWrap::single(0, RawExpression::Read(type_arg_designator))];
        let site = NodeWrap::single(5, RawExpression::FunctionCall(function, args));

        let resolved = resolve_expression(&ctx, &site).unwrap();
        assert!(matches!(resolved.node, Expression::FunctionCall(..)));
    }

    #[test]
    fn function_call_over_non_builtin_rejects_type_argument() {
        let mut bindings = Bindings::new();
        bindings.insert("Foo".into(), 0, Ok(DeclarationRHS::procedure(false, None)));
        bindings.insert(
            "INTEGER".into(),
            0,
            Ok(DeclarationRHS::DeclaredType(Type::named(0, QualIdent::unqualified("INTEGER")))),
        );
        let scope = Scope::layer(&Scope::empty(), bindings);
        let ctx = Context::new(IndexMap::default(), scope).with_state(ResolutionState::Expression);

        let function = NodeWrap::single(0, RawDesignator::Variable(QualIdent::unqualified("Foo")));
        let type_arg_designator =
            NodeWrap::single(0, RawDesignator::Variable(QualIdent::unqualified("INTEGER")));
        let args = vec![NodeWrap::single(0, RawExpression::Read(type_arg_designator))];
        let site = NodeWrap::single(5, RawExpression::FunctionCall(function, args));

        let err = resolve_expression(&ctx, &site).unwrap_err();
        assert!(matches!(err, Error::InvalidExpression { .. }));
    }
}
