//! Designator disambiguation (spec §4.3, "Designator").

use crate::ast::raw::{RawDesignator, RawDesignatorSite, RawExpressionSite};
use crate::ast::resolved::{Designator, DesignatorSite, ExpressionSite};
use crate::decl::DeclarationRHS;
use crate::error::{Error, Errors};
use crate::ident::{Placed, Position, QualIdent};
use crate::resolver::context::Context;
use crate::resolver::expression::resolve_expressions;
use crate::resolver::name::resolve_name;
use crate::resolver::partition;

/// Resolves a designator site in its ordinary role (as an `Expression`'s
/// `Read` target, a `Statement`'s `ProcedureCall` target, or nested inside
/// another designator). Zero-success is reported as a plain `Errors`: it is
/// the caller's job to know whether that becomes `InvalidExpression` or
/// `InvalidStatement`.
pub fn resolve_designator(ctx: &Context, site: &RawDesignatorSite) -> Result<DesignatorSite, Errors> {
    resolve_site(ctx, site, false)
}

/// Resolves a designator site in "record" position: the immediate operand
/// of a type-guard. A bare `Variable(q)` that denotes a type is still
/// `NotAValue`, but one that denotes a procedure is `NotARecord` rather
/// than the generic "not a value" complaint. This is itself a
/// disambiguation boundary (spec's `resolveRecord`), so it wraps its own
/// zero/multiple outcomes into a single `Error`.
pub fn resolve_record(ctx: &Context, site: &RawDesignatorSite) -> Result<DesignatorSite, Error> {
    let position = site.position;
    let results: Vec<Result<Designator, Errors>> =
        site.alternatives.alternatives().iter().map(|alt| resolve_alt(ctx, position, alt, true)).collect();
    reduce(
        position,
        results,
        |position, alts: &[Designator]| Error::AmbiguousRecord {
            position,
            alternatives: alts.iter().map(Designator::kind_name).collect(),
        },
        |causes| Error::InvalidRecord { position, causes },
    )
}

fn resolve_site(ctx: &Context, site: &RawDesignatorSite, record_mode: bool) -> Result<DesignatorSite, Errors> {
    let position = site.position;
    let results: Vec<Result<Designator, Errors>> =
        site.alternatives.alternatives().iter().map(|alt| resolve_alt(ctx, position, alt, record_mode)).collect();
    let (mut oks, causes) = partition(results);

    match oks.len() {
        1 => Ok(Placed::new(position, oks.pop().unwrap())),
        0 => Err(causes.expect("at least one alternative must have failed")),
        _ => {
            let alternatives = oks.iter().map(Designator::kind_name).collect();
            Err(Errors::single(Error::AmbiguousDesignator { position, alternatives }))
        }
    }
}

fn resolve_alt(
    ctx: &Context,
    position: Position,
    alt: &RawDesignator,
    record_mode: bool,
) -> Result<Designator, Errors> {
    match alt {
        RawDesignator::Variable(q) => {
            resolve_variable(ctx, position, q, record_mode).map(Designator::Variable)
        }
        RawDesignator::Field(record, field) => {
            let record = resolve_designator(ctx, record)?;
            Ok(Designator::Field(Box::new(record), field.clone()))
        }
        RawDesignator::TypeGuard(record, subtype) => {
            let record = resolve_record(ctx, record).map_err(Errors::from)?;
            crate::resolver::name::resolve_type_name(ctx, record.position, subtype).map_err(Errors::from)?;
            Ok(Designator::TypeGuard(Box::new(record), subtype.clone()))
        }
        RawDesignator::Dereference(pointer) => {
            let pointer = resolve_designator(ctx, pointer)?;
            Ok(Designator::Dereference(Box::new(pointer)))
        }
        RawDesignator::Index(array, indices) => {
            let array = resolve_designator(ctx, array)?;
            let indices = resolve_index_exprs(ctx, indices)?;
            Ok(Designator::Index(Box::new(array), indices))
        }
        RawDesignator::Call(proc, args) => {
            let proc = resolve_designator(ctx, proc)?;
            let args = resolve_index_exprs(ctx, args)?;
            Ok(Designator::Call(Box::new(proc), args))
        }
    }
}

fn resolve_variable(
    ctx: &Context,
    position: Position,
    q: &QualIdent,
    record_mode: bool,
) -> Result<QualIdent, Errors> {
    let rhs = resolve_name(ctx, position, q).map_err(Errors::from)?;
    if record_mode {
        match rhs {
            DeclarationRHS::DeclaredType(_) => return Err(Error::NotAValue { position, q: q.clone() }.into()),
            DeclarationRHS::DeclaredProcedure { .. } => {
                return Err(Error::NotARecord { position, q: q.clone() }.into())
            }
            _ => {}
        }
    } else if rhs.is_type() && !ctx.state.allows_type_as_value() {
        return Err(Error::NotAValue { position, q: q.clone() }.into());
    }
    Ok(q.clone())
}

fn resolve_index_exprs(ctx: &Context, exprs: &[RawExpressionSite]) -> Result<Vec<ExpressionSite>, Errors> {
    resolve_expressions(&ctx.with_state(crate::resolver::context::ResolutionState::Expression), exprs)
}

fn reduce<T>(
    position: Position,
    results: Vec<Result<T, Errors>>,
    ambiguous: impl FnOnce(Position, &[T]) -> Error,
    invalid: impl FnOnce(Errors) -> Error,
) -> Result<Placed<T>, Error> {
    let (mut oks, causes) = partition(results);
    match oks.len() {
        1 => Ok(Placed::new(position, oks.pop().unwrap())),
        0 => Err(invalid(causes.expect("at least one alternative must have failed"))),
        _ => Err(ambiguous(position, &oks)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::raw::RawDesignator;
    use crate::collections::IndexMap;
    use crate::ident::{Ambiguous, NodeWrap};
    use crate::scope::{Bindings, Scope};
    use crate::ty::Type;

    fn ctx_with(name: &str, rhs: DeclarationRHS) -> Context {
        let mut bindings = Bindings::new();
        bindings.insert(name.into(), 0, Ok(rhs));
        let scope = Scope::layer(&Scope::empty(), bindings);
        Context::new(IndexMap::default(), scope)
    }

    #[test]
    fn variable_resolves_to_the_same_name() {
        let ctx = ctx_with(
            "v",
            DeclarationRHS::DeclaredVariable(Type::named(0, QualIdent::unqualified("INTEGER"))),
        );
        let site = NodeWrap::single(3, RawDesignator::Variable(QualIdent::unqualified("v")));
        let resolved = resolve_designator(&ctx, &site).unwrap();
        assert!(matches!(resolved.node, Designator::Variable(_)));
        assert_eq!(resolved.position, 3);
    }

    #[test]
    fn bare_type_in_expression_position_is_not_a_value() {
        let ctx = ctx_with(
            "T",
            DeclarationRHS::DeclaredType(Type::named(0, QualIdent::unqualified("INTEGER"))),
        );
        let site = NodeWrap::single(3, RawDesignator::Variable(QualIdent::unqualified("T")));
        let err = resolve_designator(&ctx, &site).unwrap_err();
        assert!(matches!(err.as_slice()[0], Error::NotAValue { .. }));
    }

    #[test]
    fn two_succeeding_alternatives_are_ambiguous() {
        let ctx = ctx_with(
            "v",
            DeclarationRHS::DeclaredVariable(Type::named(0, QualIdent::unqualified("INTEGER"))),
        );
        let alts = Ambiguous::new(vec![
            RawDesignator::Variable(QualIdent::unqualified("v")),
            RawDesignator::Dereference(Box::new(NodeWrap::single(
                0,
                RawDesignator::Variable(QualIdent::unqualified("v")),
            ))),
        ]);
        let site = NodeWrap::new(4, alts);
        let err = resolve_designator(&ctx, &site).unwrap_err();
        match &err.as_slice()[0] {
            Error::AmbiguousDesignator { position: 4, alternatives } => assert_eq!(alternatives.len(), 2),
            other => panic!("expected AmbiguousDesignator, got {other:?}"),
        }
    }
}
