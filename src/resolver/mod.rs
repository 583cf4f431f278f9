//! The ambiguity disambiguator (spec §4.3) and its supporting pieces: the
//! resolution context, the name resolver, and one module per ambiguous
//! production.

pub mod body;
pub mod context;
pub mod designator;
pub mod expression;
pub mod heading;
pub mod name;
pub mod scope_builder;
pub mod statement;
pub mod types;

use crate::error::Errors;

/// Splits a batch of per-alternative outcomes into the ones that succeeded
/// and, if any failed, their combined causes. Used at every disambiguation
/// boundary to implement the unique/zero/multiple selection rule.
pub(crate) fn partition<T>(results: Vec<Result<T, Errors>>) -> (Vec<T>, Option<Errors>) {
    let mut oks = Vec::new();
    let mut failed: Option<Errors> = None;
    for result in results {
        match result {
            Ok(v) => oks.push(v),
            Err(e) => {
                failed = Some(match failed {
                    Some(existing) => existing.merge(e),
                    None => e,
                });
            }
        }
    }
    (oks, failed)
}
