//! The AST shapes the resolver consumes and produces: [`raw`] is the
//! parser's ambiguous output, [`resolved`] is the disambiguated result.

pub mod raw;
pub mod resolved;
