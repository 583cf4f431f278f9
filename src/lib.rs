//! Name resolution and ambiguity disambiguation for Oberon and Oberon-2.
//!
//! The parser this crate is built to sit behind admits every grammatically
//! valid interpretation of a syntactic site it cannot itself disambiguate —
//! `foo(bar)` as a procedure call, a function call, or a type guard;
//! `A.B` as a field access, a qualified import reference, or a pointer
//! dereference followed by a field access. [`ast::raw`] is that ambiguous
//! tree. This crate's job is to reduce it, module by module, to
//! [`ast::resolved`]: exactly one interpretation per site, every identifier
//! bound to the declaration it refers to, every designator's static kind
//! known (variable, type, or procedure).
//!
//! It does not type-check: declarations are classified by kind only (is
//! this a type, a procedure, a variable?), never checked for structural
//! compatibility, and constant expressions are not evaluated. See
//! `SPEC_FULL.md`'s Non-goals for the complete boundary.
//!
//! Entry points: [`module::resolve_module`] resolves one module given a
//! [`predefined::Dialect`] and the export scopes of the modules it imports;
//! [`module::resolve_modules`] resolves an entire program against one
//! dialect, working out the necessary import order itself. [`predefined::Oberon`]
//! and [`predefined::Oberon2`] are the two language variants; [`predefined::predefined`]
//! and [`predefined::predefined2`] expose their universal scopes directly for
//! callers that only need the scope, not full dialect-aware resolution.

pub mod ast;
pub mod collections;
pub mod decl;
pub mod error;
pub mod ident;
pub mod module;
pub mod predefined;
pub mod resolver;
pub mod scope;
pub mod ty;

pub use error::{Error, Errors};
pub use ident::{Ident, Position, QualIdent};
pub use module::{resolve_module, resolve_modules, ModuleTable};
pub use predefined::{predefined, predefined2, Dialect, Oberon, Oberon2};
pub use scope::Scope;
