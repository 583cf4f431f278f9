//! Module resolution (spec §4.4): the top-level entry point. Builds a
//! module's import table, closes the global scope's knot over its
//! declarations, then resolves its body.

use crate::ast::raw::{Import, RawModule};
use crate::ast::resolved::{Declaration, ResolvedModule};
use crate::collections::IndexMap;
use crate::decl::DeclarationRHS;
use crate::error::{Error, Errors};
use crate::ident::Ident;
use crate::predefined::Dialect;
use crate::resolver::context::{Context, ResolutionState};
use crate::resolver::scope_builder::local_scope;
use crate::resolver::statement::resolve_statements;
use crate::scope::{Bindings, Scope};
use crate::ty::AccessMode;

/// Every module's export scope, keyed by module name. A module that failed
/// to resolve at all still gets an entry here — an empty `Scope` — so a
/// lookup into it surfaces as `UnknownImport` rather than `UnknownModule`
/// (see [`crate::resolver::context::Context`]).
pub type ModuleTable = IndexMap<Ident, Scope>;

/// Resolves one module given the already-resolved export scopes of every
/// other module it might import, and the language variant (spec §9,
/// "Polymorphism over language variants") governing what's predefined and
/// which heading shapes are legal.
#[tracing::instrument(level = "debug", skip_all, fields(module = %m.name))]
pub fn resolve_module<D: Dialect>(
    dialect: &D,
    module_table: &ModuleTable,
    m: &RawModule,
) -> Result<ResolvedModule, Errors> {
    let (imports, import_errors) = import_scopes(module_table, &m.imports);

    let predefined = dialect.predefined_scope();
    let ctx = Context::new(imports, predefined.clone())
        .with_state(ResolutionState::Module)
        .with_type_bound_support(dialect.supports_type_bound_procedures());
    let (global, scope_errors) = local_scope(&ctx, &m.name, &m.declarations, &predefined);
    let body_ctx = ctx.with_scope(global.scope).with_state(ResolutionState::Statement);

    let (body, body_errors) = match &m.body {
        None => (None, None),
        Some(statements) => match resolve_statements(&body_ctx, statements) {
            Ok(statements) => (Some(statements), None),
            Err(e) => (None, Some(e)),
        },
    };

    let errors = [import_errors, scope_errors, body_errors]
        .into_iter()
        .flatten()
        .reduce(Errors::merge);
    if let Some(errors) = errors {
        return Err(errors);
    }

    Ok(ResolvedModule {
        name: m.name.clone(),
        imports: m.imports.clone(),
        declarations: global.declarations,
        body,
    })
}

/// Resolves every module in `modules`, ordering the work so a module is only
/// attempted once every other in-universe module it imports has an export
/// scope available. A cluster of modules whose imports are mutually
/// circular is resolved anyway, against whatever export scopes happen to be
/// available at that point; the still-missing imports then surface their
/// own `UnknownModule` errors rather than silently succeeding.
///
/// All-or-nothing: if any module fails, only the failing modules' errors are
/// returned and no `ResolvedModule`s are produced, matching every other
/// disambiguation boundary in this crate.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve_modules<D: Dialect>(
    dialect: &D,
    modules: &IndexMap<Ident, RawModule>,
) -> Result<IndexMap<Ident, ResolvedModule>, IndexMap<Ident, Errors>> {
    let mut table: ModuleTable = IndexMap::default();
    let mut resolved: IndexMap<Ident, ResolvedModule> = IndexMap::default();
    let mut errors: IndexMap<Ident, Errors> = IndexMap::default();
    let mut pending: Vec<Ident> = modules.keys().cloned().collect();

    loop {
        let mut next_pending = Vec::new();
        let mut progressed = false;

        for name in &pending {
            let m = &modules[name];
            let ready =
                m.imports.iter().all(|imp| !modules.contains_key(&imp.module) || table.contains_key(&imp.module));
            if !ready {
                next_pending.push(name.clone());
                continue;
            }
            progressed = true;
            settle(dialect, &mut table, &mut resolved, &mut errors, name, m);
        }

        if !progressed {
            tracing::debug!("circular import group, forcing resolution: {:?}", next_pending);
            for name in &next_pending {
                let m = &modules[name];
                settle(dialect, &mut table, &mut resolved, &mut errors, name, m);
            }
            break;
        }
        if next_pending.is_empty() {
            break;
        }
        pending = next_pending;
    }

    if errors.is_empty() {
        Ok(resolved)
    } else {
        Err(errors)
    }
}

fn settle<D: Dialect>(
    dialect: &D,
    table: &mut ModuleTable,
    resolved: &mut IndexMap<Ident, ResolvedModule>,
    errors: &mut IndexMap<Ident, Errors>,
    name: &Ident,
    m: &RawModule,
) {
    match resolve_module(dialect, table, m) {
        Ok(module) => {
            table.insert(name.clone(), exports_of_module(&module));
            resolved.insert(name.clone(), module);
        }
        Err(errs) => {
            table.insert(name.clone(), Scope::empty());
            errors.insert(name.clone(), errs);
        }
    }
}

/// `Import` carries no source position of its own (it is a single-line
/// statement in real Oberon source), so import-table errors are reported at
/// position 0 — the best this crate can do without a dedicated field.
fn import_scopes(module_table: &ModuleTable, imports: &[Import]) -> (IndexMap<Ident, Scope>, Option<Errors>) {
    let mut result: IndexMap<Ident, Scope> = IndexMap::default();
    let mut errors: Option<Errors> = None;

    for import in imports {
        let local_name = if import.alias.is_empty() { import.module.clone() } else { import.alias.clone() };

        let scope = match module_table.get(&import.module) {
            Some(scope) => scope.clone(),
            None => {
                let err = Error::UnknownModule { position: 0, module: import.module.clone() };
                errors = Some(merge(errors, Errors::single(err)));
                continue;
            }
        };

        if result.contains_key(&local_name) {
            let err = Error::ClashingImports { position: 0, name: local_name };
            errors = Some(merge(errors, Errors::single(err)));
            continue;
        }
        result.insert(local_name, scope);
    }

    (result, errors)
}

fn merge(acc: Option<Errors>, next: Errors) -> Errors {
    match acc {
        Some(existing) => existing.merge(next),
        None => next,
    }
}

/// Projects a resolved module's exported declarations into the `Scope`
/// other modules see it as when they import it.
fn exports_of_module(m: &ResolvedModule) -> Scope {
    let mut bindings = Bindings::new();
    for site in &m.declarations {
        for (name, access, rhs) in declaration_bindings(&site.node) {
            if access.is_exported() {
                bindings.insert(name, site.position, Ok(rhs));
            }
        }
    }
    Scope::layer(&Scope::empty(), bindings)
}

fn declaration_bindings(d: &Declaration) -> Vec<(Ident, AccessMode, DeclarationRHS)> {
    match d {
        Declaration::ConstDeclaration { name, access, value } => {
            vec![(name.clone(), *access, DeclarationRHS::DeclaredConstant(value.clone()))]
        }
        Declaration::TypeDeclaration { name, access, ty } => {
            vec![(name.clone(), *access, DeclarationRHS::DeclaredType(ty.clone()))]
        }
        Declaration::VarDeclaration { names, ty } => names
            .iter()
            .map(|(name, access)| (name.clone(), *access, DeclarationRHS::DeclaredVariable(ty.clone())))
            .collect(),
        Declaration::ProcedureDeclaration { heading, .. } => {
            let rhs = DeclarationRHS::procedure(false, Some(heading.params().clone()));
            vec![(heading.name().clone(), heading.access(), rhs)]
        }
        Declaration::ForwardDeclaration { name, access, params } => {
            vec![(name.clone(), *access, DeclarationRHS::procedure(false, params.clone()))]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::raw::{RawDeclaration, RawExpression};

    struct EmptyDialect;

    impl Dialect for EmptyDialect {
        fn predefined_scope(&self) -> Scope {
            Scope::empty()
        }

        fn is_builtin_procedure_name(&self, _name: &str) -> bool {
            false
        }

        fn supports_type_bound_procedures(&self) -> bool {
            true
        }
    }

    fn module_with_const(name: &str, const_name: &str, exported: bool) -> RawModule {
        let access = if exported { AccessMode::Exported } else { AccessMode::PrivateOnly };
        RawModule {
            name: name.into(),
            imports: Vec::new(),
            declarations: vec![crate::ident::NodeWrap::single(
                0,
                RawDeclaration::ConstDeclaration {
                    name: const_name.into(),
                    access,
                    value: crate::ident::NodeWrap::single(0, RawExpression::IntegerLiteral(1)),
                },
            )],
            body: None,
        }
    }

    #[test]
    fn module_with_no_imports_resolves() {
        let m = module_with_const("M", "N", true);
        let resolved = resolve_module(&EmptyDialect, &ModuleTable::default(), &m).unwrap();
        assert_eq!(resolved.declarations.len(), 1);
    }

    #[test]
    fn private_declarations_are_not_exported() {
        let m = module_with_const("M", "N", false);
        let resolved = resolve_module(&EmptyDialect, &ModuleTable::default(), &m).unwrap();
        let exports = exports_of_module(&resolved);
        assert!(!exports.contains(&Ident::new("N")));
    }

    #[test]
    fn importing_an_unknown_module_is_unknown_module() {
        let mut m = module_with_const("M", "N", true);
        m.imports.push(Import { alias: Ident::empty(), module: "Missing".into() });
        let err = resolve_module(&EmptyDialect, &ModuleTable::default(), &m).unwrap_err();
        assert!(matches!(err.as_slice()[0], Error::UnknownModule { .. }));
    }

    #[test]
    fn resolve_modules_orders_by_import_dependency() {
        let mut base = module_with_const("Base", "K", true);
        base.name = "Base".into();
        let mut dependent = module_with_const("Dependent", "L", true);
        dependent.imports.push(Import { alias: Ident::empty(), module: "Base".into() });

        let mut modules = IndexMap::default();
        modules.insert(Ident::new("Dependent"), dependent);
        modules.insert(Ident::new("Base"), base);

        let resolved = resolve_modules(&EmptyDialect, &modules).unwrap();
        assert_eq!(resolved.len(), 2);
    }
}
