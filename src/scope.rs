//! The scope/effect store.
//!
//! A scope is created when entering a function body, a `for` body, or a
//! `while` body, and destroyed when that body finishes; the interpreter
//! keeps the chain of currently-open scopes as a plain stack rather than
//! a parent-linked object graph (see `crate::interp`), since an `Expr`
//! never back-references the scope that produced it.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::expr::{Expr, simplify, substitute};
use crate::symbol::Symbol;

/// A lexically nested environment: source-variable names to their
/// initial-value symbol, plus the effect map giving each such symbol's
/// (and the local `steps` counter's) current closed-form value.
pub struct Scope {
    locals: IndexMap<String, Symbol>,
    effects: IndexMap<Symbol, Arc<Expr>>,
    steps: Symbol,
    output: Option<Arc<Expr>>,
}

impl Scope {
    /// Push a new scope. `ancestors` is every scope currently open,
    /// innermost first or in any order — each one's `steps` symbol is
    /// primed here with a literal "+1" entry in the *new* scope's own
    /// effect map, so that cost folds outward one level at a time as
    /// each enclosing scope eventually exits. This is the accounting
    /// primitive that makes nested-loop costs multiply out for free:
    /// charging the innermost scope "1 step" becomes `iterations` when
    /// that scope's effects fold into its parent via `repeated`, and
    /// `iterations_outer * iterations_inner` once the parent folds in
    /// turn.
    pub fn enter(ancestors: &[&Scope], locals: IndexMap<String, Symbol>) -> Self {
        let steps = Symbol::new_counter("steps");
        let mut effects = IndexMap::new();
        effects.insert(steps.clone(), Expr::int(0));
        let mut scope = Self { locals, effects, steps: steps.clone(), output: None };

        scope.add_effect_symbol(steps, Expr::sum(vec![Expr::symbol(scope.steps.clone()), Expr::int(1)]));
        for ancestor in ancestors {
            let anc_steps = ancestor.steps.clone();
            scope.add_effect_symbol(
                anc_steps.clone(),
                Expr::sum(vec![Expr::symbol(anc_steps), Expr::int(1)]),
            );
        }
        scope
    }

    pub fn steps_symbol(&self) -> &Symbol {
        &self.steps
    }

    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.locals.get(name)
    }

    /// Register `name` as a local bound to `sym` without touching
    /// `effects` — used when an assignment's target has never been seen
    /// anywhere in the enclosing scope chain.
    pub fn declare_local(&mut self, name: &str, sym: Symbol) {
        self.locals.insert(name.to_string(), sym);
    }

    /// Apply every currently recorded effect to `e`. Because each stored
    /// effect value was itself `affect`-ed at write time, one pass of
    /// substitution (in any order) is idempotent and sufficient.
    pub fn affect(&self, e: &Arc<Expr>) -> Arc<Expr> {
        let mut result = e.clone();
        for (sym, value) in &self.effects {
            result = substitute(&result, sym, value);
        }
        simplify(&result)
    }

    /// Assign `e` to the named source variable, minting a fresh symbol
    /// the first time this name is assigned in this scope. Returns the
    /// symbol the assignment landed on.
    pub fn add_effect_by_name(&mut self, name: &str, e: Arc<Expr>) -> Symbol {
        let sym = self.locals.get(name).cloned().unwrap_or_else(|| {
            let fresh = Symbol::new(name);
            self.locals.insert(name.to_string(), fresh.clone());
            fresh
        });
        self.add_effect_symbol(sym.clone(), e);
        sym
    }

    /// Record `effects[sym] <- affect(e)`, the write-time normalization
    /// that keeps later reads idempotent.
    pub fn add_effect_symbol(&mut self, sym: Symbol, e: Arc<Expr>) {
        let affected = self.affect(&e);
        self.effects.insert(sym, affected);
    }

    pub fn effects(&self) -> &IndexMap<Symbol, Arc<Expr>> {
        &self.effects
    }

    /// The local variables this scope has ever assigned, excluding its
    /// own `steps` counter.
    pub fn changed_vars(&self) -> Vec<Symbol> {
        self.effects.keys().filter(|s| **s != self.steps).cloned().collect()
    }

    pub fn set_output(&mut self, e: Arc<Expr>) -> Result<(), ()> {
        if self.output.is_some() {
            return Err(());
        }
        self.output = Some(e);
        Ok(())
    }

    pub fn output(&self) -> Option<&Arc<Expr>> {
        self.output.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scope_starts_at_one_step() {
        let scope = Scope::enter(&[], IndexMap::new());
        let steps = scope.affect(&Expr::symbol(scope.steps_symbol().clone()));
        assert_eq!(steps.as_number(), Some(&crate::rational::int(1)));
    }

    #[test]
    fn affect_is_idempotent() {
        let mut scope = Scope::enter(&[], IndexMap::new());
        let x = scope.add_effect_by_name("x", Expr::int(3));
        let e = Expr::symbol(x);
        let once = scope.affect(&e);
        let twice = scope.affect(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn nested_scope_primes_ancestor_steps() {
        let outer = Scope::enter(&[], IndexMap::new());
        let inner = Scope::enter(&[&outer], IndexMap::new());
        assert!(inner.effects().contains_key(outer.steps_symbol()));
    }
}
