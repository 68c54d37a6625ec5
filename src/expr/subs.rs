//! Symbol substitution. Rebuilding through the smart constructors keeps
//! the result canonical, so `subs` and `simplify` never disagree about
//! what "simplified" means.

use std::sync::Arc;

use super::{Expr, ExprKind};
use crate::symbol::Symbol;

/// Replace every occurrence of `sym` in `e` with `replacement`.
pub fn substitute(e: &Arc<Expr>, sym: &Symbol, replacement: &Arc<Expr>) -> Arc<Expr> {
    match &e.kind {
        ExprKind::Number(_) => e.clone(),
        ExprKind::Symbol(s) => {
            if s == sym {
                replacement.clone()
            } else {
                e.clone()
            }
        }
        ExprKind::Sum(terms) => {
            Expr::sum(terms.iter().map(|t| substitute(t, sym, replacement)).collect())
        }
        ExprKind::Product(factors) => {
            Expr::product(factors.iter().map(|f| substitute(f, sym, replacement)).collect())
        }
        ExprKind::Div(a, b) => Expr::div(substitute(a, sym, replacement), substitute(b, sym, replacement)),
        ExprKind::Pow(a, b) => Expr::pow(substitute(a, sym, replacement), substitute(b, sym, replacement)),
        ExprKind::Log(a, b) => Expr::log(substitute(a, sym, replacement), substitute(b, sym, replacement)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::int;

    #[test]
    fn substitute_replaces_symbol() {
        let x = Symbol::new("x");
        let e = Expr::sum(vec![Expr::symbol(x.clone()), Expr::int(1)]);
        let out = substitute(&e, &x, &Expr::int(4));
        assert_eq!(out.as_number(), Some(&int(5)));
    }

    #[test]
    fn substitute_is_idempotent_on_symbol_free_result() {
        let x = Symbol::new("x");
        let e = Expr::symbol(x.clone());
        let once = substitute(&e, &x, &Expr::int(7));
        let twice = substitute(&once, &x, &Expr::int(7));
        assert_eq!(once, twice);
    }
}
