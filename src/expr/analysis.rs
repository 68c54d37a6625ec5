//! Structural queries over expressions: free symbols, containment,
//! size, and the `c + Σ aᵢ` decomposition the recurrence closer and
//! solver both need.

use std::sync::Arc;

use super::{Expr, ExprKind};
use crate::symbol::Symbol;

pub(super) fn free_symbols(e: &Expr) -> Vec<Symbol> {
    let mut out = Vec::new();
    collect_symbols(e, &mut out);
    out.sort();
    out.dedup();
    out
}

fn collect_symbols(e: &Expr, out: &mut Vec<Symbol>) {
    match &e.kind {
        ExprKind::Number(_) => {}
        ExprKind::Symbol(s) => out.push(s.clone()),
        ExprKind::Sum(terms) | ExprKind::Product(terms) => {
            for t in terms {
                collect_symbols(t, out);
            }
        }
        ExprKind::Div(a, b) | ExprKind::Pow(a, b) | ExprKind::Log(a, b) => {
            collect_symbols(a, out);
            collect_symbols(b, out);
        }
    }
}

pub(super) fn contains(e: &Expr, sym: &Symbol) -> bool {
    match &e.kind {
        ExprKind::Number(_) => false,
        ExprKind::Symbol(s) => s == sym,
        ExprKind::Sum(terms) | ExprKind::Product(terms) => terms.iter().any(|t| contains(t, sym)),
        ExprKind::Div(a, b) | ExprKind::Pow(a, b) | ExprKind::Log(a, b) => {
            contains(a, sym) || contains(b, sym)
        }
    }
}

pub(super) fn node_count(e: &Expr) -> usize {
    1 + match &e.kind {
        ExprKind::Number(_) | ExprKind::Symbol(_) => 0,
        ExprKind::Sum(terms) | ExprKind::Product(terms) => terms.iter().map(|t| node_count(t)).sum(),
        ExprKind::Div(a, b) | ExprKind::Pow(a, b) | ExprKind::Log(a, b) => node_count(a) + node_count(b),
    }
}

/// Decompose `e` as `c + Σ aᵢ` where `c` is the `sym`-free part and each
/// `aᵢ` mentions `sym`. Returns `(c, [a_1, a_2, ...])`.
pub fn as_coeff_add(e: &Arc<Expr>, sym: &Symbol) -> (Arc<Expr>, Vec<Arc<Expr>>) {
    let terms: Vec<Arc<Expr>> = match &e.kind {
        ExprKind::Sum(terms) => terms.clone(),
        _ => vec![e.clone()],
    };
    let mut free = Vec::new();
    let mut bound = Vec::new();
    for t in terms {
        if t.contains(sym) {
            bound.push(t);
        } else {
            free.push(t);
        }
    }
    (Expr::sum(free), bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::int;

    #[test]
    fn as_coeff_add_separates_symbol_dependent_terms() {
        let n = Symbol::new("n");
        let e = Expr::sum(vec![
            Expr::int(3),
            Expr::symbol(n.clone()),
            Expr::product(vec![Expr::int(2), Expr::symbol(n.clone())]),
        ]);
        let (c, terms) = as_coeff_add(&e, &n);
        assert_eq!(c.as_number(), Some(&int(3)));
        assert_eq!(terms.len(), 1, "like n-terms should already have combined");
    }

    #[test]
    fn free_symbols_deduplicates() {
        let x = Symbol::new("x");
        let e = Expr::sum(vec![Expr::symbol(x.clone()), Expr::symbol(x.clone())]);
        assert_eq!(e.free_symbols().len(), 1);
    }
}
