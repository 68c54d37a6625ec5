//! A bounded rewrite-to-fixpoint pass on top of the smart constructors.
//!
//! The constructors already canonicalize every expression they build, so
//! most of what `simplify` adds is re-triggering that canonicalization
//! after rules the constructors don't apply on their own fire (division
//! cancellation, chiefly) — exactly the shape the recurrence closer needs
//! from `(arg/n).simplify().contains(n)`.

use std::collections::HashSet;
use std::sync::Arc;

use super::{Expr, ExprKind};
use crate::rational::int;

const MAX_ITERATIONS: usize = 1000;

/// Rewrite `e` to a fixed point. Falls back to the last value reached if
/// the iteration cap is hit, which should only happen on a pathological
/// or cyclic rewrite — there is no known input in this language that
/// triggers it.
pub fn simplify(e: &Arc<Expr>) -> Arc<Expr> {
    let mut current = e.clone();
    let mut seen = HashSet::new();
    let mut iterations = 0;

    loop {
        if iterations >= MAX_ITERATIONS {
            eprintln!("warning: expression simplification iteration limit reached");
            break;
        }
        let key = format!("{current:?}");
        if !seen.insert(key) {
            break;
        }
        let next = apply_rules(&current);
        if next == current {
            break;
        }
        current = next;
        iterations += 1;
    }

    current
}

fn apply_rules(e: &Arc<Expr>) -> Arc<Expr> {
    let rebuilt = match &e.kind {
        ExprKind::Number(_) | ExprKind::Symbol(_) => return e.clone(),
        ExprKind::Sum(terms) => Expr::sum(terms.iter().map(apply_rules).collect()),
        ExprKind::Product(factors) => Expr::product(factors.iter().map(apply_rules).collect()),
        ExprKind::Div(a, b) => Expr::div(apply_rules(a), apply_rules(b)),
        ExprKind::Pow(a, b) => Expr::pow(apply_rules(a), apply_rules(b)),
        ExprKind::Log(a, b) => Expr::log(apply_rules(a), apply_rules(b)),
    };
    cancel_division(&rebuilt)
}

/// `a/a -> 1`, and `(c*a)/a -> c` for a factor `a` appearing in a
/// numerator product.
fn cancel_division(e: &Arc<Expr>) -> Arc<Expr> {
    let ExprKind::Div(num, den) = &e.kind else {
        return e.clone();
    };
    if num == den {
        return Expr::number(int(1));
    }
    if let ExprKind::Product(factors) = &num.kind {
        if let Some(pos) = factors.iter().position(|f| f == den) {
            let mut rest = factors.clone();
            rest.remove(pos);
            return Expr::product(rest);
        }
    }
    e.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    #[test]
    fn simplify_is_idempotent() {
        let n = Symbol::new("n");
        let e = Expr::div(
            Expr::product(vec![Expr::int(3), Expr::symbol(n.clone())]),
            Expr::symbol(n),
        );
        let once = simplify(&e);
        let twice = simplify(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn cancels_shared_factor() {
        let n = Symbol::new("n");
        let e = Expr::div(
            Expr::product(vec![Expr::int(3), Expr::symbol(n.clone())]),
            Expr::symbol(n.clone()),
        );
        let simplified = simplify(&e);
        assert!(!simplified.contains(&n));
        assert_eq!(simplified.as_number(), Some(&crate::rational::int(3)));
    }
}
