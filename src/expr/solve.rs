//! Equation solving, restricted to exactly the two shapes the recurrence
//! closer and the while-loop termination solver need: isolating a
//! linearly-appearing variable, and inverting a single `Pow` whose
//! exponent is linear in the variable (the geometric-recurrence case),
//! via `log`. No general Gröbner/CAS solver is in scope.

use std::sync::Arc;

use super::analysis::as_coeff_add;
use super::simplify::simplify;
use super::{Expr, ExprKind};
use crate::symbol::Symbol;

/// Solve `lhs == rhs` for `var`. `Err` describes why no supported shape
/// matched.
pub fn solve_linear_or_log(lhs: &Arc<Expr>, rhs: &Arc<Expr>, var: &Symbol) -> Result<Arc<Expr>, String> {
    let diff = simplify(&Expr::sub(lhs.clone(), rhs.clone()));
    let (free, bound) = as_coeff_add(&diff, var);
    if bound.is_empty() {
        return Err("equation does not involve the target variable".to_string());
    }
    let combined = simplify(&Expr::sum(bound));

    // Case 1: `combined` is `c * var` for a `var`-free `c` (linear).
    let ratio = simplify(&Expr::div(combined.clone(), Expr::symbol(var.clone())));
    if !ratio.contains(var) {
        return Ok(simplify(&Expr::div(Expr::neg(free), ratio)));
    }

    // Case 2: `combined` is `c * base^f(var)` for `var`-free `base`, `c`.
    if let Some((coeff, base, exp)) = find_pow_with_var(&combined, var) {
        let target = simplify(&Expr::div(Expr::neg(free), coeff));
        let log_value = simplify(&Expr::log(base, target));
        // `exp` is linear in `var`; recurse to isolate it in `exp = log_value`.
        return solve_linear_or_log(&exp, &log_value, var);
    }

    Err("recurrence does not match a supported solvable shape".to_string())
}

/// Find the single `Pow` factor in `e` whose base is `var`-free and
/// whose exponent contains `var`, returning `(coefficient, base, exp)`
/// where `coefficient` is the product of every other factor.
fn find_pow_with_var(e: &Arc<Expr>, var: &Symbol) -> Option<(Arc<Expr>, Arc<Expr>, Arc<Expr>)> {
    match &e.kind {
        ExprKind::Pow(base, exp) if !base.contains(var) && exp.contains(var) => {
            Some((Expr::int(1), base.clone(), exp.clone()))
        }
        ExprKind::Product(factors) => {
            let mut coeff_factors = Vec::new();
            let mut found = None;
            for f in factors {
                if found.is_none() {
                    if let ExprKind::Pow(base, exp) = &f.kind {
                        if !base.contains(var) && exp.contains(var) {
                            found = Some((base.clone(), exp.clone()));
                            continue;
                        }
                    }
                }
                coeff_factors.push(f.clone());
            }
            found.map(|(base, exp)| (Expr::product(coeff_factors), base, exp))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::int;

    #[test]
    fn solves_linear_equation() {
        let k = Symbol::new_counter("K");
        // K + 3 = 10 -> K = 7
        let lhs = Expr::sum(vec![Expr::symbol(k.clone()), Expr::int(3)]);
        let rhs = Expr::int(10);
        let solution = solve_linear_or_log(&lhs, &rhs, &k).unwrap();
        assert_eq!(solution.as_number(), Some(&int(7)));
    }

    #[test]
    fn solves_geometric_equation_via_log() {
        let k = Symbol::new_counter("K");
        let n = Symbol::new("n");
        // 2^K = n -> K = log_2(n)
        let lhs = Expr::pow(Expr::int(2), Expr::symbol(k.clone()));
        let rhs = Expr::symbol(n.clone());
        let solution = solve_linear_or_log(&lhs, &rhs, &k).unwrap();
        match &solution.kind {
            ExprKind::Log(base, arg) => {
                assert_eq!(base.as_number(), Some(&int(2)));
                assert!(matches!(&arg.kind, ExprKind::Symbol(s) if *s == n));
            }
            other => panic!("expected Log(2, n), got {other:?}"),
        }
    }
}
