//! The recurrence closer: `repeated(n, i, e, a, b)`.
//!
//! Defines `n_a = n` and `n_{k+1} = e[n := n_k, i := k+1]`, and returns a
//! closed form for `n_b`. The case analysis below follows the table
//! exactly, in the same order, so a shape that matches an earlier row
//! never falls through to a later one.

use std::sync::Arc;

use crate::expr::{Expr, as_coeff_add, bounded_sum, simplify, substitute};
use crate::symbol::Symbol;

pub fn repeated(
    n: &Symbol,
    i: &Symbol,
    e: &Arc<Expr>,
    a: &Arc<Expr>,
    b: &Arc<Expr>,
) -> Result<Arc<Expr>, String> {
    let depends_i = e.contains(i);
    let depends_n = e.contains(n);

    match (depends_i, depends_n) {
        (false, false) => Ok(e.clone()),
        (true, false) => Ok(substitute(e, i, b)),
        (false, true) => close_accumulator_only(n, e, a, b),
        (true, true) => close_index_dependent(n, i, e, a, b),
    }
}

fn iteration_count(a: &Arc<Expr>, b: &Arc<Expr>) -> Arc<Expr> {
    Expr::sum(vec![b.clone(), Expr::neg(a.clone()), Expr::int(1)])
}

/// `e` depends on `n` but not on `i`: either `n + t` (arithmetic) or
/// `c*n` (geometric), both with `n`-free coefficients.
fn close_accumulator_only(n: &Symbol, e: &Arc<Expr>, a: &Arc<Expr>, b: &Arc<Expr>) -> Result<Arc<Expr>, String> {
    let (free, bound_terms) = as_coeff_add(e, n);
    let bound = simplify(&Expr::sum(bound_terms));
    let ratio = simplify(&Expr::div(bound, Expr::symbol(n.clone())));
    if ratio.contains(n) {
        return Err("recurrence is non-linear in the accumulator".to_string());
    }

    let count = iteration_count(a, b);
    if ratio.is_one() {
        // n + t -> n + t * (b - a + 1)
        let total = Expr::product(vec![free, count]);
        return Ok(Expr::sum(vec![Expr::symbol(n.clone()), total]));
    }
    if free.is_zero() {
        // c*n -> n * c^(b - a + 1)
        let factor = Expr::pow(ratio, count);
        return Ok(Expr::product(vec![Expr::symbol(n.clone()), factor]));
    }
    Err("recurrence is neither an arithmetic nor a geometric accumulation".to_string())
}

/// `e` depends on both `n` and `i`: the only closable shape is
/// `n + t(i)` with `t` not containing `n`.
fn close_index_dependent(
    n: &Symbol,
    i: &Symbol,
    e: &Arc<Expr>,
    a: &Arc<Expr>,
    b: &Arc<Expr>,
) -> Result<Arc<Expr>, String> {
    let (free, bound_terms) = as_coeff_add(e, n);
    let bound = simplify(&Expr::sum(bound_terms));
    let ratio = simplify(&Expr::div(bound, Expr::symbol(n.clone())));
    if !ratio.is_one() {
        return Err("recurrence couples the loop index and the accumulator".to_string());
    }
    let summed = bounded_sum(&free, i, a, b)?;
    Ok(Expr::sum(vec![Expr::symbol(n.clone()), summed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::int;
    use quickcheck_macros::quickcheck;

    fn unroll(n0: i64, a: i64, b: i64, step: impl Fn(i64, i64) -> i64) -> i64 {
        let mut n = n0;
        let mut idx = a;
        while idx <= b {
            n = step(n, idx);
            idx += 1;
        }
        n
    }

    #[test]
    fn constant_case_is_unchanged() {
        let n = Symbol::new("n");
        let i = Symbol::new_counter("i");
        let closed = repeated(&n, &i, &Expr::int(7), &Expr::int(1), &Expr::int(5)).unwrap();
        assert_eq!(closed.as_number(), Some(&int(7)));
    }

    #[test]
    fn last_iteration_overwrite() {
        let n = Symbol::new("n");
        let i = Symbol::new_counter("i");
        // e = i*i, depends on i only -> value at the last iteration, i=b.
        let e = Expr::pow(Expr::symbol(i.clone()), Expr::int(2));
        let closed = repeated(&n, &i, &e, &Expr::int(1), &Expr::int(4)).unwrap();
        assert_eq!(closed.as_number(), Some(&int(16)));
    }

    #[test]
    fn arithmetic_accumulation_matches_unrolling() {
        let n = Symbol::new("n");
        let i = Symbol::new_counter("i");
        let e = Expr::sum(vec![Expr::symbol(n.clone()), Expr::int(3)]);
        let closed = repeated(&n, &i, &e, &Expr::int(1), &Expr::int(5)).unwrap();
        let with_n0 = simplify(&substitute(&closed, &n, &Expr::int(10)));
        assert_eq!(with_n0.as_number(), Some(&int(unroll(10, 1, 5, |acc, _| acc + 3))));
    }

    #[test]
    fn geometric_accumulation_matches_unrolling() {
        let n = Symbol::new("n");
        let i = Symbol::new_counter("i");
        let e = Expr::product(vec![Expr::int(2), Expr::symbol(n.clone())]);
        let closed = repeated(&n, &i, &e, &Expr::int(1), &Expr::int(4)).unwrap();
        let with_n0 = simplify(&substitute(&closed, &n, &Expr::int(3)));
        assert_eq!(with_n0.as_number(), Some(&int(unroll(3, 1, 4, |acc, _| acc * 2))));
    }

    #[test]
    fn index_dependent_accumulation_matches_unrolling() {
        let n = Symbol::new("n");
        let i = Symbol::new_counter("i");
        let e = Expr::sum(vec![Expr::symbol(n.clone()), Expr::symbol(i.clone())]);
        let closed = repeated(&n, &i, &e, &Expr::int(1), &Expr::int(5)).unwrap();
        let with_n0 = simplify(&substitute(&closed, &n, &Expr::int(0)));
        assert_eq!(with_n0.as_number(), Some(&int(unroll(0, 1, 5, |acc, idx| acc + idx))));
    }

    #[quickcheck]
    fn arithmetic_case_matches_unrolling_for_any_small_bounds(n0: i8, a: u8, span: u8) -> bool {
        let a = i64::from(a % 6);
        let b = a + i64::from(span % 6);
        let n0 = i64::from(n0);

        let n = Symbol::new("n");
        let i = Symbol::new_counter("i");
        let e = Expr::sum(vec![Expr::symbol(n.clone()), Expr::int(2)]);
        let closed = repeated(&n, &i, &e, &Expr::int(a), &Expr::int(b)).unwrap();
        let with_n0 = simplify(&substitute(&closed, &n, &Expr::int(n0)));

        with_n0.as_number() == Some(&int(unroll(n0, a, b, |acc, _| acc + 2)))
    }
}
