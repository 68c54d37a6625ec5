//! Bounded symbolic summation `Σ_{i=a}^{b} term(i)`, closed in general
//! symbolic bounds via Faulhaber's formula.
//!
//! `term` is decomposed into a sum of monomials `c · i^k` (`c` free of
//! `i`); each monomial's bounded sum is closed exactly using Bernoulli
//! numbers, and the results are added back together — this is what
//! `sympy.summation` does symbolically in the implementation this crate
//! is grounded on, specialized to the polynomial-in-`i` case the
//! recurrence closer actually needs.

use std::sync::Arc;

use super::{Expr, ExprKind};
use crate::rational::{binomial, bernoulli, int};
use crate::symbol::Symbol;

/// Close `Σ_{i=lower}^{upper} term` for `term` polynomial in `index`.
/// `Err` names why it could not be closed (reported upstream as an
/// unsupported recurrence).
pub fn bounded_sum(
    term: &Arc<Expr>,
    index: &Symbol,
    lower: &Arc<Expr>,
    upper: &Arc<Expr>,
) -> Result<Arc<Expr>, String> {
    let monomials: Vec<Arc<Expr>> = match &term.kind {
        ExprKind::Sum(terms) => terms.clone(),
        _ => vec![term.clone()],
    };

    let mut by_degree: Vec<(u32, Vec<Arc<Expr>>)> = Vec::new();
    for m in monomials {
        let (coeff, degree) = monomial_degree(&m, index)?;
        if let Some(slot) = by_degree.iter_mut().find(|(d, _)| *d == degree) {
            slot.1.push(coeff);
        } else {
            by_degree.push((degree, vec![coeff]));
        }
    }

    let mut total = Vec::new();
    for (degree, coeffs) in by_degree {
        let coeff = Expr::sum(coeffs);
        let closed = sum_of_powers(degree, lower, upper);
        total.push(Expr::product(vec![coeff, closed]));
    }
    Ok(Expr::sum(total))
}

/// Split a single monomial into `(coefficient, degree)` so that
/// `coefficient * index^degree == monomial`, where `coefficient` is
/// `index`-free.
fn monomial_degree(m: &Arc<Expr>, index: &Symbol) -> Result<(Arc<Expr>, u32), String> {
    if !m.contains(index) {
        return Ok((m.clone(), 0));
    }
    if let ExprKind::Symbol(s) = &m.kind {
        return if s == index {
            Ok((Expr::int(1), 1))
        } else {
            Err(format!("summand depends on unexpected symbol '{s}'"))
        };
    }
    if let ExprKind::Pow(base, exp) = &m.kind {
        if matches!(&base.kind, ExprKind::Symbol(s) if s == index) {
            if let Some(k) = exp.as_number().and_then(crate::rational::to_i64) {
                if k >= 0 {
                    return Ok((Expr::int(1), k as u32));
                }
            }
            return Err("summation only closes non-negative integer powers of the index".into());
        }
    }
    if let ExprKind::Product(factors) = &m.kind {
        let mut coeff_factors = Vec::new();
        let mut degree = None;
        for f in factors {
            if !f.contains(index) {
                coeff_factors.push(f.clone());
                continue;
            }
            if degree.is_some() {
                return Err("summand is not a single monomial in the index".into());
            }
            let is_bare_index = matches!(&f.kind, ExprKind::Symbol(s) if s == index);
            if is_bare_index {
                degree = Some(1);
                continue;
            }
            if let ExprKind::Pow(base, exp) = &f.kind {
                if matches!(&base.kind, ExprKind::Symbol(s) if s == index) {
                    if let Some(k) = exp.as_number().and_then(crate::rational::to_i64) {
                        if k >= 0 {
                            degree = Some(k as u32);
                            continue;
                        }
                    }
                }
            }
            return Err("summand is not a polynomial in the index".into());
        }
        return Ok((Expr::product(coeff_factors), degree.unwrap_or(0)));
    }
    Err("summand is not a polynomial in the index".into())
}

/// `Σ_{i=lower}^{upper} i^degree`, via `F(upper) - F(lower - 1)` where
/// `F(n) = Σ_{i=1}^{n} i^degree` is Faulhaber's closed polynomial in `n`
/// (valid as a polynomial identity for any symbolic `n`, not just
/// positive integers, so it telescopes correctly for symbolic bounds).
fn sum_of_powers(degree: u32, lower: &Arc<Expr>, upper: &Arc<Expr>) -> Arc<Expr> {
    let lower_minus_one = Expr::sum(vec![lower.clone(), Expr::int(-1)]);
    Expr::sub(faulhaber(upper, degree), faulhaber(&lower_minus_one, degree))
}

fn faulhaber(n: &Arc<Expr>, k: u32) -> Arc<Expr> {
    let mut terms = Vec::new();
    for j in 0..=k {
        let coeff = binomial(k + 1, j) * bernoulli(j) / int(i64::from(k + 1));
        if coeff.numer() == &0 {
            continue;
        }
        let power = k + 1 - j;
        let power_expr = if power == 0 {
            Expr::int(1)
        } else {
            Expr::pow(n.clone(), Expr::int(i64::from(power)))
        };
        terms.push(Expr::product(vec![Expr::number(coeff), power_expr]));
    }
    Expr::sum(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_of_ones_is_the_count() {
        let i = Symbol::new_counter("i");
        let sum = bounded_sum(&Expr::int(1), &i, &Expr::int(1), &Expr::int(5)).unwrap();
        assert_eq!(sum.as_number(), Some(&int(5)));
    }

    #[test]
    fn sum_of_index_matches_gauss_formula() {
        let i = Symbol::new_counter("i");
        let sum = bounded_sum(&Expr::symbol(i.clone()), &i, &Expr::int(1), &Expr::int(10)).unwrap();
        // 1 + 2 + ... + 10 = 55
        assert_eq!(sum.as_number(), Some(&int(55)));
    }

    #[test]
    fn sum_of_squares_matches_known_value() {
        let i = Symbol::new_counter("i");
        let term = Expr::pow(Expr::symbol(i.clone()), Expr::int(2));
        let sum = bounded_sum(&term, &i, &Expr::int(1), &Expr::int(4)).unwrap();
        // 1 + 4 + 9 + 16 = 30
        assert_eq!(sum.as_number(), Some(&int(30)));
    }
}
