//! Smart constructors: flattening, constant folding and like-term
//! combination performed once, at construction time, so every `Expr` any
//! other module observes is already canonical.

use std::sync::Arc;

use super::{Expr, ExprKind, expr_cmp, make};
use crate::rational::{Rational, int, pow_rational, to_i64};

pub(super) fn build_sum(terms: Vec<Arc<Expr>>) -> Arc<Expr> {
    let mut flat = Vec::with_capacity(terms.len());
    flatten_sum(terms, &mut flat);

    let mut constant = int(0);
    let mut groups: Vec<(Arc<Expr>, Rational)> = Vec::new();

    for term in flat {
        if let ExprKind::Number(n) = &term.kind {
            constant += n;
            continue;
        }
        let (coeff, base) = extract_coeff(&term);
        if let Some(slot) = groups.iter_mut().find(|(b, _)| *b == base) {
            slot.1 += coeff;
        } else {
            groups.push((base, coeff));
        }
    }

    let mut result: Vec<Arc<Expr>> = groups
        .into_iter()
        .filter(|(_, coeff)| !coeff.numer().eq(&0))
        .map(|(base, coeff)| scale(coeff, base))
        .collect();

    if constant.numer() != &0 || result.is_empty() {
        result.push(Expr::number(constant));
    }
    result.sort_by(|a, b| expr_cmp(a, b));

    finish(result, ExprKind::Sum, int(0))
}

pub(super) fn build_product(factors: Vec<Arc<Expr>>) -> Arc<Expr> {
    let mut flat = Vec::with_capacity(factors.len());
    flatten_product(factors, &mut flat);

    let mut constant = int(1);
    let mut groups: Vec<(Arc<Expr>, Arc<Expr>)> = Vec::new();

    for factor in flat {
        if let ExprKind::Number(n) = &factor.kind {
            if n.numer() == &0 {
                return Expr::number(int(0));
            }
            constant *= n;
            continue;
        }
        let (base, exp) = extract_base_exp(&factor);
        if let Some(slot) = groups.iter_mut().find(|(b, _)| *b == base) {
            slot.1 = Expr::sum(vec![slot.1.clone(), exp]);
        } else {
            groups.push((base, exp));
        }
    }

    let mut result: Vec<Arc<Expr>> = groups
        .into_iter()
        .filter_map(|(base, exp)| {
            if exp.is_zero() {
                None
            } else if exp.is_one() {
                Some(base)
            } else {
                Some(build_pow(base, exp))
            }
        })
        .collect();

    if constant != int(1) || result.is_empty() {
        result.push(Expr::number(constant));
    }
    result.sort_by(|a, b| expr_cmp(a, b));

    finish(result, ExprKind::Product, int(1))
}

/// Collapse a single-element canonical list to its element, an empty
/// list to `identity`, otherwise wrap with `ctor`.
fn finish(terms: Vec<Arc<Expr>>, ctor: fn(Vec<Arc<Expr>>) -> ExprKind, identity: Rational) -> Arc<Expr> {
    match terms.len() {
        0 => Expr::number(identity),
        1 => terms.into_iter().next().expect("len checked"),
        _ => make(ctor(terms)),
    }
}

fn flatten_sum(terms: Vec<Arc<Expr>>, out: &mut Vec<Arc<Expr>>) {
    for t in terms {
        match &t.kind {
            ExprKind::Sum(inner) => flatten_sum(inner.clone(), out),
            _ => out.push(t),
        }
    }
}

fn flatten_product(factors: Vec<Arc<Expr>>, out: &mut Vec<Arc<Expr>>) {
    for f in factors {
        match &f.kind {
            ExprKind::Product(inner) => flatten_product(inner.clone(), out),
            _ => out.push(f),
        }
    }
}

/// `coeff * x` for a non-numeric `x`, as a pre-canonical two-factor product.
fn scale(coeff: Rational, base: Arc<Expr>) -> Arc<Expr> {
    if coeff == int(1) {
        base
    } else {
        make(ExprKind::Product(vec![Expr::number(coeff), base]))
    }
}

/// Split `e` into `(coefficient, base)` so `coeff * base == e`, e.g.
/// `3*x -> (3, x)` and `x -> (1, x)`.
fn extract_coeff(e: &Arc<Expr>) -> (Rational, Arc<Expr>) {
    if let ExprKind::Product(factors) = &e.kind {
        if let ExprKind::Number(n) = &factors[0].kind {
            let rest = &factors[1..];
            let base = if rest.len() == 1 {
                rest[0].clone()
            } else {
                make(ExprKind::Product(rest.to_vec()))
            };
            return (*n, base);
        }
    }
    (int(1), e.clone())
}

/// Split `e` into `(base, exponent)` so `base^exponent == e`.
fn extract_base_exp(e: &Arc<Expr>) -> (Arc<Expr>, Arc<Expr>) {
    match &e.kind {
        ExprKind::Pow(base, exp) => (base.clone(), exp.clone()),
        _ => (e.clone(), Expr::number(int(1))),
    }
}

pub(super) fn build_div(num: Arc<Expr>, den: Arc<Expr>) -> Arc<Expr> {
    if den.is_one() {
        return num;
    }
    if num.is_zero() {
        return Expr::number(int(0));
    }
    if let (Some(n), Some(d)) = (num.as_number(), den.as_number()) {
        if d.numer() != &0 {
            return Expr::number(n / d);
        }
    }
    make(ExprKind::Div(num, den))
}

pub(super) fn build_pow(base: Arc<Expr>, exp: Arc<Expr>) -> Arc<Expr> {
    if exp.is_zero() {
        return Expr::number(int(1));
    }
    if exp.is_one() {
        return base;
    }
    if base.is_one() {
        return Expr::number(int(1));
    }
    if let (Some(b), Some(e)) = (base.as_number(), exp.as_number()) {
        if let Some(e_int) = to_i64(e) {
            if let Some(r) = pow_rational(b, e_int) {
                return Expr::number(r);
            }
        }
    }
    if let ExprKind::Pow(inner_base, inner_exp) = &base.kind {
        let combined = Expr::product(vec![inner_exp.clone(), exp]);
        return build_pow(inner_base.clone(), combined);
    }
    make(ExprKind::Pow(base, exp))
}

pub(super) fn build_log(base: Arc<Expr>, arg: Arc<Expr>) -> Arc<Expr> {
    if arg.is_one() {
        return Expr::number(int(0));
    }
    if base == arg {
        return Expr::number(int(1));
    }
    if let ExprKind::Pow(inner_base, inner_exp) = &arg.kind {
        if *inner_base == base {
            return inner_exp.clone();
        }
    }
    make(ExprKind::Log(base, arg))
}
