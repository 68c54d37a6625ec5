//! Canonical ordering of expressions, used to keep `Sum`/`Product`
//! operands in a stable, deterministic order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{Expr, ExprKind};

/// A total order over expressions: numbers first, then by structure.
/// Two expressions that are `expr_cmp`-equal but not `==` cannot occur,
/// since equal-content nodes always sort together before comparison.
pub fn expr_cmp(a: &Expr, b: &Expr) -> Ordering {
    rank(a).cmp(&rank(b)).then_with(|| match (&a.kind, &b.kind) {
        (ExprKind::Number(x), ExprKind::Number(y)) => x.cmp(y),
        (ExprKind::Symbol(x), ExprKind::Symbol(y)) => x.name().cmp(y.name()).then(x.id().cmp(&y.id())),
        (ExprKind::Sum(xs), ExprKind::Sum(ys)) | (ExprKind::Product(xs), ExprKind::Product(ys)) => {
            cmp_slices(xs, ys)
        }
        (ExprKind::Div(xn, xd), ExprKind::Div(yn, yd))
        | (ExprKind::Pow(xn, xd), ExprKind::Pow(yn, yd))
        | (ExprKind::Log(xn, xd), ExprKind::Log(yn, yd)) => {
            expr_cmp(xn, yn).then_with(|| expr_cmp(xd, yd))
        }
        _ => Ordering::Equal,
    })
}

fn cmp_slices(xs: &[Arc<Expr>], ys: &[Arc<Expr>]) -> Ordering {
    xs.len().cmp(&ys.len()).then_with(|| {
        for (x, y) in xs.iter().zip(ys.iter()) {
            let c = expr_cmp(x, y);
            if c != Ordering::Equal {
                return c;
            }
        }
        Ordering::Equal
    })
}

fn rank(e: &Expr) -> u8 {
    match &e.kind {
        ExprKind::Number(_) => 0,
        ExprKind::Symbol(_) => 1,
        ExprKind::Log(..) => 2,
        ExprKind::Pow(..) => 3,
        ExprKind::Product(_) => 4,
        ExprKind::Sum(_) => 5,
        ExprKind::Div(..) => 6,
    }
}
