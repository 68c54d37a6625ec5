//! Comparisons and the termination function derived from them.

use std::sync::Arc;

use crate::expr::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    fn is_strict(self) -> bool {
        matches!(self, Self::Lt | Self::Gt)
    }
}

/// A single comparison `lhs <op> rhs`.
#[derive(Debug, Clone)]
pub struct Relation {
    pub op: CompareOp,
    pub lhs: Arc<Expr>,
    pub rhs: Arc<Expr>,
}

/// A chained compare `a < b < c` conjoins pairwise into several
/// `Relation`s, all of which must hold.
#[derive(Debug, Clone)]
pub struct BoolExpr {
    pub relations: Vec<Relation>,
}

impl BoolExpr {
    pub fn single(rel: Relation) -> Self {
        Self { relations: vec![rel] }
    }
}

/// The termination function τ for a relation: positive while the loop
/// runs, crossing zero at termination. `continue while L ⋈ R`:
/// - `L ≤ R`: τ = R − L (non-negative exactly while the loop continues).
/// - `L ≥ R`: τ = L − R.
/// - Strict `<`/`>` forms subtract an additional 1, since equality no
///   longer keeps the loop alive.
pub fn termination_function(rel: &Relation) -> Arc<Expr> {
    let diff = match rel.op {
        CompareOp::Le | CompareOp::Lt => Expr::sub(rel.rhs.clone(), rel.lhs.clone()),
        CompareOp::Ge | CompareOp::Gt => Expr::sub(rel.lhs.clone(), rel.rhs.clone()),
    };
    if rel.op.is_strict() {
        Expr::sub(diff, Expr::int(1))
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    #[test]
    fn non_strict_termination_function_is_the_bare_difference() {
        let i = Symbol::new_counter("i");
        let j = Symbol::new_counter("j");
        let rel = Relation { op: CompareOp::Le, lhs: Expr::symbol(i.clone()), rhs: Expr::symbol(j.clone()) };
        let tau = termination_function(&rel);
        // R - L = j - i
        assert_eq!(tau, Expr::sub(Expr::symbol(j), Expr::symbol(i)));
    }

    #[test]
    fn strict_termination_function_subtracts_one() {
        let i = Symbol::new_counter("i");
        let j = Symbol::new_counter("j");
        let rel = Relation { op: CompareOp::Lt, lhs: Expr::symbol(i.clone()), rhs: Expr::symbol(j.clone()) };
        let tau = termination_function(&rel);
        assert_eq!(tau, Expr::sub(Expr::sub(Expr::symbol(j), Expr::symbol(i)), Expr::int(1)));
    }
}
