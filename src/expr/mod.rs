//! Symbolic expression kernel.
//!
//! # Architecture
//!
//! ## N-ary Sum/Product
//! Instead of binary `Add(left, right)`, sums and products are n-ary:
//! `a + b + c` is `Sum([a, b, c])`, not `Add(Add(a,b),c)`. Flattening and
//! like-term combination happen in the constructors, so every `Expr` an
//! analysis ever sees is already in canonical form.
//!
//! ## Structural hashing
//! Each `Expr` carries a pre-computed `hash` for O(1) inequality rejection
//! before falling back to structural comparison.
//!
//! ## Pure values
//! An `Expr` never references the scope that produced it: symbols carry
//! their own identity (see [`crate::symbol::Symbol`]), so expressions can
//! be freely cloned, compared and substituted across scope boundaries.

mod analysis;
mod bigo;
mod display;
mod ops;
mod ordering;
mod simplify;
mod solve;
mod subs;
mod summation;

pub use analysis::as_coeff_add;
pub use bigo::{BigO, big_o};
pub use ordering::expr_cmp;
pub use simplify::simplify;
pub use solve::solve_linear_or_log;
pub use subs::substitute;
pub use summation::bounded_sum;

use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::rational::{Rational, int};
use crate::symbol::Symbol;

static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    EXPR_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed)
}

/// A symbolic expression: an immutable tree over the rationals with free
/// [`Symbol`]s.
#[derive(Debug, Clone)]
pub struct Expr {
    id: u64,
    hash: u64,
    kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;
    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.kind == other.kind
    }
}

impl Eq for Expr {}

impl std::hash::Hash for Expr {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

/// The structure of an expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// An exact rational constant.
    Number(Rational),
    /// A free variable.
    Symbol(Symbol),
    /// `a + b + c + ...`, flattened and sorted.
    Sum(Vec<Arc<Expr>>),
    /// `a * b * c * ...`, flattened and sorted.
    Product(Vec<Arc<Expr>>),
    /// Division; kept binary since it is not associative/commutative.
    Div(Arc<Expr>, Arc<Expr>),
    /// Exponentiation; kept binary.
    Pow(Arc<Expr>, Arc<Expr>),
    /// `log_base(arg)`. Needed to express and recognize `log` closed
    /// forms produced by geometric recurrences and by the solver.
    Log(Arc<Expr> /* base */, Arc<Expr> /* arg */),
}

fn make(kind: ExprKind) -> Arc<Expr> {
    let hash = compute_hash(&kind);
    Arc::new(Expr { id: next_id(), hash, kind })
}

fn compute_hash(kind: &ExprKind) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = rustc_hash::FxHasher::default();
    kind.hash(&mut hasher);
    hasher.finish()
}

impl std::hash::Hash for ExprKind {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Number(n) => {
                n.numer().hash(state);
                n.denom().hash(state);
            }
            Self::Symbol(s) => s.id().hash(state),
            Self::Sum(terms) | Self::Product(terms) => {
                for t in terms {
                    t.hash.hash(state);
                }
            }
            Self::Div(l, r) | Self::Pow(l, r) | Self::Log(l, r) => {
                l.hash.hash(state);
                r.hash.hash(state);
            }
        }
    }
}

impl Expr {
    pub fn number(n: Rational) -> Arc<Expr> {
        make(ExprKind::Number(n))
    }

    pub fn int(n: i64) -> Arc<Expr> {
        Self::number(int(n))
    }

    pub fn symbol(sym: Symbol) -> Arc<Expr> {
        make(ExprKind::Symbol(sym))
    }

    pub fn is_zero(&self) -> bool {
        matches!(&self.kind, ExprKind::Number(n) if n.numer() == &0)
    }

    pub fn is_one(&self) -> bool {
        matches!(&self.kind, ExprKind::Number(n) if n == &int(1))
    }

    pub fn as_number(&self) -> Option<&Rational> {
        match &self.kind {
            ExprKind::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Sum of expressions, flattened and with like terms combined.
    pub fn sum(terms: Vec<Arc<Expr>>) -> Arc<Expr> {
        ops::build_sum(terms)
    }

    /// Product of expressions, flattened and with like bases combined.
    pub fn product(factors: Vec<Arc<Expr>>) -> Arc<Expr> {
        ops::build_product(factors)
    }

    pub fn div(num: Arc<Expr>, den: Arc<Expr>) -> Arc<Expr> {
        ops::build_div(num, den)
    }

    pub fn pow(base: Arc<Expr>, exp: Arc<Expr>) -> Arc<Expr> {
        ops::build_pow(base, exp)
    }

    pub fn log(base: Arc<Expr>, arg: Arc<Expr>) -> Arc<Expr> {
        ops::build_log(base, arg)
    }

    pub fn neg(e: Arc<Expr>) -> Arc<Expr> {
        Self::product(vec![Self::number(-int(1)), e])
    }

    pub fn sub(a: Arc<Expr>, b: Arc<Expr>) -> Arc<Expr> {
        Self::sum(vec![a, Self::neg(b)])
    }

    /// Every distinct symbol appearing anywhere in this expression.
    pub fn free_symbols(&self) -> Vec<Symbol> {
        analysis::free_symbols(self)
    }

    pub fn contains(&self, sym: &Symbol) -> bool {
        analysis::contains(self, sym)
    }

    pub fn node_count(&self) -> usize {
        analysis::node_count(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_flattens_nested_sums() {
        let x = Expr::symbol(Symbol::new("x"));
        let y = Expr::symbol(Symbol::new("y"));
        let z = Expr::symbol(Symbol::new("z"));
        let inner = Expr::sum(vec![x, y]);
        let outer = Expr::sum(vec![inner, z]);
        match &outer.kind {
            ExprKind::Sum(terms) => assert_eq!(terms.len(), 3),
            other => panic!("expected Sum, got {other:?}"),
        }
    }

    #[test]
    fn product_flattens_nested_products() {
        let a = Expr::symbol(Symbol::new("a"));
        let b = Expr::symbol(Symbol::new("b"));
        let c = Expr::symbol(Symbol::new("c"));
        let inner = Expr::product(vec![a, b]);
        let outer = Expr::product(vec![inner, c]);
        match &outer.kind {
            ExprKind::Product(factors) => assert_eq!(factors.len(), 3),
            other => panic!("expected Product, got {other:?}"),
        }
    }

    #[test]
    fn constant_folding_in_sum() {
        let e = Expr::sum(vec![Expr::int(2), Expr::int(3)]);
        assert_eq!(e.as_number(), Some(&int(5)));
    }

    #[test]
    fn like_terms_combine() {
        let x = Symbol::new("x");
        let e = Expr::sum(vec![Expr::symbol(x.clone()), Expr::symbol(x.clone())]);
        match &e.kind {
            ExprKind::Product(factors) => {
                assert_eq!(factors[0].as_number(), Some(&int(2)));
            }
            other => panic!("expected Product(2, x), got {other:?}"),
        }
    }
}
