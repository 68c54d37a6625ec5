//! `Display` for expressions, in ordinary infix math notation.
//!
//! Pretty-printing of expressions is explicitly out of scope as a
//! component to design around, but a runnable tool has to print
//! *something* for `Result: <expr>` and `O(<expr>)` — this is a direct,
//! unadorned rendering, not a target for the canonical-form invariants
//! elsewhere in this module. The logarithm's base is not shown: Big-O
//! notation treats it as a constant factor, and every scenario this
//! tool's reports are checked against writes it as plain `log(n)`.

use std::fmt;

use super::{Expr, ExprKind};

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number(n) => {
                if n.is_integer() {
                    write!(f, "{}", n.numer())
                } else {
                    write!(f, "{}/{}", n.numer(), n.denom())
                }
            }
            ExprKind::Symbol(s) => write!(f, "{s}"),
            ExprKind::Sum(terms) => write_sum(f, terms),
            ExprKind::Product(factors) => write_product(f, factors),
            ExprKind::Div(num, den) => {
                write_atom(f, num)?;
                write!(f, "/")?;
                write_atom(f, den)
            }
            ExprKind::Pow(base, exp) => {
                write_atom(f, base)?;
                write!(f, "^")?;
                write_atom(f, exp)
            }
            ExprKind::Log(_base, arg) => write!(f, "log({arg})"),
        }
    }
}

fn write_sum(f: &mut fmt::Formatter<'_>, terms: &[std::sync::Arc<Expr>]) -> fmt::Result {
    for (idx, term) in terms.iter().enumerate() {
        let (negative, magnitude) = split_sign(term);
        if idx == 0 {
            if negative {
                write!(f, "-")?;
            }
        } else {
            write!(f, "{}", if negative { " - " } else { " + " })?;
        }
        write!(f, "{magnitude}")?;
    }
    Ok(())
}

fn write_product(f: &mut fmt::Formatter<'_>, factors: &[std::sync::Arc<Expr>]) -> fmt::Result {
    for (idx, factor) in factors.iter().enumerate() {
        if idx > 0 {
            write!(f, "*")?;
        }
        write_atom(f, factor)?;
    }
    Ok(())
}

/// Parenthesize `e` if printing it bare inside a product/power/division
/// would be ambiguous.
fn write_atom(f: &mut fmt::Formatter<'_>, e: &Expr) -> fmt::Result {
    if matches!(&e.kind, ExprKind::Sum(_) | ExprKind::Div(..)) {
        write!(f, "({e})")
    } else {
        write!(f, "{e}")
    }
}

/// If `term` is a product led by a negative numeric coefficient, return
/// `(true, term with that coefficient's sign flipped)`.
fn split_sign(term: &Expr) -> (bool, String) {
    if let ExprKind::Product(factors) = &term.kind {
        if let Some(ExprKind::Number(n)) = factors.first().map(|f| &f.kind) {
            if n.numer() < &0 {
                let flipped = -n;
                let rest = &factors[1..];
                let magnitude = if flipped.is_integer() && *flipped.numer() == 1 {
                    rest.iter().map(|r| format!("{r}")).collect::<Vec<_>>().join("*")
                } else {
                    let coeff = if flipped.is_integer() {
                        flipped.numer().to_string()
                    } else {
                        format!("{}/{}", flipped.numer(), flipped.denom())
                    };
                    std::iter::once(coeff)
                        .chain(rest.iter().map(|r| format!("{r}")))
                        .collect::<Vec<_>>()
                        .join("*")
                };
                return (true, magnitude);
            }
        }
    }
    if let ExprKind::Number(n) = &term.kind {
        if n.numer() < &0 {
            return (true, format!("{}", -n));
        }
    }
    (false, format!("{term}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    #[test]
    fn displays_polynomial_in_standard_notation() {
        // Canonical ordering sorts numeric terms first.
        let n = Symbol::new("n");
        let e = Expr::sum(vec![Expr::pow(Expr::symbol(n.clone()), Expr::int(2)), Expr::int(1)]);
        assert_eq!(e.to_string(), "1 + n^2");
    }

    #[test]
    fn displays_negative_term_with_minus() {
        let n = Symbol::new("n");
        let e = Expr::sum(vec![Expr::symbol(n.clone()), Expr::int(-3)]);
        assert_eq!(e.to_string(), "-3 + n");
    }

    #[test]
    fn displays_log_without_base() {
        let n = Symbol::new("n");
        let e = Expr::log(Expr::int(2), Expr::symbol(n));
        assert_eq!(e.to_string(), "log(n)");
    }
}
