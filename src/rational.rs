//! Exact rational arithmetic used throughout the kernel.
//!
//! The recurrence closer and solver need exact integer/rational results
//! (geometric ratios, exact `log` inversions); a floating-point constant
//! would make the idempotence and `repeated()` round-trip invariants
//! untestable in general, so every `Number` leaf carries a [`Rational`]
//! instead of an `f64`.

use num_rational::Ratio;
use num_traits::{One, Signed, Zero};

pub type Rational = Ratio<i64>;

pub fn int(n: i64) -> Rational {
    Ratio::from_integer(n)
}

/// `Some(n)` if `r` is an exact integer.
pub fn to_i64(r: &Rational) -> Option<i64> {
    if r.is_integer() {
        Some(*r.numer())
    } else {
        None
    }
}

/// Exact integer power; `None` on `0^negative`.
pub fn pow_rational(base: &Rational, exp: i64) -> Option<Rational> {
    if exp == 0 {
        return Some(int(1));
    }
    if base.is_zero() && exp < 0 {
        return None;
    }
    let mut acc = Rational::one();
    let n = exp.unsigned_abs();
    for _ in 0..n {
        acc *= base;
    }
    if exp < 0 { Some(acc.recip()) } else { Some(acc) }
}

/// `n choose k` for small non-negative `n`.
pub fn binomial(n: u32, k: u32) -> Rational {
    if k > n {
        return Rational::zero();
    }
    let k = k.min(n - k);
    let mut result = Rational::one();
    for i in 0..k {
        result *= int(i64::from(n - i));
        result /= int(i64::from(i + 1));
    }
    result
}

/// The `n`-th Bernoulli number (`B_1 = -1/2` convention), via the
/// Akiyama-Tanigawa algorithm. Exact and adequate for the small degrees
/// that arise from bounded polynomial loop bodies.
pub fn bernoulli(n: u32) -> Rational {
    let n = n as usize;
    let mut a: Vec<Rational> = (0..=n).map(|m| int(1) / int((m as i64) + 1)).collect();
    for j in (1..=n).rev() {
        for i in j..=n {
            let diff = a[i - 1] - a[i];
            a[i - 1] = diff * int(i as i64 - (j as i64 - 1));
        }
    }
    a[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bernoulli_numbers_match_known_values() {
        assert_eq!(bernoulli(0), int(1));
        assert_eq!(bernoulli(1), -int(1) / int(2));
        assert_eq!(bernoulli(2), int(1) / int(6));
        assert_eq!(bernoulli(3), int(0));
        assert_eq!(bernoulli(4), -int(1) / int(30));
    }

    #[test]
    fn binomial_matches_pascal() {
        assert_eq!(binomial(4, 2), int(6));
        assert_eq!(binomial(5, 0), int(1));
        assert_eq!(binomial(5, 5), int(1));
    }
}
