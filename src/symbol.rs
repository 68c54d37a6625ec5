//! Identity-bearing symbols.
//!
//! Unlike a globally interned handle, a [`Symbol`] here is a small
//! self-contained value: a process-wide unique id (for identity and
//! ordering only) plus its display name. Nothing outside a single
//! analysis ever needs to look a symbol up by name in global state, so
//! there is no registry to keep in sync.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);

/// A fresh, identity-bearing leaf tagged with a human-readable name.
#[derive(Debug, Clone)]
pub struct Symbol {
    id: u64,
    name: Arc<str>,
}

impl Symbol {
    /// A plain symbol (e.g. a function parameter or an assigned local).
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed), name: name.into() }
    }

    /// A symbol that denotes a loop counter (index, iteration count, step
    /// tally). An alias of [`Symbol::new`] kept distinct only to mark
    /// intent at each call site — this kernel's exact-rational arithmetic
    /// never branches on sign or integrality, so there is no attribute
    /// here for `simplify`/`solve` to read.
    pub fn new_counter(name: impl Into<Arc<str>>) -> Self {
        Self::new(name)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_symbols_are_distinct_even_with_same_name() {
        let a = Symbol::new("n");
        let b = Symbol::new("n");
        assert_ne!(a, b);
        assert_eq!(a.name(), b.name());
    }

    #[test]
    fn counters_are_distinct_from_each_other_like_any_other_symbol() {
        let i = Symbol::new_counter("i");
        let j = Symbol::new_counter("i");
        assert_ne!(i, j);
    }
}
