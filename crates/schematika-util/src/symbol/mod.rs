//! Symbol module - string interning for efficient identifier handling.
//!
//! This module provides the [`Symbol`] type, a compact (4-byte) handle to an
//! interned string. Symbols enable O(1) equality comparison and are used
//! throughout the toolkit wherever `UniqueString` semantics are required:
//! identifiers, keywords, primitive-operation names.
//!
//! # Overview
//!
//! - **Memory efficiency**: each unique string is stored only once.
//! - **Fast comparison**: symbol comparison is O(1) via index comparison.
//! - **Stable handles**: symbols remain valid for the process lifetime.
//!
//! The VM is single-threaded and cooperative (see the workspace-level design
//! notes); the interner below is a plain `RefCell`-guarded table rather than
//! a concurrent structure, since there is never more than one mutator thread.
//!
//! # Examples
//!
//! ```
//! use schematika_util::symbol::Symbol;
//!
//! let s1 = Symbol::intern("hello");
//! let s2 = Symbol::intern("hello");
//! let s3 = Symbol::intern("world");
//!
//! assert_eq!(s1, s2);
//! assert_ne!(s1, s3);
//! ```
//!
//! Using known keywords:
//!
//! ```
//! use schematika_util::symbol::{Symbol, KW_LAMBDA, KW_IF};
//!
//! assert_eq!(KW_LAMBDA.as_str(), "lambda");
//! assert!(KW_IF.is_known());
//! ```

mod interner;

pub use interner::STRING_TABLE;

/// Statistics about the string interner, useful for profiling.
#[derive(Clone, Copy, Debug, Default)]
pub struct InternerStats {
    /// Number of unique interned strings.
    pub count: usize,
    /// Backing table capacity.
    pub capacity: usize,
    /// Hash collisions observed (always 0 for the current hash map backend,
    /// retained for API parity with profiling tools).
    pub collisions: usize,
    /// Intern calls that found an existing entry.
    pub hits: usize,
    /// Intern calls that allocated a new entry.
    pub misses: usize,
}

impl InternerStats {
    /// Construct directly from components (mainly useful in tests).
    pub const fn new(count: usize, capacity: usize, collisions: usize, hits: usize, misses: usize) -> Self {
        Self { count, capacity, collisions, hits, misses }
    }

    /// `count / capacity`, or 0.0 if capacity is 0.
    pub fn load_factor(&self) -> f64 {
        if self.capacity == 0 { 0.0 } else { self.count as f64 / self.capacity as f64 }
    }

    /// True once the load factor exceeds 0.75.
    pub fn is_near_capacity(&self) -> bool {
        self.load_factor() > 0.75
    }

    /// `hits / (hits + misses)`, or 0.0 if there have been no lookups.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 { 0.0 } else { self.hits as f64 / total as f64 }
    }

    /// Total number of `intern` calls observed.
    pub fn total_operations(&self) -> usize {
        self.hits + self.misses
    }

    /// `count / total_operations`; lower is better deduplication.
    pub fn memory_efficiency(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.count as f64 / self.total_operations() as f64 }
    }
}

/// An interned string identifier.
///
/// `Symbol` is exactly 4 bytes (`u32`), cheap to copy, and compares in O(1)
/// via index equality. It is Schematika's realization of the spec's
/// `UniqueString`: two symbols compare equal iff they were interned from the
/// same bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    pub(crate) index: u32,
}

static_assertions::assert_impl_all!(Symbol: Send, Sync);

// ============================================================================
// KNOWN SYMBOLS — Schematika keywords, primitive type names
// ============================================================================

/// Symbols with an index below this value are pre-interned at process start
/// and correspond to language keywords or primitive type names (§4.G, §4.B).
const RESERVED_SYMBOLS_END: u32 = 64;

// ----------------------------------------------------------------------------
// Keywords (§4.G)
// ----------------------------------------------------------------------------

pub const KW_DEF: Symbol = Symbol { index: 0 };
pub const KW_DECL: Symbol = Symbol { index: 1 };
pub const KW_TYPE: Symbol = Symbol { index: 2 };
pub const KW_LAMBDA: Symbol = Symbol { index: 3 };
pub const KW_IF: Symbol = Symbol { index: 4 };
pub const KW_THEN: Symbol = Symbol { index: 5 };
pub const KW_ELSE: Symbol = Symbol { index: 6 };
pub const KW_LET: Symbol = Symbol { index: 7 };
pub const KW_IN: Symbol = Symbol { index: 8 };
pub const KW_END: Symbol = Symbol { index: 9 };
pub const KW_TRUE: Symbol = Symbol { index: 10 };
pub const KW_FALSE: Symbol = Symbol { index: 11 };

// ----------------------------------------------------------------------------
// Primitive type names (§4.B)
// ----------------------------------------------------------------------------

pub const TY_BOOL: Symbol = Symbol { index: 12 };
pub const TY_I16: Symbol = Symbol { index: 13 };
pub const TY_I32: Symbol = Symbol { index: 14 };
pub const TY_I64: Symbol = Symbol { index: 15 };
pub const TY_F32: Symbol = Symbol { index: 16 };
pub const TY_F64: Symbol = Symbol { index: 17 };
pub const TY_STRING: Symbol = Symbol { index: 18 };
pub const TY_UNIT: Symbol = Symbol { index: 19 };

// ----------------------------------------------------------------------------
// Generated-name prefixes used by the parser (lambda gensym, let1 expansion)
// ----------------------------------------------------------------------------

pub const ID_LAMBDA_GENSYM_PREFIX: Symbol = Symbol { index: 20 };
pub const ID_LET1_GENSYM_PREFIX: Symbol = Symbol { index: 21 };

/// All known symbols in index order; used to seed the interner at startup.
const KNOWN_SYMBOLS: &[&str] = &[
    "def", "decl", "type", "lambda", "if", "then", "else", "let", "in", "end", "true", "false",
    "bool", "i16", "i32", "i64", "f32", "f64", "string", "unit",
    "lambda", "let1",
];

impl Symbol {
    /// The maximum representable index value.
    pub const MAX_INDEX: u32 = u32::MAX;

    /// Intern a string, returning its symbol. Repeated interning of the same
    /// bytes returns the same symbol (§4.C, §8.3).
    #[inline]
    pub fn intern(string: &str) -> Self {
        STRING_TABLE.with(|t| t.intern(string))
    }

    /// The interned string this symbol denotes.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        STRING_TABLE.with(|t| t.get(*self)).unwrap_or("")
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.as_str().starts_with(prefix)
    }

    #[inline]
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.as_str().ends_with(suffix)
    }

    /// Compare against a `&str` without materializing an intermediate value.
    #[inline]
    pub fn eq_str(&self, other: &str) -> bool {
        self.as_str() == other
    }

    /// True if this symbol is one of the pre-interned keyword/type-name
    /// constants (index below [`RESERVED_SYMBOLS_END`]).
    #[inline]
    pub fn is_known(&self) -> bool {
        self.index < RESERVED_SYMBOLS_END
    }

    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.index
    }

    /// # Safety
    /// `index` must refer to an entry already present in the interner.
    #[inline]
    pub unsafe fn from_u32_unchecked(index: u32) -> Self {
        Self { index }
    }

    #[inline]
    pub fn stats_struct() -> InternerStats {
        STRING_TABLE.with(|t| t.stats())
    }

    #[inline]
    pub fn stats() -> (usize, usize) {
        let stats = STRING_TABLE.with(|t| t.stats());
        (stats.count, stats.capacity)
    }

    /// Intern a keyword or primitive type name, preferring the pre-defined
    /// constant over a fresh hash lookup.
    #[inline]
    pub fn intern_known(string: &str) -> Self {
        match string {
            "def" => KW_DEF,
            "decl" => KW_DECL,
            "type" => KW_TYPE,
            "lambda" => KW_LAMBDA,
            "if" => KW_IF,
            "then" => KW_THEN,
            "else" => KW_ELSE,
            "let" => KW_LET,
            "in" => KW_IN,
            "end" => KW_END,
            "true" => KW_TRUE,
            "false" => KW_FALSE,
            "bool" => TY_BOOL,
            "i16" => TY_I16,
            "i32" => TY_I32,
            "i64" => TY_I64,
            "f32" => TY_F32,
            "f64" => TY_F64,
            "string" => TY_STRING,
            "unit" => TY_UNIT,
            _ => Self::intern(string),
        }
    }

    /// Intern a primitive type name, identical to [`Symbol::intern_known`]
    /// but documents intent at call sites in the type table (§4.B).
    #[inline]
    pub fn intern_type(string: &str) -> Self {
        Self::intern_known(string)
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Wraps a symbol for quoted ("pretty") display, e.g. diagnostic messages
/// that want to show `"foo"` rather than `foo`.
pub trait SymbolPretty {
    fn pretty(&self) -> SymbolPrettyDisplay;
}

impl SymbolPretty for Symbol {
    fn pretty(&self) -> SymbolPrettyDisplay {
        SymbolPrettyDisplay(*self)
    }
}

pub struct SymbolPrettyDisplay(Symbol);

impl std::fmt::Display for SymbolPrettyDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_roundtrip() {
        let s = Symbol::intern("hello");
        assert_eq!(s.as_str(), "hello");
    }

    #[test]
    fn intern_idempotent() {
        assert_eq!(Symbol::intern("foo"), Symbol::intern("foo"));
    }

    #[test]
    fn intern_distinct() {
        assert_ne!(Symbol::intern("foo"), Symbol::intern("bar"));
    }

    #[test]
    fn display_is_bare() {
        assert_eq!(Symbol::intern("xyz").to_string(), "xyz");
    }

    #[test]
    fn pretty_is_quoted() {
        assert_eq!(Symbol::intern("xyz").pretty().to_string(), "\"xyz\"");
    }

    #[test]
    fn debug_wraps_name() {
        assert_eq!(format!("{:?}", Symbol::intern("xyz")), "Symbol(xyz)");
    }

    #[test]
    fn is_empty_and_len() {
        assert!(Symbol::intern("").is_empty());
        assert_eq!(Symbol::intern("hello").len(), 5);
    }

    #[test]
    fn starts_ends_with() {
        let s = Symbol::intern("hello_world");
        assert!(s.starts_with("hello"));
        assert!(s.ends_with("world"));
    }

    #[test]
    fn eq_str_matches() {
        assert!(Symbol::intern("abc").eq_str("abc"));
        assert!(!Symbol::intern("abc").eq_str("xyz"));
    }

    #[test]
    fn known_keywords_are_known() {
        assert!(KW_LAMBDA.is_known());
        assert!(KW_IF.is_known());
        assert!(TY_F64.is_known());
        assert!(!Symbol::intern("my_var").is_known());
    }

    #[test]
    fn intern_known_hits_constants() {
        assert_eq!(Symbol::intern_known("lambda"), KW_LAMBDA);
        assert_eq!(Symbol::intern_known("f64"), TY_F64);
        assert!(!Symbol::intern_known("not_a_keyword").is_known());
    }

    #[test]
    fn from_u32_unchecked_roundtrips() {
        let sym = Symbol::intern("test");
        let idx = sym.as_u32();
        let sym2 = unsafe { Symbol::from_u32_unchecked(idx) };
        assert_eq!(sym, sym2);
    }

    #[test]
    fn stats_track_hits_and_misses() {
        let before = Symbol::stats_struct();
        let _ = Symbol::intern("stats_probe_unique_xyz123");
        let _ = Symbol::intern("stats_probe_unique_xyz123");
        let after = Symbol::stats_struct();
        assert!(after.misses >= before.misses);
        assert!(after.hits >= before.hits + 1);
    }

    #[test]
    fn interner_stats_methods() {
        let stats = InternerStats::new(10, 100, 0, 90, 10);
        assert_eq!(stats.load_factor(), 0.1);
        assert!(!stats.is_near_capacity());
        assert_eq!(stats.hit_rate(), 0.9);
        assert_eq!(stats.total_operations(), 100);
        assert_eq!(stats.memory_efficiency(), 0.1);
    }

    #[test]
    fn unicode_strings_roundtrip() {
        for s in ["你好", "🦀", "こんにちは"] {
            assert_eq!(Symbol::intern(s).as_str(), s);
        }
    }

    #[test]
    fn long_strings_roundtrip() {
        let long = "a".repeat(10_000);
        assert_eq!(Symbol::intern(&long).as_str(), long.as_str());
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Symbol>();
    }
}
