//! Foundational utilities shared by every Schematika crate: symbol
//! interning, source spans, diagnostics, typed indices, and error types.
//!
//! Nothing in this crate knows about the AST, the GC, or the parser — it is
//! the leaf of the dependency graph that every other crate builds on.

pub mod def_id;
pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use error::{
    DiagnosticError, DiagnosticResult, IndexVecError, IndexVecResult, SourceMapError,
    SourceMapResult, SymbolError, SymbolResult,
};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, Span};
pub use symbol::Symbol;
