//! The expression tree and symbol tables (§3, §4.E, §4.F).
//!
//! Nodes are immutable and interpreter-time-constant once parsed, so they
//! are shared via plain [`std::rc::Rc`] rather than the moving GC in
//! [`schematika_gc`] — that collector is reserved for the runtime values
//! (closures, environments) the interpreter allocates while a program runs,
//! not for the static program text itself.

pub mod binding;
pub mod convert;
pub mod error;
pub mod expr;
pub mod symtab;

pub use binding::{Binding, GLOBAL_DEPTH};
pub use error::{AstError, AstResult};
pub use expr::{
    ApplyExpr, ConstantExpr, ConvertExpr, DefineExpr, Expr, IfElseExpr, LambdaExpr, Literal,
    SequenceExpr, VarRefExpr, VariableDefExpr,
};
pub use symtab::{GlobalSymtab, LocalSymtab};
