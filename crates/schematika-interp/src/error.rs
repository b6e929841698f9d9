//! Runtime error taxonomy (§4.I, §7). Unlike the parser, the interpreter's
//! errors are not fatal to the whole session: the REPL catches one and
//! moves on to the next top-level expression.

use schematika_util::Symbol;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpError {
    #[error("undefined global `{0}`")]
    UndefinedGlobal(Symbol),

    #[error("value is not callable")]
    NotCallable,

    #[error("wrong number of arguments: expected {expected}, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("`{0}` has no implementation for its operand type")]
    UnsupportedOperand(&'static str),

    #[error("division by zero")]
    DivideByZero,
}

impl InterpError {
    pub fn is_fatal(&self) -> bool {
        false
    }
}

pub type InterpResult<T> = Result<T, InterpError>;
