//! Parser error taxonomy (§4.H, §7). Unlike lexical errors, a parse error
//! is fatal to the current top-level expression: the original `parser_result`
//! records the error and refuses further tokens rather than attempting
//! recovery, so there is no `is_fatal() -> false` case here.

use schematika_ast::AstError;
use schematika_util::Symbol;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: &'static str, found: String },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("unknown type name '{0}'")]
    UnknownType(String),

    #[error("undefined variable '{0}'")]
    UndefinedVariable(Symbol),

    #[error("{0}")]
    Type(#[from] AstError),
}

impl ParseError {
    pub fn is_fatal(&self) -> bool {
        true
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
