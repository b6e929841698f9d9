//! Schematika's parser (§4.H): turns a token stream from [`schematika_lex`]
//! into the [`schematika_ast::Expr`] trees defined by `schematika-ast`.
//!
//! The original design is a pushdown state machine: an explicit stack of
//! `exprstate` objects (`defexpr`, `lambdaexpr`, `sequenceexpr`, `let1expr`,
//! `expr_progress`, ...), each handling a slice of the grammar and pushing a
//! successor state for what comes next. This crate keeps that state
//! vocabulary as the names of its parsing functions — `parse_lambda`,
//! `parse_if_else`, `parse_sequence_body` — and lets the Rust call stack do
//! the job the original gives to `exprstatestack`, which is the ordinary
//! shape for a recursive grammar in this language.

mod error;
mod primitives;
mod scope;
mod parser;

pub use error::{ParseError, ParseResult};
pub use parser::Parser;
pub use scope::Scope;

use schematika_ast::Expr;
use schematika_util::Handler;

/// Parse a complete translation unit (§6's `reader::begin_translation_unit`
/// entry point) from source text in one shot.
pub fn parse_source(source: &str, handler: &mut Handler) -> ParseResult<Expr> {
    let mut parser = Parser::new(source, handler);
    parser.parse_program()
}
