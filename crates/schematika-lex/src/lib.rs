//! Tokenizer (§4.G): turns Schematika source text into a stream of
//! `Token`s. Skips whitespace and `#`-to-end-of-line comments; reports
//! lexical errors (unterminated strings, malformed numeric literals)
//! through a [`schematika_util::diagnostic::Handler`] rather than failing
//! the whole scan, matching the teacher's non-panicking diagnostic style.

pub mod cursor;
pub mod error;
mod lexer;
pub mod token;
pub mod unicode;

pub use error::{LexError, LexResult};
pub use lexer::Lexer;
pub use token::Token;
