use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    #[error("unterminated string literal at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("malformed numeric literal {text:?} at byte {offset}")]
    MalformedNumber { text: String, offset: usize },

    #[error("unexpected character {ch:?} at byte {offset}")]
    UnexpectedChar { ch: char, offset: usize },
}

impl LexError {
    /// §7: a lexical error aborts only the form currently being scanned.
    pub fn is_fatal(&self) -> bool {
        false
    }
}

pub type LexResult<T> = std::result::Result<T, LexError>;
