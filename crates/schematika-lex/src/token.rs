//! Token kinds (§4.G): keywords, punctuation, and literals.

use schematika_util::Symbol;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    // Keywords
    Def,
    Decl,
    Type,
    Lambda,
    If,
    Then,
    Else,
    Let,
    In,
    End,
    True,
    False,

    // Literals / identifiers
    Ident(Symbol),
    Integer(i64),
    Float(f64),
    StringLit(Symbol),

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Lt,
    Gt,
    Dot,
    Comma,
    Colon,
    ColonColon,
    Semicolon,
    Eq,
    Arrow,
    Plus,
    Minus,
    Star,
    Slash,
    EqEq,
    NotEq,
    AndAnd,
    OrOr,
    LtEq,
    GtEq,

    Eof,
    /// Unrecognized input, carrying the offending text (§4.G error recovery).
    Invalid(String),
}

impl Token {
    /// A short, human-readable description of this token kind, used by the
    /// parser's states to report what was expected vs. what arrived.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Def => "`def`",
            Token::Decl => "`decl`",
            Token::Type => "`type`",
            Token::Lambda => "`lambda`",
            Token::If => "`if`",
            Token::Then => "`then`",
            Token::Else => "`else`",
            Token::Let => "`let`",
            Token::In => "`in`",
            Token::End => "`end`",
            Token::True | Token::False => "a bool literal",
            Token::Ident(_) => "an identifier",
            Token::Integer(_) => "an integer literal",
            Token::Float(_) => "a float literal",
            Token::StringLit(_) => "a string literal",
            Token::LParen => "`(`",
            Token::RParen => "`)`",
            Token::LBracket => "`[`",
            Token::RBracket => "`]`",
            Token::LBrace => "`{`",
            Token::RBrace => "`}`",
            Token::Lt => "`<`",
            Token::Gt => "`>`",
            Token::Dot => "`.`",
            Token::Comma => "`,`",
            Token::Colon => "`:`",
            Token::ColonColon => "`::`",
            Token::Semicolon => "`;`",
            Token::Eq => "`=`",
            Token::Arrow => "`->`",
            Token::Plus => "`+`",
            Token::Minus => "`-`",
            Token::Star => "`*`",
            Token::Slash => "`/`",
            Token::EqEq => "`==`",
            Token::NotEq => "`!=`",
            Token::AndAnd => "`&&`",
            Token::OrOr => "`||`",
            Token::LtEq => "`<=`",
            Token::GtEq => "`>=`",
            Token::Eof => "end of input",
            Token::Invalid(_) => "an invalid token",
        }
    }

    /// The infix-operator precedence of this token per §4.H's `progress`
    /// state, or `None` if it is not an infix operator. Higher binds
    /// tighter.
    pub fn infix_precedence(&self) -> Option<u8> {
        match self {
            Token::EqEq
            | Token::NotEq
            | Token::Lt
            | Token::Gt
            | Token::LtEq
            | Token::GtEq
            | Token::Eq => Some(2),
            Token::Plus | Token::Minus => Some(4),
            Token::Star | Token::Slash => Some(5),
            _ => None,
        }
    }
}

/// Maps a lexed identifier's text to a keyword token, if it names one of
/// §4.G's reserved words.
pub fn keyword_from_ident(text: &str) -> Option<Token> {
    match text {
        "def" => Some(Token::Def),
        "decl" => Some(Token::Decl),
        "type" => Some(Token::Type),
        "lambda" => Some(Token::Lambda),
        "if" => Some(Token::If),
        "then" => Some(Token::Then),
        "else" => Some(Token::Else),
        "let" => Some(Token::Let),
        "in" => Some(Token::In),
        "end" => Some(Token::End),
        "true" => Some(Token::True),
        "false" => Some(Token::False),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_recognized() {
        assert_eq!(keyword_from_ident("lambda"), Some(Token::Lambda));
        assert_eq!(keyword_from_ident("notakeyword"), None);
    }

    #[test]
    fn precedence_ordering_matches_spec() {
        assert!(Token::Star.infix_precedence() > Token::Plus.infix_precedence());
        assert!(Token::Plus.infix_precedence() > Token::EqEq.infix_precedence());
        assert_eq!(Token::LParen.infix_precedence(), None);
    }
}
