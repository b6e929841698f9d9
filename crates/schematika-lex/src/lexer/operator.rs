//! Operator and punctuation lexing, restricted to §4.G's token set.

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        Token::Plus
    }

    /// `-` or `->`.
    pub fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('>') {
            Token::Arrow
        } else {
            Token::Minus
        }
    }

    pub fn lex_star(&mut self) -> Token {
        self.cursor.advance();
        Token::Star
    }

    pub fn lex_slash(&mut self) -> Token {
        self.cursor.advance();
        Token::Slash
    }

    /// `=` or `==`.
    pub fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::EqEq
        } else {
            Token::Eq
        }
    }

    /// `!=` is the only token beginning with `!` — a lone `!` is invalid
    /// (Schematika has no unary logical-not operator token).
    pub fn lex_bang(&mut self) -> Token {
        let start = self.cursor.position();
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::NotEq
        } else {
            self.report_error("'!' must be followed by '=' (did you mean '!='?)".to_string());
            Token::Invalid(self.cursor.slice_from(start).to_string())
        }
    }

    /// `<` or `<=`.
    pub fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::LtEq
        } else {
            Token::Lt
        }
    }

    /// `>` or `>=`.
    pub fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::GtEq
        } else {
            Token::Gt
        }
    }

    /// `&&` is the only token beginning with `&`.
    pub fn lex_ampersand(&mut self) -> Token {
        let start = self.cursor.position();
        self.cursor.advance();
        if self.cursor.match_char('&') {
            Token::AndAnd
        } else {
            self.report_error("'&' must be followed by '&' (did you mean '&&'?)".to_string());
            Token::Invalid(self.cursor.slice_from(start).to_string())
        }
    }

    /// `||` is the only token beginning with `|`.
    pub fn lex_pipe(&mut self) -> Token {
        let start = self.cursor.position();
        self.cursor.advance();
        if self.cursor.match_char('|') {
            Token::OrOr
        } else {
            self.report_error("'|' must be followed by '|' (did you mean '||'?)".to_string());
            Token::Invalid(self.cursor.slice_from(start).to_string())
        }
    }

    /// `:` or `::`.
    pub fn lex_colon(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char(':') {
            Token::ColonColon
        } else {
            Token::Colon
        }
    }

    pub fn lex_dot(&mut self) -> Token {
        self.cursor.advance();
        Token::Dot
    }
}
