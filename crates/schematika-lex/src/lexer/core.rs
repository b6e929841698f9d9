//! Core lexer implementation (§4.G): dispatches on the current character and
//! drives the `Cursor`.

use schematika_util::{DiagnosticBuilder, Handler, Span};

use crate::cursor::Cursor;
use crate::token::Token;
use crate::unicode::is_ascii_ident_start;

/// Tokenizes Schematika source text one token at a time.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    handler: &'a mut Handler,
    pub(crate) token_start: usize,
    token_start_line: u32,
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// §4.G's `scan` contract, adapted to an in-place cursor: returns the
    /// next token and advances past it, or `Token::Eof` once the input is
    /// exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Token::Eof;
        }

        match self.cursor.current_char() {
            '(' => {
                self.cursor.advance();
                Token::LParen
            }
            ')' => {
                self.cursor.advance();
                Token::RParen
            }
            '{' => {
                self.cursor.advance();
                Token::LBrace
            }
            '}' => {
                self.cursor.advance();
                Token::RBrace
            }
            '[' => {
                self.cursor.advance();
                Token::LBracket
            }
            ']' => {
                self.cursor.advance();
                Token::RBracket
            }
            ',' => {
                self.cursor.advance();
                Token::Comma
            }
            ';' => {
                self.cursor.advance();
                Token::Semicolon
            }
            '+' => self.lex_plus(),
            '-' => self.lex_minus(),
            '*' => self.lex_star(),
            '/' => self.lex_slash(),
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '&' => self.lex_ampersand(),
            '|' => self.lex_pipe(),
            ':' => self.lex_colon(),
            '.' => self.lex_dot(),
            '"' => self.lex_string(),
            c if is_ascii_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            c => {
                self.report_error(format!("unexpected character '{}'", c));
                self.cursor.advance();
                Token::Invalid(c.to_string())
            }
        }
    }

    pub(crate) fn report_error(&mut self, message: String) {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        DiagnosticBuilder::error(message).span(span).emit(self.handler);
    }

    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token == Token::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use schematika_util::Symbol;

    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(source, &mut handler);
        lexer.by_ref().collect()
    }

    #[test]
    fn scans_a_def_statement() {
        let toks = tokens("def pi : f64 = 3.14159265;");
        assert_eq!(
            toks,
            vec![
                Token::Def,
                Token::Ident(Symbol::intern("pi")),
                Token::Colon,
                Token::Ident(Symbol::intern("f64")),
                Token::Eq,
                Token::Float(3.14159265),
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn scans_a_lambda_with_if_else() {
        let toks = tokens("lambda(n : i32) if n == 0 then 0 else 1;");
        assert_eq!(toks[0], Token::Lambda);
        assert!(toks.contains(&Token::If));
        assert!(toks.contains(&Token::Then));
        assert!(toks.contains(&Token::Else));
        assert!(toks.contains(&Token::EqEq));
    }

    #[test]
    fn comments_are_skipped_between_tokens() {
        let toks = tokens("def # a name\n x = 1;");
        assert_eq!(toks[0], Token::Def);
        assert_eq!(toks[1], Token::Ident(Symbol::intern("x")));
    }

    #[test]
    fn empty_input_is_eof() {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new("", &mut handler);
        assert_eq!(lexer.next_token(), Token::Eof);
    }
}
