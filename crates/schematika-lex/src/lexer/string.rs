//! String literal lexing (§4.G). No raw strings or char literals — those
//! token kinds don't exist in Schematika's grammar.

use schematika_util::Symbol;

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub fn lex_string(&mut self) -> Token {
        self.cursor.advance(); // opening '"'
        let mut content = String::new();

        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                self.report_error("unterminated string literal".to_string());
                break;
            }
            let c = self.cursor.current_char();
            if c == '"' {
                self.cursor.advance();
                break;
            }
            if c == '\\' {
                self.cursor.advance();
                if let Some(escaped) = self.parse_escape() {
                    content.push(escaped);
                }
            } else {
                content.push(c);
                self.cursor.advance();
            }
        }

        Token::StringLit(Symbol::intern(&content))
    }

    fn parse_escape(&mut self) -> Option<char> {
        if self.cursor.is_at_end() {
            self.report_error("unterminated escape sequence".to_string());
            return None;
        }
        let c = self.cursor.current_char();
        self.cursor.advance();
        match c {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            '\\' => Some('\\'),
            '"' => Some('"'),
            _ => {
                self.report_error(format!("unknown escape sequence: \\{}", c));
                None
            }
        }
    }
}
