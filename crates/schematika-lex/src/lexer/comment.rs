//! Comment and whitespace skipping.
//!
//! §4.G: comments run from `#` to end of line. No block comments — keeping
//! the grammar small was a deliberate simplification (see DESIGN.md).

use crate::Lexer;

impl<'a> Lexer<'a> {
    pub fn skip_whitespace_and_comments(&mut self) {
        loop {
            if self.cursor.is_at_end() {
                return;
            }
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.cursor.advance();
                }
                '#' => self.skip_line_comment(),
                _ => return,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use schematika_util::{Handler, Symbol};

    use crate::token::Token;

    #[test]
    fn skip_plain_whitespace() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("   hello", &mut handler);
        assert_eq!(lexer.next_token(), Token::Ident(Symbol::intern("hello")));
    }

    #[test]
    fn skip_line_comment_to_eol() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("# a comment\nhello", &mut handler);
        assert_eq!(lexer.next_token(), Token::Ident(Symbol::intern("hello")));
    }

    #[test]
    fn comment_at_eof_has_no_trailing_newline() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("# trailing", &mut handler);
        assert_eq!(lexer.next_token(), Token::Eof);
    }
}
