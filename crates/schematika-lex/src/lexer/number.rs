//! Number literal lexing (§4.G: integer literal, float literal).
//!
//! Decimal only — no hex/octal/binary literal forms and no digit-group
//! separators, matching §4.G's small literal grammar.

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub fn lex_number(&mut self) -> Token {
        let start = self.cursor.position();

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let is_float = (self.cursor.current_char() == '.'
            && self.cursor.peek_char(1).is_ascii_digit())
            || self.cursor.current_char() == 'e'
            || self.cursor.current_char() == 'E';

        if !is_float {
            let text = self.cursor.slice_from(start);
            return match text.parse::<i64>() {
                Ok(value) => Token::Integer(value),
                Err(e) => {
                    self.report_error(format!("malformed integer literal '{}': {}", text, e));
                    Token::Integer(0)
                }
            };
        }

        if self.cursor.current_char() == '.' {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }
        if self.cursor.current_char() == 'e' || self.cursor.current_char() == 'E' {
            self.cursor.advance();
            if self.cursor.current_char() == '+' || self.cursor.current_char() == '-' {
                self.cursor.advance();
            }
            let exp_digits_start = self.cursor.position();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            if self.cursor.position() == exp_digits_start {
                self.report_error("no digits in float exponent".to_string());
            }
        }

        let text = self.cursor.slice_from(start);
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Token::Float(value),
            _ => {
                self.report_error(format!("malformed float literal '{}'", text));
                Token::Float(0.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use schematika_util::Handler;

    use super::*;

    fn lex_num(source: &str) -> Token {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        lexer.lex_number()
    }

    #[test]
    fn decimal_integer() {
        assert_eq!(lex_num("42"), Token::Integer(42));
        assert_eq!(lex_num("0"), Token::Integer(0));
    }

    #[test]
    fn simple_float() {
        assert!(matches!(lex_num("3.14159265"), Token::Float(f) if (f - 3.14159265).abs() < 1e-9));
    }

    #[test]
    fn float_with_exponent() {
        assert!(matches!(lex_num("1e10"), Token::Float(f) if (f - 1e10).abs() < 1.0));
    }

    #[test]
    fn float_with_negative_exponent() {
        assert!(matches!(lex_num("2.5e-3"), Token::Float(f) if (f - 2.5e-3).abs() < 1e-9));
    }

    #[test]
    fn bare_integer_defaults_to_i64_representation() {
        // matches `(((1)))` -> Constant<i64>(1) in SPEC_FULL.md's worked examples
        assert_eq!(lex_num("1"), Token::Integer(1));
    }
}
