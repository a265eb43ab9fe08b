//! Numeric literal lexing: decimal `int`s and `b`-suffixed `byte`s.

use crate::lexer::Lexer;
use crate::token::Token;

impl<'a> Lexer<'a> {
    /// Lexes `Num`/`NumB`. Range-checking a `byte` literal against 0..=255
    /// is a semantic concern (`ByteTooLarge`), not lexical, so this just
    /// parses the digits and notes the `b` suffix.
    pub(crate) fn lex_number(&mut self) -> Token {
        let start = self.cursor().position();
        while self.cursor().current_char().is_ascii_digit() {
            self.cursor_mut().advance();
        }
        let digits = self.cursor().slice(start, self.cursor().position());

        let is_byte = self.cursor().current_char() == 'b'
            && !is_ident_continue(self.cursor().peek_char(1));
        if is_byte {
            self.cursor_mut().advance();
        } else if is_ident_continue(self.cursor().current_char()) {
            // A digit run immediately followed by more identifier
            // characters (other than the `b` byte-suffix) isn't a token
            // this grammar recognises.
            self.handler().lex(self.token_start_line());
        }

        let value: i64 = match digits.parse() {
            Ok(v) => v,
            Err(_) => self.handler().lex(self.token_start_line()),
        };

        if is_byte {
            Token::NumB(value)
        } else {
            Token::Num(value)
        }
    }
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
