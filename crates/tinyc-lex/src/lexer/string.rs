//! String literal lexing and escape-sequence decoding.
//!
//! The validity rule for `\xHH` is stricter than a typical "any two hex
//! digits" lexer: the first nibble must be `2-7` and the second must be
//! `0-9|A-E|a-e`. The greedy two-digit consumption loop below is still
//! shared with that more permissive shape — only the post-hoc validity
//! check differs — so the `seq` reported on failure reflects exactly how
//! many characters were consumed before the sequence was found invalid.

use tinyc_util::Symbol;

use crate::lexer::Lexer;
use crate::token::Token;

/// The result of decoding one escape sequence.
enum Escape {
    Char(char),
    /// `\0`: per spec this terminates the decoded string outright.
    Nul,
}

impl<'a> Lexer<'a> {
    pub(crate) fn lex_string(&mut self) -> Token {
        self.cursor_mut().advance(); // opening quote
        let line = self.token_start_line();

        let mut content = String::new();
        let mut truncated = false;

        loop {
            if self.cursor().is_at_end() {
                self.handler().unclosed_string(line);
            }
            let c = self.cursor().current_char();
            if c == '"' {
                self.cursor_mut().advance();
                break;
            }
            if c == '\n' {
                self.handler().unclosed_string(line);
            }
            if c == '\\' {
                self.cursor_mut().advance();
                match self.parse_escape() {
                    Escape::Char(ch) => {
                        if !truncated {
                            content.push(ch);
                        }
                    }
                    Escape::Nul => truncated = true,
                }
            } else {
                if !truncated {
                    content.push(c);
                }
                self.cursor_mut().advance();
            }
        }

        Token::Str(Symbol::intern(&content))
    }

    fn parse_escape(&mut self) -> Escape {
        let line = self.token_start_line();
        if self.cursor().is_at_end() {
            self.handler().unclosed_string(line);
        }
        let c = self.cursor().current_char();
        self.cursor_mut().advance();

        match c {
            'n' => Escape::Char('\n'),
            'r' => Escape::Char('\r'),
            't' => Escape::Char('\t'),
            '\\' => Escape::Char('\\'),
            '"' => Escape::Char('"'),
            '0' => Escape::Nul,
            'x' => self.parse_hex_escape(),
            other => self.handler().undefined_escape(other.to_string(), line),
        }
    }

    fn parse_hex_escape(&mut self) -> Escape {
        let line = self.token_start_line();
        let mut digits = String::new();
        for _ in 0..2 {
            let h = self.cursor().current_char();
            if h.is_ascii_hexdigit() {
                digits.push(h);
                self.cursor_mut().advance();
            } else {
                break;
            }
        }

        if digits.len() == 2 {
            let bytes = digits.as_bytes();
            let first = bytes[0] as char;
            let second = bytes[1] as char;
            let first_ok = ('2'..='7').contains(&first);
            let second_ok =
                second.is_ascii_digit() || ('A'..='E').contains(&second) || ('a'..='e').contains(&second);
            if first_ok && second_ok {
                let value = u8::from_str_radix(&digits, 16).expect("validated hex digits");
                return Escape::Char(value as char);
            }
        }

        let seq = format!("x{digits}");
        self.handler().undefined_hex_escape(seq, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyc_util::Handler;

    fn lex_str(source: &str, handler: &Handler) -> Token {
        let mut lexer = Lexer::new(source, handler);
        lexer.lex_string()
    }

    #[test]
    fn simple_string() {
        let handler = Handler::with_color(false);
        let tok = lex_str("\"hello\"", &handler);
        assert_eq!(tok, Token::Str(Symbol::intern("hello")));
    }

    #[test]
    fn escapes() {
        let handler = Handler::with_color(false);
        let tok = lex_str("\"a\\nb\\tc\"", &handler);
        assert_eq!(tok, Token::Str(Symbol::intern("a\nb\tc")));
    }

    #[test]
    fn valid_hex_escape() {
        let handler = Handler::with_color(false);
        // \x41 -> first nibble 4 (in 2-7), second nibble 1 (in 0-9) -> 'A'
        let tok = lex_str("\"\\x41\"", &handler);
        assert_eq!(tok, Token::Str(Symbol::intern("A")));
    }

    #[test]
    fn nul_escape_terminates_string() {
        let handler = Handler::with_color(false);
        let tok = lex_str("\"ab\\0cd\"", &handler);
        assert_eq!(tok, Token::Str(Symbol::intern("ab")));
    }
}
