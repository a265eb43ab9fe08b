//! Core lexer dispatch.

use tinyc_util::Handler;

use crate::cursor::Cursor;
use crate::token::Token;

/// Turns source text into [`Token`]s.
///
/// The handler is a shared reference, not `&mut`: it never accumulates
/// state — `emit` terminates the process on the spot, so there's nothing
/// for the lexer to mutate.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    handler: &'a Handler,
    token_start_line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start_line: 1,
        }
    }

    /// The 1-based line on which the most recently returned token started.
    pub fn token_line(&self) -> u32 {
        self.token_start_line
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => self.cursor.advance(),
                '/' if self.cursor.peek_char(1) == '/' => {
                    while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Returns the next token, or [`Token::Eof`] at end of input.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.token_start_line = self.cursor.line();

        if self.cursor.is_at_end() {
            return Token::Eof;
        }

        match self.cursor.current_char() {
            '(' => self.single(Token::LParen),
            ')' => self.single(Token::RParen),
            '{' => self.single(Token::LBrace),
            '}' => self.single(Token::RBrace),
            ',' => self.single(Token::Comma),
            ';' => self.single(Token::Semicolon),
            '+' => self.single(Token::Plus),
            '-' => self.single(Token::Minus),
            '*' => self.single(Token::Star),
            '/' => self.single(Token::Slash),
            '=' => self.one_or_two('=', Token::Assign, Token::EqEq),
            '!' => self.one_or_two('=', Token::Bang, Token::Ne),
            '<' => self.one_or_two('=', Token::Lt, Token::Le),
            '>' => self.one_or_two('=', Token::Gt, Token::Ge),
            '&' => {
                self.cursor.advance();
                if self.cursor.current_char() == '&' {
                    self.cursor.advance();
                    Token::AndAnd
                } else {
                    self.report_unknown('&')
                }
            }
            '|' => {
                self.cursor.advance();
                if self.cursor.current_char() == '|' {
                    self.cursor.advance();
                    Token::OrOr
                } else {
                    self.report_unknown('|')
                }
            }
            '"' => self.lex_string(),
            c if c.is_ascii_digit() => self.lex_number(),
            c if is_ident_start(c) => self.lex_identifier(),
            c => self.report_unknown(c),
        }
    }

    fn single(&mut self, tok: Token) -> Token {
        self.cursor.advance();
        tok
    }

    fn one_or_two(&mut self, second: char, one: Token, two: Token) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == second {
            self.cursor.advance();
            two
        } else {
            one
        }
    }

    fn report_unknown(&mut self, c: char) -> Token {
        self.cursor.advance();
        self.handler.unknown_char(c, self.token_start_line)
    }

    fn lex_identifier(&mut self) -> Token {
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice(start, self.cursor.position());
        Token::keyword_or_ident(text)
    }

    pub(crate) fn handler(&self) -> &'a Handler {
        self.handler
    }

    pub(crate) fn cursor_mut(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }

    pub(crate) fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    pub(crate) fn token_start_line(&self) -> u32 {
        self.token_start_line
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Iterator for Lexer<'a> {
    type Item = (Token, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let tok = self.next_token();
        if tok == Token::Eof {
            None
        } else {
            Some((tok, self.token_start_line))
        }
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn lex_one(source: &str) -> Token {
        let handler = Handler::with_color(false);
        let mut lexer = Lexer::new(source, &handler);
        lexer.next_token()
    }

    proptest! {
        /// Any string matching the identifier grammar lexes to exactly one
        /// token, either `Ident` or the keyword it happens to spell — never
        /// a lex error, regardless of length or character mix.
        #[test]
        fn arbitrary_identifiers_lex_to_ident_or_keyword(s in "[A-Za-z_][A-Za-z0-9_]{0,31}") {
            let tok = lex_one(&s);
            let is_ident_or_keyword = matches!(
                tok,
                Token::Ident(_)
                    | Token::KwInt | Token::KwByte | Token::KwBool | Token::KwString | Token::KwVoid
                    | Token::KwIf | Token::KwElse | Token::KwWhile | Token::KwBreak
                    | Token::KwContinue | Token::KwReturn
                    | Token::Bool(_)
            );
            prop_assert!(is_ident_or_keyword);
        }

        /// Any non-empty decimal digit run lexes to a `Num` literal carrying
        /// exactly that value, when not followed by a `b` suffix.
        #[test]
        fn arbitrary_decimal_digits_lex_to_num(n in 0i64..1_000_000_000) {
            let source = n.to_string();
            let tok = lex_one(&source);
            prop_assert_eq!(tok, Token::Num(n));
        }

        /// The same digit run immediately followed by `b` lexes to `NumB`
        /// carrying the identical value (range-checking is a semantic, not
        /// lexical, concern).
        #[test]
        fn arbitrary_digits_with_b_suffix_lex_to_numb(n in 0i64..1_000_000_000) {
            let source = format!("{n}b");
            let tok = lex_one(&source);
            prop_assert_eq!(tok, Token::NumB(n));
        }
    }
}
