//! Token-stream plumbing shared by the expression/statement/item parsers.

use tinyc_lex::{Lexer, Token};
use tinyc_util::{Handler, Symbol};

use crate::ast::{Program, Type};

/// Parses a whole program from source text.
///
/// The whole token stream is materialised up front (`Lexer` is itself an
/// `Iterator<Item = (Token, u32)>`) rather than pulled lazily one token at a
/// time: this language's programs are small, and a `Vec`-backed cursor
/// makes the one piece of lookahead the grammar needs (distinguishing a
/// parenthesised cast `(int) x` from a parenthesised expression) a matter of
/// indexing rather than a second lexer instance.
pub struct Parser<'a> {
    tokens: Vec<(Token, u32)>,
    pos: usize,
    pub(crate) handler: &'a Handler,
}

impl<'a> Parser<'a> {
    pub fn new(source: &str, handler: &'a Handler) -> Self {
        let lexer = Lexer::new(source, handler);
        let tokens: Vec<(Token, u32)> = lexer.collect();
        Self {
            tokens,
            pos: 0,
            handler,
        }
    }

    /// Parses the whole token stream into a `Funcs{list}` program.
    pub fn parse_program(&mut self) -> Program {
        self.parse_funcs()
    }

    pub(crate) fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|(t, _)| t)
            .unwrap_or(&Token::Eof)
    }

    pub(crate) fn peek_line(&self) -> u32 {
        self.tokens
            .get(self.pos)
            .map(|(_, l)| *l)
            .or_else(|| self.tokens.last().map(|(_, l)| *l))
            .unwrap_or(1)
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn advance(&mut self) -> Token {
        if self.pos < self.tokens.len() {
            let tok = self.tokens[self.pos].0.clone();
            self.pos += 1;
            tok
        } else {
            Token::Eof
        }
    }

    /// Consumes the current token if it matches `tok` exactly, else raises
    /// `Syn` at the current line.
    pub(crate) fn expect(&mut self, tok: &Token) {
        if self.peek() == tok {
            self.advance();
        } else {
            self.handler.syn(self.peek_line());
        }
    }

    /// Consumes and returns an identifier token's symbol, else raises `Syn`.
    pub(crate) fn expect_ident(&mut self) -> Symbol {
        match self.advance() {
            Token::Ident(sym) => sym,
            _ => self.handler.syn(self.peek_line()),
        }
    }

    /// Parses one of the five type keywords.
    pub(crate) fn parse_type(&mut self) -> Type {
        match self.advance() {
            Token::KwInt => Type::Int,
            Token::KwByte => Type::Byte,
            Token::KwBool => Type::Bool,
            Token::KwString => Type::String,
            Token::KwVoid => Type::Void,
            _ => self.handler.syn(self.peek_line()),
        }
    }

    /// True if the current token starts a type (used to disambiguate a
    /// parenthesised cast from a parenthesised expression).
    pub(crate) fn at_type_keyword(&self) -> bool {
        matches!(
            self.peek(),
            Token::KwInt | Token::KwByte | Token::KwBool | Token::KwString | Token::KwVoid
        )
    }

    pub(crate) fn save(&self) -> usize {
        self.pos
    }

    pub(crate) fn restore(&mut self, mark: usize) {
        self.pos = mark;
    }
}
