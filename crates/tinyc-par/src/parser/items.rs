//! Top-level items: the list of function declarations (`Funcs{list}`).

use tinyc_lex::Token;

use crate::ast::{Formal, FuncDecl, Program};
use crate::parser::core::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_funcs(&mut self) -> Program {
        let mut funcs = Vec::new();
        while !self.is_eof() {
            funcs.push(self.parse_func_decl());
        }
        funcs
    }

    fn parse_func_decl(&mut self) -> FuncDecl {
        let line = self.peek_line();
        let return_type = self.parse_type();
        let name = self.expect_ident();
        self.expect(&Token::LParen);
        let formals = self.parse_formals();
        self.expect(&Token::RParen);
        self.expect(&Token::LBrace);
        let body = self.parse_stmts_until(&Token::RBrace);
        self.expect(&Token::RBrace);
        FuncDecl {
            return_type,
            name,
            formals,
            body,
            line,
        }
    }

    fn parse_formals(&mut self) -> Vec<Formal> {
        let mut formals = Vec::new();
        if *self.peek() == Token::RParen {
            return formals;
        }
        loop {
            let line = self.peek_line();
            let ty = self.parse_type();
            let id = self.expect_ident();
            formals.push(Formal { ty, id, line });
            if *self.peek() == Token::Comma {
                self.advance();
            } else {
                break;
            }
        }
        formals
    }
}
