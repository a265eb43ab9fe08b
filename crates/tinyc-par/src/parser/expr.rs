//! Expression parsing: a small fixed precedence ladder, loosest to
//! tightest: `||`, `&&`, relational (non-chaining), additive, multiplicative,
//! unary (`!`, a C-style prefix cast, or a primary).

use tinyc_lex::Token;

use crate::ast::{BinOpKind, Expr, ExprKind, RelOpKind};
use crate::parser::core::Parser;

impl<'a> Parser<'a> {
    pub fn parse_expr(&mut self) -> Expr {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Expr {
        let mut left = self.parse_and();
        while *self.peek() == Token::OrOr {
            let line = self.peek_line();
            self.advance();
            let right = self.parse_and();
            left = Expr::new(ExprKind::Or(Box::new(left), Box::new(right)), line);
        }
        left
    }

    fn parse_and(&mut self) -> Expr {
        let mut left = self.parse_relational();
        while *self.peek() == Token::AndAnd {
            let line = self.peek_line();
            self.advance();
            let right = self.parse_relational();
            left = Expr::new(ExprKind::And(Box::new(left), Box::new(right)), line);
        }
        left
    }

    /// Relational operators don't chain: `a < b < c` is rejected by the
    /// grammar (at most one relational operator per comparison).
    fn parse_relational(&mut self) -> Expr {
        let left = self.parse_additive();
        let op = match self.peek() {
            Token::EqEq => Some(RelOpKind::Eq),
            Token::Ne => Some(RelOpKind::Ne),
            Token::Lt => Some(RelOpKind::Lt),
            Token::Le => Some(RelOpKind::Le),
            Token::Gt => Some(RelOpKind::Gt),
            Token::Ge => Some(RelOpKind::Ge),
            _ => None,
        };
        match op {
            Some(op) => {
                let line = self.peek_line();
                self.advance();
                let right = self.parse_additive();
                Expr::new(
                    ExprKind::RelOp {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    line,
                )
            }
            None => left,
        }
    }

    fn parse_additive(&mut self) -> Expr {
        let mut left = self.parse_multiplicative();
        loop {
            let op = match self.peek() {
                Token::Plus => BinOpKind::Add,
                Token::Minus => BinOpKind::Sub,
                _ => break,
            };
            let line = self.peek_line();
            self.advance();
            let right = self.parse_multiplicative();
            left = Expr::new(
                ExprKind::BinOp {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                line,
            );
        }
        left
    }

    fn parse_multiplicative(&mut self) -> Expr {
        let mut left = self.parse_unary();
        loop {
            let op = match self.peek() {
                Token::Star => BinOpKind::Mul,
                Token::Slash => BinOpKind::Div,
                _ => break,
            };
            let line = self.peek_line();
            self.advance();
            let right = self.parse_unary();
            left = Expr::new(
                ExprKind::BinOp {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                line,
            );
        }
        left
    }

    fn parse_unary(&mut self) -> Expr {
        if *self.peek() == Token::Bang {
            let line = self.peek_line();
            self.advance();
            let operand = self.parse_unary();
            return Expr::new(ExprKind::Not(Box::new(operand)), line);
        }

        if *self.peek() == Token::LParen {
            let mark = self.save();
            let line = self.peek_line();
            self.advance();
            if self.at_type_keyword() {
                let target = self.parse_type();
                if *self.peek() == Token::RParen {
                    self.advance();
                    let expr = self.parse_unary();
                    return Expr::new(
                        ExprKind::Cast {
                            target,
                            expr: Box::new(expr),
                        },
                        line,
                    );
                }
            }
            self.restore(mark);
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Expr {
        let line = self.peek_line();
        match self.advance() {
            Token::Num(n) => Expr::new(ExprKind::Num(n), line),
            Token::NumB(n) => Expr::new(ExprKind::NumB(n), line),
            Token::Str(s) => Expr::new(ExprKind::Str(s), line),
            Token::Bool(b) => Expr::new(ExprKind::Bool(b), line),
            Token::Ident(name) => {
                if *self.peek() == Token::LParen {
                    self.advance();
                    let mut args = Vec::new();
                    if *self.peek() != Token::RParen {
                        loop {
                            args.push(self.parse_expr());
                            if *self.peek() == Token::Comma {
                                self.advance();
                            } else {
                                break;
                            }
                        }
                    }
                    self.expect(&Token::RParen);
                    Expr::new(ExprKind::Call { func: name, args }, line)
                } else {
                    Expr::new(ExprKind::Id(name), line)
                }
            }
            Token::LParen => {
                let inner = self.parse_expr();
                self.expect(&Token::RParen);
                inner
            }
            _ => self.handler.syn(line),
        }
    }
}
