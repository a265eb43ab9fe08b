//! The AST model and recursive-descent parser.
//!
//! The language's grammar is small and fixed, so this crate is a real
//! hand-written recursive-descent parser rather than a generated one,
//! producing a rooted AST of typed node variants.

pub mod ast;
pub mod parser;

pub use ast::{BinOpKind, Expr, ExprKind, Formal, FuncDecl, Program, RelOpKind, Stmt, StmtKind, Type};
pub use parser::Parser;
