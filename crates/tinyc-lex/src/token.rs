//! The token alphabet.

use tinyc_util::Symbol;

/// A single lexical token, paired with the 1-based source line it started
/// on by the caller ([`crate::lexer::Lexer`] tracks the line separately so
/// comparisons in tests don't need to carry it).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// A decimal `int` literal, e.g. `42`.
    Num(i64),
    /// A `b`-suffixed `byte` literal, e.g. `300b`. The value is kept
    /// un-range-checked here; `ByteTooLarge` is a semantic diagnostic, not
    /// a lexical one.
    NumB(i64),
    /// A decoded string literal body (escapes already resolved).
    Str(Symbol),
    Bool(bool),
    Ident(Symbol),

    // Type keywords
    KwInt,
    KwByte,
    KwBool,
    KwString,
    KwVoid,

    // Control keywords
    KwIf,
    KwElse,
    KwWhile,
    KwBreak,
    KwContinue,
    KwReturn,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    EqEq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Assign,

    Eof,
}

impl Token {
    /// Maps a contiguous identifier lexeme to its keyword token, if any.
    pub fn keyword_or_ident(ident: &str) -> Token {
        match ident {
            "int" => Token::KwInt,
            "byte" => Token::KwByte,
            "bool" => Token::KwBool,
            "string" => Token::KwString,
            "void" => Token::KwVoid,
            "if" => Token::KwIf,
            "else" => Token::KwElse,
            "while" => Token::KwWhile,
            "break" => Token::KwBreak,
            "continue" => Token::KwContinue,
            "return" => Token::KwReturn,
            "true" => Token::Bool(true),
            "false" => Token::Bool(false),
            other => Token::Ident(Symbol::intern(other)),
        }
    }
}
