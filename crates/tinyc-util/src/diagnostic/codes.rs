//! The fixed, closed catalogue of source-level diagnostics.
//!
//! Every variant here corresponds to exactly one terminating error kind a
//! program can trigger (a lex error, a syntax error, an undefined name,
//! ...). There is no "other" case: a compiler bug that doesn't fit this
//! catalogue is a `panic!`, not a diagnostic (see the crate-level docs).

use crate::symbol::Symbol;

/// One entry in the fixed diagnostic catalogue.
#[derive(Debug, Clone)]
pub enum ErrorKind {
    /// A lexical error at the character level (not one of the more specific
    /// string-escape kinds below).
    Lex,
    /// A malformed program the parser could not build an AST from.
    Syn,
    /// Use of an identifier that is neither a variable nor a function.
    Undef(Symbol),
    /// A name already declared as a function is used/declared as a variable.
    DefAsFunc(Symbol),
    /// A call to a function name with no matching declaration.
    UndefFunc(Symbol),
    /// A name already declared as a variable is called as a function.
    DefAsVar(Symbol),
    /// A name already declared (variable or function) is redeclared.
    Def(Symbol),
    /// A call's argument count or types don't match the declared formals.
    PrototypeMismatch(Symbol, Vec<String>),
    /// A type mismatch outside the more specific cases above (cast,
    /// return-type, relational/boolean operand).
    Mismatch,
    /// `break` outside any loop.
    UnexpectedBreak,
    /// `continue` outside any loop.
    UnexpectedContinue,
    /// No `void main()` with no parameters was declared.
    MainMissing,
    /// A byte literal's value does not fit in 0..=255.
    ByteTooLarge(i64),
    /// A character the lexer cannot classify into any token.
    UnknownChar(char),
    /// A string literal with no closing quote before end-of-line/EOF.
    UnclosedString,
    /// An unrecognised single-character escape sequence, e.g. `\q`.
    UndefinedEscape(String),
    /// An invalid `\x` hex escape; `seq` is `"x"`, `"xA"`, or `"xAB"`
    /// depending on how many characters were consumed before the escape
    /// was found invalid.
    UndefinedHexEscape(String),
}

impl ErrorKind {
    /// Renders the human-readable message body (without the line suffix).
    pub fn message(&self) -> String {
        match self {
            ErrorKind::Lex => "lexical error".to_string(),
            ErrorKind::Syn => "syntax error".to_string(),
            ErrorKind::Undef(id) => format!("'{id}' is not defined"),
            ErrorKind::DefAsFunc(id) => {
                format!("'{id}' is already defined as a function")
            }
            ErrorKind::UndefFunc(id) => format!("function '{id}' is not defined"),
            ErrorKind::DefAsVar(id) => {
                format!("'{id}' is already defined as a variable")
            }
            ErrorKind::Def(id) => format!("'{id}' is already defined"),
            ErrorKind::PrototypeMismatch(id, expected) => {
                let types = expected.join(", ");
                format!("prototype mismatch calling '{id}', expected ({types})")
            }
            ErrorKind::Mismatch => "type mismatch".to_string(),
            ErrorKind::UnexpectedBreak => "unexpected 'break' outside of a loop".to_string(),
            ErrorKind::UnexpectedContinue => {
                "unexpected 'continue' outside of a loop".to_string()
            }
            ErrorKind::MainMissing => {
                "program does not declare a 'void main()' with no parameters".to_string()
            }
            ErrorKind::ByteTooLarge(value) => {
                format!("byte literal {value} does not fit in 0..=255")
            }
            ErrorKind::UnknownChar(c) => format!("unknown character '{c}'"),
            ErrorKind::UnclosedString => "unclosed string literal".to_string(),
            ErrorKind::UndefinedEscape(seq) => format!("undefined escape sequence '\\{seq}'"),
            ErrorKind::UndefinedHexEscape(seq) => {
                format!("undefined hex escape sequence '\\{seq}'")
            }
        }
    }
}
