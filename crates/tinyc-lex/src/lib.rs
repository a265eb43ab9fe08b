//! The lexical layer: turns source text into a stream of [`Token`]s,
//! decoding string-literal escape sequences and reporting the lexical
//! diagnostics of the fixed catalogue along the way.
//!
//! The concrete lexical syntax implemented here — keyword spellings, the
//! `b` suffix for byte literals, `//` line comments — is a real,
//! hand-written lexer rather than a generated one.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::Token;
