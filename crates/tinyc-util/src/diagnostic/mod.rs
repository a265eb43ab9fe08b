//! The terminating diagnostic sink.
//!
//! Unlike a general-purpose compiler front end — which typically
//! accumulates diagnostics in a `Handler` and queries `has_errors()` once at
//! the end of a pass — this compiler's error catalogue is fail-fast: the
//! first diagnostic prints and the process exits non-zero immediately. The
//! `Handler`/`Diagnostic` vocabulary
//! below is kept because it carries its own formatting/colour behaviour
//! cleanly, but `Handler::emit` never returns.

mod codes;
mod level;

pub use codes::ErrorKind;
pub use level::Level;

use std::io::IsTerminal;

/// A single rendered diagnostic: a level, a message, and an optional
/// source line.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: Level,
    pub kind: ErrorKind,
    pub line: Option<u32>,
}

impl Diagnostic {
    pub fn error(kind: ErrorKind, line: Option<u32>) -> Self {
        Self {
            level: Level::Error,
            kind,
            line,
        }
    }

    /// Renders this diagnostic the way it will be printed to stderr.
    pub fn render(&self, color: bool) -> String {
        let body = self.kind.message();
        let with_line = match self.line {
            Some(line) => format!("{body} (line {line})"),
            None => body,
        };
        if color {
            format!(
                "\x1b[{}m{}\x1b[0m: {}",
                self.level.color_code(),
                self.level,
                with_line
            )
        } else {
            format!("{}: {}", self.level, with_line)
        }
    }
}

/// The compiler's one diagnostic sink. Every catalogue entry is reached
/// through a method on `Handler` (see the `report_*` methods below); every
/// one of them terminates the process, so `Handler` never needs to track
/// "have we already errored" state the way an accumulating handler would.
pub struct Handler {
    color: bool,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler {
    pub fn new() -> Self {
        Self {
            color: std::io::stderr().is_terminal(),
        }
    }

    /// Forces colour on/off, bypassing the tty auto-detection. Used by
    /// tests that assert on exact stderr text.
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Prints the diagnostic to stderr and exits the process with status 1.
    /// This function does not return.
    pub fn emit(&self, kind: ErrorKind, line: Option<u32>) -> ! {
        let diag = Diagnostic::error(kind, line);
        eprintln!("{}", diag.render(self.color));
        std::process::exit(1);
    }

    // One convenience method per catalogue entry, so call sites read like
    // `handler.lex(line)` rather than repeating `ErrorKind::Lex` everywhere.

    pub fn lex(&self, line: u32) -> ! {
        self.emit(ErrorKind::Lex, Some(line))
    }

    pub fn syn(&self, line: u32) -> ! {
        self.emit(ErrorKind::Syn, Some(line))
    }

    pub fn undef(&self, id: crate::symbol::Symbol, line: u32) -> ! {
        self.emit(ErrorKind::Undef(id), Some(line))
    }

    pub fn def_as_func(&self, id: crate::symbol::Symbol, line: u32) -> ! {
        self.emit(ErrorKind::DefAsFunc(id), Some(line))
    }

    pub fn undef_func(&self, id: crate::symbol::Symbol, line: u32) -> ! {
        self.emit(ErrorKind::UndefFunc(id), Some(line))
    }

    pub fn def_as_var(&self, id: crate::symbol::Symbol, line: u32) -> ! {
        self.emit(ErrorKind::DefAsVar(id), Some(line))
    }

    pub fn def(&self, id: crate::symbol::Symbol, line: u32) -> ! {
        self.emit(ErrorKind::Def(id), Some(line))
    }

    pub fn prototype_mismatch(
        &self,
        id: crate::symbol::Symbol,
        expected: Vec<String>,
        line: u32,
    ) -> ! {
        self.emit(ErrorKind::PrototypeMismatch(id, expected), Some(line))
    }

    pub fn mismatch(&self, line: u32) -> ! {
        self.emit(ErrorKind::Mismatch, Some(line))
    }

    pub fn unexpected_break(&self, line: u32) -> ! {
        self.emit(ErrorKind::UnexpectedBreak, Some(line))
    }

    pub fn unexpected_continue(&self, line: u32) -> ! {
        self.emit(ErrorKind::UnexpectedContinue, Some(line))
    }

    pub fn main_missing(&self) -> ! {
        self.emit(ErrorKind::MainMissing, None)
    }

    pub fn byte_too_large(&self, value: i64, line: u32) -> ! {
        self.emit(ErrorKind::ByteTooLarge(value), Some(line))
    }

    pub fn unknown_char(&self, c: char, line: u32) -> ! {
        self.emit(ErrorKind::UnknownChar(c), Some(line))
    }

    pub fn unclosed_string(&self, line: u32) -> ! {
        self.emit(ErrorKind::UnclosedString, Some(line))
    }

    pub fn undefined_escape(&self, seq: String, line: u32) -> ! {
        self.emit(ErrorKind::UndefinedEscape(seq), Some(line))
    }

    pub fn undefined_hex_escape(&self, seq: String, line: u32) -> ! {
        self.emit(ErrorKind::UndefinedHexEscape(seq), Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    #[test]
    fn renders_without_color() {
        let diag = Diagnostic::error(ErrorKind::Undef(Symbol::intern("x")), Some(4));
        assert_eq!(diag.render(false), "error: 'x' is not defined (line 4)");
    }

    #[test]
    fn main_missing_has_no_line() {
        let diag = Diagnostic::error(ErrorKind::MainMissing, None);
        assert_eq!(
            diag.render(false),
            "error: program does not declare a 'void main()' with no parameters"
        );
    }

    #[test]
    fn colored_render_contains_escape_codes() {
        let diag = Diagnostic::error(ErrorKind::Mismatch, Some(1));
        let rendered = diag.render(true);
        assert!(rendered.starts_with("\x1b[31m"));
        assert!(rendered.contains("\x1b[0m"));
    }
}
