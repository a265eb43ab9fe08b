//! Diagnostic severity and terminal rendering.

use std::fmt;

/// Diagnostic severity level.
///
/// This compiler's catalogue only ever emits [`Level::Error`] — there are no
/// warnings or notes, because every diagnostic in the fixed catalogue
/// terminates the process (see [`super::Handler`]). The enum still carries
/// the other variants so a future non-terminating diagnostic (a warning)
/// has somewhere to live without a format-layer rewrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Error,
    Warning,
    Note,
}

impl Level {
    #[inline]
    pub const fn is_error(&self) -> bool {
        matches!(self, Level::Error)
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
        }
    }

    /// ANSI SGR colour code, for ttys.
    #[inline]
    pub const fn color_code(&self) -> &'static str {
        match self {
            Level::Error => "31",
            Level::Warning => "33",
            Level::Note => "36",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
