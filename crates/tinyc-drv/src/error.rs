//! The driver's own typed error enum, wrapping the handful of environmental
//! failures a CLI front-end actually produces, with `#[source]` conversions
//! instead of stringly-typed errors.
//!
//! This is deliberately small: the only environmental failures this driver
//! can hit are a missing/unreadable `--input` file and a stdin read error.
//! Everything else a user can get wrong about a *program* (lex/parse/type
//! errors) is not a `DriverError` at all — it goes through
//! [`tinyc_util::Handler`] and never becomes a Rust `Result` value.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read source file '{path}'")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read source from standard input")]
    ReadStdin(#[source] std::io::Error),
}
