//! Shared infrastructure for the tinyc compiler workspace.
//!
//! This crate sits at the bottom of the dependency graph: symbol interning,
//! the terminating diagnostic sink, and the `IndexVec`/`Idx` typed-index
//! helper used by the scope tables live here so every other compiler crate
//! can share one copy of each.

pub mod diagnostic;
pub mod index_vec;
pub mod symbol;

pub use diagnostic::{Diagnostic, ErrorKind, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use symbol::Symbol;
