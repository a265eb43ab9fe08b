//! Name resolution: lexical variable scopes and the global function table.

pub mod scope;
pub mod symbol;

pub use scope::Tables;
pub use symbol::{Binding, BindingKind};
