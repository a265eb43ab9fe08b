//! The semantic symbol table's entry type: what a name resolves to, as
//! opposed to [`tinyc_util::Symbol`] (the interned name itself).

use tinyc_par::Type;
use tinyc_util::Symbol as Name;

/// A name bound in some scope, plus everything later IR generation needs
/// to reference it: its IR-level storage offset (for a variable) or its
/// signature (for a function).
#[derive(Debug, Clone)]
pub struct Binding {
    pub name: Name,
    pub line: u32,
    pub kind: BindingKind,
}

#[derive(Debug, Clone)]
pub enum BindingKind {
    /// A local variable or formal parameter. `offset` is negative for a
    /// formal (starts at -1, decrementing) and non-negative for a local
    /// (starts at 0, incrementing). `emitted_name` is the IR register
    /// holding this variable's address (an `alloca`'d slot); a `Formal` is
    /// first bound with its bare `%argN` register and later rebound to its
    /// prologue-allocated slot once the function signature has been
    /// emitted.
    Variable { ty: Type, offset: i32, emitted_name: String },
    /// A declared function, including the two built-ins `print` and
    /// `printi` pre-seeded into the global table.
    Function {
        return_type: Type,
        formals: Vec<Type>,
    },
}

impl Binding {
    pub fn variable(name: Name, ty: Type, offset: i32, line: u32, emitted_name: String) -> Self {
        Binding {
            name,
            line,
            kind: BindingKind::Variable { ty, offset, emitted_name },
        }
    }

    pub fn function(name: Name, return_type: Type, formals: Vec<Type>, line: u32) -> Self {
        Binding {
            name,
            line,
            kind: BindingKind::Function {
                return_type,
                formals,
            },
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, BindingKind::Function { .. })
    }
}
