//! Lexical scoping and the always-visible global function table.

use tinyc_util::{define_idx, Handler, Idx, IndexVec, Symbol as Name};

use crate::symbol::{Binding, BindingKind};

define_idx!(struct RibId);

/// A single lexical scope. Ribs are never removed from the arena once
/// created; `exit_scope` only moves the live cursor back to the parent, so
/// a dangling reference into a closed rib can't outlive the `Tables` that
/// owns it.
#[derive(Debug)]
struct Rib {
    bindings: indexmap::IndexMap<Name, Binding>,
    parent: Option<RibId>,
    /// The variable-offset counter this rib started at, inherited from its
    /// parent and carried forward as bindings are added.
    offset: i32,
}

/// Variable scopes plus the flat, always-visible function table.
///
/// Functions live outside the rib tree entirely: a function name is valid
/// from anywhere, including before its own textual declaration, so there is
/// no parent-chasing lookup for it the way there is for a variable.
pub struct Tables {
    ribs: IndexVec<RibId, Rib>,
    current: RibId,
    functions: indexmap::IndexMap<Name, Binding>,
    /// Next offset to hand out to a formal parameter of the function
    /// currently being visited. Reset to -1 on every `FuncDecl`.
    next_param_offset: i32,
}

impl Tables {
    pub fn new() -> Self {
        let mut ribs = IndexVec::new();
        let root = ribs.push(Rib {
            bindings: indexmap::IndexMap::new(),
            parent: None,
            offset: 0,
        });
        let mut tables = Tables {
            ribs,
            current: root,
            functions: indexmap::IndexMap::new(),
            next_param_offset: -1,
        };
        tables.seed_builtins();
        tables
    }

    fn seed_builtins(&mut self) {
        use tinyc_par::Type;
        self.functions.insert(
            Name::intern("print"),
            Binding::function(Name::intern("print"), Type::Void, vec![Type::String], 0),
        );
        self.functions.insert(
            Name::intern("printi"),
            Binding::function(Name::intern("printi"), Type::Void, vec![Type::Int], 0),
        );
    }

    /// Begins a function's scope: resets the parameter-offset counter and
    /// pushes a fresh rib whose variable-offset counter starts at 0 (the
    /// root rib's `offset` field is always 0, so a function's top scope
    /// never inherits a stale value from a sibling function).
    pub fn enter_function(&mut self) {
        self.next_param_offset = -1;
        self.enter_scope();
    }

    pub fn enter_scope(&mut self) {
        let offset = self.ribs[self.current].offset;
        let rib = self.ribs.push(Rib {
            bindings: indexmap::IndexMap::new(),
            parent: Some(self.current),
            offset,
        });
        self.current = rib;
    }

    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.ribs[self.current].parent {
            self.current = parent;
        }
    }

    /// Hands out the next formal-parameter offset (-1, -2, -3, ...).
    pub fn next_formal_offset(&mut self) -> i32 {
        let offset = self.next_param_offset;
        self.next_param_offset -= 1;
        offset
    }

    /// The offset the current scope's *next* local variable will receive.
    /// Callers read this to build a `Binding::variable` before inserting it.
    pub fn current_var_offset(&self) -> i32 {
        self.ribs[self.current].offset
    }

    /// Inserts a local variable into the current scope. Reports `Def` if the
    /// name is already bound in any live scope, `DefAsFunc` if it collides
    /// with a declared function. Bumps the scope's local variable-offset
    /// counter, which is independent of the formal-parameter counter: local
    /// variables occupy non-negative offsets starting at 0 per function.
    pub fn insert_variable(&mut self, binding: Binding, handler: &Handler) {
        self.insert_binding_checked(&binding, handler);
        let rib = &mut self.ribs[self.current];
        rib.offset += 1;
        rib.bindings.insert(binding.name, binding);
    }

    /// Inserts a formal parameter into the current scope. Identical
    /// redefinition checks to [`Tables::insert_variable`], but does not
    /// touch the local variable-offset counter: a formal's offset was
    /// already handed out by [`Tables::next_formal_offset`], and consuming
    /// a local-offset slot for it too would shift every local variable's
    /// offset by the function's arity.
    pub fn insert_formal(&mut self, binding: Binding, handler: &Handler) {
        self.insert_binding_checked(&binding, handler);
        let rib = &mut self.ribs[self.current];
        rib.bindings.insert(binding.name, binding);
    }

    fn insert_binding_checked(&self, binding: &Binding, handler: &Handler) {
        debug_assert!(matches!(binding.kind, BindingKind::Variable { .. }));
        if self.resolve_variable(binding.name).is_some() {
            handler.def(binding.name, binding.line);
        }
        if self.functions.contains_key(&binding.name) {
            handler.def_as_func(binding.name, binding.line);
        }
    }

    /// Inserts a function into the global table. Reports `Def` if the name
    /// is already declared (including a collision with a built-in), and
    /// `DefAsVar` if a variable of that name is already visible (this can
    /// only happen if a caller inserts a function while inside a function
    /// body scope, which the two-phase `Funcs` visit never does — kept for
    /// symmetry with `insert_variable`'s error surface).
    pub fn insert_function(&mut self, binding: Binding, handler: &Handler) {
        debug_assert!(binding.is_function());
        if self.resolve_variable(binding.name).is_some() {
            handler.def_as_var(binding.name, binding.line);
        }
        if self.functions.contains_key(&binding.name) {
            handler.def(binding.name, binding.line);
        }
        self.functions.insert(binding.name, binding);
    }

    /// Looks up a name as a variable, walking from the current rib to the
    /// root. Does not consult the function table.
    pub fn resolve_variable(&self, name: Name) -> Option<&Binding> {
        let mut rib_id = self.current;
        loop {
            let rib = &self.ribs[rib_id];
            if let Some(binding) = rib.bindings.get(&name) {
                return Some(binding);
            }
            match rib.parent {
                Some(parent) => rib_id = parent,
                None => return None,
            }
        }
    }

    pub fn resolve_function(&self, name: Name) -> Option<&Binding> {
        self.functions.get(&name)
    }

    /// Unified lookup across both namespaces: a variable in the live scope
    /// chain, falling back to the global function table. Used where the
    /// grammar doesn't already know which namespace a name lives in (e.g.
    /// disambiguating `Undef` from `DefAsVar`/`DefAsFunc` at a `Call` or
    /// `ID` site.
    pub fn get_symbol(&self, name: Name) -> Option<&Binding> {
        self.resolve_variable(name).or_else(|| self.resolve_function(name))
    }

    pub fn is_symbol_defined(&self, name: Name) -> bool {
        self.get_symbol(name).is_some()
    }

    /// Rebinds a variable's `emitted_name` in place. Used by a `FuncDecl`'s
    /// prologue to repoint a formal from its bare `%argN` register to the
    /// `alloca`'d local slot the prologue just stored it into.
    pub fn set_emitted_name(&mut self, name: Name, emitted_name: String) {
        let mut rib_id = self.current;
        loop {
            if let Some(binding) = self.ribs[rib_id].bindings.get_mut(&name) {
                match &mut binding.kind {
                    BindingKind::Variable { emitted_name: slot, .. } => {
                        *slot = emitted_name;
                        return;
                    }
                    BindingKind::Function { .. } => unreachable!("name is a variable binding"),
                }
            }
            match self.ribs[rib_id].parent {
                Some(parent) => rib_id = parent,
                None => unreachable!("set_emitted_name on an unbound variable"),
            }
        }
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyc_par::Type;

    fn handler() -> Handler {
        Handler::with_color(false)
    }

    #[test]
    fn builtins_are_preseeded() {
        let tables = Tables::new();
        let print = tables.resolve_function(Name::intern("print")).unwrap();
        assert!(matches!(
            print.kind,
            BindingKind::Function {
                return_type: Type::Void,
                ..
            }
        ));
    }

    #[test]
    fn formal_offsets_decrement_and_reset_per_function() {
        let mut tables = Tables::new();
        tables.enter_function();
        assert_eq!(tables.next_formal_offset(), -1);
        assert_eq!(tables.next_formal_offset(), -2);
        tables.exit_scope();
        tables.enter_function();
        assert_eq!(tables.next_formal_offset(), -1);
    }

    #[test]
    fn nested_scopes_inherit_and_advance_the_offset_counter() {
        let mut tables = Tables::new();
        tables.enter_function();
        let x = Name::intern("x");
        tables.insert_variable(Binding::variable(x, Type::Int, 0, 1, "%p0".to_string()), &handler());
        tables.enter_scope();
        let y = Name::intern("y");
        // A nested block's first local continues from the outer scope's
        // next offset, it does not restart at 0.
        tables.insert_variable(Binding::variable(y, Type::Int, 1, 2, "%p1".to_string()), &handler());
        assert!(tables.resolve_variable(x).is_some());
        assert!(tables.resolve_variable(y).is_some());
        tables.exit_scope();
        assert!(tables.resolve_variable(y).is_none());
        assert!(tables.resolve_variable(x).is_some());
    }
}
