//! String interning.
//!
//! Identifiers and decoded string-literal bodies are interned into one
//! process-wide table, producing a cheap `Copy`, hashable [`Symbol`] handle
//! backed by a `'static &str`. The compiler never lexes or parses across
//! threads (the whole pipeline is a single sequential walk), so unlike a
//! general-purpose front end's concurrent interner this one is a plain
//! `RefCell`-guarded table behind a `OnceLock` — no `DashMap`, no atomics.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::sync::OnceLock;

/// An interned string handle. Two `Symbol`s compare equal iff their
/// underlying text is equal; comparison is a `u32` equality check, not a
/// string comparison.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

struct StringTable {
    strings: Vec<&'static str>,
    lookup: FxHashMap<&'static str, u32>,
}

impl StringTable {
    fn new() -> Self {
        Self {
            strings: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }

    fn intern(&mut self, s: &str) -> u32 {
        if let Some(&idx) = self.lookup.get(s) {
            return idx;
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let idx = self.strings.len() as u32;
        self.strings.push(leaked);
        self.lookup.insert(leaked, idx);
        idx
    }

    fn resolve(&self, idx: u32) -> &'static str {
        self.strings[idx as usize]
    }
}

fn table() -> &'static RefCell<StringTable> {
    static TABLE: OnceLock<RefCell<StringTable>> = OnceLock::new();
    TABLE.get_or_init(|| RefCell::new(StringTable::new()))
}

impl Symbol {
    /// Interns `s`, returning a handle. Interning the same text twice
    /// returns the same handle.
    pub fn intern(s: &str) -> Symbol {
        Symbol(table().borrow_mut().intern(s))
    }

    /// Returns the interned text.
    pub fn as_str(self) -> &'static str {
        table().borrow().resolve(self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn interning_dedups() {
        let a = Symbol::intern("main");
        let b = Symbol::intern("main");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "main");
    }

    #[test]
    fn distinct_strings_are_distinct() {
        let a = Symbol::intern("foo");
        let b = Symbol::intern("bar");
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "foo");
        assert_eq!(b.as_str(), "bar");
    }

    #[test]
    fn survives_owned_string_drop() {
        let owned = String::from("temporary");
        let sym = Symbol::intern(&owned);
        drop(owned);
        assert_eq!(sym.as_str(), "temporary");
    }

    proptest! {
        /// Interning any string and resolving it back always yields the
        /// original text, and interning the same text twice always yields
        /// the same handle — the two properties the whole compiler leans on
        /// every time it compares identifiers by `Symbol` equality instead
        /// of string equality.
        #[test]
        fn intern_then_resolve_round_trips(s in "[A-Za-z0-9_]{0,64}") {
            let sym = Symbol::intern(&s);
            prop_assert_eq!(sym.as_str(), s.as_str());
        }

        #[test]
        fn interning_twice_is_idempotent(s in "[A-Za-z0-9_]{0,64}") {
            let a = Symbol::intern(&s);
            let b = Symbol::intern(&s);
            prop_assert_eq!(a, b);
        }
    }
}
