//! Structural interning.
//!
//! Maps values to dense integer handles (`Symbol`). Two structurally equal
//! values always intern to the same symbol, which is what keeps placeholder
//! aliasing stable across a whole encoding session.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A lightweight handle to an interned value.
///
/// Symbols are ordered by insertion order, not by the value they stand for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Create a Symbol from a raw index. Use only for deserialization.
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

/// Deduplicating interner over any hashable key.
#[derive(Debug, Clone)]
pub struct Interner<K = String> {
    map: HashMap<K, Symbol>,
    values: Vec<K>,
}

impl<K> Default for Interner<K> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
            values: Vec::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> Interner<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a value, returning the existing symbol when already present.
    pub fn intern(&mut self, value: K) -> Symbol {
        if let Some(&sym) = self.map.get(&value) {
            return sym;
        }

        let sym = Symbol(self.values.len() as u32);
        self.values.push(value.clone());
        self.map.insert(value, sym);
        sym
    }

    /// Look up a value without interning it.
    pub fn get<Q>(&self, value: &Q) -> Option<Symbol>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(value).copied()
    }

    /// Resolve a Symbol back to its value.
    ///
    /// # Panics
    /// Panics if the symbol was not created by this interner.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &K {
        &self.values[sym.0 as usize]
    }

    #[inline]
    pub fn try_resolve(&self, sym: Symbol) -> Option<&K> {
        self.values.get(sym.0 as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &K)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (Symbol(i as u32), v))
    }
}

impl Interner<String> {
    /// Intern a borrowed string, allocating only on a miss.
    pub fn intern_str(&mut self, s: &str) -> Symbol {
        match self.get(s) {
            Some(sym) => sym,
            None => self.intern(s.to_owned()),
        }
    }
}
