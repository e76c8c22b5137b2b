//! First-seen symbol tables.

use std::collections::HashMap;
use std::hash::Hash;

/// A dense bijection between symbols and integer codes.
///
/// Codes are contiguous, zero-based, and assigned in first-seen order.
/// Once assigned, a code is never revoked or reassigned, so forward and
/// reverse lookups stay consistent across incremental fitting passes.
/// Growth happens in exactly one place, [`get_or_insert`], which both
/// fitting and the transform-time unseen-value fallback go through.
///
/// [`get_or_insert`]: SymbolMap::get_or_insert
#[derive(Clone, Debug)]
pub struct SymbolMap<T> {
    codes: HashMap<T, usize>,
    symbols: Vec<T>,
}

impl<T> SymbolMap<T> {
    /// Create an empty symbol table.
    pub fn new() -> Self {
        Self {
            codes: HashMap::new(),
            symbols: Vec::new(),
        }
    }

    /// Number of distinct symbols assigned so far.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether no symbols have been assigned.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The symbol assigned to `code`, if that code has been assigned.
    pub fn symbol(&self, code: usize) -> Option<&T> {
        self.symbols.get(code)
    }

    /// All symbols in code order.
    pub fn symbols(&self) -> &[T] {
        &self.symbols
    }
}

impl<T> Default for SymbolMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> SymbolMap<T> {
    /// The code assigned to `symbol`, if it has been seen.
    pub fn code(&self, symbol: &T) -> Option<usize> {
        self.codes.get(symbol).copied()
    }

    /// Whether `symbol` has been assigned a code.
    pub fn contains(&self, symbol: &T) -> bool {
        self.codes.contains_key(symbol)
    }

    /// The code for `symbol`, assigning the next dense code on first sight.
    pub fn get_or_insert(&mut self, symbol: &T) -> usize {
        if let Some(&code) = self.codes.get(symbol) {
            return code;
        }
        let code = self.symbols.len();
        self.codes.insert(symbol.clone(), code);
        self.symbols.push(symbol.clone());
        code
    }

    /// Rebuild a table from symbols listed in code order.
    ///
    /// This is the deserialization path: the forward map is derived state
    /// and is reconstructed here rather than persisted.
    pub fn from_symbols(symbols: Vec<T>) -> Self {
        let codes = symbols
            .iter()
            .cloned()
            .enumerate()
            .map(|(code, symbol)| (symbol, code))
            .collect();
        Self { codes, symbols }
    }
}
