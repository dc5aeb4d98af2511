//! Shared token text interning (the "char table").
//!
//! Every token stores a `Symbol` handle into one table owned by its tree,
//! so the thousandth synthesized comma costs four bytes, not a fresh
//! allocation. Common punctuation and keyword spellings are pre-interned
//! at table construction so synthesized tokens never miss.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::syntax::TokenKind;

/// Handle to an interned string in a [`CharTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

/// Interning table for token text, owned by the tree.
#[derive(Debug, Default)]
pub struct CharTable {
    strings: Vec<Arc<str>>,
    index: HashMap<Arc<str>, u32>,
}

impl CharTable {
    /// Creates a table with all fixed-spelling token texts pre-interned.
    pub fn new() -> Self {
        let mut table = Self::default();
        for &text in FIXED_SPELLINGS.iter() {
            table.intern(text);
        }
        table
    }

    /// Interns `text`, returning the shared handle for it.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&id) = self.index.get(text) {
            return Symbol(id);
        }
        let id = self.strings.len() as u32;
        let shared: Arc<str> = Arc::from(text);
        self.strings.push(Arc::clone(&shared));
        self.index.insert(shared, id);
        Symbol(id)
    }

    /// Resolves a handle back to its text.
    pub fn resolve(&self, symbol: Symbol) -> &str {
        &self.strings[symbol.0 as usize]
    }

    /// Number of distinct interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// True if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Every fixed spelling from the token kind table, plus the single space
/// the repairer synthesizes around separators and keywords.
static FIXED_SPELLINGS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    TokenKind::ALL
        .iter()
        .filter_map(|kind| kind.canonical_text())
        .chain(std::iter::once(" "))
        .collect()
});

/// Interns the canonical spelling for a fixed-text token kind.
///
/// Panics if the kind has no canonical spelling; the repairer only ever
/// synthesizes fixed-text kinds.
pub(crate) fn canonical_symbol(table: &mut CharTable, kind: TokenKind) -> Symbol {
    let text = kind
        .canonical_text()
        .unwrap_or_else(|| panic!("token kind {kind:?} has no canonical spelling to synthesize"));
    table.intern(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_deduplicates() {
        let mut table = CharTable::new();
        let a = table.intern("foo");
        let b = table.intern("foo");
        let c = table.intern("bar");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(table.resolve(a), "foo");
        assert_eq!(table.resolve(c), "bar");
    }

    #[test]
    fn punctuation_is_preinterned() {
        let mut table = CharTable::new();
        let before = table.len();
        table.intern(",");
        table.intern("{");
        table.intern("import");
        assert_eq!(table.len(), before);
    }

    #[test]
    fn canonical_symbol_matches_kind_text() {
        let mut table = CharTable::new();
        let comma = canonical_symbol(&mut table, TokenKind::Comma);
        assert_eq!(table.resolve(comma), ",");
    }
}
