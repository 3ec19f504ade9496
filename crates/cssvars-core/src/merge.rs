//! Merging of flattened variable tables.
//!
//! Merge semantics:
//! - New names: appended in first-seen order
//! - Repeated names: value overridden in place (last wins)

use rustc_hash::FxHashMap;

use crate::flatten::{CssValue, FlatEntry};

/// An ordered table of variables with unique names.
///
/// Keeps the first-seen order of names explicitly; overwriting a value never
/// moves its name.
#[derive(Debug, Clone, Default)]
pub struct FlatTable {
    entries: Vec<FlatEntry>,
    positions: FxHashMap<String, usize>,
}

impl FlatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, overriding any earlier value for the same name.
    pub fn insert(&mut self, entry: FlatEntry) {
        match self.positions.get(&entry.name) {
            Some(&position) => self.entries[position].value = entry.value,
            None => {
                self.positions.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Value currently recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&CssValue> {
        self.positions
            .get(name)
            .map(|&position| &self.entries[position].value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<FlatEntry> {
        self.entries
    }
}

impl Extend<FlatEntry> for FlatTable {
    fn extend<I: IntoIterator<Item = FlatEntry>>(&mut self, entries: I) {
        for entry in entries {
            self.insert(entry);
        }
    }
}

/// Merge flattened tables in order; later tables override earlier ones.
pub fn merge<I>(tables: I) -> Vec<FlatEntry>
where
    I: IntoIterator<Item = Vec<FlatEntry>>,
{
    let mut table = FlatTable::new();
    for entries in tables {
        table.extend(entries);
    }
    table.into_entries()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, value: &str) -> FlatEntry {
        FlatEntry::new(name, CssValue::plain(value))
    }

    fn pairs(entries: &[FlatEntry]) -> Vec<(&str, &str)> {
        entries
            .iter()
            .map(|e| (e.name.as_str(), e.value.text.as_str()))
            .collect()
    }

    #[test]
    fn test_merge_without_duplicates() {
        let merged = merge(vec![
            vec![entry("size-sm", "1rem")],
            vec![entry("size-md", "2rem")],
        ]);
        assert_eq!(pairs(&merged), vec![("size-sm", "1rem"), ("size-md", "2rem")]);
    }

    #[test]
    fn test_later_value_wins_in_first_seen_position() {
        let merged = merge(vec![
            vec![entry("size-sm", "1rem"), entry("size-md", "2rem")],
            vec![entry("size-md", "1.5rem")],
        ]);
        assert_eq!(
            pairs(&merged),
            vec![("size-sm", "1rem"), ("size-md", "1.5rem")]
        );
    }

    #[test]
    fn test_duplicates_within_one_table() {
        let merged = merge(vec![vec![entry("a", "1"), entry("b", "2"), entry("a", "3")]]);
        assert_eq!(pairs(&merged), vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_merge_nothing() {
        assert!(merge(Vec::<Vec<FlatEntry>>::new()).is_empty());
        assert!(merge(vec![Vec::new(), Vec::new()]).is_empty());
    }

    #[test]
    fn test_table_get_and_len() {
        let mut table = FlatTable::new();
        assert!(table.is_empty());
        table.insert(entry("a", "1"));
        table.insert(entry("a", "2"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a"), Some(&CssValue::plain("2")));
        assert_eq!(table.get("b"), None);
    }

    #[test]
    fn test_override_keeps_quoting_of_later_value() {
        let merged = merge(vec![
            vec![entry("font", "Inter")],
            vec![FlatEntry::new("font", CssValue::quoted("Inter Var"))],
        ]);
        assert_eq!(merged[0].value, CssValue::quoted("Inter Var"));
    }
}
