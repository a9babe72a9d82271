//! Case-insensitive lookup by display name.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Items keyed by a name compared without regard to case.
///
/// When several items share a name, the first one inserted is kept; tenants
/// routinely contain duplicate project names.
#[derive(Debug, Clone)]
pub struct NameIndex<T> {
    entries: BTreeMap<String, T>,
}

impl<T> NameIndex<T> {
    /// Builds an index from `items`, naming each with `name_of`.
    pub fn build<I, F>(items: I, name_of: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> &str,
    {
        let mut entries = BTreeMap::new();
        for item in items {
            if let Entry::Vacant(slot) = entries.entry(fold(name_of(&item))) {
                slot.insert(item);
            }
        }
        Self { entries }
    }

    /// Looks up an item by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&fold(name))
    }

    /// Returns `true` if an item with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&fold(name))
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the index holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the items, ordered by folded name.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Consumes the index, yielding items ordered by folded name.
    pub fn into_values(self) -> impl Iterator<Item = T> {
        self.entries.into_values()
    }
}

impl<T> Default for NameIndex<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let index = NameIndex::build(["WebGoat".to_string()], String::as_str);

        assert!(index.contains("webgoat"));
        assert_eq!(index.get("WEBGOAT").map(String::as_str), Some("WebGoat"));
    }

    #[test]
    fn first_duplicate_wins() {
        let index = NameIndex::build([("Api", 1), ("api", 2), ("Web", 3)], |(name, _)| *name);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("API").map(|(_, n)| *n), Some(1));
    }

    #[test]
    fn empty_index() {
        let index: NameIndex<String> = NameIndex::default();
        assert!(index.is_empty());
        assert!(index.get("anything").is_none());
    }
}
