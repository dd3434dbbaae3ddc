//! User-curated pilot shortlist

use serde::Serialize;

/// Ordered list of pilot names, changed only by explicit add/remove
///
/// By default `add` keeps duplicates: adding a name twice yields two entries.
/// A deduplicating shortlist ignores names it already holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Shortlist {
    names: Vec<String>,
    #[serde(skip)]
    dedupe: bool,
}

impl Shortlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortlist whose `add` ignores names already present
    pub fn deduplicating() -> Self {
        Self {
            names: Vec::new(),
            dedupe: true,
        }
    }

    /// Append a name, returns false if it was ignored as a duplicate
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.dedupe && self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Remove every entry equal to `name`, returns how many were removed
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        before - self.names.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_deduplicating(&self) -> bool {
        self.dedupe
    }
}
