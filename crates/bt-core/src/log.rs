#[cfg(feature = "serde")]
use serde::Serialize;

/// Append-only record of what the tree did, in traversal order.
///
/// Entries are human-readable lines with no parsing contract. Nothing in the engine removes or
/// reorders them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActivityLog {
    entries: Vec<String>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Entries appended after `mark`, where `mark` is an earlier `len()`.
    pub fn lines_since(&self, mark: usize) -> &[String] {
        self.entries.get(mark..).unwrap_or(&[])
    }

    pub fn render(&self) -> String {
        self.entries.join("\n")
    }
}

impl<'a> IntoIterator for &'a ActivityLog {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
