//! First-token shortcuts such as `cc` for `create company`.

use std::collections::BTreeMap;

/// Maps a leading shortcut to the words it stands for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShortcutTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl ShortcutTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shortcut, builder style. Shortcuts are matched lowercase.
    #[must_use]
    pub fn with<I, S>(mut self, shortcut: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.insert(
            shortcut.to_lowercase(),
            words.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// The words a shortcut expands to.
    #[must_use]
    pub fn get(&self, shortcut: &str) -> Option<&[String]> {
        self.entries
            .get(&shortcut.to_lowercase())
            .map(Vec::as_slice)
    }

    /// Expands the first whitespace-delimited token of `input`, if it is a
    /// shortcut. Everything after it is kept verbatim.
    #[must_use]
    pub fn expand(&self, input: &str) -> String {
        let trimmed = input.trim_start();
        let end = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        let (first, rest) = trimmed.split_at(end);
        match self.get(first) {
            Some(words) => format!("{}{rest}", words.join(" ")),
            None => input.to_string(),
        }
    }

    /// Iterates over shortcuts in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of shortcuts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
