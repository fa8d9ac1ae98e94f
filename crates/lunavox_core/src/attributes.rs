//! Attribute dictionaries.
//!
//! Every scene node, material and render setting in a `.vox` file carries an
//! ordered list of string pairs. Lookups return the first matching key; later
//! duplicates are kept but never returned by [`AttributeDict::get`].

use std::fmt;

/// Key of the display name attribute shared by all node kinds.
pub const NAME_KEY: &str = "_name";

/// Ordered string to string map read from a chunk payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeDict {
    /// Pairs in file order.
    entries: Vec<(String, String)>,
}

impl AttributeDict {
    /// Creates an empty dictionary.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Builds a dictionary from pairs, keeping their order.
    #[must_use]
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs.into_iter().collect()
    }

    /// Returns the value of the first pair whose key equals `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the `_name` attribute, if any.
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get(NAME_KEY)
    }

    /// Number of pairs, duplicates included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the dictionary holds no pairs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeDict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for AttributeDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}
