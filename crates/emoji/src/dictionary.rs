//! Shortname dictionary state.

use crate::builtin::BUILTIN;
use std::collections::HashMap;

/// A single shortname → unicode mapping, as delivered by a loader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmojiEntry {
    /// Bare shortname, without the delimiting colons (e.g. `smile`).
    pub shortname: String,
    /// Canonical unicode form (may be a multi-scalar cluster, e.g. `❤️`).
    pub unicode: String,
}

/// Bidirectional shortname dictionary.
///
/// Forward lookups resolve `:name:` tokens during conversion; reverse
/// lookups annotate raw emoji with their canonical shortname. The reverse
/// table is first-writer-wins so a unicode form keeps a stable canonical
/// name across alias inserts and later loader batches.
#[derive(Clone, Debug, Default)]
pub struct EmojiDictionary {
    by_shortname: HashMap<String, String>,
    by_unicode: HashMap<String, String>,
}

impl EmojiDictionary {
    /// Create an empty dictionary. Every shortname stays literal until a
    /// loader delivers entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dictionary seeded with the builtin table.
    pub fn with_builtin() -> Self {
        let mut dict = Self::new();
        dict.extend(
            BUILTIN
                .iter()
                .map(|(shortname, unicode)| EmojiEntry {
                    shortname: (*shortname).to_string(),
                    unicode: (*unicode).to_string(),
                })
                .collect(),
        );
        dict
    }

    /// Resolve a bare shortname (no colons) to its unicode form.
    pub fn unicode_for(&self, shortname: &str) -> Option<&str> {
        self.by_shortname.get(shortname).map(String::as_str)
    }

    /// Canonical shortname for a unicode form, if known.
    pub fn shortname_for(&self, unicode: &str) -> Option<&str> {
        self.by_unicode.get(unicode).map(String::as_str)
    }

    /// Merge a batch of entries. Later batches win on forward lookups;
    /// reverse lookups keep the first shortname seen for a unicode form.
    pub fn extend(&mut self, entries: Vec<EmojiEntry>) {
        for entry in entries {
            self.by_unicode
                .entry(entry.unicode.clone())
                .or_insert_with(|| entry.shortname.clone());
            self.by_shortname.insert(entry.shortname, entry.unicode);
        }
    }

    /// Number of known shortnames.
    pub fn len(&self) -> usize {
        self.by_shortname.len()
    }

    /// Returns `true` if no shortnames are known.
    pub fn is_empty(&self) -> bool {
        self.by_shortname.is_empty()
    }
}
