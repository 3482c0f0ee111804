//! Pluggable shortname loader seam.

use crate::dictionary::EmojiEntry;

/// A best-effort source of shortname entries.
///
/// Implementations fetch their catalog however the host likes (bundled
/// asset, network, storage) and call `deliver` at most once when the data
/// is ready. Never calling it is the failure mode and is non-fatal: the
/// field keeps working with whatever the dictionary already holds, and
/// unresolved shortnames stay literal.
///
/// Completion must not be awaited anywhere in the editing path; the
/// orchestrator exposes a delivery sink
/// (`EmojiField::apply_dictionary_update`) that only affects future
/// conversions.
pub trait ShortnameLoader {
    fn load(&mut self, deliver: &mut dyn FnMut(Vec<EmojiEntry>));
}

/// Loader over a fixed in-memory batch, delivered synchronously.
///
/// Useful in tests and for hosts that bundle their catalog.
#[derive(Clone, Debug, Default)]
pub struct StaticLoader {
    entries: Vec<EmojiEntry>,
}

impl StaticLoader {
    pub fn new(entries: Vec<EmojiEntry>) -> Self {
        Self { entries }
    }
}

impl ShortnameLoader for StaticLoader {
    fn load(&mut self, deliver: &mut dyn FnMut(Vec<EmojiEntry>)) {
        if !self.entries.is_empty() {
            deliver(std::mem::take(&mut self.entries));
        }
    }
}
