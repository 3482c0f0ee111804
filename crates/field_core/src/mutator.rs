//! Cursor-preserving mutations of the displayed fragment.
//!
//! Every operation here runs synchronously inside the triggering event, so
//! the replace-and-restore cycle completes before the surface is next
//! painted and the caret never visibly jumps.

use crate::selection::{NativeSelection, SelectionSnapshot, position_at, restore};
use crate::surface::{EditSurface, surface_snapshot};
use emoji::EmojiDictionary;
use markup::{convert_for_display, to_markup, to_plain_text};
use memchr::memmem;

/// Re-derive the displayed fragment from plain text.
///
/// No-op when the conversion matches what is already displayed (prevents
/// caret churn on every keystroke). Otherwise the selection is snapshotted,
/// the fragment replaced, and the selection restored. Returns `true` when a
/// replacement happened.
pub fn sync_display(
    surface: &mut dyn EditSurface,
    dict: &EmojiDictionary,
    text: &str,
) -> bool {
    let result = convert_for_display(text, surface.fragment(), dict);
    if !result.changed {
        return false;
    }

    let snap = surface_snapshot(surface, true);
    surface.set_fragment(result.fragment);
    let native = restore(surface.fragment(), &snap);
    surface.set_selection(native);
    log::debug!(
        target: "field.sync",
        "display resynced, {} nodes, caret at {:?}",
        surface.fragment().len(),
        snap.focus
    );
    true
}

/// Insert text at the caret, converting shortcodes and raw emoji on the
/// way in. Deletes any selected range first; leaves the caret collapsed
/// after the inserted content. With `saved`, the insertion point comes
/// from an earlier snapshot instead of the live selection (picker flow).
///
/// Returns the updated plain text.
pub fn insert_at_cursor(
    surface: &mut dyn EditSurface,
    dict: &EmojiDictionary,
    text: &str,
    saved: Option<&SelectionSnapshot>,
) -> String {
    if let Some(snap) = saved {
        let native = restore(surface.fragment(), snap);
        surface.set_selection(native);
    }
    let insert = to_markup(text, dict);
    surface.insert_markup(insert);
    to_plain_text(surface.fragment())
}

/// Replace the first occurrence of `search` in the flattened plain text
/// with `paste`, leaving the caret at the end of the replacement.
///
/// Returns the updated plain text, or `None` when `search` does not occur.
pub fn replace_text(
    surface: &mut dyn EditSurface,
    dict: &EmojiDictionary,
    search: &str,
    paste: &str,
) -> Option<String> {
    if search.is_empty() {
        return None;
    }
    let plain = to_plain_text(surface.fragment());
    let at = memmem::find(plain.as_bytes(), search.as_bytes())?;

    let mut next = String::with_capacity(plain.len() - search.len() + paste.len());
    next.push_str(&plain[..at]);
    next.push_str(paste);
    next.push_str(&plain[at + search.len()..]);

    // The caret goes after the (possibly converted) replacement, so the
    // prefix is measured through the codec as well.
    let head = &next[..at + paste.len()];
    let caret = to_plain_text(&to_markup(head, dict)).chars().count();

    surface.set_fragment(to_markup(&next, dict));
    let pos = position_at(surface.fragment(), caret);
    surface.set_selection(NativeSelection::collapsed(pos));
    Some(to_plain_text(surface.fragment()))
}
