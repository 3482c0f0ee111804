//! # emojifield
//!
//! Synchronization engine for emoji-aware editable text fields.
//!
//! The field keeps a plain-text value (shortcodes resolved, emoji as raw
//! unicode) in lockstep with a rendered markup fragment in which each
//! emoji is an atomic, non-editable unit paired with a zero-width
//! sentinel marker. The engine handles the conversions between the two
//! forms, preserves the caret across full display rebuilds, and turns
//! single-unit deletes at a cluster boundary into whole-cluster deletes.
//!
//! The crates underneath, re-exported here:
//! - [`emoji`]: the shortname dictionary and the loader seam
//! - [`markup`]: node model, text/markup codec, and serialization
//! - [`field_core`]: selection tracking, the [`EditSurface`] seam, and
//!   the [`EmojiField`] orchestrator
//!
//! ```
//! use emojifield::{BufferSurface, EmojiField};
//!
//! let mut field: EmojiField<BufferSurface> = EmojiField::default();
//! field.attach_surface(BufferSurface::new());
//! field.on_paste("nice :smile: day");
//! assert_eq!(field.value(), "nice \u{1F604} day");
//! ```

pub use emoji::{EmojiDictionary, EmojiEntry, ShortnameLoader, StaticLoader};
pub use field_core::{
    BufferSurface, DeleteGuard, DeleteKind, EditSurface, EmojiField, FieldOptions, GuardOutcome,
    Key, NativeSelection, NodePosition, SelectionSnapshot,
};
pub use markup::{
    ConversionResult, MarkupFragment, MarkupNode, SENTINEL_CHAR, convert_for_display, escape_text,
    serialize, to_markup, to_plain_text,
};
