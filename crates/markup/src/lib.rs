//! # markup
//!
//! Node model and bidirectional codec for the emoji field's displayed
//! content.
//!
//! Plain text with `:shortname:` tokens or raw emoji converts into a flat
//! [`MarkupFragment`] of text runs, atomic emoji units, and zero-width
//! sentinel markers; the inverse traversal re-derives canonical plain text
//! (unicode emoji, never shortcodes). [`serialize`] produces a sanitized
//! markup string for host export; user text can never inject structure.
//!
//! Conversion never fails: malformed or unknown shortcodes degrade to
//! literal text.

mod codec;
mod escape;
mod node;

pub use codec::{ConversionResult, convert_for_display, serialize, to_markup, to_plain_text};
pub use escape::escape_text;
pub use node::{MarkupFragment, MarkupNode, SENTINEL_CHAR, flattened_len, merge_text_runs};
