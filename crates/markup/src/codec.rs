//! Bidirectional text/markup conversion.
//!
//! Forward: plain text with `:shortname:` tokens or raw emoji becomes a
//! fragment where every emoji cluster is the pair `[Sentinel, Emoji]` and
//! everything else is text runs. Reverse: the fragment flattens back to
//! canonical plain text (unicode emoji, never shortcodes).
//!
//! Idempotence invariant: `to_markup(to_plain_text(f), dict) == f` for any
//! codec output `f`. The live sync pass relies on this to detect when the
//! displayed fragment is already canonical.

use crate::escape::escape_text;
use crate::node::{MarkupFragment, MarkupNode, SENTINEL_CHAR};
use emoji::EmojiDictionary;
use memchr::memchr;
use unicode_segmentation::UnicodeSegmentation;

/// Output of a forward conversion, plus whether it differs from the
/// currently displayed fragment (drives the replace-and-restore cycle).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionResult {
    pub fragment: MarkupFragment,
    pub changed: bool,
}

/// Convert plain text for display and compare against the current fragment.
pub fn convert_for_display(
    text: &str,
    current: &MarkupFragment,
    dict: &EmojiDictionary,
) -> ConversionResult {
    let fragment = to_markup(text, dict);
    let changed = fragment != *current;
    ConversionResult { fragment, changed }
}

/// Convert plain text into a markup fragment.
///
/// - Known `:shortname:` tokens become `[Sentinel, Emoji]` pairs.
/// - Unknown or unterminated tokens stay literal text.
/// - Raw emoji grapheme clusters are wrapped the same way.
/// - Stray U+FEFF scalars in the input are dropped; that scalar is
///   reserved for sentinel markers.
pub fn to_markup(text: &str, dict: &EmojiDictionary) -> MarkupFragment {
    let mut fragment: MarkupFragment = Vec::new();
    let mut buf = String::new();

    let bytes = text.as_bytes();
    let mut i = 0;
    let mut lit_start = 0;
    while let Some(rel) = memchr(b':', &bytes[i..]) {
        let open = i + rel;
        let Some(rel_close) = memchr(b':', &bytes[open + 1..]) else {
            break;
        };
        let close = open + 1 + rel_close;
        let name = &text[open + 1..close];
        if is_shortname(name)
            && let Some(unicode) = dict.unicode_for(name)
        {
            push_literal(&mut fragment, &mut buf, &text[lit_start..open], dict);
            push_emoji(&mut fragment, &mut buf, unicode, dict);
            i = close + 1;
            lit_start = i;
        } else {
            // The closing colon may open the next token.
            i = close;
        }
    }
    push_literal(&mut fragment, &mut buf, &text[lit_start..], dict);

    if !buf.is_empty() {
        fragment.push(MarkupNode::Text { text: buf });
    }
    log::trace!(
        target: "markup.codec",
        "to_markup: {} chars -> {} nodes",
        text.chars().count(),
        fragment.len()
    );
    fragment
}

/// Flatten a fragment back to canonical plain text.
pub fn to_plain_text(fragment: &MarkupFragment) -> String {
    let mut out = String::new();
    for node in fragment {
        match node {
            MarkupNode::Text { text } => out.push_str(text),
            MarkupNode::Emoji { unicode, .. } => out.push_str(unicode),
            MarkupNode::Sentinel => {}
        }
    }
    out
}

/// Serialize a fragment to a sanitized markup string.
///
/// Text runs are escaped, emoji units become non-editable `<emoji>`
/// elements, and sentinels render as the zero-width U+FEFF scalar.
pub fn serialize(fragment: &MarkupFragment) -> String {
    let mut out = String::new();
    for node in fragment {
        match node {
            MarkupNode::Text { text } => out.push_str(&escape_text(text)),
            MarkupNode::Emoji { unicode, shortname } => {
                out.push_str("<emoji");
                if let Some(sn) = shortname {
                    out.push_str(" sn=\":");
                    out.push_str(&escape_text(sn));
                    out.push_str(":\"");
                }
                out.push('>');
                out.push_str(&escape_text(unicode));
                out.push_str("</emoji>");
            }
            MarkupNode::Sentinel => out.push(SENTINEL_CHAR),
        }
    }
    out
}

// --- Internal helper functions ---

/// Scan a literal segment for raw emoji clusters, accumulating plain text
/// into `buf` and flushing `[Sentinel, Emoji]` pairs into the fragment.
fn push_literal(
    fragment: &mut MarkupFragment,
    buf: &mut String,
    segment: &str,
    dict: &EmojiDictionary,
) {
    for cluster in segment.graphemes(true) {
        if cluster.chars().all(|c| c == SENTINEL_CHAR) {
            continue; // reserved for markers
        }
        if is_emoji_cluster(cluster, dict) {
            push_emoji(fragment, buf, cluster, dict);
        } else {
            buf.push_str(cluster);
        }
    }
}

fn push_emoji(fragment: &mut MarkupFragment, buf: &mut String, unicode: &str, dict: &EmojiDictionary) {
    if !buf.is_empty() {
        fragment.push(MarkupNode::Text {
            text: std::mem::take(buf),
        });
    }
    fragment.push(MarkupNode::Sentinel);
    fragment.push(MarkupNode::Emoji {
        unicode: unicode.to_string(),
        shortname: dict.shortname_for(unicode).map(str::to_string),
    });
}

fn is_shortname(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'_' | b'+' | b'-'))
}

/// A grapheme cluster renders as an emoji unit if the dictionary knows it
/// or any of its scalars sits in an emoji block.
fn is_emoji_cluster(cluster: &str, dict: &EmojiDictionary) -> bool {
    dict.shortname_for(cluster).is_some() || cluster.chars().any(is_emoji_scalar)
}

fn is_emoji_scalar(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F000..=0x1FAFF | 0x2600..=0x27BF | 0x2B00..=0x2BFF
    )
}
