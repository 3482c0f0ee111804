//! Displayed-content node model.

/// The zero-width scalar rendered for sentinel markers in serialized form.
pub const SENTINEL_CHAR: char = '\u{FEFF}';

/// A node in the displayed markup fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupNode {
    /// An editable run of plain text.
    Text { text: String },
    /// A rendered emoji; generated, not user-editable. Atomic: there is no
    /// valid caret position inside it, and it is deleted as a whole unit.
    Emoji {
        /// Canonical unicode form (possibly multi-scalar, e.g. a ZWJ
        /// sequence).
        unicode: String,
        /// Canonical shortname, when the dictionary knows one.
        shortname: Option<String>,
    },
    /// Zero-width cluster-boundary marker. The codec emits each emoji
    /// cluster as the adjacent pair `[Sentinel, Emoji]`.
    Sentinel,
}

/// The displayed tree, flattened to a node list (see the codec docs).
pub type MarkupFragment = Vec<MarkupNode>;

impl MarkupNode {
    /// Length this node contributes to the flattened character sequence.
    ///
    /// Sentinels are zero-width but remain valid caret boundaries.
    pub fn char_len(&self) -> usize {
        match self {
            MarkupNode::Text { text } => text.chars().count(),
            MarkupNode::Emoji { unicode, .. } => unicode.chars().count(),
            MarkupNode::Sentinel => 0,
        }
    }

    /// Returns `true` for a text run with no content.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, MarkupNode::Text { text } if text.is_empty())
    }
}

/// Total flattened character length of a fragment.
pub fn flattened_len(fragment: &[MarkupNode]) -> usize {
    fragment.iter().map(MarkupNode::char_len).sum()
}

/// Normalize a fragment in place: join adjacent text runs and drop empty
/// ones. Editing primitives call this after structural edits so a fragment
/// has at most one text run between any two non-text nodes.
pub fn merge_text_runs(fragment: &mut MarkupFragment) {
    let mut out: MarkupFragment = Vec::with_capacity(fragment.len());
    for node in fragment.drain(..) {
        match node {
            MarkupNode::Text { text } if text.is_empty() => {}
            MarkupNode::Text { text } => {
                if let Some(MarkupNode::Text { text: prev }) = out.last_mut() {
                    prev.push_str(&text);
                } else {
                    out.push(MarkupNode::Text { text });
                }
            }
            other => out.push(other),
        }
    }
    *fragment = out;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> MarkupNode {
        MarkupNode::Text {
            text: s.to_string(),
        }
    }

    #[test]
    fn char_len_counts_chars_not_bytes() {
        assert_eq!(text("a\u{20AC}b").char_len(), 3);
        let emoji = MarkupNode::Emoji {
            unicode: "\u{2764}\u{FE0F}".into(),
            shortname: Some("heart".into()),
        };
        assert_eq!(emoji.char_len(), 2);
        assert_eq!(MarkupNode::Sentinel.char_len(), 0);
    }

    #[test]
    fn flattened_len_skips_sentinels() {
        let fragment = vec![
            text("hi "),
            MarkupNode::Sentinel,
            MarkupNode::Emoji {
                unicode: "\u{1F604}".into(),
                shortname: None,
            },
        ];
        assert_eq!(flattened_len(&fragment), 4);
    }

    #[test]
    fn merge_joins_runs_and_drops_empties() {
        let mut fragment = vec![
            text("ab"),
            text(""),
            text("cd"),
            MarkupNode::Sentinel,
            text(""),
            text("ef"),
        ];
        merge_text_runs(&mut fragment);
        assert_eq!(
            fragment,
            vec![text("abcd"), MarkupNode::Sentinel, text("ef")]
        );
    }
}
