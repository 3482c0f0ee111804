//! Selection tracking over the flattened fragment.
//!
//! The native selection is a pair of `(node, char offset)` endpoints into
//! the displayed fragment. Snapshots convert both endpoints to global
//! character offsets over the flattened sequence, which survive a full
//! fragment replacement; restore converts back, clamping when the new
//! fragment is shorter.

use crate::offset::char_count;
use markup::{MarkupFragment, MarkupNode, flattened_len};

/// Position in the flattened character sequence of a fragment.
pub type GlobalOffset = usize;

/// A native selection endpoint: node index plus char offset within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodePosition {
    pub node: usize,
    pub offset: usize,
}

/// The surface's live selection. `focus` may precede `anchor` (a selection
/// dragged backwards) or equal it (a collapsed caret).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeSelection {
    pub anchor: NodePosition,
    pub focus: NodePosition,
}

impl NativeSelection {
    /// A collapsed caret at `pos`.
    #[inline]
    pub fn collapsed(pos: NodePosition) -> Self {
        Self {
            anchor: pos,
            focus: pos,
        }
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

impl Default for NativeSelection {
    fn default() -> Self {
        Self::collapsed(NodePosition { node: 0, offset: 0 })
    }
}

/// Logical selection captured right before a fragment replacement and
/// consumed right after. Invariant: both offsets lie within
/// `[0, flattened_len]` of the fragment they were taken from; restore
/// clamps if the new fragment shrank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub anchor: GlobalOffset,
    pub focus: GlobalOffset,
}

impl SelectionSnapshot {
    /// A collapsed caret at global offset `at`.
    #[inline]
    pub fn collapsed(at: GlobalOffset) -> Self {
        Self {
            anchor: at,
            focus: at,
        }
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

/// Capture the native selection as global offsets.
///
/// With `ignore_empty`, empty text runs are not endpoint candidates at all
/// (used right before a rebuild, when transient empty runs are noise);
/// either way they never shift the accumulated counts.
pub fn snapshot(
    fragment: &MarkupFragment,
    native: &NativeSelection,
    ignore_empty: bool,
) -> SelectionSnapshot {
    SelectionSnapshot {
        anchor: global_offset_of(fragment, &native.anchor, ignore_empty),
        focus: global_offset_of(fragment, &native.focus, ignore_empty),
    }
}

/// Resolve a snapshot against a (possibly rebuilt) fragment.
pub fn restore(fragment: &MarkupFragment, snap: &SelectionSnapshot) -> NativeSelection {
    NativeSelection {
        anchor: position_at(fragment, snap.anchor),
        focus: position_at(fragment, snap.focus),
    }
}

/// Global offset of a native endpoint.
///
/// Endpoints inside an emoji unit clamp to the nearer boundary; the unit
/// is atomic. Endpoints past the end of the fragment resolve to the total
/// flattened length.
pub fn global_offset_of(
    fragment: &MarkupFragment,
    pos: &NodePosition,
    ignore_empty: bool,
) -> GlobalOffset {
    let mut acc = 0;
    for (i, node) in fragment.iter().enumerate() {
        let len = node.char_len();
        if i == pos.node {
            if ignore_empty && node.is_empty_text() {
                return acc;
            }
            return match node {
                MarkupNode::Emoji { .. } => {
                    // Nearer boundary of the atomic unit.
                    if pos.offset * 2 >= len { acc + len } else { acc }
                }
                _ => acc + pos.offset.min(len),
            };
        }
        acc += len;
    }
    acc
}

/// Native position for a global offset.
///
/// Text runs are preferred owners; a boundary that coincides with a
/// `[Sentinel, Emoji]` cluster resolves to the outside of the pair, never
/// between the sentinel and its emoji. Out-of-range offsets clamp to the
/// nearest valid boundary.
pub fn position_at(fragment: &MarkupFragment, offset: GlobalOffset) -> NodePosition {
    let target = offset.min(flattened_len(fragment));
    let mut acc = 0;
    let mut fallback = NodePosition { node: 0, offset: 0 };
    for (i, node) in fragment.iter().enumerate() {
        match node {
            MarkupNode::Text { text } => {
                let len = char_count(text);
                if target <= acc + len {
                    return NodePosition {
                        node: i,
                        offset: target - acc,
                    };
                }
                acc += len;
                fallback = NodePosition {
                    node: i,
                    offset: len,
                };
            }
            MarkupNode::Emoji { unicode, .. } => {
                let len = char_count(unicode);
                if target == acc {
                    // No leading sentinel or text run claimed this
                    // boundary; sit before the unit.
                    return NodePosition { node: i, offset: 0 };
                }
                if target < acc + len {
                    // Inside the atomic unit clamps to its far boundary.
                    return NodePosition {
                        node: i,
                        offset: len,
                    };
                }
                // target == acc + len defers to a following text run or
                // the next cluster's sentinel.
                acc += len;
                fallback = NodePosition {
                    node: i,
                    offset: len,
                };
            }
            MarkupNode::Sentinel => {
                if target == acc {
                    return NodePosition { node: i, offset: 0 };
                }
            }
        }
    }
    fallback
}
