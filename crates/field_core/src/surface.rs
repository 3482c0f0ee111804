//! The editable surface seam.
//!
//! The core never owns the display; it drives it through [`EditSurface`].
//! Hosts adapt their real editable control behind this trait.
//! [`BufferSurface`] is the canonical in-memory implementation used by the
//! test suite and by headless hosts.
//!
//! The command edits (`insert_markup`, `delete_backward`,
//! `delete_forward`) are the undo seam: hosts must record them in their
//! native undo history. `set_fragment` is a display rebuild, not a user
//! edit, and carries no such requirement.

use crate::offset::{byte_for_char, char_after, char_before, char_count};
use crate::selection::{
    NativeSelection, NodePosition, SelectionSnapshot, position_at, snapshot,
};
use markup::{MarkupFragment, MarkupNode, flattened_len, merge_text_runs};

/// Read/write handle to the editable surface. Components receive it per
/// call and must not retain it across calls.
pub trait EditSurface {
    fn fragment(&self) -> &MarkupFragment;

    /// Replace the displayed fragment wholesale (display rebuild path).
    /// The selection is left clamped but otherwise unspecified; callers
    /// restore it explicitly.
    fn set_fragment(&mut self, fragment: MarkupFragment);

    fn selection(&self) -> NativeSelection;
    fn set_selection(&mut self, selection: NativeSelection);

    fn is_focused(&self) -> bool;
    fn focus(&mut self);
    fn blur(&mut self);

    /// Native insert command: replaces the current selection with the
    /// given nodes and collapses the caret after them. Undo-compatible.
    fn insert_markup(&mut self, fragment: MarkupFragment);

    /// Native backward delete: removes the selection, or exactly one unit
    /// before the caret (one char, one whole emoji, or one sentinel).
    fn delete_backward(&mut self);

    /// Native forward delete, symmetric to [`EditSurface::delete_backward`].
    fn delete_forward(&mut self);
}

/// One deletable unit adjacent to a caret position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Unit {
    Char(char),
    Emoji(usize),
    Sentinel(usize),
}

/// The unit a backward delete would act on from `pos`.
pub(crate) fn unit_before(fragment: &MarkupFragment, pos: &NodePosition) -> Option<Unit> {
    if pos.offset > 0 {
        match fragment.get(pos.node)? {
            MarkupNode::Text { text } => return char_before(text, pos.offset).map(Unit::Char),
            MarkupNode::Emoji { .. } => return Some(Unit::Emoji(pos.node)),
            MarkupNode::Sentinel => {}
        }
    }
    for j in (0..pos.node.min(fragment.len())).rev() {
        match &fragment[j] {
            MarkupNode::Text { text } if text.is_empty() => {}
            MarkupNode::Text { text } => return text.chars().last().map(Unit::Char),
            MarkupNode::Emoji { .. } => return Some(Unit::Emoji(j)),
            MarkupNode::Sentinel => return Some(Unit::Sentinel(j)),
        }
    }
    None
}

/// The unit a forward delete would act on from `pos`.
pub(crate) fn unit_after(fragment: &MarkupFragment, pos: &NodePosition) -> Option<Unit> {
    if let Some(node) = fragment.get(pos.node) {
        match node {
            MarkupNode::Text { text } => {
                if let Some(c) = char_after(text, pos.offset) {
                    return Some(Unit::Char(c));
                }
            }
            MarkupNode::Emoji { unicode, .. } => {
                if pos.offset < char_count(unicode) {
                    return Some(Unit::Emoji(pos.node));
                }
            }
            MarkupNode::Sentinel => {
                if pos.offset == 0 {
                    return Some(Unit::Sentinel(pos.node));
                }
            }
        }
    }
    for (j, node) in fragment.iter().enumerate().skip(pos.node + 1) {
        match node {
            MarkupNode::Text { text } if text.is_empty() => {}
            MarkupNode::Text { text } => return text.chars().next().map(Unit::Char),
            MarkupNode::Emoji { .. } => return Some(Unit::Emoji(j)),
            MarkupNode::Sentinel => return Some(Unit::Sentinel(j)),
        }
    }
    None
}

/// In-memory reference surface.
///
/// Keeps the fragment, a native selection, focus state, and an undo
/// journal fed by the command edits. Deleting an emoji unit removes the
/// whole node (the "engine deletes the non-editable element wholly" model
/// the delete guard normalizes against); its paired sentinel is left
/// behind on purpose.
#[derive(Debug, Default)]
pub struct BufferSurface {
    fragment: MarkupFragment,
    selection: NativeSelection,
    focused: bool,
    undo: Vec<(MarkupFragment, NativeSelection)>,
}

impl BufferSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Undo the most recent command edit. Returns `false` when the journal
    /// is empty.
    pub fn undo(&mut self) -> bool {
        let Some((fragment, selection)) = self.undo.pop() else {
            return false;
        };
        self.fragment = fragment;
        self.selection = selection;
        true
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    fn journal(&mut self) {
        self.undo.push((self.fragment.clone(), self.selection));
    }

    fn clamp_selection(&mut self) {
        self.selection.anchor = clamp_position(&self.fragment, self.selection.anchor);
        self.selection.focus = clamp_position(&self.fragment, self.selection.focus);
    }

    /// Normalized global range of the current selection.
    fn selected_range(&self) -> (usize, usize) {
        let snap = snapshot(&self.fragment, &self.selection, false);
        (snap.anchor.min(snap.focus), snap.anchor.max(snap.focus))
    }

    fn collapse_to(&mut self, global: usize) {
        self.selection = NativeSelection::collapsed(position_at(&self.fragment, global));
    }

    fn delete_one_unit(&mut self, backward: bool) {
        let (start, end) = self.selected_range();
        if start != end {
            self.journal();
            self.fragment = remove_range(&self.fragment, start, end);
            self.collapse_to(start);
            return;
        }

        let caret = start;
        let pos = self.selection.focus;
        let unit = if backward {
            unit_before(&self.fragment, &pos)
        } else {
            unit_after(&self.fragment, &pos)
        };
        let Some(unit) = unit else { return };

        self.journal();
        match unit {
            Unit::Char(_) => {
                let (from, to) = if backward {
                    (caret - 1, caret)
                } else {
                    (caret, caret + 1)
                };
                self.fragment = remove_range(&self.fragment, from, to);
                self.collapse_to(from);
            }
            Unit::Emoji(j) | Unit::Sentinel(j) => {
                // Remove the node wholesale and land the caret at the
                // unit's own start. Derived from the node index, not from
                // the caret: a mid-unit endpoint clamps to whichever
                // boundary is nearer, so caret arithmetic against the
                // unit's width is not safe in either direction.
                let unit_start = flattened_len(&self.fragment[..j]);
                self.fragment.remove(j);
                merge_text_runs(&mut self.fragment);
                self.collapse_to(unit_start);
            }
        }
    }
}

impl EditSurface for BufferSurface {
    fn fragment(&self) -> &MarkupFragment {
        &self.fragment
    }

    fn set_fragment(&mut self, fragment: MarkupFragment) {
        self.fragment = fragment;
        self.clamp_selection();
    }

    fn selection(&self) -> NativeSelection {
        self.selection
    }

    fn set_selection(&mut self, selection: NativeSelection) {
        self.selection = selection;
        self.clamp_selection();
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn insert_markup(&mut self, insert: MarkupFragment) {
        self.journal();
        let (start, end) = self.selected_range();
        let mut fragment = if start != end {
            remove_range(&self.fragment, start, end)
        } else {
            self.fragment.clone()
        };

        let inserted = flattened_len(&insert);
        fragment = insert_at(&fragment, start, insert);
        self.fragment = fragment;
        self.collapse_to(start + inserted);
    }

    fn delete_backward(&mut self) {
        self.delete_one_unit(true);
    }

    fn delete_forward(&mut self) {
        self.delete_one_unit(false);
    }
}

// --- Internal helper functions ---

fn clamp_position(fragment: &MarkupFragment, pos: NodePosition) -> NodePosition {
    if fragment.is_empty() {
        return NodePosition { node: 0, offset: 0 };
    }
    let node = pos.node.min(fragment.len() - 1);
    let offset = pos.offset.min(fragment[node].char_len());
    NodePosition { node, offset }
}

/// Remove the global char range `[start, end)`.
///
/// Emoji units are atomic: selection endpoints never land inside one, so a
/// unit is either fully covered (removed along with its leading sentinel)
/// or untouched. Bare sentinels strictly inside the range are removed too.
fn remove_range(fragment: &MarkupFragment, start: usize, end: usize) -> MarkupFragment {
    let mut out: MarkupFragment = Vec::with_capacity(fragment.len());
    let mut acc = 0;
    for node in fragment {
        match node {
            MarkupNode::Text { text } => {
                let len = char_count(text);
                if acc + len <= start || acc >= end {
                    out.push(node.clone());
                } else {
                    let keep_head = start.saturating_sub(acc).min(len);
                    let cut_to = end.saturating_sub(acc).min(len);
                    let b_head = byte_for_char(text, keep_head);
                    let b_tail = byte_for_char(text, cut_to);
                    let mut kept = String::with_capacity(b_head + text.len() - b_tail);
                    kept.push_str(&text[..b_head]);
                    kept.push_str(&text[b_tail..]);
                    out.push(MarkupNode::Text { text: kept });
                }
                acc += len;
            }
            MarkupNode::Emoji { unicode, .. } => {
                let len = char_count(unicode);
                let covered = acc >= start && acc + len <= end;
                if covered {
                    if matches!(out.last(), Some(MarkupNode::Sentinel)) {
                        out.pop();
                    }
                } else {
                    out.push(node.clone());
                }
                acc += len;
            }
            MarkupNode::Sentinel => {
                if !(acc > start && acc < end) {
                    out.push(MarkupNode::Sentinel);
                }
            }
        }
    }
    merge_text_runs(&mut out);
    out
}

/// Splice `insert` into the fragment at global char offset `offset`.
fn insert_at(fragment: &MarkupFragment, offset: usize, insert: MarkupFragment) -> MarkupFragment {
    let pos = position_at(fragment, offset);
    let mut out: MarkupFragment = Vec::with_capacity(fragment.len() + insert.len());

    if fragment.is_empty() {
        out.extend(insert);
        merge_text_runs(&mut out);
        return out;
    }

    for (i, node) in fragment.iter().enumerate() {
        if i != pos.node {
            out.push(node.clone());
            continue;
        }
        match node {
            MarkupNode::Text { text } => {
                let split = byte_for_char(text, pos.offset);
                out.push(MarkupNode::Text {
                    text: text[..split].to_string(),
                });
                out.extend(insert.iter().cloned());
                out.push(MarkupNode::Text {
                    text: text[split..].to_string(),
                });
            }
            MarkupNode::Emoji { .. } => {
                if pos.offset == 0 {
                    out.extend(insert.iter().cloned());
                    out.push(node.clone());
                } else {
                    out.push(node.clone());
                    out.extend(insert.iter().cloned());
                }
            }
            MarkupNode::Sentinel => {
                out.extend(insert.iter().cloned());
                out.push(MarkupNode::Sentinel);
            }
        }
    }
    merge_text_runs(&mut out);
    out
}

/// Snapshot helper for callers that only hold a surface.
pub(crate) fn surface_snapshot(surface: &dyn EditSurface, ignore_empty: bool) -> SelectionSnapshot {
    snapshot(surface.fragment(), &surface.selection(), ignore_empty)
}
