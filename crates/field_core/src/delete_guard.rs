//! Cluster-aware delete interception.
//!
//! Rendered emoji are non-editable units paired with a zero-width sentinel
//! marker (`[Sentinel, Emoji]`, sentinel leading). Engines differ in
//! whether one delete keystroke removes such a unit wholly or only nudges
//! the adjacent marker; this guard normalizes behavior to "one keystroke
//! removes one visual unit" by finishing the half the native command left
//! behind.

use crate::surface::{EditSurface, Unit, unit_after, unit_before};
use markup::{MarkupFragment, MarkupNode};

/// Direction class of a delete keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteKind {
    /// Backspace.
    Backward,
    /// Forward delete.
    Forward,
    /// Some input methods report delete keys as "Unidentified"; those are
    /// treated as backspace.
    Unidentified,
}

/// What the guard did after the native delete ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The keystroke was an ordinary delete; nothing was intercepted.
    Passthrough,
    /// A pending flag was set: the implied intermediate change was
    /// suppressed and the remaining half of the cluster removed, so the
    /// whole sequence is one logical edit.
    FinishedCluster,
}

/// Per-field delete interception state. Both flags start false and are
/// cleared together on the input notification following the keystroke.
#[derive(Debug, Default)]
pub struct DeleteGuard {
    pending_backward: bool,
    pending_forward: bool,
}

impl DeleteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a delete is mid-interception.
    pub fn is_pending(&self) -> bool {
        self.pending_backward || self.pending_forward
    }

    /// Inspect the unit the native delete is about to remove and arm the
    /// matching flag when it borders a sentinel-marked cluster. The native
    /// command is always allowed to proceed.
    pub fn on_key_down(&mut self, kind: DeleteKind, surface: &dyn EditSurface) {
        let selection = surface.selection();
        if !selection.is_collapsed() {
            // Range deletes go through the range path whole.
            return;
        }
        let fragment = surface.fragment();
        let pos = &selection.focus;

        match kind {
            DeleteKind::Backward | DeleteKind::Unidentified => {
                match unit_before(fragment, pos) {
                    Some(Unit::Emoji(j)) if has_leading_sentinel(fragment, j) => {
                        self.pending_backward = true;
                    }
                    Some(Unit::Sentinel(_)) => {
                        // Orphan marker; the native delete removes it and
                        // the sequence still collapses to one edit.
                        self.pending_backward = true;
                    }
                    _ => {}
                }
            }
            DeleteKind::Forward => {
                if matches!(unit_after(fragment, pos), Some(Unit::Sentinel(_))) {
                    self.pending_forward = true;
                }
            }
        }
        if self.is_pending() {
            log::trace!(target: "field.guard", "armed {kind:?} cluster delete");
        }
    }

    /// Called on the input notification after the native delete ran. If a
    /// flag is pending, clears both and removes whatever half of the
    /// cluster the native command left behind: the leftover invisible
    /// marker (backward) or the emoji the marker guarded (forward, via one
    /// explicit forward-delete command).
    pub fn after_native_delete(&mut self, surface: &mut dyn EditSurface) -> GuardOutcome {
        if !self.is_pending() {
            return GuardOutcome::Passthrough;
        }
        let backward = self.pending_backward;
        self.pending_backward = false;
        self.pending_forward = false;

        let selection = surface.selection();
        if backward {
            // The orphan marker is zero-width, so depending on where the
            // engine parked the caret it may sit on either side of it.
            if matches!(
                unit_after(surface.fragment(), &selection.focus),
                Some(Unit::Sentinel(_))
            ) {
                surface.delete_forward();
            } else if matches!(
                unit_before(surface.fragment(), &selection.focus),
                Some(Unit::Sentinel(_))
            ) {
                surface.delete_backward();
            }
        } else if matches!(
            unit_after(surface.fragment(), &selection.focus),
            Some(Unit::Emoji(_))
        ) {
            surface.delete_forward();
        }
        GuardOutcome::FinishedCluster
    }
}

fn has_leading_sentinel(fragment: &MarkupFragment, emoji_index: usize) -> bool {
    emoji_index
        .checked_sub(1)
        .and_then(|j| fragment.get(j))
        .is_some_and(|node| matches!(node, MarkupNode::Sentinel))
}
