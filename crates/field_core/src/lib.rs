//! # field_core
//!
//! Editing/state layer for the emoji-aware text field.
//!
//! This crate provides the synchronization engine around the `markup`
//! codec:
//! - [`SelectionSnapshot`] + [`snapshot`]/[`restore`]: logical selection
//!   as global character offsets that survive full fragment replacement
//! - [`EditSurface`]: the host's editable surface as a trait, with
//!   [`BufferSurface`] as the in-memory reference implementation
//! - [`mutator`]: cursor-preserving display sync, insertion, and
//!   search-and-replace
//! - [`DeleteGuard`]: turns single-unit deletes near a sentinel-marked
//!   cluster into one atomic whole-cluster delete
//! - [`EmojiField`]: the event-driven orchestrator and imperative API
//!
//! ## Design Principles
//!
//! All state is per-field instance; nothing is module-global. Operations
//! never fail outward: a missing surface no-ops, out-of-range selection
//! offsets clamp, and malformed input degrades to literal text upstream in
//! the codec.

mod delete_guard;
mod field;
pub mod mutator;
mod offset;
mod selection;
mod surface;

pub use delete_guard::{DeleteGuard, DeleteKind, GuardOutcome};
pub use field::{EmojiField, FieldOptions, Key};
pub use selection::{
    GlobalOffset, NativeSelection, NodePosition, SelectionSnapshot, global_offset_of, position_at,
    restore, snapshot,
};
pub use surface::{BufferSurface, EditSurface};

// Re-export offset utilities for integration layers that need char/byte
// conversion against node-local strings.
pub use offset::{byte_for_char, char_count};
