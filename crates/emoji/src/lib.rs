//! # emoji
//!
//! Shortname dictionary for the emoji field core.
//!
//! This crate provides the mapping between `:shortname:` tokens and their
//! unicode emoji forms:
//! - [`EmojiDictionary`]: forward (shortname → unicode) and reverse
//!   (unicode → canonical shortname) lookup, seeded with a builtin table
//! - [`ShortnameLoader`]: a pluggable, fire-and-forget seam for loading
//!   larger shortname sets from wherever the host keeps them
//!
//! ## Design Principles
//!
//! The dictionary is plain owned state with no I/O of its own. Loading is
//! best-effort: a loader that never delivers simply leaves unknown
//! shortnames unconverted, which the conversion layer treats as literal
//! text. Nothing here can fail in a way the host has to handle.

mod builtin;
mod dictionary;
mod loader;

pub use dictionary::{EmojiDictionary, EmojiEntry};
pub use loader::{ShortnameLoader, StaticLoader};
