//! Builtin shortname table.
//!
//! A compact seed set so the field converts common shortcodes before any
//! loader delivers a fuller catalog. Names follow the widespread
//! `:shortname:` convention (lowercase, `_` separators).

/// `(shortname, unicode)` pairs. Order matters: the first entry for a given
/// unicode becomes its canonical shortname in reverse lookups.
pub(crate) const BUILTIN: &[(&str, &str)] = &[
    ("smile", "\u{1F604}"),
    ("grin", "\u{1F601}"),
    ("joy", "\u{1F602}"),
    ("laughing", "\u{1F606}"),
    ("blush", "\u{1F60A}"),
    ("wink", "\u{1F609}"),
    ("smirk", "\u{1F60F}"),
    ("sunglasses", "\u{1F60E}"),
    ("thinking", "\u{1F914}"),
    ("cry", "\u{1F622}"),
    ("sob", "\u{1F62D}"),
    ("heart", "\u{2764}\u{FE0F}"),
    ("broken_heart", "\u{1F494}"),
    ("thumbsup", "\u{1F44D}"),
    ("thumbsdown", "\u{1F44E}"),
    ("ok_hand", "\u{1F44C}"),
    ("clap", "\u{1F44F}"),
    ("wave", "\u{1F44B}"),
    ("pray", "\u{1F64F}"),
    ("muscle", "\u{1F4AA}"),
    ("eyes", "\u{1F440}"),
    ("fire", "\u{1F525}"),
    ("tada", "\u{1F389}"),
    ("rocket", "\u{1F680}"),
    ("star", "\u{2B50}"),
    ("sparkles", "\u{2728}"),
    ("check", "\u{2705}"),
    ("x", "\u{274C}"),
    ("warning", "\u{26A0}\u{FE0F}"),
    ("poop", "\u{1F4A9}"),
];
