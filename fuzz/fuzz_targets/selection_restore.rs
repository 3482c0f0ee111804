#![no_main]

use field_core::{SelectionSnapshot, position_at, restore, snapshot};
use libfuzzer_sys::fuzz_target;
use markup::flattened_len;

// Restoring arbitrary offsets against a converted fragment must never
// panic, and in-range offsets must round-trip exactly.
fuzz_target!(|input: (&str, usize, usize)| {
    let (text, anchor, focus) = input;
    let dict = emoji::EmojiDictionary::with_builtin();
    let fragment = markup::to_markup(text, &dict);

    let native = restore(&fragment, &SelectionSnapshot { anchor, focus });
    let back = snapshot(&fragment, &native, false);

    let len = flattened_len(&fragment);
    assert!(back.anchor <= len && back.focus <= len);
    if anchor <= len && focus <= len {
        // Clamped positions may legally move only when the original
        // offset pointed between a sentinel and its emoji; position_at
        // never produces such a spot, so re-resolving is stable.
        let again = restore(&fragment, &back);
        assert_eq!(snapshot(&fragment, &again, false), back);
    }

    let _ = position_at(&fragment, anchor.max(focus));
});
