#![no_main]

use libfuzzer_sys::fuzz_target;

// Conversion must be total on arbitrary text and idempotent: flattening a
// converted fragment and converting again reproduces the same fragment.
fuzz_target!(|text: &str| {
    let dict = emoji::EmojiDictionary::with_builtin();
    let fragment = markup::to_markup(text, &dict);
    let plain = markup::to_plain_text(&fragment);
    let again = markup::to_markup(&plain, &dict);
    assert_eq!(again, fragment);

    // Serialization is total too.
    let _ = markup::serialize(&fragment);
});
