//! Structural-character escaping for serialized markup.
//!
//! Contract:
//! - Escaped: `&`, `<`, `>`, `"`, `'`, and the zero-width sentinel scalar
//!   (U+FEFF) so user text can never be mistaken for a boundary marker.
//! - Everything else passes through unchanged, byte for byte.
//!
//! This is intentionally not an HTML serializer. Keep the set narrow and
//! stable: it only has to guarantee that typed or pasted text cannot
//! introduce structure into the serialized fragment.

/// Escape text-run content for inclusion in serialized markup.
pub fn escape_text(s: &str) -> String {
    // U+FEFF encodes as EF BB BF; matching its lead byte is enough to
    // find candidates in the byte scan.
    const FEFF_LEAD: u8 = 0xEF;
    const FEFF: &[u8] = "\u{FEFF}".as_bytes();

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    let mut copy_start = 0;

    while i < bytes.len() {
        let replacement = match bytes[i] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&apos;",
            FEFF_LEAD if bytes[i..].starts_with(FEFF) => "&#xFEFF;",
            _ => {
                i += 1;
                continue;
            }
        };

        // Flush bytes up to the match unchanged (preserves UTF-8).
        if copy_start < i {
            out.push_str(&s[copy_start..i]);
        }
        out.push_str(replacement);
        i += if replacement == "&#xFEFF;" { FEFF.len() } else { 1 };
        copy_start = i;
    }

    if copy_start == 0 {
        return s.to_string();
    }
    if copy_start < bytes.len() {
        out.push_str(&s[copy_start..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_text("hello world"), "hello world");
        assert_eq!(escape_text("caf\u{E9} \u{1F604}"), "caf\u{E9} \u{1F604}");
    }

    #[test]
    fn structural_characters_are_escaped() {
        assert_eq!(
            escape_text("<b>test</b>"),
            "&lt;b&gt;test&lt;/b&gt;"
        );
        assert_eq!(escape_text("a&b"), "a&amp;b");
        assert_eq!(escape_text("\"q\" 'a'"), "&quot;q&quot; &apos;a&apos;");
    }

    #[test]
    fn sentinel_scalar_is_escaped() {
        assert_eq!(escape_text("a\u{FEFF}b"), "a&#xFEFF;b");
    }

    #[test]
    fn multibyte_neighbors_survive() {
        // Lead byte 0xEF also starts other three-byte scalars; only the
        // exact FEFF sequence is rewritten.
        assert_eq!(escape_text("\u{FFFD}<"), "\u{FFFD}&lt;");
    }
}
