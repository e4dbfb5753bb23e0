//! UTF-8 codec and identifier classification.
//!
//! Hand-rolled decoding instead of `str` conversion because the lexer
//! must keep going through ill-formed input: a rejected sequence consumes
//! zero bytes and the caller decides how to fail. Rejected forms are
//! overlong encodings, surrogate codepoints (U+D800..=U+DFFF), values
//! above U+10FFFF, truncated tails, and bare continuation bytes.

use std::cmp::Ordering;

/// Decode one codepoint from the front of `bytes`.
///
/// Returns the scalar value and the number of bytes consumed (1..=4), or
/// `None` — consuming nothing — when the front is not a well-formed
/// sequence.
pub fn decode(bytes: &[u8]) -> Option<(char, usize)> {
    let first = *bytes.first()?;
    let (len, init) = match first {
        0x00..=0x7F => return Some((first as char, 1)),
        0xC2..=0xDF => (2, u32::from(first & 0x1F)),
        0xE0..=0xEF => (3, u32::from(first & 0x0F)),
        0xF0..=0xF4 => (4, u32::from(first & 0x07)),
        // 0xC0/0xC1 are always overlong; 0xF5+ is above U+10FFFF;
        // 0x80..=0xBF is a bare continuation byte.
        _ => return None,
    };
    if bytes.len() < len {
        return None;
    }
    let mut value = init;
    for &b in &bytes[1..len] {
        if b & 0xC0 != 0x80 {
            return None;
        }
        value = (value << 6) | u32::from(b & 0x3F);
    }
    // Overlong checks: the value must need this many bytes.
    let min = match len {
        2 => 0x80,
        3 => 0x800,
        _ => 0x1_0000,
    };
    if value < min {
        return None;
    }
    // Surrogates and the upper bound; from_u32 rejects both.
    let c = char::from_u32(value)?;
    Some((c, len))
}

/// Encode a codepoint into `buf`, returning the byte length (1..=4),
/// or 0 for values that are not Unicode scalars.
pub fn encode(cp: u32, buf: &mut [u8; 4]) -> usize {
    match char::from_u32(cp) {
        Some(c) => c.encode_utf8(buf).len(),
        None => 0,
    }
}

/// Codepoint count of a byte string.
///
/// A byte that does not start a well-formed sequence counts as one
/// codepoint and scanning resumes at the next byte, so ill-formed input
/// never aborts the caller.
pub fn len(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut pos = 0;
    while pos < bytes.len() {
        pos += decode(&bytes[pos..]).map_or(1, |(_, n)| n);
        count += 1;
    }
    count
}

/// Lexicographic comparison by codepoint.
///
/// Ill-formed bytes compare as their raw byte value; a shorter string
/// orders below any extension of it (the NUL terminator of the original
/// interface orders below every codepoint).
pub fn cmp(a: &[u8], b: &[u8]) -> Ordering {
    let mut pa = 0;
    let mut pb = 0;
    loop {
        match (next_scalar(a, &mut pa), next_scalar(b, &mut pb)) {
            (Some(ca), Some(cb)) => match ca.cmp(&cb) {
                Ordering::Equal => {}
                other => return other,
            },
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

/// Next scalar for [`cmp`]: decoded codepoint, or the raw byte on
/// ill-formed input.
fn next_scalar(bytes: &[u8], pos: &mut usize) -> Option<u32> {
    let rest = bytes.get(*pos..).filter(|r| !r.is_empty())?;
    match decode(rest) {
        Some((c, n)) => {
            *pos += n;
            Some(c as u32)
        }
        None => {
            *pos += 1;
            Some(u32::from(rest[0]))
        }
    }
}

/// Letters the language accepts in identifiers: ASCII letters plus the
/// whole Cyrillic block U+0400..=U+04FF (which contains the Serbian
/// letters ћ, ђ, ф, ј).
pub fn is_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{0400}'..='\u{04FF}').contains(&c)
}

/// ASCII digits only.
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Identifier characters: `_` anywhere, alphabetic anywhere, digits
/// only after the first character.
pub fn is_identifier_char(c: char, is_start: bool) -> bool {
    c == '_' || is_alphabetic(c) || (!is_start && is_digit(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // === decode ===

    #[test]
    fn decode_ascii() {
        assert_eq!(decode(b"a"), Some(('a', 1)));
        assert_eq!(decode(b"\x00"), Some(('\0', 1)));
        assert_eq!(decode(b"\x7f"), Some(('\u{7f}', 1)));
    }

    #[test]
    fn decode_cyrillic_two_byte() {
        assert_eq!(decode("ћ".as_bytes()), Some(('ћ', 2)));
        assert_eq!(decode("а".as_bytes()), Some(('а', 2)));
    }

    #[test]
    fn decode_three_and_four_byte() {
        assert_eq!(decode("€".as_bytes()), Some(('€', 3)));
        assert_eq!(decode("\u{1F600}".as_bytes()), Some(('\u{1F600}', 4)));
        assert_eq!(decode("\u{10FFFF}".as_bytes()), Some(('\u{10FFFF}', 4)));
    }

    #[test]
    fn decode_rejects_overlong() {
        // Overlong encodings of '/' and NUL
        assert_eq!(decode(&[0xC0, 0xAF]), None);
        assert_eq!(decode(&[0xC0, 0x80]), None);
        assert_eq!(decode(&[0xC1, 0xBF]), None);
        assert_eq!(decode(&[0xE0, 0x80, 0xAF]), None);
        assert_eq!(decode(&[0xF0, 0x80, 0x80, 0xAF]), None);
    }

    #[test]
    fn decode_rejects_surrogates() {
        // U+D800 and U+DFFF
        assert_eq!(decode(&[0xED, 0xA0, 0x80]), None);
        assert_eq!(decode(&[0xED, 0xBF, 0xBF]), None);
        // The neighbor U+D7FF is fine.
        assert_eq!(decode(&[0xED, 0x9F, 0xBF]), Some(('\u{D7FF}', 3)));
    }

    #[test]
    fn decode_rejects_out_of_range() {
        // U+110000 and the 0xF5 lead byte
        assert_eq!(decode(&[0xF4, 0x90, 0x80, 0x80]), None);
        assert_eq!(decode(&[0xF5, 0x80, 0x80, 0x80]), None);
    }

    #[test]
    fn decode_rejects_truncation_and_bare_continuation() {
        assert_eq!(decode(&[0xD1]), None);
        assert_eq!(decode(&[0xE2, 0x82]), None);
        assert_eq!(decode(&[0xF0, 0x9F, 0x98]), None);
        assert_eq!(decode(&[0x80]), None);
        assert_eq!(decode(&[0xBF, 0x41]), None);
        assert_eq!(decode(b""), None);
    }

    #[test]
    fn decode_rejects_bad_continuation() {
        assert_eq!(decode(&[0xD1, 0x41]), None);
        assert_eq!(decode(&[0xE2, 0x82, 0x41]), None);
    }

    // === encode ===

    #[test]
    fn encode_round_trip_samples() {
        let mut buf = [0u8; 4];
        for &c in &['a', 'ћ', '€', '\u{1F600}', '\u{10FFFF}', '\0'] {
            let n = encode(c as u32, &mut buf);
            assert_eq!(n, c.len_utf8());
            assert_eq!(decode(&buf[..n]), Some((c, n)));
        }
    }

    #[test]
    fn encode_rejects_invalid() {
        let mut buf = [0u8; 4];
        assert_eq!(encode(0xD800, &mut buf), 0);
        assert_eq!(encode(0xDFFF, &mut buf), 0);
        assert_eq!(encode(0x110000, &mut buf), 0);
    }

    #[test]
    fn encode_length_matches_prefix_class() {
        let mut buf = [0u8; 4];
        assert_eq!(encode(0x7F, &mut buf), 1);
        assert_eq!(encode(0x80, &mut buf), 2);
        assert_eq!(encode(0x7FF, &mut buf), 2);
        assert_eq!(encode(0x800, &mut buf), 3);
        assert_eq!(encode(0xFFFF, &mut buf), 3);
        assert_eq!(encode(0x1_0000, &mut buf), 4);
    }

    // === len ===

    #[test]
    fn len_counts_codepoints() {
        assert_eq!(len(b""), 0);
        assert_eq!(len(b"abc"), 3);
        assert_eq!(len("ако".as_bytes()), 3);
        assert_eq!(len("aђb".as_bytes()), 3);
    }

    #[test]
    fn len_skips_ill_formed_bytes() {
        // continuation byte, then 'a': 2 "codepoints"
        assert_eq!(len(&[0x80, b'a']), 2);
        // truncated 3-byte lead counts byte by byte
        assert_eq!(len(&[0xE2, 0x82]), 2);
    }

    // === cmp ===

    #[test]
    fn cmp_equal_strings() {
        assert_eq!(cmp(b"", b""), Ordering::Equal);
        assert_eq!(cmp("ако".as_bytes(), "ако".as_bytes()), Ordering::Equal);
    }

    #[test]
    fn cmp_orders_by_codepoint() {
        assert_eq!(cmp(b"a", b"b"), Ordering::Less);
        // Cyrillic orders above ASCII
        assert_eq!(cmp(b"z", "а".as_bytes()), Ordering::Less);
        assert_eq!(cmp("ђ".as_bytes(), "ћ".as_bytes()), Ordering::Less);
    }

    #[test]
    fn cmp_shorter_orders_below() {
        assert_eq!(cmp(b"ab", b"abc"), Ordering::Less);
        assert_eq!(cmp(b"abc", b"ab"), Ordering::Greater);
    }

    #[test]
    fn cmp_sign_matches_first_difference() {
        assert_eq!(cmp("ак".as_bytes(), "ал".as_bytes()), Ordering::Less);
        assert_eq!(cmp("ал".as_bytes(), "ак".as_bytes()), Ordering::Greater);
    }

    // === classification ===

    #[test]
    fn alphabetic_covers_ascii_and_cyrillic() {
        for c in ['a', 'Z', 'а', 'Я', 'ћ', 'ђ', 'ф', 'ј', '\u{0400}', '\u{04FF}'] {
            assert!(is_alphabetic(c), "{c:?} should be alphabetic");
        }
        for c in ['0', '_', ' ', '\u{03FF}', '\u{0500}', '€'] {
            assert!(!is_alphabetic(c), "{c:?} should not be alphabetic");
        }
    }

    #[test]
    fn digits_are_ascii_only() {
        assert!(is_digit('0'));
        assert!(is_digit('9'));
        assert!(!is_digit('٣')); // Arabic-Indic digit
        assert!(!is_digit('a'));
    }

    #[test]
    fn identifier_chars() {
        assert!(is_identifier_char('_', true));
        assert!(is_identifier_char('_', false));
        assert!(is_identifier_char('ћ', true));
        assert!(is_identifier_char('x', true));
        assert!(!is_identifier_char('1', true));
        assert!(is_identifier_char('1', false));
        assert!(!is_identifier_char('-', false));
    }

    // === property tests ===

    mod props {
        use super::super::{decode, encode};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decode_inverts_encode(c in any::<char>()) {
                let mut buf = [0u8; 4];
                let n = encode(c as u32, &mut buf);
                prop_assert_eq!(n, c.len_utf8());
                prop_assert_eq!(decode(&buf[..n]), Some((c, n)));
            }

            #[test]
            fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..8)) {
                // Either a well-formed prefix or a zero-consumption reject.
                if let Some((c, n)) = decode(&bytes) {
                    prop_assert!(n >= 1 && n <= 4);
                    prop_assert_eq!(c.len_utf8(), n);
                }
            }

            #[test]
            fn len_terminates(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
                let count = super::super::len(&bytes);
                prop_assert!(count <= bytes.len());
            }

            #[test]
            fn cmp_is_reflexive(bytes in proptest::collection::vec(any::<u8>(), 0..32)) {
                prop_assert_eq!(super::super::cmp(&bytes, &bytes), std::cmp::Ordering::Equal);
            }

            #[test]
            fn cmp_is_antisymmetric(
                a in proptest::collection::vec(any::<u8>(), 0..32),
                b in proptest::collection::vec(any::<u8>(), 0..32),
            ) {
                prop_assert_eq!(super::super::cmp(&a, &b), super::super::cmp(&b, &a).reverse());
            }
        }
    }
}
