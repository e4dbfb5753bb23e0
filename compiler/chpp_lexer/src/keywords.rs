//! The keyword table.
//!
//! Ten Serbian-Cyrillic keywords resolved by exact UTF-8 byte equality
//! (case-sensitive). Lookup buckets on byte length first: Cyrillic
//! letters are two bytes each, so the keywords span 4–16 bytes and most
//! identifiers are rejected on length alone.

use chpp_ir::TokenKind;

/// The full table in source order, for iteration and reverse lookup.
pub const KEYWORDS: [(&str, TokenKind); 10] = [
    ("ако", TokenKind::If),
    ("иначе", TokenKind::Else),
    ("док", TokenKind::While),
    ("за", TokenKind::For),
    ("ради", TokenKind::Do),
    ("прекини", TokenKind::Break),
    ("врати", TokenKind::Return),
    ("екстерно", TokenKind::External),
    ("тачно", TokenKind::True),
    ("нетачно", TokenKind::False),
];

/// Look up a keyword by its UTF-8 text.
///
/// Returns `None` for anything that is not exactly one of the ten
/// keywords — lookup never normalizes case or width.
pub fn lookup(text: &str) -> Option<TokenKind> {
    match text.len() {
        4 => (text == "за").then_some(TokenKind::For),
        6 => match text {
            "ако" => Some(TokenKind::If),
            "док" => Some(TokenKind::While),
            _ => None,
        },
        8 => (text == "ради").then_some(TokenKind::Do),
        10 => match text {
            "иначе" => Some(TokenKind::Else),
            "врати" => Some(TokenKind::Return),
            "тачно" => Some(TokenKind::True),
            _ => None,
        },
        14 => match text {
            "прекини" => Some(TokenKind::Break),
            "нетачно" => Some(TokenKind::False),
            _ => None,
        },
        16 => (text == "екстерно").then_some(TokenKind::External),
        _ => None,
    }
}

/// Reverse lookup: the keyword spelling for a keyword token kind.
pub fn text(kind: TokenKind) -> Option<&'static str> {
    KEYWORDS
        .iter()
        .find(|(_, k)| *k == kind)
        .map(|(text, _)| *text)
}

/// True iff `text` is one of the ten keywords.
pub fn is_keyword(text: &str) -> bool {
    lookup(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn all_ten_keywords_resolve() {
        assert_eq!(lookup("ако"), Some(TokenKind::If));
        assert_eq!(lookup("иначе"), Some(TokenKind::Else));
        assert_eq!(lookup("док"), Some(TokenKind::While));
        assert_eq!(lookup("за"), Some(TokenKind::For));
        assert_eq!(lookup("ради"), Some(TokenKind::Do));
        assert_eq!(lookup("прекини"), Some(TokenKind::Break));
        assert_eq!(lookup("врати"), Some(TokenKind::Return));
        assert_eq!(lookup("екстерно"), Some(TokenKind::External));
        assert_eq!(lookup("тачно"), Some(TokenKind::True));
        assert_eq!(lookup("нетачно"), Some(TokenKind::False));
    }

    #[test]
    fn table_and_lookup_agree() {
        for (text, kind) in KEYWORDS {
            assert_eq!(lookup(text), Some(kind), "table entry {text} must resolve");
            assert_eq!(super::text(kind), Some(text));
        }
    }

    #[test]
    fn near_misses_are_identifiers() {
        assert_eq!(lookup("ако1"), None);
        assert_eq!(lookup("_ако"), None);
        assert_eq!(lookup("акоо"), None);
        assert_eq!(lookup("ак"), None);
        assert_eq!(lookup("АКО"), None); // case-sensitive
        assert_eq!(lookup("if"), None); // no Latin aliases
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn latin_lookalikes_do_not_match() {
        // Latin 'a' + Cyrillic "ко" is byte-distinct from Cyrillic "ако".
        assert_eq!(lookup("aко"), None);
    }

    #[test]
    fn reverse_lookup_covers_keywords_only() {
        assert_eq!(text(TokenKind::External), Some("екстерно"));
        assert_eq!(text(TokenKind::Ident), None);
        assert_eq!(text(TokenKind::Plus), None);
    }

    #[test]
    fn is_keyword_matches_lookup() {
        assert!(is_keyword("прекини"));
        assert!(!is_keyword("прекинии"));
    }

    #[test]
    fn byte_length_buckets_are_correct() {
        // The bucketing relies on these exact UTF-8 lengths.
        assert_eq!("за".len(), 4);
        assert_eq!("ако".len(), 6);
        assert_eq!("док".len(), 6);
        assert_eq!("ради".len(), 8);
        assert_eq!("иначе".len(), 10);
        assert_eq!("врати".len(), 10);
        assert_eq!("тачно".len(), 10);
        assert_eq!("прекини".len(), 14);
        assert_eq!("нетачно".len(), 14);
        assert_eq!("екстерно".len(), 16);
    }
}
