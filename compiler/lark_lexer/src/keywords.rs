//! Reserved word classification.
//!
//! The lookup is a static trie flattened into nested matches: dispatch on
//! the first byte, then compare the remaining tail exactly. Classification
//! is O(length) with zero allocation, and a span is a keyword iff its length
//! and exact byte content equal a candidate -- prefix-sharing identifiers
//! (`forge` vs. `for`) always fall through to `Ident`.

use crate::TokenKind;

/// Look up a reserved word by its exact text.
///
/// Returns the corresponding `TokenKind` if the text is one of Lark's 31
/// reserved words, `None` for a regular identifier.
///
/// Uses length-bucketing for fast rejection: spans whose length falls
/// outside the 2-8 range can't be keywords and are rejected without any
/// comparison.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let bytes = text.as_bytes();

    // Guard: all keywords are 2-8 bytes long
    if !(2..=8).contains(&bytes.len()) {
        return None;
    }

    // First-byte dispatch; each arm compares the tail exactly.
    match bytes[0] {
        b'b' => match &text[1..] {
            "ool" => Some(TokenKind::BoolType),
            "reak" => Some(TokenKind::Break),
            _ => None,
        },
        b'c' => match &text[1..] {
            "har" => Some(TokenKind::CharType),
            "onst" => Some(TokenKind::Const),
            "ontinue" => Some(TokenKind::Continue),
            _ => None,
        },
        b'd' => (&text[1..] == "o").then_some(TokenKind::Do),
        b'e' => (&text[1..] == "lse").then_some(TokenKind::Else),
        b'f' => match &text[1..] {
            "alse" => Some(TokenKind::False),
            "n" => Some(TokenKind::Fn),
            "or" => Some(TokenKind::For),
            "32" => Some(TokenKind::F32),
            "64" => Some(TokenKind::F64),
            _ => None,
        },
        b'i' => match &text[1..] {
            "f" => Some(TokenKind::If),
            "n" => Some(TokenKind::In),
            "8" => Some(TokenKind::I8),
            "16" => Some(TokenKind::I16),
            "32" => Some(TokenKind::I32),
            "64" => Some(TokenKind::I64),
            _ => None,
        },
        b'l' => (&text[1..] == "oop").then_some(TokenKind::Loop),
        b'm' => match &text[1..] {
            "atch" => Some(TokenKind::Match),
            "ut" => Some(TokenKind::Mut),
            _ => None,
        },
        b'n' => (&text[1..] == "ull").then_some(TokenKind::Null),
        b'r' => (&text[1..] == "eturn").then_some(TokenKind::Return),
        b's' => (&text[1..] == "tring").then_some(TokenKind::StrType),
        b't' => (&text[1..] == "rue").then_some(TokenKind::True),
        b'u' => match &text[1..] {
            "8" => Some(TokenKind::U8),
            "16" => Some(TokenKind::U16),
            "32" => Some(TokenKind::U32),
            "64" => Some(TokenKind::U64),
            _ => None,
        },
        b'v' => (&text[1..] == "oid").then_some(TokenKind::Void),
        b'w' => (&text[1..] == "hile").then_some(TokenKind::While),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Every keyword resolves ===

    #[test]
    fn control_flow_keywords() {
        assert_eq!(lookup("if"), Some(TokenKind::If));
        assert_eq!(lookup("else"), Some(TokenKind::Else));
        assert_eq!(lookup("for"), Some(TokenKind::For));
        assert_eq!(lookup("in"), Some(TokenKind::In));
        assert_eq!(lookup("do"), Some(TokenKind::Do));
        assert_eq!(lookup("while"), Some(TokenKind::While));
        assert_eq!(lookup("loop"), Some(TokenKind::Loop));
        assert_eq!(lookup("match"), Some(TokenKind::Match));
        assert_eq!(lookup("break"), Some(TokenKind::Break));
        assert_eq!(lookup("continue"), Some(TokenKind::Continue));
        assert_eq!(lookup("return"), Some(TokenKind::Return));
    }

    #[test]
    fn declaration_keywords() {
        assert_eq!(lookup("fn"), Some(TokenKind::Fn));
        assert_eq!(lookup("const"), Some(TokenKind::Const));
        assert_eq!(lookup("mut"), Some(TokenKind::Mut));
    }

    #[test]
    fn value_keywords() {
        assert_eq!(lookup("true"), Some(TokenKind::True));
        assert_eq!(lookup("false"), Some(TokenKind::False));
        assert_eq!(lookup("null"), Some(TokenKind::Null));
    }

    #[test]
    fn type_keywords() {
        assert_eq!(lookup("bool"), Some(TokenKind::BoolType));
        assert_eq!(lookup("char"), Some(TokenKind::CharType));
        assert_eq!(lookup("string"), Some(TokenKind::StrType));
        assert_eq!(lookup("void"), Some(TokenKind::Void));
        assert_eq!(lookup("f32"), Some(TokenKind::F32));
        assert_eq!(lookup("f64"), Some(TokenKind::F64));
        assert_eq!(lookup("i8"), Some(TokenKind::I8));
        assert_eq!(lookup("i16"), Some(TokenKind::I16));
        assert_eq!(lookup("i32"), Some(TokenKind::I32));
        assert_eq!(lookup("i64"), Some(TokenKind::I64));
        assert_eq!(lookup("u8"), Some(TokenKind::U8));
        assert_eq!(lookup("u16"), Some(TokenKind::U16));
        assert_eq!(lookup("u32"), Some(TokenKind::U32));
        assert_eq!(lookup("u64"), Some(TokenKind::U64));
    }

    // === Prefix-sharing near misses stay identifiers ===

    #[test]
    fn keyword_prefixes_are_identifiers() {
        assert_eq!(lookup("f"), None);
        assert_eq!(lookup("fo"), None);
        assert_eq!(lookup("whil"), None);
        assert_eq!(lookup("nul"), None);
        assert_eq!(lookup("strin"), None);
        assert_eq!(lookup("cont"), None);
        assert_eq!(lookup("bo"), None);
        assert_eq!(lookup("boo"), None);
    }

    #[test]
    fn keyword_extensions_are_identifiers() {
        assert_eq!(lookup("forge"), None);
        assert_eq!(lookup("fort"), None);
        assert_eq!(lookup("ifs"), None);
        assert_eq!(lookup("bools"), None);
        assert_eq!(lookup("nulls"), None);
        assert_eq!(lookup("matches"), None);
        assert_eq!(lookup("strings"), None);
        assert_eq!(lookup("continues"), None);
        assert_eq!(lookup("i128"), None);
        assert_eq!(lookup("u128"), None);
        assert_eq!(lookup("f3"), None);
        assert_eq!(lookup("f320"), None);
    }

    // === Edge cases ===

    #[test]
    fn case_sensitivity() {
        assert_eq!(lookup("If"), None);
        assert_eq!(lookup("IF"), None);
        assert_eq!(lookup("True"), None);
        assert_eq!(lookup("NULL"), None);
        assert_eq!(lookup("While"), None);
    }

    #[test]
    fn length_boundary_rejection() {
        // Shorter than any keyword (1) or longer than the longest (8)
        assert_eq!(lookup("i"), None);
        assert_eq!(lookup("b"), None);
        assert_eq!(lookup("continued"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn underscore_and_digit_starts_are_identifiers() {
        assert_eq!(lookup("_if"), None);
        assert_eq!(lookup("_for"), None);
        assert_eq!(lookup("__"), None);
    }
}
