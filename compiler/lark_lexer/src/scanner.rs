//! Hand-written pull scanner producing classified [`Token`]s.
//!
//! The scanner operates on a sentinel-terminated [`Cursor`] and produces one
//! token per call with zero heap allocation: lexemes are borrowed slices of
//! the source buffer, keywords are resolved through the static dispatch in
//! [`keywords`], and lexical errors are ordinary tokens rather than
//! `Result::Err` -- scanning always continues from a well-defined cursor
//! position, and the driver decides when to stop.
//!
//! # Design
//!
//! `scan_token` skips trivia, marks the token start, then dispatches on a
//! single consumed byte. Each arm calls a focused method that advances the
//! cursor and returns a finished token. The sentinel byte (`0x00`) at or
//! past the source length dispatches to `Eof`, which is idempotent.

use crate::cursor::Cursor;
use crate::keywords;
use crate::source_buffer::SourceBuffer;
use crate::token::{Token, TokenKind};

/// Fixed diagnostic messages carried by error tokens.
///
/// An error token's `lexeme` field is one of these `&'static` strings,
/// never a view of the source.
pub mod messages {
    pub const UNEXPECTED_CHARACTER: &str = "Unexpected character.";
    pub const UNTERMINATED_STRING: &str = "Unterminated string";
    pub const UNTERMINATED_STRING_AFTER_ESCAPE: &str = "Unterminated string after escape.";
    pub const INVALID_ESCAPE: &str = "Invalid escape sequence.";
    pub const EMPTY_CHAR_LITERAL: &str = "Empty character literal.";
    pub const INVALID_CHAR_ESCAPE: &str = "Invalid escape sequence in character literal.";
    pub const CHAR_NOT_SINGLE: &str = "Character literal must contain exactly one character.";
}

/// Pull-based scanner over a single source buffer.
///
/// One scanner per buffer; scanning mutates only the private cursor and
/// line fields, so independent sources lex with independent scanners.
/// Created via [`Scanner::new`]; there is no hidden reset -- a fresh scan
/// session is a fresh value.
pub struct Scanner<'src> {
    cursor: Cursor<'src>,
    /// Offset of the first byte of the token currently being built.
    token_start: u32,
    /// Current 1-based line, incremented on every consumed newline,
    /// including newlines inside multi-line string literals.
    line: u32,
}

impl<'src> Scanner<'src> {
    /// Create a scanner positioned at the start of `buf`.
    pub fn new(buf: &'src SourceBuffer) -> Self {
        Self {
            cursor: buf.cursor(),
            token_start: 0,
            line: 1,
        }
    }

    /// The line the next token will be reported on (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Scan and return the next token.
    ///
    /// Returns `Eof` once the source is exhausted; subsequent calls keep
    /// returning `Eof` at the same line. An error token never poisons the
    /// session -- the next call resumes at the position the failing
    /// sub-scanner stopped at.
    pub fn scan_token(&mut self) -> Token<'src> {
        self.skip_trivia();
        self.token_start = self.cursor.pos();

        if self.cursor.is_eof() {
            return self.make(TokenKind::Eof);
        }

        match self.cursor.advance() {
            // Single-character punctuation
            b'(' => self.make(TokenKind::LParen),
            b')' => self.make(TokenKind::RParen),
            b'{' => self.make(TokenKind::LBrace),
            b'}' => self.make(TokenKind::RBrace),
            b'[' => self.make(TokenKind::LBracket),
            b']' => self.make(TokenKind::RBracket),
            b',' => self.make(TokenKind::Comma),
            b':' => self.make(TokenKind::Colon),
            b';' => self.make(TokenKind::Semicolon),
            b'?' => self.make(TokenKind::Question),
            b'^' => self.make(TokenKind::Caret),
            b'~' => self.make(TokenKind::Tilde),

            // One- or two-character operators
            b'.' => self.operator(b'.', TokenKind::DotDot, TokenKind::Dot),
            b'+' => self.operator(b'=', TokenKind::PlusEq, TokenKind::Plus),
            b'*' => self.operator(b'=', TokenKind::StarEq, TokenKind::Star),
            b'/' => self.operator(b'=', TokenKind::SlashEq, TokenKind::Slash),
            b'%' => self.operator(b'=', TokenKind::PercentEq, TokenKind::Percent),
            b'=' => self.operator(b'=', TokenKind::EqEq, TokenKind::Eq),
            b'!' => self.operator(b'=', TokenKind::NotEq, TokenKind::Bang),
            b'&' => self.operator(b'&', TokenKind::AmpAmp, TokenKind::Amp),
            b'|' => self.operator(b'|', TokenKind::PipePipe, TokenKind::Pipe),
            b'-' => self.minus(),
            b'<' => self.less(),
            b'>' => self.greater(),

            // Literals
            b'\'' => self.char_literal(),
            b'"' => self.string(),
            b'0'..=b'9' => self.number(),

            // Identifiers and keywords
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(),

            _ => self.error(messages::UNEXPECTED_CHARACTER),
        }
    }

    // ─── Trivia ──────────────────────────────────────────────────────────

    /// Consume whitespace and `//` line comments.
    ///
    /// Spaces, tabs, and carriage returns are consumed without a line
    /// increment; newlines increment the line counter. A comment body runs
    /// up to, but not including, its terminating newline, so the newline is
    /// counted on the next loop iteration.
    fn skip_trivia(&mut self) {
        loop {
            self.cursor.eat_whitespace();
            match self.cursor.current() {
                b'\n' => {
                    self.line += 1;
                    self.cursor.advance();
                }
                b'/' if self.cursor.peek() == b'/' => {
                    self.cursor.eat_until_newline_or_eof();
                }
                _ => break,
            }
        }
    }

    // ─── Token construction ──────────────────────────────────────────────

    /// Token spanning from `token_start` to the current cursor position.
    fn make(&self, kind: TokenKind) -> Token<'src> {
        Token::new(kind, self.cursor.slice_from(self.token_start), self.line)
    }

    /// Error token carrying a fixed diagnostic message as its lexeme.
    fn error(&self, message: &'static str) -> Token<'src> {
        Token::new(TokenKind::Error, message, self.line)
    }

    // ─── Operators ───────────────────────────────────────────────────────

    /// Two-character operator: consume `expected` and emit `matched`, or
    /// fall back to the single-character `plain` kind.
    fn operator(&mut self, expected: u8, matched: TokenKind, plain: TokenKind) -> Token<'src> {
        if self.cursor.match_byte(expected) {
            self.make(matched)
        } else {
            self.make(plain)
        }
    }

    fn minus(&mut self) -> Token<'src> {
        if self.cursor.match_byte(b'>') {
            self.make(TokenKind::Arrow)
        } else if self.cursor.match_byte(b'=') {
            self.make(TokenKind::MinusEq)
        } else {
            self.make(TokenKind::Minus)
        }
    }

    fn less(&mut self) -> Token<'src> {
        // Doubling into a shift is checked before the `=`-suffixed form,
        // so `<<=` lexes as `<<` then `=`.
        if self.cursor.match_byte(b'<') {
            self.make(TokenKind::Shl)
        } else if self.cursor.match_byte(b'=') {
            self.make(TokenKind::LtEq)
        } else {
            self.make(TokenKind::Lt)
        }
    }

    fn greater(&mut self) -> Token<'src> {
        if self.cursor.match_byte(b'>') {
            self.make(TokenKind::Shr)
        } else if self.cursor.match_byte(b'=') {
            self.make(TokenKind::GtEq)
        } else {
            self.make(TokenKind::Gt)
        }
    }

    // ─── Numeric Literals ────────────────────────────────────────────────

    #[inline]
    fn number(&mut self) -> Token<'src> {
        self.cursor.eat_while(|b| b.is_ascii_digit());

        // Fractional part only when the dot is followed by a digit; a
        // trailing `.` is left for the next token, so `1.` is the integer
        // `1` followed by a dot.
        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance(); // consume '.'
            self.cursor.eat_while(|b| b.is_ascii_digit());
            return self.make(TokenKind::Float);
        }

        self.make(TokenKind::Int)
    }

    // ─── String & Char Literals ──────────────────────────────────────────

    fn string(&mut self) -> Token<'src> {
        loop {
            // SIMD-accelerated skip past ordinary string content
            match self.cursor.skip_to_string_delim() {
                b'"' => {
                    self.cursor.advance(); // consume closing '"'
                    return self.make(TokenKind::Str);
                }
                b'\n' => {
                    // Strings may span lines
                    self.line += 1;
                    self.cursor.advance();
                }
                b'\\' => {
                    self.cursor.advance(); // consume '\'
                    if self.cursor.is_eof() {
                        return self.error(messages::UNTERMINATED_STRING_AFTER_ESCAPE);
                    }
                    if is_recognized_escape(self.cursor.current()) {
                        self.cursor.advance();
                    } else {
                        // Cursor stays on the invalid escape character
                        return self.error(messages::INVALID_ESCAPE);
                    }
                }
                0 => return self.error(messages::UNTERMINATED_STRING),
                _ => unreachable!("skip_to_string_delim returned unexpected byte"),
            }
        }
    }

    fn char_literal(&mut self) -> Token<'src> {
        match self.cursor.current() {
            b'\'' => return self.error(messages::EMPTY_CHAR_LITERAL),
            b'\\' => {
                self.cursor.advance(); // consume '\'
                if is_recognized_escape(self.cursor.current()) {
                    self.cursor.advance();
                } else {
                    // Cursor stays on the offending character (the sentinel,
                    // if the source ends here)
                    return self.error(messages::INVALID_CHAR_ESCAPE);
                }
            }
            _ => {
                if self.cursor.is_eof() {
                    return self.error(messages::CHAR_NOT_SINGLE);
                }
                if self.cursor.current() == b'\n' {
                    self.line += 1;
                }
                // One logical character; may be a multi-byte UTF-8 scalar
                self.cursor.advance_char();
            }
        }

        // The closing quote must come immediately after the single
        // character. On failure the cursor stays put: no scanning ahead for
        // a later quote, which would silently swallow subsequent tokens.
        if self.cursor.current() != b'\'' {
            return self.error(messages::CHAR_NOT_SINGLE);
        }
        self.cursor.advance();
        self.make(TokenKind::Char)
    }

    // ─── Identifiers & Keywords ──────────────────────────────────────────

    #[inline]
    fn identifier(&mut self) -> Token<'src> {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice_from(self.token_start);
        let kind = keywords::lookup(text).unwrap_or(TokenKind::Ident);
        Token::new(kind, text, self.line)
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        let tok = self.scan_token();
        if tok.kind == TokenKind::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

/// The fixed escape set recognized inside string and character literals.
#[inline]
fn is_recognized_escape(b: u8) -> bool {
    matches!(
        b,
        b'\'' | b'"' | b'\\' | b'n' | b't' | b'r' | b'0' | b'{' | b'}'
    )
}

/// 256-byte lookup table for identifier continuation bytes.
/// `true` for a-z, A-Z, 0-9, and underscore.
/// Table lookup replaces the multi-range `matches!` with a single indexed read.
/// The sentinel byte (0x00) maps to `false`, naturally terminating loops.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_IDENT_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_'
        );
        i += 1;
    }
    table
};

/// Returns `true` if `b` is a valid identifier continuation byte.
#[inline]
fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE_TABLE[b as usize]
}

/// Convenience function: scan a whole buffer and collect all tokens.
///
/// Returns every token up to but excluding the final `Eof`. For streaming
/// access, construct a [`Scanner`] directly.
pub fn tokenize(buf: &SourceBuffer) -> Vec<Token<'_>> {
    let mut scanner = Scanner::new(buf);
    let mut tokens = Vec::new();
    loop {
        let tok = scanner.scan_token();
        if tok.kind == TokenKind::Eof {
            break;
        }
        tokens.push(tok);
    }
    tokens
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: scan a source string and collect `(kind, lexeme)` pairs.
    fn scan(source: &str) -> Vec<(TokenKind, String)> {
        let buf = SourceBuffer::new(source);
        tokenize(&buf)
            .iter()
            .map(|t| (t.kind, t.lexeme.to_string()))
            .collect()
    }

    /// Helper: scan and return kinds only.
    fn scan_kinds(source: &str) -> Vec<TokenKind> {
        let buf = SourceBuffer::new(source);
        tokenize(&buf).iter().map(|t| t.kind).collect()
    }

    /// Helper: scan and return `(kind, line)` pairs.
    fn scan_lines(source: &str) -> Vec<(TokenKind, u32)> {
        let buf = SourceBuffer::new(source);
        tokenize(&buf).iter().map(|t| (t.kind, t.line)).collect()
    }

    // ─── Punctuation & Operators ─────────────────────────────────────────

    #[test]
    fn punctuation() {
        use TokenKind::*;
        assert_eq!(
            scan_kinds("( ) { } [ ] , : ; ? ."),
            vec![
                LParen, RParen, LBrace, RBrace, LBracket, RBracket, Comma, Colon, Semicolon,
                Question, Dot
            ]
        );
    }

    #[test]
    fn single_char_operators() {
        use TokenKind::*;
        assert_eq!(
            scan_kinds("+ - * / % = ! < > & | ^ ~"),
            vec![Plus, Minus, Star, Slash, Percent, Eq, Bang, Lt, Gt, Amp, Pipe, Caret, Tilde]
        );
    }

    #[test]
    fn two_char_operators() {
        use TokenKind::*;
        assert_eq!(
            scan_kinds("+= -= -> *= /= %= == != <= << >= >> && || .."),
            vec![
                PlusEq, MinusEq, Arrow, StarEq, SlashEq, PercentEq, EqEq, NotEq, LtEq, Shl, GtEq,
                Shr, AmpAmp, PipePipe, DotDot
            ]
        );
    }

    #[test]
    fn arrow_is_one_token() {
        assert_eq!(scan_kinds("->"), vec![TokenKind::Arrow]);
    }

    #[test]
    fn arrow_beats_minus_equal() {
        // `-` tries `>` before `=`
        assert_eq!(scan("->="), vec![
            (TokenKind::Arrow, "->".to_string()),
            (TokenKind::Eq, "=".to_string()),
        ]);
    }

    #[test]
    fn no_three_char_operators() {
        use TokenKind::*;
        // Shift doubling wins over `=`-suffix, and there is no `<<=` token
        assert_eq!(scan_kinds("<<="), vec![Shl, Eq]);
        assert_eq!(scan_kinds(">>="), vec![Shr, Eq]);
    }

    #[test]
    fn adjacent_dots() {
        use TokenKind::*;
        assert_eq!(scan_kinds("..."), vec![DotDot, Dot]);
        assert_eq!(scan_kinds("...."), vec![DotDot, DotDot]);
    }

    // ─── Numbers ─────────────────────────────────────────────────────────

    #[test]
    fn integer_literal() {
        assert_eq!(scan("12"), vec![(TokenKind::Int, "12".to_string())]);
        assert_eq!(scan("0"), vec![(TokenKind::Int, "0".to_string())]);
    }

    #[test]
    fn float_literal() {
        assert_eq!(scan("12.5"), vec![(TokenKind::Float, "12.5".to_string())]);
        assert_eq!(scan("0.0"), vec![(TokenKind::Float, "0.0".to_string())]);
    }

    #[test]
    fn trailing_dot_is_not_consumed() {
        // `12.` is the integer 12 followed by a dot token
        assert_eq!(scan("12."), vec![
            (TokenKind::Int, "12".to_string()),
            (TokenKind::Dot, ".".to_string()),
        ]);
    }

    #[test]
    fn leading_dot_does_not_start_a_number() {
        assert_eq!(scan(".5"), vec![
            (TokenKind::Dot, ".".to_string()),
            (TokenKind::Int, "5".to_string()),
        ]);
    }

    #[test]
    fn integer_before_range() {
        use TokenKind::*;
        // `1..` must not eat the first dot of the range operator
        assert_eq!(scan_kinds("1..10"), vec![Int, DotDot, Int]);
    }

    #[test]
    fn float_then_member_access() {
        use TokenKind::*;
        assert_eq!(scan_kinds("1.2.3"), vec![Float, Dot, Int]);
    }

    // ─── Strings ─────────────────────────────────────────────────────────

    #[test]
    fn string_literal_includes_quotes() {
        assert_eq!(scan("\"hello\""), vec![(
            TokenKind::Str,
            "\"hello\"".to_string()
        )]);
    }

    #[test]
    fn empty_string_literal() {
        assert_eq!(scan("\"\""), vec![(TokenKind::Str, "\"\"".to_string())]);
    }

    #[test]
    fn string_with_recognized_escapes() {
        let source = r#""a\n\t\r\0\\\"\'\{\}b""#;
        assert_eq!(scan(source), vec![(TokenKind::Str, source.to_string())]);
    }

    #[test]
    fn multiline_string_spans_and_counts_lines() {
        // One string token spanning 6 source bytes; the token after it is
        // on the next line
        let buf = SourceBuffer::new("\"abc\n\"1");
        let tokens = tokenize(&buf);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].lexeme.len(), 6);
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].kind, TokenKind::Int);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(scan("\"abc"), vec![(
            TokenKind::Error,
            messages::UNTERMINATED_STRING.to_string()
        )]);
    }

    #[test]
    fn unterminated_string_after_trailing_backslash() {
        assert_eq!(scan("\"abc\\"), vec![(
            TokenKind::Error,
            messages::UNTERMINATED_STRING_AFTER_ESCAPE.to_string()
        )]);
    }

    #[test]
    fn invalid_string_escape() {
        let tokens = scan("\"\\q\"");
        assert_eq!(tokens[0], (
            TokenKind::Error,
            messages::INVALID_ESCAPE.to_string()
        ));
    }

    #[test]
    fn scan_resumes_after_invalid_escape() {
        use TokenKind::*;
        // The cursor stops on the invalid escape character `q`, so the
        // session continues with `q` as an identifier and the orphaned
        // closing quote opens a string that never terminates
        assert_eq!(scan_kinds("\"\\q\""), vec![Error, Ident, Error]);
    }

    #[test]
    fn carriage_return_is_ordinary_string_content() {
        let source = "\"a\rb\"";
        assert_eq!(scan(source), vec![(TokenKind::Str, source.to_string())]);
    }

    // ─── Character Literals ──────────────────────────────────────────────

    #[test]
    fn char_literal() {
        assert_eq!(scan("'a'"), vec![(TokenKind::Char, "'a'".to_string())]);
    }

    #[test]
    fn char_literal_with_escape() {
        for source in ["'\\n'", "'\\t'", "'\\r'", "'\\0'", "'\\\\'", "'\\''", "'\\\"'", "'\\{'", "'\\}'"] {
            assert_eq!(scan(source), vec![(TokenKind::Char, source.to_string())], "for {source:?}");
        }
    }

    #[test]
    fn char_literal_multibyte_scalar() {
        // One logical character, two UTF-8 bytes
        assert_eq!(scan("'\u{3BB}'"), vec![(
            TokenKind::Char,
            "'\u{3BB}'".to_string()
        )]);
    }

    #[test]
    fn empty_char_literal() {
        let tokens = scan("''");
        assert_eq!(tokens[0], (
            TokenKind::Error,
            messages::EMPTY_CHAR_LITERAL.to_string()
        ));
        // The closing quote is not consumed on failure; it opens a second,
        // unclosed literal that errors in turn
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn invalid_char_escape() {
        let tokens = scan("'\\q'");
        assert_eq!(tokens[0], (
            TokenKind::Error,
            messages::INVALID_CHAR_ESCAPE.to_string()
        ));
    }

    #[test]
    fn multi_char_literal_is_an_error() {
        let tokens = scan("'ab'");
        assert_eq!(tokens[0], (
            TokenKind::Error,
            messages::CHAR_NOT_SINGLE.to_string()
        ));
    }

    #[test]
    fn char_error_does_not_hunt_for_closing_quote() {
        use TokenKind::*;
        // After the error the cursor is still on `b`: it lexes as an
        // identifier, and the trailing quote starts a char literal that
        // hits end-of-input
        assert_eq!(scan_kinds("'ab'"), vec![Error, Ident, Error]);
    }

    #[test]
    fn unclosed_char_literal_at_eof() {
        assert_eq!(scan("'a"), vec![(
            TokenKind::Error,
            messages::CHAR_NOT_SINGLE.to_string()
        )]);
    }

    #[test]
    fn backslash_at_eof_in_char_literal() {
        // The sentinel is not a recognized escape
        assert_eq!(scan("'\\"), vec![(
            TokenKind::Error,
            messages::INVALID_CHAR_ESCAPE.to_string()
        )]);
    }

    // ─── Identifiers & Keywords ──────────────────────────────────────────

    #[test]
    fn identifiers() {
        assert_eq!(scan("foo _bar baz123 a_b_c _"), vec![
            (TokenKind::Ident, "foo".to_string()),
            (TokenKind::Ident, "_bar".to_string()),
            (TokenKind::Ident, "baz123".to_string()),
            (TokenKind::Ident, "a_b_c".to_string()),
            (TokenKind::Ident, "_".to_string()),
        ]);
    }

    #[test]
    fn every_keyword_classifies() {
        use TokenKind::*;
        let source = "bool break char const continue do else false fn for f32 f64 \
                      if in i8 i16 i32 i64 loop match mut null return string true \
                      u8 u16 u32 u64 void while";
        assert_eq!(scan_kinds(source), vec![
            BoolType, Break, CharType, Const, Continue, Do, Else, False, Fn, For, F32, F64, If,
            In, I8, I16, I32, I64, Loop, Match, Mut, Null, Return, StrType, True, U8, U16, U32,
            U64, Void, While,
        ]);
    }

    #[test]
    fn keyword_prefix_sharing_identifiers() {
        use TokenKind::*;
        // `for` is a keyword; `forge`, `fort`, and `f` are not
        assert_eq!(
            scan_kinds("for forge fort f"),
            vec![For, Ident, Ident, Ident]
        );
    }

    #[test]
    fn keyword_followed_by_ident_continue_is_identifier() {
        use TokenKind::*;
        assert_eq!(
            scan_kinds("if1 if_ ifx if"),
            vec![Ident, Ident, Ident, If]
        );
    }

    #[test]
    fn digits_never_start_an_identifier() {
        use TokenKind::*;
        // `1abc` is the integer 1 followed by the identifier abc
        assert_eq!(scan_kinds("1abc"), vec![Int, Ident]);
    }

    // ─── Trivia & Comments ───────────────────────────────────────────────

    #[test]
    fn comment_elided_and_line_counted() {
        let buf = SourceBuffer::new("// x\n1");
        let tokens = tokenize(&buf);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[0].lexeme, "1");
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn comment_at_eof_without_newline() {
        assert_eq!(scan_kinds("1 // trailing"), vec![TokenKind::Int]);
    }

    #[test]
    fn comment_only_source_is_empty() {
        assert_eq!(scan_kinds("// nothing here"), vec![]);
    }

    #[test]
    fn slash_not_followed_by_slash_is_an_operator() {
        use TokenKind::*;
        assert_eq!(scan_kinds("a / b"), vec![Ident, Slash, Ident]);
    }

    #[test]
    fn whitespace_and_cr_do_not_bump_lines() {
        let tokens = scan_lines("a \t\r b");
        assert_eq!(tokens, vec![(TokenKind::Ident, 1), (TokenKind::Ident, 1)]);
    }

    #[test]
    fn crlf_counts_one_line() {
        let tokens = scan_lines("a\r\nb");
        assert_eq!(tokens, vec![(TokenKind::Ident, 1), (TokenKind::Ident, 2)]);
    }

    #[test]
    fn lines_are_non_decreasing() {
        let source = "fn main() {\n  x += 1\n  // bump\n  \"s\n\"\n}\n";
        let buf = SourceBuffer::new(source);
        let tokens = tokenize(&buf);
        for pair in tokens.windows(2) {
            assert!(pair[0].line <= pair[1].line, "{pair:?}");
        }
    }

    // ─── End of Input ────────────────────────────────────────────────────

    #[test]
    fn eof_on_empty_source() {
        let buf = SourceBuffer::new("");
        let mut scanner = Scanner::new(&buf);
        let tok = scanner.scan_token();
        assert_eq!(tok.kind, TokenKind::Eof);
        assert_eq!(tok.lexeme, "");
        assert_eq!(tok.line, 1);
    }

    #[test]
    fn eof_is_idempotent_at_fixed_line() {
        let buf = SourceBuffer::new("x\ny\n");
        let mut scanner = Scanner::new(&buf);
        scanner.scan_token(); // x
        scanner.scan_token(); // y
        for _ in 0..5 {
            let tok = scanner.scan_token();
            assert_eq!(tok.kind, TokenKind::Eof);
            assert_eq!(tok.line, 3);
        }
        assert_eq!(scanner.line(), 3);
    }

    // ─── Errors & Recovery ───────────────────────────────────────────────

    #[test]
    fn unexpected_character() {
        assert_eq!(scan("@"), vec![(
            TokenKind::Error,
            messages::UNEXPECTED_CHARACTER.to_string()
        )]);
    }

    #[test]
    fn session_survives_unexpected_characters() {
        use TokenKind::*;
        // Each stray byte is one local error; scanning continues
        assert_eq!(scan_kinds("a @ b # c"), vec![Ident, Error, Ident, Error, Ident]);
    }

    #[test]
    fn non_ascii_bytes_are_unexpected() {
        use TokenKind::*;
        // 'é' is two bytes; each is rejected individually
        assert_eq!(scan_kinds("\u{E9}"), vec![Error, Error]);
    }

    #[test]
    fn error_token_line_is_current_line() {
        let buf = SourceBuffer::new("\n\n@");
        let tokens = tokenize(&buf);
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].line, 3);
    }

    // ─── Whole-Stream Properties ─────────────────────────────────────────

    #[test]
    fn lexemes_tile_the_source_between_trivia() {
        let source = "fn main() { return 1.5 + _x1 }";
        let buf = SourceBuffer::new(source);
        let base = buf.as_bytes().as_ptr() as usize;
        let mut pos = 0usize;
        for tok in tokenize(&buf) {
            let start = tok.lexeme.as_ptr() as usize - base;
            assert!(start >= pos, "token overlaps predecessor: {tok:?}");
            // Everything between two lexemes must be trivia
            assert!(
                buf.as_bytes()[pos..start]
                    .iter()
                    .all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n')),
                "non-trivia gap before {tok:?}"
            );
            pos = start + tok.lexeme.len();
        }
        assert_eq!(pos, source.len());
    }

    #[test]
    fn iterator_stops_at_eof() {
        let buf = SourceBuffer::new("a b c");
        let scanner = Scanner::new(&buf);
        assert_eq!(scanner.count(), 3);
    }

    // ─── Property Tests ──────────────────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Source fragments that each lex cleanly and never merge across a
        /// space boundary.
        fn fragment() -> impl Strategy<Value = &'static str> {
            prop_oneof![
                Just("fn"),
                Just("while"),
                Just("forge"),
                Just("_x1"),
                Just("ident"),
                Just("0"),
                Just("42"),
                Just("3.25"),
                Just("12."),
                Just("\"str\\n\""),
                Just("'c'"),
                Just("'\\0'"),
                Just("->"),
                Just("<<="),
                Just(".."),
                Just("&&"),
                Just("("),
                Just("}"),
                Just(";"),
            ]
        }

        fn separator() -> impl Strategy<Value = &'static str> {
            prop_oneof![Just(" "), Just("\t"), Just("\n"), Just(" \r\n "), Just("  \n\n")]
        }

        proptest! {
            #[test]
            fn lexemes_concat_to_source_without_trivia(
                frags in proptest::collection::vec(fragment(), 0..64),
                seps in proptest::collection::vec(separator(), 0..64),
            ) {
                let mut source = String::new();
                for (i, frag) in frags.iter().enumerate() {
                    source.push_str(frag);
                    source.push_str(seps.get(i).copied().unwrap_or(" "));
                }

                let buf = SourceBuffer::new(&source);
                let collected: String = tokenize(&buf).iter().map(|t| t.lexeme).collect();
                let expected: String = frags.concat();
                prop_assert_eq!(collected, expected);
            }

            #[test]
            fn final_line_counts_every_newline(
                frags in proptest::collection::vec(fragment(), 0..64),
                seps in proptest::collection::vec(separator(), 0..64),
            ) {
                let mut source = String::new();
                for (i, frag) in frags.iter().enumerate() {
                    source.push_str(frag);
                    source.push_str(seps.get(i).copied().unwrap_or(" "));
                }

                let buf = SourceBuffer::new(&source);
                let mut scanner = Scanner::new(&buf);
                let mut prev_line = 1;
                loop {
                    let tok = scanner.scan_token();
                    prop_assert!(tok.line >= prev_line, "line went backwards");
                    prev_line = tok.line;
                    if tok.kind == TokenKind::Eof {
                        break;
                    }
                }

                let newlines = u32::try_from(source.bytes().filter(|&b| b == b'\n').count())
                    .expect("test source fits in u32");
                prop_assert_eq!(prev_line, 1 + newlines);
            }
        }
    }
}
