//! Zero-cost cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte-by-byte. End-of-input is
//! detected when the current byte equals the sentinel (`0x00`) and the
//! position has reached or exceeded the source length. No explicit bounds
//! checking is performed in the common case -- the sentinel guarantees safe
//! termination.
//!
//! # Interior Null Bytes
//!
//! If the source contains interior null bytes (U+0000), the cursor
//! distinguishes them from end-of-input by comparing `pos` against
//! `source_len`. A null at `pos < source_len` is an interior null (the
//! scanner reports it as an unexpected character); a null at
//! `pos >= source_len` is the sentinel.

/// Zero-cost cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], enabling cheap state snapshots for backtracking.
///
/// # Invariant
///
/// `buf` must be sentinel-terminated: `buf[source_len] == 0x00`, and all
/// bytes after `source_len` are `0x00` (cache-line padding). This is
/// guaranteed by [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

/// Size assertion: Cursor should be <= 24 bytes on 64-bit platforms.
/// &[u8] = 16 (fat pointer), u32 = 4, u32 = 4 => 24 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    ///
    /// # Contract
    ///
    /// `buf[source_len]` must be `0x00` (sentinel). All bytes after the
    /// sentinel must also be `0x00` (padding). This is guaranteed by
    /// `SourceBuffer::new()`.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the current position.
    ///
    /// Returns `0x00` when at end-of-input (the sentinel byte). Interior
    /// null bytes also return `0x00`; use [`is_eof()`](Self::is_eof) to
    /// distinguish.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe to call at any position: the sentinel and cache-line padding
    /// guarantee valid reads beyond the source content.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Returns the byte two positions ahead of current.
    ///
    /// Safe to call at any position: cache-line alignment provides at least
    /// one full cache line of zero padding after the sentinel.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.buf[self.pos as usize + 2]
    }

    /// Consume and return the byte at the current position.
    ///
    /// Returns the sentinel (`0x00`) without moving when already at
    /// end-of-input, so callers can never walk past the buffer.
    #[inline]
    pub fn advance(&mut self) -> u8 {
        let b = self.current();
        if !(b == 0 && self.pos >= self.source_len) {
            self.pos += 1;
        }
        b
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Conditionally consume the next byte iff it equals `expected`.
    ///
    /// Returns `true` when the byte matched (and was consumed). Used to
    /// build two-character operators without backtracking.
    #[inline]
    pub fn match_byte(&mut self, expected: u8) -> bool {
        if self.is_eof() || self.current() != expected {
            return false;
        }
        self.pos += 1;
        true
    }

    /// Returns `true` if the cursor has reached end-of-input.
    ///
    /// End-of-input is when the current byte is the sentinel (`0x00`) and
    /// the position is at or past the source length. This distinguishes
    /// end-of-input from interior null bytes.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Extract a source substring as `&str`.
    ///
    /// # Contract
    ///
    /// `start..end` must fall within the source content (`end <= source_len`)
    /// and on valid UTF-8 character boundaries. This is guaranteed when
    /// `start` and `end` come from the scanner's token boundary tracking,
    /// since the source was originally valid UTF-8 (`&str`).
    #[allow(
        unsafe_code,
        reason = "from_utf8_unchecked on source originally validated as &str"
    )]
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(
            end <= self.source_len,
            "slice end {end} exceeds source length {}",
            self.source_len
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        // SAFETY: The source buffer was constructed from `&str` (valid UTF-8).
        // The scanner ensures start..end falls on character boundaries within
        // the source content.
        unsafe { std::str::from_utf8_unchecked(&self.buf[start as usize..end as usize]) }
    }

    /// Extract a source substring from `start` to the current position.
    ///
    /// Equivalent to `self.slice(start, self.pos())`.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// The sentinel byte (`0x00`) naturally terminates the loop for all
    /// reasonable predicates, as `pred(0)` should return `false`.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false`. This is true for all standard byte
    /// classification predicates (`is_ascii_alphanumeric`, `is_ascii_whitespace`,
    /// etc.). If `pred(0)` returns `true`, the cursor advances into the
    /// zero-filled padding region but will eventually stop (all padding is `0x00`,
    /// and Rust's bounds checking prevents out-of-bounds access).
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// Uses the leading byte to determine character width:
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance the cursor past one full UTF-8 character.
    ///
    /// Uses the current byte as the leading byte to determine how many
    /// bytes to skip. Handles ASCII (1 byte) through 4-byte sequences.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
    }

    /// Advance to the next `\n` byte or end-of-input using SIMD-accelerated
    /// search.
    ///
    /// Used to skip line-comment bodies. Scans only within source content
    /// (not into sentinel/padding). The newline itself is not consumed; if
    /// none is found, the cursor is positioned at the sentinel.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr(b'\n', remaining) {
            self.pos += offset as u32;
        } else {
            self.pos = self.source_len;
        }
    }

    /// Advance past ordinary string content to the next interesting byte.
    /// Returns the byte found, or 0 for end-of-input.
    ///
    /// "Interesting" bytes for strings: `"` (close), `\` (escape), and
    /// `\n` (line counting -- strings may span lines). Uses memchr3 for
    /// SIMD-accelerated search.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(off) = memchr::memchr3(b'"', b'\\', b'\n', remaining) {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0
        }
    }

    /// Advance past horizontal trivia: spaces, tabs, and carriage returns.
    ///
    /// A simple byte loop -- source code has short runs between tokens
    /// (1-2 spaces) or indentation (4 spaces), where scalar beats anything
    /// fancier. The sentinel byte (`0x00`) naturally terminates scanning.
    /// Carriage returns count as horizontal trivia here: line counting is
    /// driven by `\n` alone, which this method never consumes.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        loop {
            let b = self.buf[self.pos as usize];
            if b == b' ' || b == b'\t' || b == b'\r' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::SourceBuffer;

    // === Basic Navigation ===

    #[test]
    fn current_returns_first_byte() {
        let buf = SourceBuffer::new("abc");
        let cursor = buf.cursor();
        assert_eq!(cursor.current(), b'a');
    }

    #[test]
    fn advance_returns_consumed_byte() {
        let buf = SourceBuffer::new("abc");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.advance(), b'a');
        assert_eq!(cursor.current(), b'b');
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn advance_n_moves_multiple() {
        let buf = SourceBuffer::new("abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(3);
        assert_eq!(cursor.current(), b'd');
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn advance_through_entire_source() {
        let buf = SourceBuffer::new("hi");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.advance(), b'h');
        assert_eq!(cursor.advance(), b'i');
        assert!(cursor.is_eof());
    }

    #[test]
    fn advance_at_eof_returns_sentinel_without_moving() {
        let buf = SourceBuffer::new("x");
        let mut cursor = buf.cursor();
        cursor.advance();
        assert!(cursor.is_eof());
        let pos = cursor.pos();
        assert_eq!(cursor.advance(), 0);
        assert_eq!(cursor.advance(), 0);
        assert_eq!(cursor.pos(), pos); // never walks past the sentinel
    }

    // === Peek ===

    #[test]
    fn peek_returns_next_byte() {
        let buf = SourceBuffer::new("abc");
        let cursor = buf.cursor();
        assert_eq!(cursor.peek(), b'b');
    }

    #[test]
    fn peek2_returns_two_ahead() {
        let buf = SourceBuffer::new("abc");
        let cursor = buf.cursor();
        assert_eq!(cursor.peek2(), b'c');
    }

    #[test]
    fn peek_near_end_returns_sentinel() {
        let buf = SourceBuffer::new("ab");
        let mut cursor = buf.cursor();
        cursor.advance(); // at 'b'
        assert_eq!(cursor.peek(), 0); // sentinel
    }

    #[test]
    fn peek2_near_end_returns_zero() {
        let buf = SourceBuffer::new("a");
        let cursor = buf.cursor();
        // current='a', peek=sentinel(0), peek2=padding(0)
        assert_eq!(cursor.peek2(), 0);
    }

    // === match_byte ===

    #[test]
    fn match_byte_consumes_on_match() {
        let buf = SourceBuffer::new("->");
        let mut cursor = buf.cursor();
        cursor.advance(); // consume '-'
        assert!(cursor.match_byte(b'>'));
        assert!(cursor.is_eof());
    }

    #[test]
    fn match_byte_leaves_cursor_on_mismatch() {
        let buf = SourceBuffer::new("-x");
        let mut cursor = buf.cursor();
        cursor.advance(); // consume '-'
        assert!(!cursor.match_byte(b'>'));
        assert_eq!(cursor.current(), b'x');
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn match_byte_at_eof_is_false() {
        let buf = SourceBuffer::new("");
        let mut cursor = buf.cursor();
        assert!(!cursor.match_byte(b'='));
        assert_eq!(cursor.pos(), 0);
    }

    // === EOF Detection ===

    #[test]
    fn is_eof_at_sentinel() {
        let buf = SourceBuffer::new("x");
        let mut cursor = buf.cursor();
        assert!(!cursor.is_eof());
        cursor.advance(); // past 'x', at sentinel
        assert!(cursor.is_eof());
    }

    #[test]
    fn is_eof_on_empty_source() {
        let buf = SourceBuffer::new("");
        let cursor = buf.cursor();
        assert!(cursor.is_eof());
    }

    #[test]
    fn interior_null_is_not_eof() {
        let buf = SourceBuffer::new("a\0b");
        let mut cursor = buf.cursor();
        cursor.advance(); // at '\0' (interior null)
        assert_eq!(cursor.current(), 0);
        assert!(!cursor.is_eof()); // pos=1 < source_len=3
        assert_eq!(cursor.advance(), 0); // interior null is consumable
        assert_eq!(cursor.current(), b'b');
    }

    // === Slice ===

    #[test]
    fn slice_extracts_substring() {
        let buf = SourceBuffer::new("hello world");
        let cursor = buf.cursor();
        assert_eq!(cursor.slice(0, 5), "hello");
        assert_eq!(cursor.slice(6, 11), "world");
    }

    #[test]
    fn slice_from_extracts_to_current() {
        let buf = SourceBuffer::new("abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(3); // pos = 3
        assert_eq!(cursor.slice_from(0), "abc");
        assert_eq!(cursor.slice_from(1), "bc");
    }

    #[test]
    fn slice_empty_range() {
        let buf = SourceBuffer::new("hello");
        let cursor = buf.cursor();
        assert_eq!(cursor.slice(2, 2), "");
    }

    #[test]
    fn slice_utf8_multibyte() {
        let source = "hi \u{1F600} bye"; // emoji is 4 bytes
        let buf = SourceBuffer::new(source);
        let cursor = buf.cursor();
        // "hi " = 3 bytes, emoji = 4 bytes, " bye" = 4 bytes
        assert_eq!(cursor.slice(0, 3), "hi ");
        assert_eq!(cursor.slice(7, 11), " bye");
    }

    // === eat_while ===

    #[test]
    fn eat_while_consumes_matching_bytes() {
        let buf = SourceBuffer::new("aaabbb");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'a');
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.current(), b'b');
    }

    #[test]
    fn eat_while_stops_at_sentinel() {
        let buf = SourceBuffer::new("aaa");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'a');
        assert_eq!(cursor.pos(), 3);
        assert!(cursor.is_eof());
    }

    #[test]
    fn eat_while_no_match() {
        let buf = SourceBuffer::new("hello");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'z');
        assert_eq!(cursor.pos(), 0); // didn't move
    }

    // === Copy Semantics ===

    #[test]
    fn cursor_is_copy_for_checkpointing() {
        let buf = SourceBuffer::new("abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(2);

        // Snapshot via Copy
        let saved = cursor;

        // Advance original
        cursor.advance_n(3);
        assert_eq!(cursor.pos(), 5);

        // Saved is still at old position
        assert_eq!(saved.pos(), 2);
        assert_eq!(saved.current(), b'c');
    }

    // === eat_until_newline_or_eof ===

    #[test]
    fn eat_until_newline_finds_lf() {
        let buf = SourceBuffer::new("hello\nworld");
        let mut cursor = buf.cursor();
        cursor.eat_until_newline_or_eof();
        assert_eq!(cursor.pos(), 5);
        assert_eq!(cursor.current(), b'\n');
    }

    #[test]
    fn eat_until_newline_stops_at_eof() {
        let buf = SourceBuffer::new("no newline here");
        let mut cursor = buf.cursor();
        cursor.eat_until_newline_or_eof();
        assert_eq!(cursor.pos(), 15);
        assert!(cursor.is_eof());
    }

    #[test]
    fn eat_until_newline_empty_source() {
        let buf = SourceBuffer::new("");
        let mut cursor = buf.cursor();
        cursor.eat_until_newline_or_eof();
        assert!(cursor.is_eof());
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn eat_until_newline_from_middle() {
        let buf = SourceBuffer::new("// comment\nnext");
        let mut cursor = buf.cursor();
        cursor.advance_n(3); // skip "// "
        cursor.eat_until_newline_or_eof();
        assert_eq!(cursor.pos(), 10);
        assert_eq!(cursor.current(), b'\n');
    }

    // === skip_to_string_delim ===

    #[test]
    fn skip_to_string_delim_finds_closing_quote() {
        let buf = SourceBuffer::new("hello\"rest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim();
        assert_eq!(b, b'"');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_string_delim_finds_backslash() {
        let buf = SourceBuffer::new("hello\\nrest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim();
        assert_eq!(b, b'\\');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_string_delim_finds_newline() {
        let buf = SourceBuffer::new("hello\nrest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim();
        assert_eq!(b, b'\n');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_string_delim_returns_earliest() {
        // backslash before quote
        let buf = SourceBuffer::new("abc\\\"rest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim();
        assert_eq!(b, b'\\');
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn skip_to_string_delim_eof() {
        let buf = SourceBuffer::new("hello");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim();
        assert_eq!(b, 0);
        assert!(cursor.is_eof());
    }

    #[test]
    fn skip_to_string_delim_at_first_position() {
        let buf = SourceBuffer::new("\"hello");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim();
        assert_eq!(b, b'"');
        assert_eq!(cursor.pos(), 0);
    }

    // === eat_whitespace ===

    #[test]
    fn eat_whitespace_spaces_only() {
        let buf = SourceBuffer::new("    hello");
        let mut cursor = buf.cursor();
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 4);
        assert_eq!(cursor.current(), b'h');
    }

    #[test]
    fn eat_whitespace_tabs_only() {
        let buf = SourceBuffer::new("\t\t\thello");
        let mut cursor = buf.cursor();
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.current(), b'h');
    }

    #[test]
    fn eat_whitespace_mixed_with_cr() {
        let buf = SourceBuffer::new("  \t\r \tx");
        let mut cursor = buf.cursor();
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 6);
        assert_eq!(cursor.current(), b'x');
    }

    #[test]
    fn eat_whitespace_no_whitespace() {
        let buf = SourceBuffer::new("hello");
        let mut cursor = buf.cursor();
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 0); // didn't move
    }

    #[test]
    fn eat_whitespace_newline_stops() {
        // Newlines are NOT horizontal trivia -- should stop at \n
        let buf = SourceBuffer::new("   \nhello");
        let mut cursor = buf.cursor();
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.current(), b'\n');
    }

    #[test]
    fn eat_whitespace_sentinel_stops() {
        // Only whitespace then end-of-input -- sentinel (0x00) stops scanning
        let buf = SourceBuffer::new("     ");
        let mut cursor = buf.cursor();
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 5);
        assert!(cursor.is_eof());
    }
}
