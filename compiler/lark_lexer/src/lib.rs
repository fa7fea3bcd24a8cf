//! Scanner for the Lark language.
//!
//! Converts raw source text into a linear sequence of classified tokens,
//! pulled one at a time by the parser. The pipeline is deliberately small:
//!
//! 1. [`SourceBuffer`] copies the source into a sentinel-terminated,
//!    cache-line-padded buffer -- the scan session's only allocation.
//! 2. [`Cursor`] walks that buffer with sentinel-guarded lookahead and
//!    SIMD-accelerated skips for comment bodies and string content.
//! 3. [`Scanner`] produces [`Token`]s on demand: trivia elision, line
//!    tracking, literal sub-scanners with escape validation, and keyword
//!    classification via static first-byte dispatch.
//!
//! Lexical errors are tokens, not failures: an error token carries a fixed
//! diagnostic message as its lexeme and scanning resumes at the next call,
//! so a driver can collect every diagnostic in one pass.
//!
//! ```
//! use lark_lexer::{Scanner, SourceBuffer, TokenKind};
//!
//! let buf = SourceBuffer::new("fn add(a: i32) -> i32 { a + 1 }");
//! let mut scanner = Scanner::new(&buf);
//! let tok = scanner.scan_token();
//! assert_eq!(tok.kind, TokenKind::Fn);
//! assert_eq!(tok.lexeme, "fn");
//! ```

mod cursor;
mod keywords;
mod scanner;
mod source_buffer;
mod token;

pub use cursor::Cursor;
pub use scanner::{messages, tokenize, Scanner};
pub use source_buffer::SourceBuffer;
pub use token::{Token, TokenKind};
