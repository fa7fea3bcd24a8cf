//! Lark scanner CLI.
//!
//! Thin driver over `lark_lexer`: reads a source file into a sentinel
//! buffer and dumps the token stream, one token per line, with a
//! right-aligned line-number gutter that collapses repeated lines.

use lark_lexer::{Scanner, SourceBuffer, TokenKind};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Lark scanner {}", env!("CARGO_PKG_VERSION"));
        }
        path => {
            if args.len() > 2 {
                eprintln!("error: too many arguments");
                eprintln!("Usage: lark <file.lk>");
                std::process::exit(1);
            }
            lex_file(path);
        }
    }
}

/// Tokenize a file and display the token stream.
///
/// Exits with code 65 (data error) when the source contained lexical
/// errors; the whole stream is still printed first, one error token per
/// offending position.
fn lex_file(path: &str) {
    let content = read_file(path);
    let buf = SourceBuffer::new(&content);
    let mut scanner = Scanner::new(&buf);

    let mut had_error = false;
    let mut line = 0;
    loop {
        let token = scanner.scan_token();

        if token.line != line {
            print!("{:>4} ", token.line);
            line = token.line;
        } else {
            print!("   | ");
        }

        if token.is_error() {
            had_error = true;
            println!("Error: {}", token.lexeme);
        } else {
            println!("{:?} '{}'", token.kind, token.lexeme);
        }

        if token.kind == TokenKind::Eof {
            break;
        }
    }

    if had_error {
        std::process::exit(65);
    }
}

/// Read a file from disk, exiting with a user-friendly error message on failure.
fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Lark scanner");
    println!();
    println!("Usage: lark <command>");
    println!();
    println!("Commands:");
    println!("  <file.lk>            Tokenize a file and display the token stream");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
}
