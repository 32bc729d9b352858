//! # Introduction
//!
//! rbflow checks one line at a time against a small, Ruby-flavoured
//! control-flow language: `if/else/else if`, `while`, `begin ... end while`,
//! `for ... in`, `loop do`, and function calls. A line is either accepted or
//! rejected with the position of the first token no derivation can consume.
//! Nothing is evaluated.
//!
//! ## Pipeline
//!
//! ```text
//! Line → Lexer → Tokens (+ LexErrors) → Recognizer → Accept | SyntaxError
//! ```
//!
//! 1. [`parser`] — the lexer, the token model and the recognizer.
//! 2. [`report`] — [`report::Report`] bundles the result of checking one line.
//! 3. [`ui`] — ratatui-based read loop; not part of the stable library API.
//!
//! Every call builds fresh lexer and parser instances, so checking a line never
//! depends on the lines checked before it.

pub mod constants;
pub mod parser;
pub mod report;
pub mod ui;

use parser::lexer::{Lexed, Lexer};
use parser::parse::{Parser, SyntaxError};
use parser::token::Token;

pub use report::{Diagnostic, Report};

/// Tokenize one line. Unrecognized characters are collected in
/// [`Lexed::errors`] rather than stopping the lexer.
pub fn tokenize(source: &str) -> Lexed {
    Lexer::new(source).tokenize()
}

/// Lex and recognize one line.
///
/// `Ok` only when the line is accepted and every character lexed. Otherwise
/// every lex error comes back, followed by the syntax error if there is one.
pub fn parse(source: &str) -> Result<(), Vec<Diagnostic>> {
    let report = Report::check(source);
    if report.is_clean() {
        Ok(())
    } else {
        Err(report.diagnostics())
    }
}

/// Recognize an already lexed token sequence.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<(), SyntaxError> {
    Parser::from_tokens(tokens).parse()
}

/// Lex and recognize one line, keeping every diagnostic.
pub fn check(source: &str) -> Report {
    Report::check(source)
}
