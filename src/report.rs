//! Per-line check results
//!
//! [`Report::check`] runs the lexer and the recognizer over one line with
//! fresh instances and keeps everything a front end needs to show: the token
//! stream, the lex errors reported on the side, and the recognizer verdict.

use crate::constants::{ACCEPTED, REJECTED};
use crate::parser::lexer::{LexError, Lexer};
use crate::parser::parse::{Parser, SyntaxError};
use crate::parser::token::{SourceLocation, Token};
use std::fmt;

/// Either kind of problem found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Lex(LexError),
    Syntax(SyntaxError),
}

impl Diagnostic {
    pub fn location(&self) -> SourceLocation {
        match self {
            Diagnostic::Lex(err) => err.location,
            Diagnostic::Syntax(err) => err.location(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Lex(err) => fmt::Display::fmt(err, f),
            Diagnostic::Syntax(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Diagnostic {}

impl From<LexError> for Diagnostic {
    fn from(err: LexError) -> Self {
        Diagnostic::Lex(err)
    }
}

impl From<SyntaxError> for Diagnostic {
    fn from(err: SyntaxError) -> Self {
        Diagnostic::Syntax(err)
    }
}

/// Outcome of checking one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub source: String,
    pub tokens: Vec<Token>,
    pub lex_errors: Vec<LexError>,
    pub outcome: Result<(), SyntaxError>,
}

impl Report {
    /// Lex and recognize `source`.
    ///
    /// The recognizer runs over whatever tokens survived lexing, so a line
    /// with a stray character can still be accepted; the lex error is kept in
    /// [`Report::lex_errors`].
    pub fn check(source: &str) -> Self {
        let lexed = Lexer::new(source).tokenize();
        let (mut parser, lex_errors) = Parser::with_lexed(lexed);
        let outcome = parser.parse();

        Self {
            source: source.to_string(),
            tokens: parser.tokens().to_vec(),
            lex_errors,
            outcome,
        }
    }

    /// The recognizer accepted the token stream.
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Accepted and every character lexed.
    pub fn is_clean(&self) -> bool {
        self.is_accepted() && self.lex_errors.is_empty()
    }

    /// Lex errors first, then the syntax error if any.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<Diagnostic> =
            self.lex_errors.iter().cloned().map(Diagnostic::from).collect();

        if let Err(err) = &self.outcome {
            diagnostics.push(err.clone().into());
        }

        diagnostics
    }

    pub fn verdict(&self) -> &'static str {
        if self.is_accepted() {
            ACCEPTED
        } else {
            REJECTED
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in self.diagnostics() {
            writeln!(f, "{diagnostic}")?;
        }
        write!(f, "{}", self.verdict())
    }
}
