//! Main recognizer coordinator
//!
//! This module provides the [`Parser`] struct, the [`SyntaxError`] type and the
//! helper methods shared by the production modules.
//!
//! # Recognizer Architecture
//!
//! The Parser is a recursive descent recognizer with one method per
//! nonterminal:
//! - This module: Parser struct, memo table, terminal matching, entry point
//! - `constructs`: `all_constructs` and the statement-level rules
//! - `expressions`: `condition`, `expression`, `function_call`, `arguments`
//!
//! # Implementation
//!
//! Instead of committing to one alternative, every nonterminal method returns
//! the [`Ends`] at which it can finish when started at a given token. A
//! sequence is matched by feeding the ends of one symbol in as the starts of
//! the next. The grammar is ambiguous in places (`puts a b` nests calls two
//! ways, `do` is optional, `begin ... end while` has two tails), and exploring
//! every alternative keeps the accepted language independent of how those are
//! ordered. Where two productions compete on the same next token (a bare
//! name against a zero-argument call, an empty argument list against a
//! present one), `expressions` commits to one on that token instead.
//! Results are memoized per `(rule, position)` for one `parse` call.

use crate::parser::lexer::{LexError, Lexed, Lexer};
use crate::parser::token::{SourceLocation, Token, TokenKind};
use rustc_hash::FxHashMap;
use std::fmt;

/// The token stream could not be reduced to `all_constructs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// First token no derivation could consume; `Eof` when input ran out.
    pub token: Token,
}

impl SyntaxError {
    pub fn location(&self) -> SourceLocation {
        self.token.location
    }

    pub fn at_eof(&self) -> bool {
        self.token.is_eof()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.at_eof() {
            write!(f, "Syntax error at EOF")
        } else {
            write!(
                f,
                "Syntax error at line {}, column {}: Unexpected token '{}'",
                self.token.location.line, self.token.location.column, self.token.lexeme
            )
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Sorted, duplicate-free set of token positions where a partial match ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Ends(Vec<usize>);

impl Ends {
    pub(crate) fn at(pos: usize) -> Self {
        Ends(vec![pos])
    }

    pub(crate) fn none() -> Self {
        Ends(Vec::new())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn contains(&self, pos: usize) -> bool {
        self.0.binary_search(&pos).is_ok()
    }

    pub(crate) fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub(crate) fn merge(&mut self, other: Ends) {
        self.0.extend(other.0);
        self.0.sort_unstable();
        self.0.dedup();
    }

    /// Positions in `self` that are not in `seen`.
    pub(crate) fn without(self, seen: &Ends) -> Ends {
        Ends(self.0.into_iter().filter(|pos| !seen.contains(*pos)).collect())
    }
}

impl FromIterator<usize> for Ends {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut positions: Vec<usize> = iter.into_iter().collect();
        positions.sort_unstable();
        positions.dedup();
        Ends(positions)
    }
}

/// Memoized nonterminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Rule {
    Construct,
    IfStatement,
    ElseClause,
    WhileTail,
    Statements,
    Statement,
    Condition,
    Expression,
    FunctionCall,
    Arguments,
}

/// Recognizer for one line's token stream
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    memo: FxHashMap<(Rule, usize), Ends>,
    furthest: usize,
}

impl Parser {
    /// Lex `source` and build a parser over its tokens.
    ///
    /// Lex errors are dropped here; use [`Parser::with_lexed`] or
    /// [`crate::report::Report`] to keep them.
    pub fn new(source: &str) -> Self {
        Self::with_lexed(Lexer::new(source).tokenize()).0
    }

    /// Build a parser from a lexed line, handing back the lex errors.
    pub fn with_lexed(lexed: Lexed) -> (Self, Vec<LexError>) {
        (Self::from_tokens(lexed.tokens), lexed.errors)
    }

    /// Build a parser over an existing token sequence. An `Eof` token is
    /// appended if the sequence does not already end with one.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let loc = tokens
                .last()
                .map(|t| {
                    let width = match t.kind {
                        TokenKind::String => t.lexeme.chars().count() + 2,
                        _ => t.lexeme.chars().count(),
                    };
                    SourceLocation::new(
                        t.location.line,
                        t.location.column + width,
                        t.location.offset + width,
                    )
                })
                .unwrap_or_default();
            tokens.push(Token::eof(loc));
        }

        Self {
            tokens,
            memo: FxHashMap::default(),
            furthest: 0,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Decide whether the whole token stream is one `all_constructs`.
    ///
    /// Each call starts from a clean memo table, so repeated calls agree.
    pub fn parse(&mut self) -> Result<(), SyntaxError> {
        self.memo.clear();
        self.furthest = 0;

        let eof = self.tokens.len() - 1;
        let ends = self.rule(Rule::Construct, 0);

        if ends.contains(eof) {
            return Ok(());
        }

        // A construct that finished early leaves its next token unconsumed
        if let Some(last) = ends.last() {
            self.furthest = self.furthest.max(last);
        }

        Err(SyntaxError {
            token: self.tokens[self.furthest.min(eof)].clone(),
        })
    }

    // ===== Helper methods =====

    /// Run a nonterminal from `pos`, consulting the memo table first.
    pub(crate) fn rule(&mut self, rule: Rule, pos: usize) -> Ends {
        if let Some(ends) = self.memo.get(&(rule, pos)) {
            return ends.clone();
        }

        let ends = match rule {
            Rule::Construct => self.parse_construct(pos),
            Rule::IfStatement => self.parse_if_statement(pos),
            Rule::ElseClause => self.parse_else_clause(pos),
            Rule::WhileTail => self.parse_while_tail(pos),
            Rule::Statements => self.parse_statements(pos),
            Rule::Statement => self.parse_statement(pos),
            Rule::Condition => self.parse_condition(pos),
            Rule::Expression => self.parse_expression(pos),
            Rule::FunctionCall => self.parse_function_call(pos),
            Rule::Arguments => self.parse_arguments(pos),
        };

        self.memo.insert((rule, pos), ends.clone());
        ends
    }

    /// Run a nonterminal from every position in `from`.
    pub(crate) fn then(&mut self, from: &Ends, rule: Rule) -> Ends {
        let mut ends = Ends::none();
        for pos in from.iter() {
            ends.merge(self.rule(rule, pos));
        }
        ends
    }

    /// Kind of the token at `pos`, recording that a derivation got this far.
    pub(crate) fn lookahead(&mut self, pos: usize) -> TokenKind {
        self.furthest = self.furthest.max(pos);
        self.tokens
            .get(pos)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// Match one terminal after every position in `from`.
    pub(crate) fn expect(&mut self, from: &Ends, kind: TokenKind) -> Ends {
        self.expect_any(from, &[kind])
    }

    /// Match any one of `kinds` after every position in `from`.
    pub(crate) fn expect_any(&mut self, from: &Ends, kinds: &[TokenKind]) -> Ends {
        from.iter()
            .filter(|&pos| kinds.contains(&self.lookahead(pos)))
            .map(|pos| pos + 1)
            .collect()
    }

    /// `[kind]`: the ends of `from` both with and without the marker.
    pub(crate) fn optional(&mut self, from: &Ends, kind: TokenKind) -> Ends {
        let mut ends = self.expect(from, kind);
        ends.merge(from.clone());
        ends
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<(), SyntaxError> {
        Parser::new(source).parse()
    }

    #[test]
    fn test_parse_simple_if() {
        assert_eq!(parse("if (1 > 2) { puts (3) } end"), Ok(()));
    }

    #[test]
    fn test_missing_end_is_eof_error() {
        let err = parse("if (1 > 2) { puts (3) }").unwrap_err();
        assert!(err.at_eof());
        assert_eq!(err.to_string(), "Syntax error at EOF");
    }

    #[test]
    fn test_error_points_at_first_unconsumable_token() {
        let err = parse("while (1 < 2) { puts(1) } end end").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::End);
        assert_eq!(err.location().offset, 30);
        assert_eq!(
            err.to_string(),
            "Syntax error at line 1, column 31: Unexpected token 'end'"
        );
    }

    #[test]
    fn test_error_inside_condition() {
        let err = parse("if (1 = 2) { puts 1 } end").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Assign);
    }

    #[test]
    fn test_empty_input_is_eof_error() {
        assert!(parse("").unwrap_err().at_eof());
    }

    #[test]
    fn test_reparse_same_instance() {
        let mut parser = Parser::new("loop do { puts 1 } end");
        assert_eq!(parser.parse(), Ok(()));
        assert_eq!(parser.parse(), Ok(()));

        let mut parser = Parser::new("loop { puts 1 } end");
        let first = parser.parse();
        let second = parser.parse();
        assert!(first.is_err());
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_tokens_appends_eof() {
        let tokens = Lexer::new("loop do { puts 1 } end").tokenize().tokens;
        let without_eof: Vec<Token> = tokens.into_iter().filter(|t| !t.is_eof()).collect();
        let mut parser = Parser::from_tokens(without_eof);
        assert!(parser.tokens().last().is_some_and(Token::is_eof));
        assert_eq!(parser.parse(), Ok(()));
    }

    #[test]
    fn test_ends_merge_sorts_and_dedups() {
        let mut ends: Ends = [4, 1, 4].into_iter().collect();
        ends.merge(Ends::at(2));
        assert_eq!(ends.iter().collect::<Vec<_>>(), vec![1, 2, 4]);
        assert!(ends.contains(2));
        assert_eq!(ends.without(&Ends::at(1)).last(), Some(4));
    }
}
