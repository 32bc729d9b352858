//! Condition and expression productions
//!
//! ```text
//! condition     ::= expression REL expression | NUMBER
//! REL           ::= > | < | == | <= | >= | != | + | - | * | /
//! expression    ::= IDENTIFIER | NUMBER | STRING | function_call
//! function_call ::= IDENTIFIER ( arguments ) [;] | IDENTIFIER arguments [;]
//! arguments     ::= ε | expression | arguments , expression
//! ```
//!
//! Arithmetic operators count as relations and a bare number is a complete
//! condition. That is the accepted language, not a shortcut in the
//! recognizer.
//!
//! Two choices are committed on the next token instead of being explored:
//! - An identifier in expression position is a call only when the next token
//!   is `(` or can start an argument. Otherwise it is a bare name, so `a` in
//!   `puts a;;` can never become the zero-argument call `a;`.
//! - `arguments` is empty only when the next token cannot start an
//!   expression.

use crate::parser::parse::{Ends, Parser, Rule};
use crate::parser::token::TokenKind;

impl Parser {
    pub(crate) fn parse_condition(&mut self, pos: usize) -> Ends {
        let lhs = self.rule(Rule::Expression, pos);
        let relation = self.expect_any(&lhs, &TokenKind::RELATIONS);
        let mut ends = self.then(&relation, Rule::Expression);

        ends.merge(self.expect(&Ends::at(pos), TokenKind::Number));
        ends
    }

    pub(crate) fn parse_expression(&mut self, pos: usize) -> Ends {
        match self.lookahead(pos) {
            TokenKind::Number | TokenKind::String => Ends::at(pos + 1),
            TokenKind::Identifier => {
                let opens_call = self.lookahead(pos + 1) == TokenKind::LParen
                    || self.starts_expression(pos + 1);
                if opens_call {
                    self.rule(Rule::FunctionCall, pos)
                } else {
                    Ends::at(pos + 1)
                }
            }
            _ => Ends::none(),
        }
    }

    /// Parentheses around the arguments are optional, as is the trailing `;`.
    pub(crate) fn parse_function_call(&mut self, pos: usize) -> Ends {
        let callee = self.expect(&Ends::at(pos), TokenKind::Identifier);

        let parenthesised = self.expect(&callee, TokenKind::LParen);
        let parenthesised = self.then(&parenthesised, Rule::Arguments);
        let mut ends = self.expect(&parenthesised, TokenKind::RParen);

        ends.merge(self.then(&callee, Rule::Arguments));
        self.optional(&ends, TokenKind::Semicolon)
    }

    /// Zero or more expressions separated by commas.
    ///
    /// Because the list is `arguments , expression` with `arguments` allowed to
    /// be empty, a leading comma is part of the language too.
    pub(crate) fn parse_arguments(&mut self, pos: usize) -> Ends {
        let mut ends = self.rule(Rule::Expression, pos);
        if !self.starts_expression(pos) {
            ends.merge(Ends::at(pos));
        }

        let mut frontier = ends.clone();
        while !frontier.is_empty() {
            let commas = self.expect(&frontier, TokenKind::Comma);
            frontier = self.then(&commas, Rule::Expression).without(&ends);
            ends.merge(frontier.clone());
        }

        ends
    }

    fn starts_expression(&mut self, pos: usize) -> bool {
        matches!(
            self.lookahead(pos),
            TokenKind::Identifier | TokenKind::Number | TokenKind::String
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::Parser;
    use crate::parser::token::TokenKind;

    fn accepts(source: &str) -> bool {
        Parser::new(source).parse().is_ok()
    }

    fn in_if(condition: &str) -> String {
        format!("if ({condition}) {{ puts 1 }} end")
    }

    #[test]
    fn test_every_relation_is_accepted() {
        for op in [">", "<", "==", "<=", ">=", "!=", "+", "-", "*", "/"] {
            assert!(accepts(&in_if(&format!("a {op} 2"))), "relation {op}");
        }
    }

    #[test]
    fn test_bare_number_is_a_condition() {
        assert!(accepts(&in_if("1")));
        assert!(!accepts(&in_if("x")));
        assert!(!accepts(&in_if("\"s\"")));
    }

    #[test]
    fn test_conditions_do_not_chain() {
        let err = Parser::new(&in_if("1 < 2 < 3")).parse().unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Lt);
        assert_eq!(err.location().offset, 10);
    }

    #[test]
    fn test_assignment_is_not_a_relation() {
        assert!(!accepts(&in_if("x = 1")));
    }

    #[test]
    fn test_call_inside_condition() {
        assert!(accepts(&in_if("size(items) > 0")));
        assert!(accepts(&in_if("max(a, b) == \"x\"")));
    }

    #[test]
    fn test_call_forms() {
        assert!(accepts("loop do { puts } end"));
        assert!(accepts("loop do { puts() } end"));
        assert!(accepts("loop do { puts(1, \"two\", three); } end"));
        assert!(accepts("loop do { puts 1, 2; print 3 } end"));
    }

    #[test]
    fn test_leading_comma_in_arguments() {
        assert!(accepts("loop do { puts(, 1) } end"));
        assert!(!accepts("loop do { puts(1,) } end"));
    }

    #[test]
    fn test_nested_calls_without_parentheses() {
        assert!(accepts("loop do { puts a b c d e f g h } end"));
    }

    #[test]
    fn test_double_semicolon_is_rejected() {
        let err = Parser::new("loop do { puts 1;; } end").parse().unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Semicolon);
        assert_eq!(err.location().offset, 17);
    }

    #[test]
    fn test_name_before_semicolon_is_not_a_call() {
        // `a;` cannot be a nested call, so the second ';' has nowhere to go
        let err = Parser::new("loop do { puts a;; } end").parse().unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Semicolon);
        assert_eq!(err.location().offset, 17);

        assert!(accepts("loop do { puts a; } end"));
        assert!(accepts("loop do { puts a b; } end"));
    }

    #[test]
    fn test_name_in_condition_is_not_a_call() {
        let err = Parser::new(&in_if("f; > 1")).parse().unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Semicolon);
        assert_eq!(err.location().offset, 5);

        assert!(accepts(&in_if("f() > 1")));
        assert!(accepts(&in_if("f x > 1")));
    }

    #[test]
    fn test_name_before_comma_or_paren_is_not_a_call() {
        assert!(accepts("loop do { puts(a, b) } end"));
        assert!(accepts("for a, b in xs { puts a } end"));
    }
}
