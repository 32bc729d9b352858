//! Statement-level productions
//!
//! ```text
//! all_constructs ::= FOR arguments IN RANGE ( condition ) [DO] { statements } END
//!                  | FOR arguments IN IDENTIFIER [DO] { statements } END
//!                  | IF ( condition ) { statements } else_clause END
//!                  | WHILE ( condition ) [DO] { statements } END
//!                  | BEGIN { statements } END while_tail
//!                  | LOOP DO { statements } END
//! else_clause    ::= ELSE { statements } | ELSE if_statement | ε
//! while_tail     ::= WHILE ( condition ) | WHILE condition
//! statements     ::= statement | statements statement
//! statement      ::= function_call | all_constructs
//! ```
//!
//! `if_statement` is the `IF` alternative of `all_constructs` on its own, so
//! every `else if` needs its own closing `end`.
//!
//! Every method takes the position of its first token and returns the
//! positions just past each way it can finish.

use crate::parser::parse::{Ends, Parser, Rule};
use crate::parser::token::TokenKind;

impl Parser {
    /// Dispatch on the leading keyword.
    pub(crate) fn parse_construct(&mut self, pos: usize) -> Ends {
        match self.lookahead(pos) {
            TokenKind::For => self.parse_for(pos + 1),
            TokenKind::If => self.rule(Rule::IfStatement, pos),
            TokenKind::While => self.parse_while(pos + 1),
            TokenKind::Begin => self.parse_begin_while(pos + 1),
            TokenKind::Loop => self.parse_loop(pos + 1),
            _ => Ends::none(),
        }
    }

    /// Both `for` forms; `pos` is just past `FOR`.
    fn parse_for(&mut self, pos: usize) -> Ends {
        let targets = self.rule(Rule::Arguments, pos);
        let after_in = self.expect(&targets, TokenKind::In);

        // range ( condition )
        let range = self.expect(&after_in, TokenKind::Range);
        let range = self.expect(&range, TokenKind::LParen);
        let range = self.then(&range, Rule::Condition);
        let range = self.expect(&range, TokenKind::RParen);

        // <identifier>
        let collection = self.expect(&after_in, TokenKind::Identifier);

        let mut heads = range;
        heads.merge(collection);
        let heads = self.optional(&heads, TokenKind::Do);
        self.parse_body_end(&heads)
    }

    /// `IF ( condition ) { statements } else_clause END`
    pub(crate) fn parse_if_statement(&mut self, pos: usize) -> Ends {
        let ends = self.expect(&Ends::at(pos), TokenKind::If);
        let ends = self.parse_paren_condition(&ends);
        let ends = self.parse_body(&ends);
        let ends = self.then(&ends, Rule::ElseClause);
        self.expect(&ends, TokenKind::End)
    }

    pub(crate) fn parse_else_clause(&mut self, pos: usize) -> Ends {
        let mut ends = Ends::at(pos);

        if self.lookahead(pos) == TokenKind::Else {
            ends.merge(self.parse_body(&Ends::at(pos + 1)));
            ends.merge(self.rule(Rule::IfStatement, pos + 1));
        }

        ends
    }

    /// `pos` is just past `WHILE`.
    fn parse_while(&mut self, pos: usize) -> Ends {
        let ends = self.parse_paren_condition(&Ends::at(pos));
        let ends = self.optional(&ends, TokenKind::Do);
        self.parse_body_end(&ends)
    }

    /// `pos` is just past `BEGIN`.
    fn parse_begin_while(&mut self, pos: usize) -> Ends {
        let ends = self.parse_body_end(&Ends::at(pos));
        self.then(&ends, Rule::WhileTail)
    }

    pub(crate) fn parse_while_tail(&mut self, pos: usize) -> Ends {
        let after_while = self.expect(&Ends::at(pos), TokenKind::While);
        let mut ends = self.parse_paren_condition(&after_while);
        ends.merge(self.then(&after_while, Rule::Condition));
        ends
    }

    /// `pos` is just past `LOOP`.
    fn parse_loop(&mut self, pos: usize) -> Ends {
        let ends = self.expect(&Ends::at(pos), TokenKind::Do);
        self.parse_body_end(&ends)
    }

    /// One or more statements.
    pub(crate) fn parse_statements(&mut self, pos: usize) -> Ends {
        let mut ends = Ends::none();
        let mut frontier = self.rule(Rule::Statement, pos);

        // Every statement consumes at least one token, so this terminates
        while !frontier.is_empty() {
            ends.merge(frontier.clone());
            frontier = self.then(&frontier, Rule::Statement).without(&ends);
        }

        ends
    }

    pub(crate) fn parse_statement(&mut self, pos: usize) -> Ends {
        let mut ends = self.rule(Rule::FunctionCall, pos);
        ends.merge(self.rule(Rule::Construct, pos));
        ends
    }

    // ===== Shared pieces =====

    /// `( condition )`
    fn parse_paren_condition(&mut self, from: &Ends) -> Ends {
        let ends = self.expect(from, TokenKind::LParen);
        let ends = self.then(&ends, Rule::Condition);
        self.expect(&ends, TokenKind::RParen)
    }

    /// `{ statements }`
    fn parse_body(&mut self, from: &Ends) -> Ends {
        let ends = self.expect(from, TokenKind::LBrace);
        let ends = self.then(&ends, Rule::Statements);
        self.expect(&ends, TokenKind::RBrace)
    }

    /// `{ statements } END`
    fn parse_body_end(&mut self, from: &Ends) -> Ends {
        let ends = self.parse_body(from);
        self.expect(&ends, TokenKind::End)
    }
}
