//! Lexer (tokenizer) for one line of input
//!
//! Converts raw text into a flat [`Token`] stream terminated by an
//! [`TokenKind::Eof`] token. Characters that start no token are reported as
//! [`LexError`]s alongside the stream instead of aborting: the lexer skips the
//! offending character and carries on, so a stray `@` does not hide the rest
//! of the line from the recognizer.

use super::token::{reserved, SourceLocation, Token, TokenKind};
use std::fmt;

/// An unrecognized character. Recoverable: lexing resumes right after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub character: char,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Illegal character {:?} at line {}, column {}",
            self.character, self.location.line, self.location.column
        )
    }
}

impl std::error::Error for LexError {}

/// Output of one [`Lexer::tokenize`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl Lexed {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Token kinds without the trailing `Eof`; handy for assertions and display.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens
            .iter()
            .filter(|t| !t.is_eof())
            .map(|t| t.kind)
            .collect()
    }
}

/// Lexer for a single line of source text
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input.
    ///
    /// Always starts from the beginning of the input, so calling it twice on
    /// the same lexer yields the same result.
    pub fn tokenize(&mut self) -> Lexed {
        self.position = 0;
        self.line = 1;
        self.column = 1;

        let mut lexed = Lexed::default();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                lexed.tokens.push(Token::eof(self.current_location()));
                break;
            }

            match self.next_token() {
                Ok(token) => lexed.tokens.push(token),
                Err(err) => lexed.errors.push(err),
            }
        }

        lexed
    }

    /// Lex one token starting at a non-whitespace character.
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Ok(Token::eof(loc));
        };

        let single = |kind: TokenKind| -> Result<Token, LexError> {
            Ok(Token::new(kind, ch.to_string(), loc))
        };

        match ch {
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),

            '"' => Ok(self.string_literal(loc)),

            '0'..='9' => Ok(self.number_literal(ch, loc)),

            '=' => Ok(self.with_optional_eq(loc, '=', TokenKind::Assign, TokenKind::EqEq)),
            '<' => Ok(self.with_optional_eq(loc, '<', TokenKind::Lt, TokenKind::Le)),
            '>' => Ok(self.with_optional_eq(loc, '>', TokenKind::Gt, TokenKind::Ge)),
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::NotEq, "!=", loc))
                } else {
                    Err(LexError {
                        character: '!',
                        location: loc,
                    })
                }
            }

            '+' => single(TokenKind::Plus),
            '-' => single(TokenKind::Minus),
            '*' => single(TokenKind::Star),
            '/' => single(TokenKind::Slash),
            '(' => single(TokenKind::LParen),
            ')' => single(TokenKind::RParen),
            '{' => single(TokenKind::LBrace),
            '}' => single(TokenKind::RBrace),
            ';' => single(TokenKind::Semicolon),
            ',' => single(TokenKind::Comma),
            '\'' => single(TokenKind::Quote),

            _ => Err(LexError {
                character: ch,
                location: loc,
            }),
        }
    }

    /// `<op>` or `<op>=`, whichever is longer.
    fn with_optional_eq(
        &mut self,
        loc: SourceLocation,
        first: char,
        short: TokenKind,
        long: TokenKind,
    ) -> Token {
        if self.peek() == Some('=') {
            self.advance();
            Token::new(long, format!("{first}="), loc)
        } else {
            Token::new(short, first.to_string(), loc)
        }
    }

    /// Parse a string literal; the opening quote is already consumed.
    ///
    /// Matches `"([^"\\]|\\.|"")*"` with backtracking: a `""` pair is an
    /// escaped quote, but if the literal never closes, it closes instead at the
    /// last `""` seen. With no such fallback the opening quote lexes on its own
    /// as [`TokenKind::DoubleQuote`].
    fn string_literal(&mut self, loc: SourceLocation) -> Token {
        let mut value = String::new();
        // (chars to consume including the closing quote, value length at that point)
        let mut fallback: Option<(usize, usize)> = None;
        let mut i = 0;

        let closed_at = loop {
            match self.peek_ahead(i) {
                Some('"') if self.peek_ahead(i + 1) == Some('"') => {
                    fallback = Some((i + 1, value.len()));
                    value.push('"');
                    i += 2;
                }
                Some('"') => break Some(i + 1),
                Some('\\') => match self.peek_ahead(i + 1) {
                    Some(escaped) if escaped != '\n' => {
                        value.push(unescape(escaped));
                        i += 2;
                    }
                    _ => break None,
                },
                Some(ch) => {
                    value.push(ch);
                    i += 1;
                }
                None => break None,
            }
        };

        let consumed = match (closed_at, fallback) {
            (Some(n), _) => n,
            (None, Some((n, len))) => {
                value.truncate(len);
                n
            }
            (None, None) => return Token::new(TokenKind::DoubleQuote, "\"", loc),
        };

        for _ in 0..consumed {
            self.advance();
        }

        Token::new(TokenKind::String, value, loc)
    }

    /// Parse numeric literal (unsigned decimal integers only)
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut digits = String::from(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Number, digits, loc)
    }

    /// Parse identifier or reserved word
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::from(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = reserved(&ident).unwrap_or(TokenKind::Identifier);
        Token::new(kind, ident, loc)
    }

    /// Spaces and tabs are dropped; newlines only move the line counter.
    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n') = self.peek() {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column, self.position)
    }
}

fn unescape(escaped: char) -> char {
    match escaped {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}
