//! Token definitions shared by the lexer and the recognizer

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    /// Zero-based character offset from the start of the input
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

/// Every terminal symbol of the grammar.
///
/// `Quote`, `DoubleQuote` and `Assign` are produced by the lexer but no
/// production consumes them, so they always end up as the offending token of a
/// [`SyntaxError`](super::parse::SyntaxError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    If,
    Else,
    For,
    In,
    Do,
    Range,
    While,
    Loop,
    Begin,
    End,

    // Literals and names
    Identifier,
    String,
    Number,

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Arithmetic
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /

    Assign, // =

    // Punctuation
    LParen,      // (
    RParen,      // )
    LBrace,      // {
    RBrace,      // }
    Semicolon,   // ;
    Comma,       // ,
    Quote,       // '
    DoubleQuote, // "

    // End of input
    Eof,
}

impl TokenKind {
    /// Operators accepted between the two sides of a condition.
    pub const RELATIONS: [TokenKind; 10] = [
        TokenKind::Gt,
        TokenKind::Lt,
        TokenKind::EqEq,
        TokenKind::Le,
        TokenKind::Ge,
        TokenKind::NotEq,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
    ];

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::In
                | TokenKind::Do
                | TokenKind::Range
                | TokenKind::While
                | TokenKind::Loop
                | TokenKind::Begin
                | TokenKind::End
        )
    }

    pub fn is_relation(self) -> bool {
        Self::RELATIONS.contains(&self)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::For => "FOR",
            TokenKind::In => "IN",
            TokenKind::Do => "DO",
            TokenKind::Range => "RANGE",
            TokenKind::While => "WHILE",
            TokenKind::Loop => "LOOP",
            TokenKind::Begin => "BEGIN",
            TokenKind::End => "END",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::EqEq => "EQUALS_EQUALS",
            TokenKind::NotEq => "NOT_EQUAL",
            TokenKind::Lt => "LESSTHAN",
            TokenKind::Le => "LESSEQUAL",
            TokenKind::Gt => "GREATERTHAN",
            TokenKind::Ge => "GREATEQUAL",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "TIMES",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Assign => "EQUALS",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Quote => "SINGLEQUOTE",
            TokenKind::DoubleQuote => "DOUBLEQUOTES",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// Reserved spellings and the token kind each one lexes to.
///
/// `puts` and `print` are aliases for a plain identifier: they are listed so
/// the table documents every word the language treats specially, but calls to
/// them are ordinary `function_call`s.
pub const RESERVED_WORDS: [(&str, TokenKind); 12] = [
    ("if", TokenKind::If),
    ("end", TokenKind::End),
    ("puts", TokenKind::Identifier),
    ("else", TokenKind::Else),
    ("print", TokenKind::Identifier),
    ("for", TokenKind::For),
    ("in", TokenKind::In),
    ("do", TokenKind::Do),
    ("range", TokenKind::Range),
    ("while", TokenKind::While),
    ("loop", TokenKind::Loop),
    ("begin", TokenKind::Begin),
];

/// Look up an exact, case-sensitive spelling in [`RESERVED_WORDS`].
pub fn reserved(word: &str) -> Option<TokenKind> {
    RESERVED_WORDS
        .iter()
        .find(|(spelling, _)| *spelling == word)
        .map(|(_, kind)| *kind)
}

/// A single lexical unit.
///
/// For string literals `lexeme` holds the decoded contents without the
/// delimiting quotes; for every other kind it is the exact source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn eof(location: SourceLocation) -> Self {
        Self::new(TokenKind::Eof, "", location)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::String => write!(f, "string literal \"{}\"", self.lexeme),
            TokenKind::Number => write!(f, "number {}", self.lexeme),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_lookup_is_case_sensitive() {
        assert_eq!(reserved("while"), Some(TokenKind::While));
        assert_eq!(reserved("While"), None);
        assert_eq!(reserved("puts"), Some(TokenKind::Identifier));
        assert_eq!(reserved("ranges"), None);
    }

    #[test]
    fn test_relations_include_arithmetic() {
        for kind in [TokenKind::Plus, TokenKind::Slash, TokenKind::Le] {
            assert!(kind.is_relation());
        }
        assert!(!TokenKind::Assign.is_relation());
    }
}
