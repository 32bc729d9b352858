//! Line recognizer for the control-flow language
//!
//! This module decides whether one line of text belongs to the language:
//! - [`token`]: Token kinds, source locations and the reserved-word table
//! - [`lexer`]: Tokenization (source text → tokens + recoverable lex errors)
//! - [`parse`]: The recognizer driver (tokens → accept or [`parse::SyntaxError`])
//!
//! # Supported Constructs
//!
//! - `if (c) { ... } [else { ... } | else if ...] end`
//! - `while (c) [do] { ... } end` and `begin { ... } end while c`
//! - `for x in range (c) [do] { ... } end` and `for x in xs [do] { ... } end`
//! - `loop do { ... } end`
//! - Function calls with or without parentheses, optionally ending in `;`
//!
//! # Recognizer Implementation
//!
//! Hand-written recursive descent that explores every alternative and memoizes
//! per token position. No parse tree is built.

mod constructs;
mod expressions;

pub mod lexer;
pub mod parse;
pub mod token;
