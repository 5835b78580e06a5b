//! Leo Syntax
//!
//! Lossless tokenization for the Leo programming language, built for editor
//! tooling that re-renders or partially analyzes possibly-incomplete source:
//! whitespace and comments are tokens, every token carries its exact source
//! text, and lexing never fails.

#![warn(missing_docs)]

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer, Skipped};
pub use token::{next_code, span_of, token_at_offset, Token, TokenKind};
