//! Leo IDE Layer
//!
//! The editor-facing pieces built on top of the lexer and the inference
//! engine: a token-walking scope analyzer that populates the bindings
//! context, a completion-list assembler, and a configurable token-driven
//! formatter.

#![warn(missing_docs)]

pub mod completion;
pub mod format;
pub mod scope;

pub use completion::{CompletionItem, CompletionKind, CompletionProvider};
pub use format::{ConfigError, FormatConfig, Formatter};
pub use scope::{
    analyze_scope, analyze_scope_with_cancel, Scope, ScopeAnalysis, ScopeId, ScopeKind, Symbol,
    SymbolKind, SymbolTable,
};
