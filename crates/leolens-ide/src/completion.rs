//! Completion-list assembly.
//!
//! Three modes, chosen from the text on the cursor's line: a blank prefix
//! offers declaration keywords, a prefix ending in `.` offers members for
//! the receiver's inferred type, and anything else offers the primitive
//! type names plus every symbol visible from the cursor's scope.

use serde::Serialize;

use leolens_syntax::tokenize;
use leolens_types::{Type, TypeEnv};

use crate::scope::{analyze_scope, SymbolKind, SymbolTable};

/// What a completion item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    /// Declaration or statement keyword.
    Keyword,
    /// Variable binding.
    Variable,
    /// Callable declaration.
    Function,
    /// Member of a typed receiver.
    Method,
    /// Primitive type name.
    Type,
}

/// One completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionItem {
    /// Inserted text.
    pub label: String,
    /// Item kind.
    pub kind: CompletionKind,
    /// Extra detail shown alongside (the inferred type, for symbols).
    pub detail: Option<String>,
}

impl CompletionItem {
    fn new(label: impl Into<String>, kind: CompletionKind) -> Self {
        CompletionItem {
            label: label.into(),
            kind,
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Keywords offered at the start of a line.
const DECLARATION_KEYWORDS: &[&str] = &[
    "function",
    "transition",
    "inline",
    "struct",
    "record",
    "mapping",
    "if",
    "else",
    "for",
    "return",
    "let",
    "const",
];

/// Members offered when the receiver's type is not resolvable.
const DEFAULT_METHODS: &[&str] = &["len", "push", "pop", "remove"];

/// Builtin callables seeded into every session.
const BUILTIN_FUNCTIONS: &[&str] = &["assert", "assert_eq", "assert_neq"];

/// Members per receiver type.
fn type_methods(ty: Type) -> &'static [&'static str] {
    if ty.is_numeric() {
        return &["pow", "div", "mul", "add", "sub"];
    }
    match ty {
        Type::Array => &["len", "push", "pop", "remove"],
        Type::String => &["len", "at", "chars"],
        Type::Group => &["generator", "zero", "mul", "add", "sub", "neg"],
        _ => &[],
    }
}

/// Session-scoped completion provider.
///
/// Owns the bindings context for one open document. The context
/// accumulates across calls and entries are never removed, so bindings
/// from deleted code linger until the provider is replaced — the
/// documented staleness tradeoff. Each call re-tokenizes the document.
pub struct CompletionProvider {
    env: TypeEnv,
}

impl CompletionProvider {
    /// Creates a provider with the builtin functions seeded.
    pub fn new() -> Self {
        let mut env = TypeEnv::new();
        for name in BUILTIN_FUNCTIONS {
            env.update_function_return(*name, Type::Unknown);
        }
        CompletionProvider { env }
    }

    /// The session's bindings context.
    pub fn env(&self) -> &TypeEnv {
        &self.env
    }

    /// Assembles completions for the given cursor position (a byte offset
    /// into `source`).
    pub fn complete(&mut self, source: &str, offset: usize) -> Vec<CompletionItem> {
        let offset = offset.min(source.len());
        let tokens = tokenize(source);
        let analysis = analyze_scope(&tokens, offset, &mut self.env);

        let prefix = line_prefix(source, offset);
        if prefix.trim().is_empty() {
            keyword_completions()
        } else if prefix.trim_end().ends_with('.') {
            method_completions(prefix, &analysis.table)
        } else {
            self.general_completions(&analysis.table)
        }
    }

    fn general_completions(&self, table: &SymbolTable) -> Vec<CompletionItem> {
        let mut items: Vec<CompletionItem> = Type::primitive_names()
            .iter()
            .map(|name| CompletionItem::new(*name, CompletionKind::Type))
            .collect();

        for name in BUILTIN_FUNCTIONS {
            items.push(CompletionItem::new(*name, CompletionKind::Function));
        }

        for symbol in table.visible_symbols() {
            let kind = match symbol.kind {
                SymbolKind::Variable => CompletionKind::Variable,
                SymbolKind::Function => CompletionKind::Function,
            };
            items.push(CompletionItem::new(symbol.name.as_str(), kind).with_detail(symbol.ty.name()));
        }

        items
    }
}

impl Default for CompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn keyword_completions() -> Vec<CompletionItem> {
    DECLARATION_KEYWORDS
        .iter()
        .map(|kw| CompletionItem::new(*kw, CompletionKind::Keyword))
        .collect()
}

fn method_completions(prefix: &str, table: &SymbolTable) -> Vec<CompletionItem> {
    let receiver = prefix.trim().split('.').next().unwrap_or("");

    let methods = match table.resolve(receiver) {
        Some(symbol) => type_methods(symbol.ty),
        None => DEFAULT_METHODS,
    };

    methods
        .iter()
        .map(|m| CompletionItem::new(*m, CompletionKind::Method))
        .collect()
}

/// The text of the cursor's line up to the cursor.
fn line_prefix(source: &str, offset: usize) -> &str {
    let head = source.get(..offset).unwrap_or("");
    match head.rfind('\n') {
        Some(newline) => &head[newline + 1..],
        None => head,
    }
}
