//! Scope analysis over raw token streams.
//!
//! The walker does not parse. It watches for the handful of tokens that
//! introduce bindings — `{`/`}` for scopes, `let`/`const` for variables,
//! `function`/`transition`/`inline` for callables — infers each binding's
//! type, and records it both in a scope tree (for completion) and in the
//! flat [`TypeEnv`] (for subsequent inference). Everything else is skipped,
//! which is what makes the walk robust on incomplete code.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use leolens_infer::{Diagnostic, InferenceEngine};
use leolens_syntax::{next_code, Token, TokenKind};
use leolens_types::{Type, TypeEnv};

/// Symbol kind (variable or callable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Variable binding from `let`/`const`.
    Variable,
    /// `function`, `transition`, or `inline` declaration.
    Function,
}

/// A named binding discovered by the walker.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Symbol name.
    pub name: String,
    /// Symbol kind.
    pub kind: SymbolKind,
    /// Inferred type (for functions, the return type).
    pub ty: Type,
}

/// Scope identifier: an index into the table's scope arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// Scope kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// The outermost scope.
    Global,
    /// A `{ … }` block.
    Block,
}

/// Scope in the scope tree.
#[derive(Debug, Clone)]
pub struct Scope {
    /// Scope ID.
    pub id: ScopeId,
    /// Scope kind.
    pub kind: ScopeKind,
    /// Parent scope (None for the global scope).
    pub parent: Option<ScopeId>,
    /// Symbols defined in this scope.
    pub symbols: FxHashMap<String, Symbol>,
}

impl Scope {
    fn new(id: ScopeId, kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Scope {
            id,
            kind,
            parent,
            symbols: FxHashMap::default(),
        }
    }
}

/// Scope tree with a cursor: scopes are pushed and popped as the walker
/// crosses braces, and the current scope is the one the analyzed position
/// sits in.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    current_scope: ScopeId,
}

impl SymbolTable {
    /// Creates a table holding only the global scope.
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::new(ScopeId(0), ScopeKind::Global, None)],
            current_scope: ScopeId(0),
        }
    }

    /// Pushes a child of the current scope and makes it current.
    pub fn push_scope(&mut self, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(id, kind, Some(self.current_scope)));
        self.current_scope = id;
        id
    }

    /// Returns to the parent scope. Does nothing at the global scope, so
    /// stray closing braces in incomplete code are harmless.
    pub fn pop_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current_scope.0 as usize].parent {
            self.current_scope = parent;
        }
    }

    /// Defines (or overwrites) a symbol in the current scope.
    pub fn define(&mut self, symbol: Symbol) {
        self.scopes[self.current_scope.0 as usize]
            .symbols
            .insert(symbol.name.clone(), symbol);
    }

    /// Resolves a name by walking from the current scope to the global
    /// scope; the nearest binding wins.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        let mut scope_id = self.current_scope;
        loop {
            let scope = &self.scopes[scope_id.0 as usize];
            if let Some(symbol) = scope.symbols.get(name) {
                return Some(symbol);
            }
            scope_id = scope.parent?;
        }
    }

    /// All symbols visible from the current scope, nearest scope first.
    /// Shadowed outer bindings are omitted.
    pub fn visible_symbols(&self) -> Vec<&Symbol> {
        let mut seen = FxHashMap::default();
        let mut result = Vec::new();
        let mut scope_id = Some(self.current_scope);
        while let Some(id) = scope_id {
            let scope = &self.scopes[id.0 as usize];
            for symbol in scope.symbols.values() {
                if seen.insert(symbol.name.clone(), ()).is_none() {
                    result.push(symbol);
                }
            }
            scope_id = scope.parent;
        }
        result
    }

    /// The scope the cursor ended up in.
    pub fn current_scope_id(&self) -> ScopeId {
        self.current_scope
    }

    /// Number of scopes in the tree.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The outcome of a scope walk: the scope tree positioned at the cursor,
/// plus every degradation note inference produced along the way.
#[derive(Debug)]
pub struct ScopeAnalysis {
    /// Scope tree; its current scope contains the cursor.
    pub table: SymbolTable,
    /// Degradation notes from the inference runs the walk triggered.
    pub diagnostics: Vec<Diagnostic>,
}

/// Walks the token stream up to `cursor` (a byte offset into the source
/// the stream was lexed from), binding declarations into a scope tree and
/// into `env`.
pub fn analyze_scope(tokens: &[Token], cursor: usize, env: &mut TypeEnv) -> ScopeAnalysis {
    walk(tokens, cursor, env, None)
}

/// Like [`analyze_scope`], consulting a cancellation flag between tokens.
/// A cancelled walk returns what it has so far.
pub fn analyze_scope_with_cancel(
    tokens: &[Token],
    cursor: usize,
    env: &mut TypeEnv,
    cancel: Arc<AtomicBool>,
) -> ScopeAnalysis {
    walk(tokens, cursor, env, Some(cancel))
}

fn walk(
    tokens: &[Token],
    cursor: usize,
    env: &mut TypeEnv,
    cancel: Option<Arc<AtomicBool>>,
) -> ScopeAnalysis {
    let mut table = SymbolTable::new();
    let mut diagnostics = Vec::new();
    let mut offset = 0usize;

    for (index, token) in tokens.iter().enumerate() {
        if cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            break;
        }

        match token.kind {
            TokenKind::LeftCurly => {
                table.push_scope(ScopeKind::Block);
            }
            TokenKind::RightCurly => table.pop_scope(),
            TokenKind::Let | TokenKind::Const => {
                if let Some(symbol) = bind_variable(tokens, index, env, &mut diagnostics) {
                    table.define(symbol);
                }
            }
            TokenKind::Function | TokenKind::Transition | TokenKind::Inline => {
                if let Some(symbol) = bind_function(tokens, index, env, &mut diagnostics) {
                    table.define(symbol);
                }
            }
            _ => {}
        }

        offset += token.text.len();
        if offset >= cursor {
            break;
        }
    }

    ScopeAnalysis { table, diagnostics }
}

/// Binds `let name … = expr` / `const name … = expr`. The type comes from
/// the initializer expression after the `=`; a declaration with no `=`
/// before the statement ends (still being typed, or a loop binding) gets
/// `unknown`. Type annotations are not consulted.
fn bind_variable(
    tokens: &[Token],
    decl_index: usize,
    env: &mut TypeEnv,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Symbol> {
    let name_index = next_code(tokens, decl_index + 1)?;
    if tokens[name_index].kind != TokenKind::Identifier {
        return None;
    }
    let name = tokens[name_index].text.clone();

    let mut assign = None;
    let mut index = name_index + 1;
    while index < tokens.len() {
        match tokens[index].kind {
            TokenKind::Assign => {
                assign = Some(index);
                break;
            }
            TokenKind::Semicolon | TokenKind::LeftCurly | TokenKind::RightCurly => break,
            _ => {}
        }
        index += 1;
    }

    let ty = match assign {
        Some(eq) => {
            let mut engine = InferenceEngine::new(env);
            let inference = engine.infer_type(tokens, eq + 1);
            diagnostics.extend(engine.take_diagnostics());
            inference.ty
        }
        None => Type::Unknown,
    };

    env.update_type(&name, ty);
    Some(Symbol {
        name,
        kind: SymbolKind::Variable,
        ty,
    })
}

/// Binds a `function`/`transition`/`inline` declaration to its inferred
/// return type.
fn bind_function(
    tokens: &[Token],
    keyword_index: usize,
    env: &mut TypeEnv,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Symbol> {
    let name_index = next_code(tokens, keyword_index + 1)?;
    if tokens[name_index].kind != TokenKind::Identifier {
        return None;
    }
    let name = tokens[name_index].text.clone();

    let ty = {
        let mut engine = InferenceEngine::new(env);
        let ty = engine.infer_function_return_type(tokens, keyword_index);
        diagnostics.extend(engine.take_diagnostics());
        ty
    };

    env.update_function_return(&name, ty);
    Some(Symbol {
        name,
        kind: SymbolKind::Function,
        ty,
    })
}
