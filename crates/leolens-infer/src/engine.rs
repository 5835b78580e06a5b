//! The type inference engine.
//!
//! One engine instance per analysis pass: it borrows the caller-owned
//! [`TypeEnv`], accumulates degradation diagnostics, and never mutates the
//! bindings — repeated calls over the same tokens and the same env are
//! deterministic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use leolens_syntax::{Token, TokenKind};
use leolens_types::{Type, TypeEnv};

use crate::diagnostic::{DegradeKind, Diagnostic};
use crate::expr::{scan_expression, BinaryOp, Expr, OpClass};

/// The result of inferring one expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inference {
    /// The inferred type; `unknown` when undeterminable.
    pub ty: Type,
    /// The matched expression, rendered from its non-trivia tokens.
    pub text: String,
    /// Index of the last token the expression consumed; callers resume
    /// scanning at `end + 1`.
    pub end: usize,
}

/// Best-effort type inference over a token stream.
///
/// Construct one per pass with [`InferenceEngine::new`]; read the
/// accumulated degradation notes with [`InferenceEngine::diagnostics`]
/// when the pass is done.
pub struct InferenceEngine<'env> {
    env: &'env TypeEnv,
    diagnostics: Vec<Diagnostic>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'env> InferenceEngine<'env> {
    /// Creates an engine reading from the given bindings context.
    pub fn new(env: &'env TypeEnv) -> Self {
        InferenceEngine {
            env,
            diagnostics: Vec::new(),
            cancel: None,
        }
    }

    /// Installs a cancellation flag, consulted between token scans. A
    /// cancelled pass degrades to `unknown` instead of failing.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Degradation notes accumulated so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drains the accumulated degradation notes.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn degrade(&mut self, kind: DegradeKind, message: String, token_index: usize) {
        self.diagnostics
            .push(Diagnostic::new(kind, message, token_index));
    }

    /// Infers the type of the expression beginning at `start`.
    ///
    /// Never fails: anything unresolvable yields `unknown` (or `field`,
    /// under the arithmetic fallback), with a note on the diagnostics
    /// channel.
    pub fn infer_type(&mut self, tokens: &[Token], start: usize) -> Inference {
        let scanned = scan_expression(tokens, start);
        let ty = self.type_of(&scanned.expr);
        Inference {
            ty,
            text: expression_text(tokens, start, scanned.end),
            end: scanned.end,
        }
    }

    fn type_of(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Integer { text, .. } => Type::of_integer_literal(text),
            Expr::Bool { .. } => Type::Bool,
            Expr::Str { .. } => Type::String,
            Expr::Address { .. } => Type::Address,
            Expr::Ident { name, at } => match self.env.variable_type(name) {
                Some(ty) => ty,
                None => {
                    self.degrade(
                        DegradeKind::UnboundIdentifier,
                        format!("no type recorded for '{name}'"),
                        *at,
                    );
                    Type::Unknown
                }
            },
            Expr::Call { callee, at } => match self.env.function_return(callee) {
                Some(ty) => ty,
                None => {
                    self.degrade(
                        DegradeKind::UnknownCallee,
                        format!("return type of '{callee}' is not known"),
                        *at,
                    );
                    Type::Unknown
                }
            },
            Expr::Array { elements, at } => {
                // Elements must agree; the first disagreement collapses the
                // element type. The element type is then discarded — the
                // result is plain `array`.
                let mut element_ty = Type::Unknown;
                for element in elements {
                    let ty = self.type_of(element);
                    if element_ty == Type::Unknown {
                        element_ty = ty;
                    } else if ty != element_ty {
                        self.degrade(
                            DegradeKind::MixedArrayElements,
                            format!("array mixes {element_ty} and {ty} elements"),
                            *at,
                        );
                        break;
                    }
                }
                Type::Array
            }
            Expr::Group { inner } => self.type_of(inner),
            Expr::Binary {
                op,
                lhs,
                rhs,
                op_at,
            } => {
                let left = self.type_of(lhs);
                let right = self.type_of(rhs);
                self.combine(*op, left, right, *op_at)
            }
            Expr::Opaque { at } => {
                self.degrade(
                    DegradeKind::UnsupportedToken,
                    "expression form is not modeled".to_string(),
                    *at,
                );
                Type::Unknown
            }
        }
    }

    fn combine(&mut self, op: BinaryOp, left: Type, right: Type, op_at: usize) -> Type {
        match op.class() {
            OpClass::Arithmetic => {
                if left == right && left.is_numeric() {
                    left
                } else {
                    self.degrade(
                        DegradeKind::ArithmeticFallback,
                        format!("'{}' on {left} and {right} defaults to field", op.symbol()),
                        op_at,
                    );
                    Type::Field
                }
            }
            OpClass::Bitwise => {
                if left == right && left.is_integer() {
                    left
                } else {
                    self.degrade(
                        DegradeKind::BitwiseMismatch,
                        format!("'{}' needs equal integer operands, got {left} and {right}", op.symbol()),
                        op_at,
                    );
                    Type::Unknown
                }
            }
            OpClass::Logical => {
                if left == Type::Bool && right == Type::Bool {
                    Type::Bool
                } else {
                    self.degrade(
                        DegradeKind::LogicalMismatch,
                        format!("'{}' needs bool operands, got {left} and {right}", op.symbol()),
                        op_at,
                    );
                    Type::Unknown
                }
            }
            OpClass::Comparison => Type::Bool,
        }
    }

    /// Infers a function's return type by scanning forward from its
    /// `function`/`transition`/`inline` keyword.
    ///
    /// Brace depth is tracked; the first `return` at the body's own depth
    /// wins and its expression is inferred. Returns nested deeper than the
    /// body are not considered, and divergent returns across branches are
    /// not reconciled. No `return` before the body closes (or no body at
    /// all) yields `unknown`.
    pub fn infer_function_return_type(&mut self, tokens: &[Token], start: usize) -> Type {
        let mut depth = 0usize;
        let mut index = start;

        while index < tokens.len() {
            if self.cancelled() {
                return Type::Unknown;
            }
            match tokens[index].kind {
                TokenKind::LeftCurly => depth += 1,
                TokenKind::RightCurly => {
                    if depth > 0 {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                }
                TokenKind::Return if depth == 1 => {
                    return self.infer_type(tokens, index + 1).ty;
                }
                _ => {}
            }
            index += 1;
        }

        Type::Unknown
    }
}

/// Renders the consumed token range as display text: non-trivia token
/// texts joined with single spaces.
fn expression_text(tokens: &[Token], start: usize, end: usize) -> String {
    if start >= tokens.len() {
        return String::new();
    }
    let end = end.min(tokens.len() - 1);
    tokens[start..=end]
        .iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use leolens_syntax::tokenize;

    #[test]
    fn expression_text_skips_trivia() {
        let tokens = tokenize("1u8 + /* note */ 2u8");
        assert_eq!(expression_text(&tokens, 0, tokens.len() - 1), "1u8 + 2u8");
    }

    #[test]
    fn expression_text_is_total() {
        let tokens = tokenize("x");
        assert_eq!(expression_text(&tokens, 5, 9), "");
        assert_eq!(expression_text(&tokens, 0, 99), "x");
    }

    #[test]
    fn cancelled_return_scan_degrades_to_unknown() {
        let env = TypeEnv::new();
        let flag = Arc::new(AtomicBool::new(true));
        let mut engine = InferenceEngine::new(&env).with_cancel(flag);
        let tokens = tokenize("function f() { return 1u8; }");
        assert_eq!(
            engine.infer_function_return_type(&tokens, 0),
            Type::Unknown
        );
    }
}
