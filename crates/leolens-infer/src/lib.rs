//! Leo Type Inference
//!
//! Best-effort, token-stream-driven type inference for editor tooling.
//! Inference runs in two passes: a scanner builds a small expression tree
//! straight from the token stream (reporting where the expression ends so
//! callers can resume), and a typing pass resolves the tree against a
//! caller-owned [`leolens_types::TypeEnv`].
//!
//! Nothing here fails. Unresolvable or unmodeled constructs degrade to
//! `unknown` (or `field`, for mismatched arithmetic), and every degradation
//! is mirrored on a non-fatal diagnostics channel so tooling can tell
//! "legitimately unknown" from "the engine gave up".

#![warn(missing_docs)]

pub mod diagnostic;
pub mod engine;
pub mod expr;

pub use diagnostic::{DegradeKind, Diagnostic};
pub use engine::{Inference, InferenceEngine};
pub use expr::{scan_expression, BinaryOp, Expr, OpClass, ScannedExpr};
