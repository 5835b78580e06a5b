//! Non-fatal degradation diagnostics.
//!
//! Best-effort inference never errors, but it does give up: an unbound
//! name, a mismatched arithmetic operation, a construct the engine does
//! not model. Each such event is recorded as a [`Diagnostic`] pointing at
//! the token where it happened. These are notes, not errors — callers may
//! ignore them entirely.

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label, Severity};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use serde::Serialize;

use leolens_syntax::{span_of, Token};

/// Why the engine degraded to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradeKind {
    /// An identifier had no entry in the bindings context.
    UnboundIdentifier,
    /// A called function had no recorded return type.
    UnknownCallee,
    /// Array elements disagreed on a type; the element type collapsed.
    MixedArrayElements,
    /// Arithmetic on unequal or non-numeric operands defaulted to `field`.
    ArithmeticFallback,
    /// Bitwise operands were not equal fixed-width integers.
    BitwiseMismatch,
    /// Logical operands were not both `bool`.
    LogicalMismatch,
    /// The token at the start of the expression is not a modeled form.
    UnsupportedToken,
}

impl DegradeKind {
    /// Short label used when rendering with source context.
    pub fn label(self) -> &'static str {
        match self {
            DegradeKind::UnboundIdentifier => "unbound identifier",
            DegradeKind::UnknownCallee => "return type not yet known",
            DegradeKind::MixedArrayElements => "mixed element types",
            DegradeKind::ArithmeticFallback => "defaulted to field",
            DegradeKind::BitwiseMismatch => "bitwise operands mismatch",
            DegradeKind::LogicalMismatch => "logical operands mismatch",
            DegradeKind::UnsupportedToken => "not modeled",
        }
    }
}

/// A single degradation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// What kind of degradation happened.
    pub kind: DegradeKind,
    /// Human-readable description.
    pub message: String,
    /// Index of the token the event is anchored to.
    pub token_index: usize,
}

impl Diagnostic {
    /// Creates a diagnostic anchored to a token index.
    pub fn new(kind: DegradeKind, message: impl Into<String>, token_index: usize) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            token_index,
        }
    }
}

/// Renders diagnostics to stderr with source context.
///
/// Token positions are recovered by summing literal lengths, so on inputs
/// where the lexer skipped characters the underline can be shifted left by
/// the skipped bytes. All diagnostics render as notes.
pub fn emit(
    diagnostics: &[Diagnostic],
    file_name: &str,
    source: &str,
    tokens: &[Token],
    color: ColorChoice,
) {
    let mut files = SimpleFiles::new();
    let file_id = files.add(file_name, source);
    let writer = StandardStream::stderr(color);
    let config = term::Config::default();

    for diagnostic in diagnostics {
        let range = span_of(tokens, diagnostic.token_index);
        let rendered = CsDiagnostic::new(Severity::Note)
            .with_message(diagnostic.message.clone())
            .with_labels(vec![
                Label::primary(file_id, range).with_message(diagnostic.kind.label())
            ]);
        let _ = term::emit(&mut writer.lock(), &config, &files, &rendered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_carries_anchor() {
        let d = Diagnostic::new(DegradeKind::UnboundIdentifier, "no type for 'x'", 4);
        assert_eq!(d.kind, DegradeKind::UnboundIdentifier);
        assert_eq!(d.token_index, 4);
        assert_eq!(d.kind.label(), "unbound identifier");
    }
}
