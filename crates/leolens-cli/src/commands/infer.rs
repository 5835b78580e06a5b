//! `leolens infer` — infer the type of the expression at a byte offset.
//!
//! The document is walked up to the offset first so that bindings declared
//! before the expression are available, mirroring how the editor drives
//! the engine.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::json;
use termcolor::ColorChoice;

use leolens_ide::analyze_scope;
use leolens_infer::{diagnostic, InferenceEngine};
use leolens_syntax::{token_at_offset, tokenize};
use leolens_types::TypeEnv;

use crate::output::StyledOutput;

pub fn execute(file: &Path, at: usize, json: bool, color: ColorChoice) -> anyhow::Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let tokens = tokenize(&source);

    let mut env = TypeEnv::new();
    analyze_scope(&tokens, at, &mut env);

    let index = token_at_offset(&tokens, at).unwrap_or(tokens.len().saturating_sub(1));
    let mut engine = InferenceEngine::new(&env);
    let inference = engine.infer_type(&tokens, index);

    if json {
        let report = json!({
            "type": inference.ty,
            "expression": inference.text,
            "end_index": inference.end,
            "diagnostics": engine.diagnostics(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut out = StyledOutput::new(color);
    out.plain(&format!("{} : {}", inference.text, inference.ty));
    diagnostic::emit(
        engine.diagnostics(),
        &file.display().to_string(),
        &source,
        &tokens,
        color,
    );
    Ok(())
}
