//! `leolens check` — walk the whole document and report every inferred
//! binding, plus the degradation notes inference produced.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::json;
use termcolor::ColorChoice;

use leolens_ide::analyze_scope;
use leolens_infer::diagnostic;
use leolens_syntax::tokenize;
use leolens_types::TypeEnv;

use crate::output::StyledOutput;

pub fn execute(file: &Path, json: bool, color: ColorChoice) -> anyhow::Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let tokens = tokenize(&source);

    let mut env = TypeEnv::new();
    let analysis = analyze_scope(&tokens, source.len(), &mut env);

    let variables: BTreeMap<&str, &str> =
        env.variables().map(|(name, ty)| (name, ty.name())).collect();
    let functions: BTreeMap<&str, &str> = env
        .function_returns()
        .map(|(name, ty)| (name, ty.name()))
        .collect();

    if json {
        let report = json!({
            "variables": variables,
            "functions": functions,
            "diagnostics": analysis.diagnostics,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut out = StyledOutput::new(color);
    out.heading("variables");
    for (name, ty) in &variables {
        out.plain(&format!("  {name}: {ty}"));
    }
    out.heading("functions");
    for (name, ty) in &functions {
        out.plain(&format!("  {name}() -> {ty}"));
    }

    diagnostic::emit(
        &analysis.diagnostics,
        &file.display().to_string(),
        &source,
        &tokens,
        color,
    );

    out.success(&format!(
        "{} bindings, {} notes",
        variables.len() + functions.len(),
        analysis.diagnostics.len()
    ));
    Ok(())
}
