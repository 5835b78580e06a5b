//! `leolens tokens` — dump a file's token stream.

use std::fs;
use std::path::Path;

use anyhow::Context;
use termcolor::ColorChoice;

use leolens_syntax::Lexer;

use crate::output::StyledOutput;

pub fn execute(file: &Path, json: bool, color: ColorChoice) -> anyhow::Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let (tokens, skipped) = Lexer::new(&source).tokenize();

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    let mut out = StyledOutput::new(color);
    for token in &tokens {
        out.plain(&format!("{:<14} {:?}", format!("{:?}", token.kind), token.text));
    }
    if skipped.is_empty() {
        out.success(&format!("{} tokens", tokens.len()));
    } else {
        out.error(&format!(
            "{} tokens, {} unrecognized characters skipped",
            tokens.len(),
            skipped.len()
        ));
    }
    Ok(())
}
