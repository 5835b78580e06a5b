//! `leolens complete` — list completion items at a byte offset.

use std::fs;
use std::path::Path;

use anyhow::Context;

use leolens_ide::CompletionProvider;

pub fn execute(file: &Path, at: usize, json: bool) -> anyhow::Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;

    let mut provider = CompletionProvider::new();
    let items = provider.complete(&source, at);

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    for item in &items {
        match &item.detail {
            Some(detail) => println!("{:?}\t{}\t{}", item.kind, item.label, detail),
            None => println!("{:?}\t{}", item.kind, item.label),
        }
    }
    Ok(())
}
