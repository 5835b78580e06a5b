//! `leolens fmt` — format a source file.

use std::fs;
use std::path::Path;

use anyhow::Context;
use termcolor::ColorChoice;

use leolens_ide::{FormatConfig, Formatter};

use crate::output::StyledOutput;

pub fn execute(
    file: &Path,
    write: bool,
    check: bool,
    config: Option<&Path>,
    color: ColorChoice,
) -> anyhow::Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;

    let config = match config {
        Some(path) => FormatConfig::load(path)
            .with_context(|| format!("cannot load {}", path.display()))?,
        None => FormatConfig::default(),
    };

    let formatted = Formatter::new(config).format(&source);
    let mut out = StyledOutput::new(color);

    if check {
        if formatted == source {
            out.success(&format!("{} is formatted", file.display()));
            return Ok(());
        }
        out.error(&format!("{} would be reformatted", file.display()));
        // match the usual formatter convention: non-zero exit in check mode
        std::process::exit(1);
    }

    if write {
        fs::write(file, &formatted)
            .with_context(|| format!("cannot write {}", file.display()))?;
        out.success(&format!("formatted {}", file.display()));
    } else {
        print!("{formatted}");
    }
    Ok(())
}
