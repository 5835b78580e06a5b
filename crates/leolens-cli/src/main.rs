//! Leolens CLI
//!
//! Command-line front end for the analysis toolkit: token dumps, whole-file
//! binding analysis, point inference, completion queries, and formatting.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "leolens")]
#[command(about = "Editor analysis toolkit for the Leo programming language", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Color output: auto, always, never
    #[arg(long, global = true)]
    color: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a file's token stream
    Tokens {
        /// Input file
        file: PathBuf,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Analyze declarations and report every inferred binding
    Check {
        /// Input file
        file: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Infer the type of the expression at a byte offset
    Infer {
        /// Input file
        file: PathBuf,
        /// Byte offset of the expression start
        #[arg(long)]
        at: usize,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List completions at a byte offset
    Complete {
        /// Input file
        file: PathBuf,
        /// Byte offset of the cursor
        #[arg(long)]
        at: usize,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Format a file
    Fmt {
        /// Input file
        file: PathBuf,
        /// Rewrite the file in place
        #[arg(long)]
        write: bool,
        /// Exit non-zero if the file is not formatted
        #[arg(long)]
        check: bool,
        /// Formatter configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let color = output::resolve_color_choice(cli.color.as_deref());

    match cli.command {
        Commands::Tokens { file, json } => commands::tokens::execute(&file, json, color),
        Commands::Check { file, json } => commands::check::execute(&file, json, color),
        Commands::Infer { file, at, json } => commands::infer::execute(&file, at, json, color),
        Commands::Complete { file, at, json } => commands::complete::execute(&file, at, json),
        Commands::Fmt {
            file,
            write,
            check,
            config,
        } => commands::fmt::execute(&file, write, check, config.as_deref(), color),
    }
}
