use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use grammar_craft::grammar::MAX_FOLLOW_PASSES;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// What to print: productions and/or FIRST and FOLLOW sets
    #[arg(value_enum, required = true)]
    pub outputs: Vec<Output>,

    /// Transformation to apply before printing, repeatable, applied in order
    #[arg(short, long = "action", value_enum, value_name = "ACTION")]
    pub actions: Vec<Action>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Plain)]
    pub format: Format,

    /// Multi-character terminals, comma separated (e.g. `id,num`)
    #[arg(short, long, value_delimiter = ',', value_name = "TERMINALS")]
    pub terminals: Vec<String>,

    /// Give up on FOLLOW sets after this many passes
    #[arg(long, value_name = "N", default_value_t = MAX_FOLLOW_PASSES)]
    pub max_follow_passes: usize,

    /// File containing the grammar (default: stdin)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Eliminate left recursion
    Elr,
    /// Left factor
    Lf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Output {
    /// Productions
    Prod,
    /// FIRST and FOLLOW sets
    Ff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Plain,
    Latex,
    Json,
}
