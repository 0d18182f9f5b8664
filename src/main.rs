mod cli;

use std::{fs, io::Read};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cli::{Action, Cli, Format, Output};
use grammar_craft::{Grammar, NameAllocator, Tokenizer};

fn read_input(cli: &Cli) -> Result<String> {
    match &cli.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let input = read_input(&cli)?;
    let tokenizer = Tokenizer::with_terminals(cli.terminals.iter().cloned());

    let mut g = Grammar::parse_with(&input, &tokenizer)?;

    let mut names = NameAllocator::new();
    for action in &cli.actions {
        info!("applying {:?}", action);
        match action {
            Action::Elr => g.eliminate_left_recursion_with(&mut names),
            Action::Lf => g.left_factor_with(&mut names),
        }
    }

    for output in &cli.outputs {
        match output {
            Output::Prod => {
                let t = g.to_production_output_vec();
                println!(
                    "{}",
                    match cli.format {
                        Format::Plain => t.to_plaintext(),
                        Format::Latex => t.to_latex(),
                        Format::Json => t.to_json()?,
                    }
                );
            }
            Output::Ff => {
                let sets = g.calculate_first_follow_within(cli.max_follow_passes)?;
                let t = g.to_non_terminal_output_vec(&sets);
                println!(
                    "{}",
                    match cli.format {
                        Format::Plain => t.to_plaintext(),
                        Format::Latex => t.to_latex(),
                        Format::Json => t.to_json()?,
                    }
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
