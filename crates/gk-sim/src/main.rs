use std::error::Error;
use std::fs;
use std::path::Path;

use clap::{Parser, Subcommand};
use commands::{
    batch::{self, BatchArgs},
    generators::{self, GeneratorsArgs},
    rule::{self, RuleArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "gk-sim", about = "Genz-Keister sparse-grid rule builder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the nested generators described by a rule configuration.
    Generators(GeneratorsArgs),
    /// Build and verify a single rule.
    Rule(RuleArgs),
    /// Build several independent rules in parallel.
    Batch(BatchArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generators(args) => generators::run(&args),
        Command::Rule(args) => rule::run(&args),
        Command::Batch(args) => batch::run(&args),
    };
    if let Err(err) = result {
        eprintln!("gk-sim: {err}");
        std::process::exit(1);
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    let bytes = gk_core::to_canonical_json_bytes(value)?;
    println!("{}", String::from_utf8(bytes)?);
    Ok(())
}

fn write_json<P: AsRef<Path>, T: serde::Serialize>(path: P, value: &T) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
