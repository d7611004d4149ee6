use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use gk_rule::{build_rule, RuleConfig, RuleReport};

use crate::{print_json, write_json};

#[derive(Args, Debug)]
pub struct RuleArgs {
    /// Rule configuration (YAML, or JSON by extension).
    #[arg(long)]
    pub config: PathBuf,
    /// Where to write the full outcome, balls included.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &RuleArgs) -> Result<(), Box<dyn Error>> {
    let config = RuleConfig::load(&args.config)?;
    let outcome = build_rule(&config)?;
    if !outcome.generators.is_complete() {
        eprintln!(
            "gk-sim: extension stopped after {} of {} levels",
            outcome.generators.levels_completed(),
            config.levels.len()
        );
    }
    if let Some(out) = &args.out {
        write_json(out, &outcome)?;
    }
    print_json(&RuleReport::from_outcome(&outcome)?)
}
