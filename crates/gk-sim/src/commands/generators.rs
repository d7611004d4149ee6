use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use gk_rule::{compute_generators_with, GeneratorReport, RuleConfig};

use crate::print_json;

#[derive(Args, Debug)]
pub struct GeneratorsArgs {
    /// Rule configuration (YAML, or JSON by extension).
    #[arg(long)]
    pub config: PathBuf,
    /// Override the configured working precision in bits.
    #[arg(long)]
    pub prec: Option<u32>,
}

pub fn run(args: &GeneratorsArgs) -> Result<(), Box<dyn Error>> {
    let config = RuleConfig::load(&args.config)?;
    let prec = args.prec.unwrap_or(config.working_prec);
    let list = compute_generators_with(
        &config.family,
        &config.levels,
        prec,
        config.extension_criteria(),
    )?;
    let report = GeneratorReport::new(config.family, &list)?;
    print_json(&report)
}
