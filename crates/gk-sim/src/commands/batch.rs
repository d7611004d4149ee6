use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use gk_rule::{build_batch, BatchConfig, RuleReport};
use serde_json::json;

use crate::{print_json, write_json};

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Batch configuration listing the rules to build.
    #[arg(long)]
    pub config: PathBuf,
    /// Output directory for per-rule reports and the summary.
    #[arg(long)]
    pub out: PathBuf,
    /// Worker threads; defaults to the value in the batch file.
    #[arg(long)]
    pub threads: Option<usize>,
}

pub fn run(args: &BatchArgs) -> Result<(), Box<dyn Error>> {
    let batch = BatchConfig::load(&args.config)?;
    fs::create_dir_all(&args.out)?;
    let threads = args.threads.unwrap_or(batch.threads);
    let results = build_batch(&batch.rules, threads)?;

    let mut entries = Vec::with_capacity(results.len());
    for (index, result) in results.iter().enumerate() {
        match result {
            Ok(outcome) => {
                let report = RuleReport::from_outcome(outcome)?;
                write_json(args.out.join(format!("rule_{index:03}.json")), &report)?;
                entries.push(json!({
                    "index": index,
                    "status": "complete",
                    "hash": report.hash,
                    "node_count": report.node_count,
                }));
            }
            Err(err) => entries.push(json!({
                "index": index,
                "status": "failed",
                "error": err,
            })),
        }
    }
    let summary = json!({
        "threads": threads.max(1),
        "rules": entries,
    });
    write_json(args.out.join("summary.json"), &summary)?;
    print_json(&summary)
}
