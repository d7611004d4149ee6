use gk_core::errors::{ErrorInfo, GkError};
use rayon::prelude::*;

use crate::config::RuleConfig;
use crate::driver::{build_rule, RuleOutcome};

/// Builds every configuration on a `threads`-wide pool.
///
/// Results come back in input order; one failing rule does not stop the
/// others. The outer error only reports a pool that could not be created.
pub fn build_batch(
    configs: &[RuleConfig],
    threads: usize,
) -> Result<Vec<Result<RuleOutcome, GkError>>, GkError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .map_err(|err| GkError::Config(ErrorInfo::new("thread-pool", err.to_string())))?;

    let mut ordered: Vec<(usize, Result<RuleOutcome, GkError>)> = pool.install(|| {
        configs
            .par_iter()
            .enumerate()
            .map(|(index, config)| (index, build_rule(config)))
            .collect()
    });
    ordered.sort_by_key(|(index, _)| *index);
    Ok(ordered.into_iter().map(|(_, outcome)| outcome).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gk_family::Family;

    #[test]
    fn results_keep_input_order() {
        let configs: Vec<RuleConfig> = [Family::HermitePro, Family::Legendre, Family::ChebyshevT]
            .into_iter()
            .map(|family| RuleConfig {
                family,
                levels: vec![1, 2],
                dimension: 2,
                level: 1,
                ..RuleConfig::default()
            })
            .chain(std::iter::once(RuleConfig {
                dimension: 0,
                ..RuleConfig::default()
            }))
            .collect();
        let results = build_batch(&configs, 3).expect("pool");
        assert_eq!(results.len(), 4);
        for (config, result) in configs.iter().zip(&results).take(3) {
            assert_eq!(result.as_ref().expect("rule").config.family, config.family);
        }
        assert_eq!(results[3].as_ref().unwrap_err().code(), "zero-dimension");
    }

    #[test]
    fn parallel_and_serial_runs_agree() {
        let configs = vec![
            RuleConfig {
                levels: vec![1, 2, 6],
                dimension: 3,
                level: 2,
                ..RuleConfig::default()
            };
            2
        ];
        let serial = build_batch(&configs, 1).expect("pool");
        let parallel = build_batch(&configs, 2).expect("pool");
        assert_eq!(serial, parallel);
    }
}
