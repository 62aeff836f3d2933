use std::collections::BTreeSet;

use serde::Serialize;

use crate::matching::catalog::{Tgv, TALENT_VARIABLES, TV_COUNT};
use crate::matching::rules::EvaluatedEmployee;

/// Baseline for one TV as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineEntry {
    pub tgv_name: Tgv,
    pub tv_name: &'static str,
    pub baseline_score: f64,
}

/// Per-TV medians over the benchmark employees that were found in the scored population.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaselineSet {
    values: [Option<f64>; TV_COUNT],
    /// Benchmark identifiers that contributed, ascending.
    pub resolved_ids: Vec<String>,
    /// Requested identifiers with no scored employee behind them, ascending.
    pub missing_ids: Vec<String>,
}

impl BaselineSet {
    pub fn get(&self, tv_index: usize) -> Option<f64> {
        self.values.get(tv_index).copied().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn entries(&self) -> Vec<BaselineEntry> {
        TALENT_VARIABLES
            .iter()
            .zip(self.values.iter())
            .filter_map(|(tv, value)| {
                value.map(|baseline_score| BaselineEntry {
                    tgv_name: tv.tgv,
                    tv_name: tv.name,
                    baseline_score,
                })
            })
            .collect()
    }
}

/// Continuous percentile with linear interpolation between the two closest ranks.
/// `fraction` is in [0, 1]. Returns `None` for an empty input.
pub fn percentile_cont(values: &[f64], fraction: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let position = fraction.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

pub fn median(values: &[f64]) -> Option<f64> {
    percentile_cont(values, 0.5)
}

/// Computes the baseline for every TV from the benchmark subset only.
///
/// An even-sized benchmark set that splits on a TV yields 0.5 for it. That
/// value is kept as-is: no binary score can equal it, so the TV is unmatchable
/// for that run.
pub fn compute_baselines(
    population: &[EvaluatedEmployee],
    benchmark_ids: &BTreeSet<String>,
) -> BaselineSet {
    let benchmarks: Vec<&EvaluatedEmployee> = population
        .iter()
        .filter(|e| benchmark_ids.contains(&e.profile.employee_id))
        .collect();

    let resolved_ids: Vec<String> = benchmarks
        .iter()
        .map(|e| e.profile.employee_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let missing_ids = benchmark_ids
        .iter()
        .filter(|id| !resolved_ids.contains(id))
        .cloned()
        .collect();

    let mut values = [None; TV_COUNT];
    for (index, slot) in values.iter_mut().enumerate() {
        let column: Vec<f64> = benchmarks
            .iter()
            .map(|e| f64::from(e.scores[index]))
            .collect();
        *slot = median(&column);
    }

    BaselineSet {
        values,
        resolved_ids,
        missing_ids,
    }
}
