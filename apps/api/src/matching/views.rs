//! Presentation-ready slices of a scoring run: the ranked candidate list, the
//! per-candidate TGV comparison against the benchmarks, the TV strengths/gaps
//! breakdown and the final-rate distribution.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::matching::catalog::Tgv;
use crate::matching::pipeline::TalentMatchResult;

const DISTRIBUTION_BIN_WIDTH: f64 = 5.0;
const DISTRIBUTION_MAX: f64 = 100.0;

/// Drill-down candidates offered from the top of the ranked list.
pub const DEFAULT_SHORTLIST: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub employee_id: String,
    pub fullname: String,
    pub role: Option<String>,
    pub final_match_rate: f64,
    pub is_benchmark: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TgvComparison {
    pub tgv_name: Tgv,
    pub candidate_match_rate: f64,
    /// Mean of the benchmark employees' own TGV match rates. `None` when no
    /// benchmark employee was scored.
    pub benchmark_match_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TvBreakdown {
    pub tgv_name: Tgv,
    pub tv_name: &'static str,
    pub user_score: u8,
    pub baseline_score: f64,
    pub tv_match_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// One row per employee with a final match rate, highest first, identifier
/// ascending on ties. Employees whose final rate is undefined are left out;
/// see [`unscored_ids`].
pub fn ranked_list(result: &TalentMatchResult, exclude_benchmarks: bool) -> Vec<RankedCandidate> {
    let mut seen = BTreeSet::new();
    result
        .employees
        .iter()
        .filter(|e| seen.insert(e.employee_id()))
        .filter(|e| !(exclude_benchmarks && result.is_benchmark(e.employee_id())))
        .filter_map(|e| e.final_match_rate.map(|rate| (e, rate)))
        .enumerate()
        .map(|(i, (e, final_match_rate))| RankedCandidate {
            rank: i + 1,
            employee_id: e.profile.employee_id.clone(),
            fullname: e.profile.fullname.clone(),
            role: e.profile.role.clone(),
            final_match_rate,
            is_benchmark: result.is_benchmark(e.employee_id()),
        })
        .collect()
}

/// Scored employees whose final match rate is undefined because a whole TGV is missing.
pub fn unscored_ids(result: &TalentMatchResult) -> Vec<String> {
    result
        .employees
        .iter()
        .filter(|e| e.final_match_rate.is_none())
        .map(|e| e.profile.employee_id.clone())
        .collect()
}

/// Candidate TGV rates against the benchmark group's mean TGV rates.
/// Only groups the candidate was scored on are listed.
pub fn tgv_comparison(result: &TalentMatchResult, employee_id: &str) -> Option<Vec<TgvComparison>> {
    let candidate = result.employee(employee_id)?;
    let benchmarks: Vec<_> = result
        .employees
        .iter()
        .filter(|e| result.is_benchmark(e.employee_id()))
        .collect();

    let comparison = Tgv::ALL
        .iter()
        .filter_map(|&tgv| {
            let candidate_match_rate = candidate.tgv_rate(tgv)?;
            let rates: Vec<f64> = benchmarks.iter().filter_map(|b| b.tgv_rate(tgv)).collect();
            let benchmark_match_rate = if rates.is_empty() {
                None
            } else {
                Some(rates.iter().sum::<f64>() / rates.len() as f64)
            };
            Some(TgvComparison {
                tgv_name: tgv,
                candidate_match_rate,
                benchmark_match_rate,
            })
        })
        .collect();
    Some(comparison)
}

/// The candidate's TV match rates, lowest first so the largest gaps lead.
/// Equal rates keep report order.
pub fn strengths_and_gaps(result: &TalentMatchResult, employee_id: &str) -> Option<Vec<TvBreakdown>> {
    let candidate = result.employee(employee_id)?;
    let mut breakdown: Vec<TvBreakdown> = candidate
        .tv_matches
        .iter()
        .map(|m| TvBreakdown {
            tgv_name: m.tgv_name,
            tv_name: m.tv_name,
            user_score: m.user_score,
            baseline_score: m.baseline_score,
            tv_match_rate: m.tv_match_rate,
        })
        .collect();
    breakdown.sort_by(|a, b| {
        a.tgv_name
            .cmp(&b.tgv_name)
            .then_with(|| a.tv_name.cmp(b.tv_name))
    });
    breakdown.sort_by(|a, b| a.tv_match_rate.total_cmp(&b.tv_match_rate));
    Some(breakdown)
}

/// Histogram of final match rates in 5-point bins over [0, 100]. A rate of
/// exactly 100 falls in the last bin.
pub fn match_rate_distribution(ranked: &[RankedCandidate]) -> Vec<DistributionBin> {
    let bin_count = (DISTRIBUTION_MAX / DISTRIBUTION_BIN_WIDTH) as usize;
    let mut bins: Vec<DistributionBin> = (0..bin_count)
        .map(|i| DistributionBin {
            lower: i as f64 * DISTRIBUTION_BIN_WIDTH,
            upper: (i + 1) as f64 * DISTRIBUTION_BIN_WIDTH,
            count: 0,
        })
        .collect();

    for candidate in ranked {
        let rate = candidate.final_match_rate.clamp(0.0, DISTRIBUTION_MAX);
        let index = ((rate / DISTRIBUTION_BIN_WIDTH).floor() as usize).min(bin_count - 1);
        bins[index].count += 1;
    }
    bins
}
