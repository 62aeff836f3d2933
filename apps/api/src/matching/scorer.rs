//! Match scoring: TV match rates against the baseline, unweighted TGV means,
//! and the weighted final match rate.

use serde::Serialize;

use crate::matching::baseline::BaselineSet;
use crate::matching::catalog::{Tgv, TALENT_VARIABLES};
use crate::matching::profile::EmployeeProfile;
use crate::matching::rules::EvaluatedEmployee;

pub const FULL_MATCH: f64 = 100.0;
pub const NO_MATCH: f64 = 0.0;

#[derive(Debug, Clone, Serialize)]
pub struct TvMatch {
    pub tgv_name: Tgv,
    pub tv_name: &'static str,
    pub user_score: u8,
    pub baseline_score: f64,
    pub tv_match_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TgvMatch {
    pub tgv_name: Tgv,
    pub tgv_match_rate: f64,
    pub member_count: usize,
}

/// Scoring outcome for one employee.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeMatch {
    pub profile: EmployeeProfile,
    pub tv_matches: Vec<TvMatch>,
    pub tgv_matches: Vec<TgvMatch>,
    /// `None` when any TGV has no scored member. See [`final_match_rate`].
    pub final_match_rate: Option<f64>,
}

impl EmployeeMatch {
    pub fn employee_id(&self) -> &str {
        &self.profile.employee_id
    }

    pub fn tgv_rate(&self, tgv: Tgv) -> Option<f64> {
        self.tgv_matches
            .iter()
            .find(|m| m.tgv_name == tgv)
            .map(|m| m.tgv_match_rate)
    }
}

/// Exact equality against a possibly fractional baseline. A 0.5 baseline never matches.
pub fn tv_match_rate(user_score: u8, baseline: f64) -> f64 {
    if f64::from(user_score) == baseline {
        FULL_MATCH
    } else {
        NO_MATCH
    }
}

/// Mean of member TV match rates per group, over the members that were scored.
/// Groups with no scored member are omitted.
pub fn tgv_match_rates(tv_matches: &[TvMatch]) -> Vec<TgvMatch> {
    Tgv::ALL
        .iter()
        .filter_map(|&tgv| {
            let rates: Vec<f64> = tgv
                .members()
                .filter_map(|tv| tv_matches.iter().find(|m| m.tv_name == tv.name))
                .map(|m| m.tv_match_rate)
                .collect();
            if rates.is_empty() {
                return None;
            }
            Some(TgvMatch {
                tgv_name: tgv,
                tgv_match_rate: rates.iter().sum::<f64>() / rates.len() as f64,
                member_count: rates.len(),
            })
        })
        .collect()
}

/// Fixed-weight sum of the four TGV rates, accumulated in report order.
/// Returns `None` if any group is absent rather than treating it as zero.
pub fn final_match_rate(tgv_matches: &[TgvMatch]) -> Option<f64> {
    Tgv::ALL.iter().try_fold(0.0, |acc, &tgv| {
        tgv_matches
            .iter()
            .find(|m| m.tgv_name == tgv)
            .map(|m| acc + m.tgv_match_rate * tgv.weight())
    })
}

/// Scores one employee. TVs without a baseline are skipped. Returns `None`
/// when no TV could be scored, so the employee has no match rows at all.
pub fn score_employee(employee: &EvaluatedEmployee, baselines: &BaselineSet) -> Option<EmployeeMatch> {
    let tv_matches: Vec<TvMatch> = TALENT_VARIABLES
        .iter()
        .enumerate()
        .filter_map(|(index, tv)| {
            let baseline_score = baselines.get(index)?;
            let user_score = employee.scores[index];
            Some(TvMatch {
                tgv_name: tv.tgv,
                tv_name: tv.name,
                user_score,
                baseline_score,
                tv_match_rate: tv_match_rate(user_score, baseline_score),
            })
        })
        .collect();

    if tv_matches.is_empty() {
        return None;
    }

    let tgv_matches = tgv_match_rates(&tv_matches);
    let final_match_rate = final_match_rate(&tgv_matches);

    Some(EmployeeMatch {
        profile: employee.profile.clone(),
        tv_matches,
        tgv_matches,
        final_match_rate,
    })
}
