//! Axum route handlers for the Talent Match API.

use std::collections::BTreeSet;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::baseline::BaselineEntry;
use crate::matching::pipeline::{fetch_talent_data, TalentMatchRow};
use crate::matching::views::{
    match_rate_distribution, ranked_list, strengths_and_gaps, tgv_comparison, unscored_ids,
    DistributionBin, RankedCandidate, TgvComparison, TvBreakdown, DEFAULT_SHORTLIST,
};
use crate::state::AppState;

pub const MAX_BENCHMARKS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TalentMatchRequest {
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub job_level: Option<String>,
    #[serde(default)]
    pub role_purpose: Option<String>,
    pub benchmark_ids: Vec<String>,
    #[serde(default)]
    pub exclude_benchmarks: bool,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Role context supplied by the caller. Echoed back; scoring does not use it.
#[derive(Debug, Serialize)]
pub struct RoleContext {
    pub role_name: Option<String>,
    pub job_level: Option<String>,
    pub role_purpose: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TalentMatchResponse {
    pub role: RoleContext,
    pub benchmark_ids: Vec<String>,
    pub missing_benchmark_ids: Vec<String>,
    pub baselines: Vec<BaselineEntry>,
    pub ranked: Vec<RankedCandidate>,
    /// Top identifiers offered for per-candidate drill-down.
    pub shortlist: Vec<String>,
    pub distribution: Vec<DistributionBin>,
    pub unscored_ids: Vec<String>,
    pub rows: Vec<TalentMatchRow>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateDetailRequest {
    pub benchmark_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CandidateDetailResponse {
    pub employee_id: String,
    pub fullname: String,
    pub final_match_rate: Option<f64>,
    pub is_benchmark: bool,
    pub tgv_comparison: Vec<TgvComparison>,
    pub tv_breakdown: Vec<TvBreakdown>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/talent-match
///
/// Scores the whole population against 1–3 benchmark employees and returns
/// the ranked list, the distribution and the flattened per-TV rows.
pub async fn handle_talent_match(
    State(state): State<AppState>,
    Json(request): Json<TalentMatchRequest>,
) -> Result<Json<TalentMatchResponse>, AppError> {
    let benchmark_ids = validate_benchmark_ids(&request.benchmark_ids)?;
    let result = fetch_talent_data(state.store.as_ref(), &benchmark_ids).await?;

    let mut ranked = ranked_list(&result, request.exclude_benchmarks);
    let distribution = match_rate_distribution(&ranked);
    let shortlist = ranked
        .iter()
        .take(DEFAULT_SHORTLIST)
        .map(|r| r.employee_id.clone())
        .collect();
    if let Some(limit) = request.limit {
        ranked.truncate(limit);
    }

    Ok(Json(TalentMatchResponse {
        role: RoleContext {
            role_name: request.role_name,
            job_level: request.job_level,
            role_purpose: request.role_purpose,
        },
        benchmark_ids: result.benchmark_ids.clone(),
        missing_benchmark_ids: result.missing_benchmark_ids.clone(),
        baselines: result.baselines.clone(),
        ranked,
        shortlist,
        distribution,
        unscored_ids: unscored_ids(&result),
        rows: result.rows(),
        generated_at: Utc::now(),
    }))
}

/// POST /api/v1/talent-match/candidates/:employee_id
///
/// TGV comparison against the benchmark mean and the TV strengths/gaps list
/// for one scored employee.
pub async fn handle_candidate_detail(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Json(request): Json<CandidateDetailRequest>,
) -> Result<Json<CandidateDetailResponse>, AppError> {
    let benchmark_ids = validate_benchmark_ids(&request.benchmark_ids)?;
    let result = fetch_talent_data(state.store.as_ref(), &benchmark_ids).await?;

    let candidate = result
        .employee(&employee_id)
        .ok_or_else(|| AppError::NotFound(format!("Employee {employee_id} was not scored")))?;
    let tgv_comparison = tgv_comparison(&result, &employee_id).unwrap_or_default();
    let tv_breakdown = strengths_and_gaps(&result, &employee_id).unwrap_or_default();

    Ok(Json(CandidateDetailResponse {
        employee_id: candidate.profile.employee_id.clone(),
        fullname: candidate.profile.fullname.clone(),
        final_match_rate: candidate.final_match_rate,
        is_benchmark: result.is_benchmark(&employee_id),
        tgv_comparison,
        tv_breakdown,
    }))
}

/// Trims, de-duplicates and bounds the benchmark set to 1–3 identifiers.
pub fn validate_benchmark_ids(ids: &[String]) -> Result<Vec<String>, AppError> {
    if ids.iter().any(|id| id.trim().is_empty()) {
        return Err(AppError::Validation(
            "benchmark_ids cannot contain blank identifiers".to_string(),
        ));
    }
    let unique: BTreeSet<String> = ids.iter().map(|id| id.trim().to_string()).collect();
    if unique.is_empty() {
        return Err(AppError::Validation(
            "Select at least one benchmark employee".to_string(),
        ));
    }
    if unique.len() > MAX_BENCHMARKS {
        return Err(AppError::Validation(format!(
            "At most {MAX_BENCHMARKS} benchmark employees may be selected, got {}",
            unique.len()
        )));
    }
    Ok(unique.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_validate_rejects_empty_set() {
        assert!(matches!(
            validate_benchmark_ids(&[]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_identifier() {
        assert!(validate_benchmark_ids(&ids(&["E1", "  "])).is_err());
    }

    #[test]
    fn test_validate_rejects_more_than_three() {
        assert!(validate_benchmark_ids(&ids(&["E1", "E2", "E3", "E4"])).is_err());
    }

    #[test]
    fn test_validate_dedupes_before_counting() {
        let ok = validate_benchmark_ids(&ids(&["E2", " E1", "E1", "E3", "E2"])).unwrap();
        assert_eq!(ok, ids(&["E1", "E2", "E3"]));
    }
}
