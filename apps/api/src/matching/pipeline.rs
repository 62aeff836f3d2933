//! End-to-end scoring run: profiles → TV rules → benchmark baselines → match
//! rates, flattened into one row per (employee, TV).

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::baseline::{compute_baselines, BaselineEntry};
use crate::matching::catalog::{Tgv, TV_COUNT};
use crate::matching::profile::build_profiles;
use crate::matching::rules::evaluate_population;
use crate::matching::scorer::{score_employee, EmployeeMatch};
use crate::models::employee::PopulationSnapshot;
use crate::store::AttributeStore;

/// One flattened output row. TGV and final rates repeat across an employee's rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalentMatchRow {
    pub employee_id: String,
    pub fullname: String,
    pub directorate: Option<String>,
    pub role: Option<String>,
    pub grade: Option<String>,
    pub tgv_name: Tgv,
    pub tv_name: &'static str,
    pub baseline_score: f64,
    pub user_score: u8,
    pub tv_match_rate: f64,
    pub tgv_match_rate: f64,
    pub final_match_rate: Option<f64>,
    pub is_benchmark: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TalentMatchResult {
    pub benchmark_ids: Vec<String>,
    pub missing_benchmark_ids: Vec<String>,
    pub baselines: Vec<BaselineEntry>,
    /// Scored employees, highest final rate first, then identifier ascending.
    /// Employees with no final rate sort last.
    pub employees: Vec<EmployeeMatch>,
}

impl TalentMatchResult {
    pub fn is_benchmark(&self, employee_id: &str) -> bool {
        self.benchmark_ids.iter().any(|id| id == employee_id)
    }

    pub fn employee(&self, employee_id: &str) -> Option<&EmployeeMatch> {
        self.employees.iter().find(|e| e.employee_id() == employee_id)
    }

    /// Flattened rows ordered by final rate, identifier, TGV report order, then TV name.
    pub fn rows(&self) -> Vec<TalentMatchRow> {
        let mut rows = Vec::with_capacity(self.employees.len() * TV_COUNT);
        for employee in &self.employees {
            let is_benchmark = self.is_benchmark(employee.employee_id());
            let mut tv_matches: Vec<_> = employee.tv_matches.iter().collect();
            tv_matches.sort_by(|a, b| {
                a.tgv_name
                    .cmp(&b.tgv_name)
                    .then_with(|| a.tv_name.cmp(b.tv_name))
            });
            for tv in tv_matches {
                let Some(tgv_match_rate) = employee.tgv_rate(tv.tgv_name) else {
                    continue;
                };
                let profile = &employee.profile;
                rows.push(TalentMatchRow {
                    employee_id: profile.employee_id.clone(),
                    fullname: profile.fullname.clone(),
                    directorate: profile.directorate.clone(),
                    role: profile.role.clone(),
                    grade: profile.grade.clone(),
                    tgv_name: tv.tgv_name,
                    tv_name: tv.tv_name,
                    baseline_score: tv.baseline_score,
                    user_score: tv.user_score,
                    tv_match_rate: tv.tv_match_rate,
                    tgv_match_rate,
                    final_match_rate: employee.final_match_rate,
                    is_benchmark,
                });
            }
        }
        rows
    }
}

/// Descending by final rate with missing rates last, then identifier ascending.
pub fn compare_by_final_rate(a: &EmployeeMatch, b: &EmployeeMatch) -> Ordering {
    let by_rate = match (a.final_match_rate, b.final_match_rate) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_rate.then_with(|| a.employee_id().cmp(b.employee_id()))
}

/// Runs the scoring pipeline over a snapshot. Pure: the same snapshot and
/// benchmark set always produce the same result.
///
/// An empty benchmark set, or one where no identifier resolves to a scored
/// employee, produces an empty result.
pub fn run_talent_match(snapshot: &PopulationSnapshot, benchmark_ids: &[String]) -> TalentMatchResult {
    let requested: BTreeSet<String> = benchmark_ids
        .iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    if requested.is_empty() {
        return TalentMatchResult::default();
    }

    let population = evaluate_population(build_profiles(snapshot));
    debug!(
        "Evaluated {} of {} employees",
        population.len(),
        snapshot.employees.len()
    );

    let baselines = compute_baselines(&population, &requested);
    if baselines.is_empty() {
        warn!("No benchmark employee resolved; nothing can be scored");
    }
    if !baselines.missing_ids.is_empty() {
        warn!(
            "Benchmark identifiers not in the scored population: {}",
            baselines.missing_ids.join(", ")
        );
    }

    let mut employees: Vec<EmployeeMatch> = population
        .iter()
        .filter_map(|e| score_employee(e, &baselines))
        .collect();
    employees.sort_by(compare_by_final_rate);

    let unscored = employees
        .iter()
        .filter(|e| e.final_match_rate.is_none())
        .count();
    if unscored > 0 {
        warn!("{unscored} employees have no final match rate (missing talent group)");
    }

    TalentMatchResult {
        benchmark_ids: baselines.resolved_ids.clone(),
        missing_benchmark_ids: baselines.missing_ids.clone(),
        baselines: baselines.entries(),
        employees,
    }
}

/// Fetches a population snapshot from the store and scores it.
///
/// Returns an empty result without touching the store when the benchmark set
/// is empty. A store failure fails the whole run.
pub async fn fetch_talent_data(
    store: &dyn AttributeStore,
    benchmark_ids: &[String],
) -> Result<TalentMatchResult, AppError> {
    if benchmark_ids.iter().all(|id| id.trim().is_empty()) {
        return Ok(TalentMatchResult::default());
    }

    let run_id = Uuid::new_v4();
    let span = info_span!("talent_match", %run_id, benchmarks = benchmark_ids.len());

    async move {
        let snapshot = store.fetch_snapshot().await?;
        let result = run_talent_match(&snapshot, benchmark_ids);
        info!(
            "Scored {} employees against {} benchmark(s)",
            result.employees.len(),
            result.benchmark_ids.len()
        );
        Ok::<_, AppError>(result)
    }
    .instrument(span)
    .await
}
