use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Employee master record joined with its directorate, position and grade names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EmployeeRow {
    pub employee_id: String,
    pub fullname: String,
    pub directorate: Option<String>,
    pub role: Option<String>,
    pub grade: Option<String>,
    pub years_of_service_months: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PerformanceRow {
    pub employee_id: String,
    pub year: i32,
    pub rating: Option<f64>,
}

/// Competency pillar score. The source column is text and may be blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CompetencyRow {
    pub employee_id: String,
    pub year: i32,
    pub pillar_code: String,
    pub score: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PapiScoreRow {
    pub employee_id: String,
    pub scale_code: String,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StrengthRow {
    pub employee_id: String,
    pub theme: Option<String>,
    pub rank: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CognitiveRow {
    pub employee_id: String,
    pub iq: Option<f64>,
}

/// Every raw table the scoring pipeline reads, captured at one point in time.
/// The pipeline is a pure function of this snapshot and the benchmark set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub employees: Vec<EmployeeRow>,
    pub performance: Vec<PerformanceRow>,
    pub competencies: Vec<CompetencyRow>,
    pub papi_scores: Vec<PapiScoreRow>,
    pub strengths: Vec<StrengthRow>,
    pub cognitive: Vec<CognitiveRow>,
}
