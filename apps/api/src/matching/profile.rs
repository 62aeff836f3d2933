//! Normalisation of raw attribute tables into one record per employee.
//!
//! This is where the multi-source joins happen: latest performance rating,
//! latest competency score per pillar, the PAPI pivot, top-5 strengths and the
//! cognitive score all collapse into an [`EmployeeProfile`]. Absent data stays
//! `None` here; the rules decide what a gap means.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::models::employee::{EmployeeRow, PopulationSnapshot};

const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;
const TOP_STRENGTH_RANK: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Pillar {
    Lie,
    Sea,
    Sto,
    Gdr,
}

impl Pillar {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "LIE" => Some(Pillar::Lie),
            "SEA" => Some(Pillar::Sea),
            "STO" => Some(Pillar::Sto),
            "GDR" => Some(Pillar::Gdr),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PapiScale {
    L,
    A,
    B,
    C,
}

impl PapiScale {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "Papi_L" => Some(PapiScale::L),
            "Papi_A" => Some(PapiScale::A),
            "Papi_B" => Some(PapiScale::B),
            "Papi_C" => Some(PapiScale::C),
            _ => None,
        }
    }
}

/// Everything the rule table needs to know about one employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeProfile {
    pub employee_id: String,
    pub fullname: String,
    pub directorate: Option<String>,
    pub role: Option<String>,
    pub grade: Option<String>,
    pub tenure_months: Option<f64>,
    pub latest_rating: f64,
    pub competencies: BTreeMap<Pillar, f64>,
    pub papi: BTreeMap<PapiScale, f64>,
    pub top_strengths: BTreeSet<String>,
    pub iq: Option<f64>,
}

impl EmployeeProfile {
    /// A profile with a rating and nothing else. Every rule evaluates false on it.
    pub fn bare(employee: &EmployeeRow, latest_rating: f64) -> Self {
        Self {
            employee_id: employee.employee_id.clone(),
            fullname: employee.fullname.clone(),
            directorate: employee.directorate.clone(),
            role: employee.role.clone(),
            grade: employee.grade.clone(),
            tenure_months: employee.years_of_service_months,
            latest_rating,
            competencies: BTreeMap::new(),
            papi: BTreeMap::new(),
            top_strengths: BTreeSet::new(),
            iq: None,
        }
    }

    pub fn competency(&self, pillar: Pillar) -> Option<f64> {
        self.competencies.get(&pillar).copied()
    }

    pub fn papi(&self, scale: PapiScale) -> Option<f64> {
        self.papi.get(&scale).copied()
    }

    pub fn has_top_strength(&self, theme: &str) -> bool {
        self.top_strengths.contains(theme)
    }
}

/// Builds one profile per employee that has a valid latest performance rating.
/// Employees without one are dropped here and never reach scoring.
/// Output is sorted by employee identifier.
pub fn build_profiles(snapshot: &PopulationSnapshot) -> Vec<EmployeeProfile> {
    let ratings = latest_ratings(snapshot);
    let competencies = latest_competencies(snapshot);
    let papi = pivot_papi(snapshot);
    let strengths = top_strengths(snapshot);
    let iq = cognitive_scores(snapshot);

    let mut seen = BTreeSet::new();
    let mut profiles: Vec<EmployeeProfile> = snapshot
        .employees
        .iter()
        .filter(|e| seen.insert(e.employee_id.as_str()))
        .filter_map(|employee| {
            let id = employee.employee_id.as_str();
            let rating = *ratings.get(id)?;
            let mut profile = EmployeeProfile::bare(employee, rating);
            if let Some(c) = competencies.get(id) {
                profile.competencies = c.clone();
            }
            if let Some(p) = papi.get(id) {
                profile.papi = p.clone();
            }
            if let Some(s) = strengths.get(id) {
                profile.top_strengths = s.clone();
            }
            profile.iq = iq.get(id).copied();
            Some(profile)
        })
        .collect();

    profiles.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
    profiles
}

/// Most recent in-range rating per employee. On a same-year tie the higher rating wins.
fn latest_ratings(snapshot: &PopulationSnapshot) -> HashMap<&str, f64> {
    let mut latest: HashMap<&str, (i32, f64)> = HashMap::new();
    for row in &snapshot.performance {
        let Some(rating) = row.rating else { continue };
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            continue;
        }
        keep_latest(&mut latest, row.employee_id.as_str(), row.year, rating);
    }
    latest.into_iter().map(|(id, (_, r))| (id, r)).collect()
}

/// Most recent numeric score per (employee, pillar), pivoted to one map per employee.
fn latest_competencies(snapshot: &PopulationSnapshot) -> HashMap<&str, BTreeMap<Pillar, f64>> {
    let mut latest: HashMap<(&str, Pillar), (i32, f64)> = HashMap::new();
    for row in &snapshot.competencies {
        let Some(pillar) = Pillar::from_code(&row.pillar_code) else {
            continue;
        };
        let Some(score) = row.score.as_deref().and_then(parse_score) else {
            continue;
        };
        keep_latest(&mut latest, (row.employee_id.as_str(), pillar), row.year, score);
    }

    let mut pivot: HashMap<&str, BTreeMap<Pillar, f64>> = HashMap::new();
    for ((id, pillar), (_, score)) in latest {
        pivot.entry(id).or_default().insert(pillar, score);
    }
    pivot
}

fn pivot_papi(snapshot: &PopulationSnapshot) -> HashMap<&str, BTreeMap<PapiScale, f64>> {
    let mut pivot: HashMap<&str, BTreeMap<PapiScale, f64>> = HashMap::new();
    for row in &snapshot.papi_scores {
        let (Some(scale), Some(score)) = (PapiScale::from_code(&row.scale_code), row.score) else {
            continue;
        };
        let slot = pivot
            .entry(row.employee_id.as_str())
            .or_default()
            .entry(scale)
            .or_insert(score);
        *slot = slot.max(score);
    }
    pivot
}

fn top_strengths(snapshot: &PopulationSnapshot) -> HashMap<&str, BTreeSet<String>> {
    let mut top: HashMap<&str, BTreeSet<String>> = HashMap::new();
    for row in &snapshot.strengths {
        match (&row.theme, row.rank) {
            (Some(theme), Some(rank)) if rank <= TOP_STRENGTH_RANK => {
                top.entry(row.employee_id.as_str())
                    .or_default()
                    .insert(theme.clone());
            }
            _ => {}
        }
    }
    top
}

/// Highest non-null IQ per employee.
fn cognitive_scores(snapshot: &PopulationSnapshot) -> HashMap<&str, f64> {
    let mut scores: HashMap<&str, f64> = HashMap::new();
    for row in &snapshot.cognitive {
        let Some(iq) = row.iq else { continue };
        scores
            .entry(row.employee_id.as_str())
            .and_modify(|current| *current = current.max(iq))
            .or_insert(iq);
    }
    scores
}

fn keep_latest<K>(latest: &mut HashMap<K, (i32, f64)>, key: K, year: i32, value: f64)
where
    K: std::hash::Hash + Eq,
{
    latest
        .entry(key)
        .and_modify(|(y, v)| {
            if year > *y || (year == *y && value > *v) {
                *y = year;
                *v = value;
            }
        })
        .or_insert((year, value));
}

/// Competency scores arrive as text. Blank or non-numeric values are treated as absent.
fn parse_score(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
