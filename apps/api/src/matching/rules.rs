//! Rule predicates behind the talent variables, plus the evaluator that runs
//! the whole catalogue over a profile.
//!
//! Every comparison goes through [`above`], [`at_least`] or [`below`], which
//! return false for a missing operand. A gap in the source data is a rule
//! miss (0), never an unknown.

use serde::Serialize;

use crate::matching::catalog::{TALENT_VARIABLES, TV_COUNT};
use crate::matching::profile::{EmployeeProfile, PapiScale, Pillar};

const SENIOR_GRADES: [&str; 2] = ["IV", "V"];
const MIN_CONTEXT_TENURE_MONTHS: f64 = 49.0;
const MIN_IQ: f64 = 101.0;

fn at_least(value: Option<f64>, threshold: f64) -> bool {
    matches!(value, Some(v) if v >= threshold)
}

fn above(value: Option<f64>, threshold: f64) -> bool {
    matches!(value, Some(v) if v > threshold)
}

fn below(value: Option<f64>, threshold: f64) -> bool {
    matches!(value, Some(v) if v < threshold)
}

pub fn lie_skill(p: &EmployeeProfile) -> bool {
    at_least(p.competency(Pillar::Lie), 2.0) && at_least(p.competency(Pillar::Sea), 1.8)
}

pub fn leadership_drive(p: &EmployeeProfile) -> bool {
    above(p.papi(PapiScale::L), 5.0) && above(p.papi(PapiScale::A), 4.0)
}

pub fn command_talent(p: &EmployeeProfile) -> bool {
    p.has_top_strength("Command")
}

pub fn sto_skill(p: &EmployeeProfile) -> bool {
    at_least(p.competency(Pillar::Sto), 1.8)
}

pub fn agility_profile(p: &EmployeeProfile) -> bool {
    below(p.papi(PapiScale::B), 5.0) && below(p.papi(PapiScale::C), 6.0)
}

pub fn strategic_talent(p: &EmployeeProfile) -> bool {
    p.has_top_strength("Strategic")
}

pub fn achiever_talent(p: &EmployeeProfile) -> bool {
    p.has_top_strength("Achiever")
}

pub fn gdr_skill(p: &EmployeeProfile) -> bool {
    above(p.competency(Pillar::Gdr), 1.0)
}

pub fn context_filter(p: &EmployeeProfile) -> bool {
    let senior = p
        .grade
        .as_deref()
        .is_some_and(|g| SENIOR_GRADES.contains(&g.trim()));
    senior && above(p.tenure_months, MIN_CONTEXT_TENURE_MONTHS)
}

pub fn cognitive_filter(p: &EmployeeProfile) -> bool {
    above(p.iq, MIN_IQ)
}

/// TV values for one employee, in catalogue order. Each value is 0 or 1.
pub type TvScores = [u8; TV_COUNT];

/// A profile together with its evaluated TV vector.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluatedEmployee {
    pub profile: EmployeeProfile,
    pub scores: TvScores,
}

pub fn evaluate(profile: &EmployeeProfile) -> TvScores {
    let mut scores = [0u8; TV_COUNT];
    for (slot, tv) in scores.iter_mut().zip(TALENT_VARIABLES.iter()) {
        *slot = tv.evaluate(profile);
    }
    scores
}

pub fn evaluate_population(profiles: Vec<EmployeeProfile>) -> Vec<EvaluatedEmployee> {
    profiles
        .into_iter()
        .map(|profile| {
            let scores = evaluate(&profile);
            EvaluatedEmployee { profile, scores }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::catalog::tv_index;
    use crate::matching::profile::fixtures::employee;

    fn profile() -> EmployeeProfile {
        EmployeeProfile::bare(&employee("E1", "III", 12), 4.0)
    }

    fn score_of(p: &EmployeeProfile, tv: &str) -> u8 {
        evaluate(p)[tv_index(tv).unwrap()]
    }

    #[test]
    fn test_empty_profile_scores_all_zero() {
        let mut p = profile();
        p.grade = None;
        p.tenure_months = None;
        assert_eq!(evaluate(&p), [0; TV_COUNT]);
    }

    #[test]
    fn test_lie_skill_needs_both_pillars() {
        let mut p = profile();
        p.competencies.insert(Pillar::Lie, 2.0);
        assert_eq!(score_of(&p, "LIE_Skill"), 0);
        p.competencies.insert(Pillar::Sea, 1.8);
        assert_eq!(score_of(&p, "LIE_Skill"), 1);
        p.competencies.insert(Pillar::Sea, 1.79);
        assert_eq!(score_of(&p, "LIE_Skill"), 0);
    }

    #[test]
    fn test_leadership_drive_thresholds_are_strict() {
        let mut p = profile();
        p.papi.insert(PapiScale::L, 5.0);
        p.papi.insert(PapiScale::A, 5.0);
        assert_eq!(score_of(&p, "Leadership_Drive"), 0);
        p.papi.insert(PapiScale::L, 6.0);
        assert_eq!(score_of(&p, "Leadership_Drive"), 1);
    }

    #[test]
    fn test_agility_profile_missing_scale_is_false() {
        let mut p = profile();
        p.papi.insert(PapiScale::B, 1.0);
        assert_eq!(score_of(&p, "Agility_Profile"), 0);
        p.papi.insert(PapiScale::C, 5.9);
        assert_eq!(score_of(&p, "Agility_Profile"), 1);
        p.papi.insert(PapiScale::C, 6.0);
        assert_eq!(score_of(&p, "Agility_Profile"), 0);
    }

    #[test]
    fn test_strength_themes() {
        let mut p = profile();
        p.top_strengths.insert("Command".to_string());
        p.top_strengths.insert("Achiever".to_string());
        assert_eq!(score_of(&p, "Command_Talent"), 1);
        assert_eq!(score_of(&p, "Achiever_Talent"), 1);
        assert_eq!(score_of(&p, "Strategic_Talent"), 0);
    }

    #[test]
    fn test_sto_and_gdr_skill() {
        let mut p = profile();
        p.competencies.insert(Pillar::Sto, 1.8);
        p.competencies.insert(Pillar::Gdr, 1.0);
        assert_eq!(score_of(&p, "STO_Skill"), 1);
        assert_eq!(score_of(&p, "GDR_Skill"), 0);
        p.competencies.insert(Pillar::Gdr, 1.01);
        assert_eq!(score_of(&p, "GDR_Skill"), 1);
    }

    #[test]
    fn test_context_filter_grade_and_tenure() {
        let mut p = profile();
        p.tenure_months = Some(50.0);
        assert_eq!(score_of(&p, "Context_Filter"), 0);
        p.grade = Some("V".to_string());
        assert_eq!(score_of(&p, "Context_Filter"), 1);
        p.tenure_months = Some(49.0);
        assert_eq!(score_of(&p, "Context_Filter"), 0);
        p.tenure_months = None;
        assert_eq!(score_of(&p, "Context_Filter"), 0);
    }

    #[test]
    fn test_context_filter_fractional_tenure_not_rounded() {
        let mut p = profile();
        p.grade = Some("IV".to_string());
        p.tenure_months = Some(49.4);
        assert_eq!(score_of(&p, "Context_Filter"), 1);
    }

    #[test]
    fn test_cognitive_filter() {
        let mut p = profile();
        p.iq = Some(101.0);
        assert_eq!(score_of(&p, "Cognitive_Filter"), 0);
        p.iq = Some(101.5);
        assert_eq!(score_of(&p, "Cognitive_Filter"), 1);
    }

    #[test]
    fn test_scores_are_always_binary() {
        let mut p = profile();
        p.competencies.insert(Pillar::Lie, 9.0);
        p.competencies.insert(Pillar::Sea, 9.0);
        p.iq = Some(150.0);
        for value in evaluate(&p) {
            assert!(value == 0 || value == 1);
        }
    }
}
