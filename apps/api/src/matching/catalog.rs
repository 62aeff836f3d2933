//! The fixed catalogue of talent variables (TVs) and the talent group
//! variables (TGVs) they roll up into.
//!
//! Each TV is a row in [`TALENT_VARIABLES`]: its name, its group and the
//! predicate that decides it. Nothing downstream names an individual TV, so a
//! rule can be swapped or tested in isolation by editing its row.

use serde::Serialize;

use crate::matching::profile::EmployeeProfile;
use crate::matching::rules;

pub const TV_COUNT: usize = 10;

/// Talent group variable. Declaration order is the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Tgv {
    Leadership,
    Strategic,
    Drive,
    Foundation,
}

impl Tgv {
    pub const ALL: [Tgv; 4] = [Tgv::Leadership, Tgv::Strategic, Tgv::Drive, Tgv::Foundation];

    /// Weight of this group in the final match rate. Weights sum to 1.0.
    pub fn weight(self) -> f64 {
        match self {
            Tgv::Leadership => 0.35,
            Tgv::Strategic => 0.35,
            Tgv::Drive => 0.15,
            Tgv::Foundation => 0.15,
        }
    }

    pub fn members(self) -> impl Iterator<Item = &'static TalentVariable> {
        TALENT_VARIABLES.iter().filter(move |tv| tv.tgv == self)
    }
}

/// One rule-derived binary indicator.
pub struct TalentVariable {
    pub name: &'static str,
    pub tgv: Tgv,
    pub rule: fn(&EmployeeProfile) -> bool,
}

impl std::fmt::Debug for TalentVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TalentVariable")
            .field("name", &self.name)
            .field("tgv", &self.tgv)
            .finish_non_exhaustive()
    }
}

impl TalentVariable {
    pub fn evaluate(&self, profile: &EmployeeProfile) -> u8 {
        u8::from((self.rule)(profile))
    }
}

pub static TALENT_VARIABLES: [TalentVariable; TV_COUNT] = [
    TalentVariable {
        name: "LIE_Skill",
        tgv: Tgv::Leadership,
        rule: rules::lie_skill,
    },
    TalentVariable {
        name: "Leadership_Drive",
        tgv: Tgv::Leadership,
        rule: rules::leadership_drive,
    },
    TalentVariable {
        name: "Command_Talent",
        tgv: Tgv::Leadership,
        rule: rules::command_talent,
    },
    TalentVariable {
        name: "STO_Skill",
        tgv: Tgv::Strategic,
        rule: rules::sto_skill,
    },
    TalentVariable {
        name: "Agility_Profile",
        tgv: Tgv::Strategic,
        rule: rules::agility_profile,
    },
    TalentVariable {
        name: "Strategic_Talent",
        tgv: Tgv::Strategic,
        rule: rules::strategic_talent,
    },
    TalentVariable {
        name: "Achiever_Talent",
        tgv: Tgv::Drive,
        rule: rules::achiever_talent,
    },
    TalentVariable {
        name: "GDR_Skill",
        tgv: Tgv::Drive,
        rule: rules::gdr_skill,
    },
    TalentVariable {
        name: "Context_Filter",
        tgv: Tgv::Foundation,
        rule: rules::context_filter,
    },
    TalentVariable {
        name: "Cognitive_Filter",
        tgv: Tgv::Foundation,
        rule: rules::cognitive_filter,
    },
];

/// Position of a TV in [`TALENT_VARIABLES`].
#[cfg(test)]
pub fn tv_index(name: &str) -> Option<usize> {
    TALENT_VARIABLES.iter().position(|tv| tv.name == name)
}
