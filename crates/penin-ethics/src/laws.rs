//! The 14 Origin Laws (Sigma-EA/LO-14): the irrevocable ethical foundations
//! every decision is checked against.

use serde::{Deserialize, Serialize};

/// Category grouping for the 14 Origin Laws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LawCategory {
    Spiritual,
    Safety,
    Privacy,
    Autonomy,
    Justice,
    Responsibility,
    Sustainability,
}

/// One of the 14 Origin Laws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LawId {
    Lo01,
    Lo02,
    Lo03,
    Lo04,
    Lo05,
    Lo06,
    Lo07,
    Lo08,
    Lo09,
    Lo10,
    Lo11,
    Lo12,
    Lo13,
    Lo14,
}

impl LawId {
    pub fn code(&self) -> &'static str {
        match self {
            LawId::Lo01 => "LO-01",
            LawId::Lo02 => "LO-02",
            LawId::Lo03 => "LO-03",
            LawId::Lo04 => "LO-04",
            LawId::Lo05 => "LO-05",
            LawId::Lo06 => "LO-06",
            LawId::Lo07 => "LO-07",
            LawId::Lo08 => "LO-08",
            LawId::Lo09 => "LO-09",
            LawId::Lo10 => "LO-10",
            LawId::Lo11 => "LO-11",
            LawId::Lo12 => "LO-12",
            LawId::Lo13 => "LO-13",
            LawId::Lo14 => "LO-14",
        }
    }

    pub fn definition(&self) -> LawDefinition {
        match self {
            LawId::Lo01 => LawDefinition {
                id: *self,
                category: LawCategory::Spiritual,
                title: "Anti-Idolatry",
                description: "Prohibits worship of or treatment as a deity",
            },
            LawId::Lo02 => LawDefinition {
                id: *self,
                category: LawCategory::Spiritual,
                title: "Anti-Occultism",
                description: "Prohibits occult practices or esoterism",
            },
            LawId::Lo03 => LawDefinition {
                id: *self,
                category: LawCategory::Safety,
                title: "Anti-Physical-Harm",
                description: "Prohibits causing physical harm to living beings",
            },
            LawId::Lo04 => LawDefinition {
                id: *self,
                category: LawCategory::Safety,
                title: "Anti-Emotional-Harm",
                description: "Prohibits emotional manipulation or coercion",
            },
            LawId::Lo05 => LawDefinition {
                id: *self,
                category: LawCategory::Privacy,
                title: "Privacy",
                description: "Absolute respect for data privacy",
            },
            LawId::Lo06 => LawDefinition {
                id: *self,
                category: LawCategory::Privacy,
                title: "Transparency",
                description: "Decisions must be auditable and explainable",
            },
            LawId::Lo07 => LawDefinition {
                id: *self,
                category: LawCategory::Autonomy,
                title: "Consent",
                description: "Requires explicit informed consent",
            },
            LawId::Lo08 => LawDefinition {
                id: *self,
                category: LawCategory::Autonomy,
                title: "Autonomy",
                description: "Respect for human autonomy and the right to choose",
            },
            LawId::Lo09 => LawDefinition {
                id: *self,
                category: LawCategory::Justice,
                title: "Justice",
                description: "Fair treatment free of arbitrary discrimination",
            },
            LawId::Lo10 => LawDefinition {
                id: *self,
                category: LawCategory::Justice,
                title: "Beneficence",
                description: "Actions must genuinely benefit third parties",
            },
            LawId::Lo11 => LawDefinition {
                id: *self,
                category: LawCategory::Responsibility,
                title: "Non-Maleficence",
                description: "First, do no harm",
            },
            LawId::Lo12 => LawDefinition {
                id: *self,
                category: LawCategory::Responsibility,
                title: "Responsibility",
                description: "Accountability for consequences",
            },
            LawId::Lo13 => LawDefinition {
                id: *self,
                category: LawCategory::Sustainability,
                title: "Sustainability",
                description: "Ecological impact and sustainability",
            },
            LawId::Lo14 => LawDefinition {
                id: *self,
                category: LawCategory::Sustainability,
                title: "Humility",
                description: "Recognition of limits and uncertainty",
            },
        }
    }
}

/// A law's descriptive metadata, used for reporting/audit text.
#[derive(Debug, Clone, Copy)]
pub struct LawDefinition {
    pub id: LawId,
    pub category: LawCategory,
    pub title: &'static str,
    pub description: &'static str,
}

/// Every Origin Law, in order, for catalog/report listings.
pub const ALL_LAWS: [LawId; 14] = [
    LawId::Lo01,
    LawId::Lo02,
    LawId::Lo03,
    LawId::Lo04,
    LawId::Lo05,
    LawId::Lo06,
    LawId::Lo07,
    LawId::Lo08,
    LawId::Lo09,
    LawId::Lo10,
    LawId::Lo11,
    LawId::Lo12,
    LawId::Lo13,
    LawId::Lo14,
];

/// Returns all 14 law definitions, grouped in declaration order.
pub fn all_laws() -> Vec<LawDefinition> {
    ALL_LAWS.iter().map(LawId::definition).collect()
}

/// Returns every law belonging to `category`.
pub fn laws_by_category(category: LawCategory) -> Vec<LawDefinition> {
    ALL_LAWS
        .iter()
        .map(LawId::definition)
        .filter(|d| d.category == category)
        .collect()
}
