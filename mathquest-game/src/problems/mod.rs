//! Problem generator
//!
//! Pure mapping from (category, tier, persona) to a [`ProblemDescriptor`]. There is
//! no randomness: the same inputs always produce the same text and answer, so a
//! resumed session sees exactly the problems it saw before.

mod direct;
mod inverse;
mod recipe;
mod scale;
mod share;
mod speed;
mod table;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Category;
use crate::error::QuestError;
use crate::personas::Persona;

/// Difficulty within a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Medium,
    Boss,
}

impl Tier {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Boss];

    /// Map sub-progress (0..=2) onto a tier.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Easy),
            1 => Some(Self::Medium),
            2 => Some(Self::Boss),
            _ => None,
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Boss => 2,
        }
    }

    #[must_use]
    pub const fn is_boss(self) -> bool {
        matches!(self, Self::Boss)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => f.write_str("easy"),
            Self::Medium => f.write_str("medium"),
            Self::Boss => f.write_str("boss"),
        }
    }
}

/// Category-specific payload for the companion visual aid. Opaque to the engine.
///
/// Field names follow the keys stored in existing save records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VisualAid {
    /// Known quantity and price, asking for the unit price.
    UnitPrice {
        #[serde(rename = "q1")]
        quantity: f64,
        #[serde(rename = "p1")]
        price: f64,
        unit: String,
    },
    /// Two-part ratio drawn as two rows of blocks.
    Parts {
        #[serde(rename = "r1")]
        first: u32,
        #[serde(rename = "r2")]
        second: u32,
    },
    /// One known row of a proportion table and the x of the missing row.
    Table {
        x1: f64,
        y1: f64,
        x2: f64,
    },
    /// Map length and scale denominator.
    Scale {
        #[serde(rename = "cm")]
        length_cm: f64,
        #[serde(rename = "sc")]
        denominator: u64,
        #[serde(rename = "u")]
        unit: String,
    },
    /// Travel time split into one-hour segments.
    Timeline {
        #[serde(rename = "t")]
        hours: u32,
    },
    /// Workers by days grid of the constant amount of work.
    WorkGrid {
        #[serde(rename = "w1")]
        workers: u32,
        #[serde(rename = "d1")]
        days: u32,
    },
}

/// One question/answer unit. Created fresh for every sub-step and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDescriptor {
    pub category: Category,
    pub tier: Tier,
    pub question: String,
    pub answer: f64,
    pub unit: String,
    pub hint: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub visual: Option<VisualAid>,
}

impl ProblemDescriptor {
    pub(crate) fn new(
        category: Category,
        tier: Tier,
        question: impl Into<String>,
        answer: f64,
        unit: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            category,
            tier,
            question: question.into(),
            answer,
            unit: unit.into(),
            hint: hint.into(),
            explanation: None,
            visual: None,
        }
    }

    #[must_use]
    pub(crate) fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    #[must_use]
    pub(crate) fn with_visual(mut self, visual: VisualAid) -> Self {
        self.visual = Some(visual);
        self
    }

    #[must_use]
    pub const fn is_boss(&self) -> bool {
        self.tier.is_boss()
    }
}

/// Produce the problem for a category and tier, worded for the persona.
#[must_use]
pub fn generate(category: Category, tier: Tier, persona: Option<Persona>) -> ProblemDescriptor {
    match category {
        Category::DirectProportion => direct::generate(tier, persona),
        Category::RatioShare => share::generate(tier, persona),
        Category::RecipeRatio => recipe::generate(tier),
        Category::TableFill => table::generate(tier),
        Category::MapScale => scale::generate(tier, persona),
        Category::SpeedDistance => speed::generate(tier),
        Category::InverseWorkers => inverse::generate(tier),
    }
}

/// Generate from a raw tier index, as held in a session's sub-progress.
///
/// # Errors
///
/// Returns [`QuestError::UnreachableGeneratorInput`] when the index is not a tier.
/// The state machine never produces such an index.
pub fn generate_at(
    category: Category,
    tier_index: u8,
    persona: Option<Persona>,
) -> Result<ProblemDescriptor, QuestError> {
    let tier = Tier::from_index(tier_index).ok_or(QuestError::UnreachableGeneratorInput {
        category,
        tier: tier_index,
    })?;
    Ok(generate(category, tier, persona))
}
