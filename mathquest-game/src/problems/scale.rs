//! Cartography: converting map lengths through a scale.

use super::{ProblemDescriptor, Tier, VisualAid};
use crate::catalog::Category;
use crate::numbers::{format_grouped, format_number};
use crate::personas::Persona;

const CM_PER_M: f64 = 100.0;
const CM_PER_KM: f64 = 100_000.0;

pub(super) fn generate(tier: Tier, persona: Option<Persona>) -> ProblemDescriptor {
    match (tier, persona) {
        (Tier::Easy, _) => easy(),
        (Tier::Medium, _) => medium(),
        (Tier::Boss, Some(Persona::Builder)) => boss_floor_area(),
        (Tier::Boss, Some(Persona::Explorer | Persona::Scholar) | None) => boss_distance(),
    }
}

fn easy() -> ProblemDescriptor {
    let denominator = 100_u32;
    let length_cm = 5.0;
    let answer = length_cm * f64::from(denominator);
    ProblemDescriptor::new(
        Category::MapScale,
        Tier::Easy,
        format!(
            "Scale 1:{denominator}. If the plan shows {}cm, how long is it in reality? (in cm)",
            format_number(length_cm),
        ),
        answer,
        "cm",
        format!("Just multiply by {denominator}."),
    )
    .with_explanation(format!(
        "{} * {denominator} = {}.",
        format_number(length_cm),
        format_number(answer),
    ))
    .with_visual(VisualAid::Scale {
        length_cm,
        denominator: u64::from(denominator),
        unit: "cm".to_string(),
    })
}

fn medium() -> ProblemDescriptor {
    let denominator = 500_000_u32;
    let length_cm = 4.0;
    let real_cm = length_cm * f64::from(denominator);
    let answer = real_cm / CM_PER_KM;
    ProblemDescriptor::new(
        Category::MapScale,
        Tier::Medium,
        format!(
            "Map 1:{}. The road is {}cm. How many km is that?",
            format_grouped(u64::from(denominator)),
            format_number(length_cm),
        ),
        answer,
        "km",
        format!(
            "{}*{denominator} = {}cm. Convert to km (divide by {}).",
            format_number(length_cm),
            format_number(real_cm),
            format_grouped(100_000),
        ),
    )
    .with_explanation(format!(
        "{} / {} = {}.",
        format_number(real_cm),
        format_number(CM_PER_KM),
        format_number(answer),
    ))
    .with_visual(VisualAid::Scale {
        length_cm,
        denominator: u64::from(denominator),
        unit: "km".to_string(),
    })
}

/// Builder branch: composes two scaled sides into a real floor area.
fn boss_floor_area() -> ProblemDescriptor {
    let denominator = 100_u32;
    let (width_cm, depth_cm) = (3.0, 4.0);
    let width_m = width_cm * f64::from(denominator) / CM_PER_M;
    let depth_m = depth_cm * f64::from(denominator) / CM_PER_M;
    let answer = width_m * depth_m;
    ProblemDescriptor::new(
        Category::MapScale,
        Tier::Boss,
        format!(
            "BOSS: Plan 1:{denominator}. The room on paper is {}cm by {}cm. What is its real AREA in m²?",
            format_number(width_cm),
            format_number(depth_cm),
        ),
        answer,
        "m²",
        "Work out the real sides in metres, then multiply them.",
    )
    .with_explanation(format!(
        "Sides: {}m and {}m. Area = {}*{} = {}m².",
        format_number(width_m),
        format_number(depth_m),
        format_number(width_m),
        format_number(depth_m),
        format_number(answer),
    ))
}

/// Every other hero converts a long scaled distance with a decimal length.
fn boss_distance() -> ProblemDescriptor {
    let denominator = 2_000_000_u32;
    let length_cm = 8.5;
    let km_per_cm = f64::from(denominator) / CM_PER_KM;
    let answer = length_cm * km_per_cm;
    ProblemDescriptor::new(
        Category::MapScale,
        Tier::Boss,
        format!(
            "BOSS: Scale 1:{}. The distance is {} cm. How many km is that?",
            format_grouped(u64::from(denominator)),
            format_number(length_cm),
        ),
        answer,
        "km",
        "Watch the decimal point.",
    )
    .with_explanation(format!(
        "{} * {} = {} km.",
        format_number(length_cm),
        format_number(km_per_cm),
        format_number(answer),
    ))
}
