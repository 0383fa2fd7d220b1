//! Treasury: sharing a total in a two-part ratio.

use super::{ProblemDescriptor, Tier, VisualAid};
use crate::catalog::Category;
use crate::numbers::format_number;
use crate::personas::Persona;

const GOLD: &str = "gold";

struct Split {
    total: f64,
    first: u32,
    second: u32,
    goods: &'static str,
    unit: &'static str,
}

fn medium_split(persona: Option<Persona>) -> Split {
    match persona {
        Some(Persona::Builder) => Split {
            total: 180.0,
            first: 4,
            second: 5,
            goods: "kg of mortar",
            unit: "kg",
        },
        Some(Persona::Explorer) => Split {
            total: 1_000.0,
            first: 3,
            second: 7,
            goods: "denars",
            unit: "den.",
        },
        Some(Persona::Scholar) | None => Split {
            total: 1_200.0,
            first: 2,
            second: 3,
            goods: "children",
            unit: "children",
        },
    }
}

const EASY_TOTAL: f64 = 100.0;
const EASY_RATIO: (u32, u32) = (1, 4);

/// Inheritance ratio and the known gap between the two shares.
const BOSS_RATIO: (u32, u32) = (3, 5);
const BOSS_DIFFERENCE: f64 = 400.0;

pub(super) fn generate(tier: Tier, persona: Option<Persona>) -> ProblemDescriptor {
    match tier {
        Tier::Easy => easy(),
        Tier::Medium => medium(&medium_split(persona)),
        Tier::Boss => boss(),
    }
}

fn easy() -> ProblemDescriptor {
    let (first, second) = EASY_RATIO;
    let parts = first + second;
    let per_part = EASY_TOTAL / f64::from(parts);
    let smaller = f64::from(first.min(second)) * per_part;
    ProblemDescriptor::new(
        Category::RatioShare,
        Tier::Easy,
        format!(
            "Split {} gold coins in the ratio {first}:{second}. How big is the smaller share?",
            format_number(EASY_TOTAL),
        ),
        smaller,
        GOLD,
        format!(
            "Total parts: {first}+{second}={parts}. {}:{parts}={}.",
            format_number(EASY_TOTAL),
            format_number(per_part),
        ),
    )
    .with_explanation(format!(
        "The smaller share is {} * {} = {}.",
        first.min(second),
        format_number(per_part),
        format_number(smaller),
    ))
    .with_visual(VisualAid::Parts { first, second })
}

fn medium(split: &Split) -> ProblemDescriptor {
    let parts = split.first + split.second;
    let per_part = split.total / f64::from(parts);
    let larger = split.first.max(split.second);
    let answer = per_part * f64::from(larger);
    ProblemDescriptor::new(
        Category::RatioShare,
        Tier::Medium,
        format!(
            "A total of {} {} is shared in the ratio {}:{}. How big is the larger share?",
            format_number(split.total),
            split.goods,
            split.first,
            split.second,
        ),
        answer,
        split.unit,
        "Find 1 part, then multiply by the larger number.",
    )
    .with_explanation(format!(
        "Total parts: {parts}. One part: {}. Larger share: {larger} * {} = {}.",
        format_number(per_part),
        format_number(per_part),
        format_number(answer),
    ))
    .with_visual(VisualAid::Parts {
        first: split.first,
        second: split.second,
    })
}

/// Difference of parts: the gap in parts gives one part, one part gives the total.
fn boss() -> ProblemDescriptor {
    let (first, second) = BOSS_RATIO;
    let gap_parts = second.abs_diff(first);
    let per_part = BOSS_DIFFERENCE / f64::from(gap_parts);
    let parts = first + second;
    let total = per_part * f64::from(parts);
    ProblemDescriptor::new(
        Category::RatioShare,
        Tier::Boss,
        format!(
            "BOSS: An inheritance is shared in the ratio {first}:{second}. If the difference between the shares is {} gold coins, how large is the whole inheritance?",
            format_number(BOSS_DIFFERENCE),
        ),
        total,
        GOLD,
        format!(
            "The difference in parts is {second}-{first}={gap_parts} parts. {gap_parts} parts = {}.",
            format_number(BOSS_DIFFERENCE),
        ),
    )
    .with_explanation(format!(
        "{gap_parts} parts = {}, so 1 part = {}. There are {first}+{second}={parts} parts in total. {parts} * {} = {}.",
        format_number(BOSS_DIFFERENCE),
        format_number(per_part),
        format_number(per_part),
        format_number(total),
    ))
}
