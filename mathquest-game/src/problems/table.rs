//! Library: filling in a direct-proportion table.

use super::{ProblemDescriptor, Tier, VisualAid};
use crate::catalog::Category;
use crate::numbers::format_number;

/// Known rows of the boss table; the third row asks for y at `BOSS_X`.
const BOSS_ROWS: [(f64, f64); 2] = [(3.0, 15.0), (5.0, 25.0)];
const BOSS_X: f64 = 10.0;

pub(super) fn generate(tier: Tier) -> ProblemDescriptor {
    match tier {
        Tier::Easy => easy(),
        Tier::Medium => medium(),
        Tier::Boss => boss(),
    }
}

fn easy() -> ProblemDescriptor {
    let (x1, y1, x2) = (1.0, 10.0, 5.0);
    let answer = y1 / x1 * x2;
    ProblemDescriptor::new(
        Category::TableFill,
        Tier::Easy,
        format!(
            "If {} pencil costs {} den., 2 cost {} den. How much do {} cost?",
            format_number(x1),
            format_number(y1),
            format_number(y1 * 2.0),
            format_number(x2),
        ),
        answer,
        "den.",
        "Simple multiplication.",
    )
    .with_explanation(format!(
        "{} * {} = {}.",
        format_number(x2),
        format_number(y1),
        format_number(answer),
    ))
    .with_visual(VisualAid::Table { x1, y1, x2 })
}

fn medium() -> ProblemDescriptor {
    let (x1, y1, x2) = (4.0, 48.0, 7.0);
    let k = y1 / x1;
    let answer = k * x2;
    ProblemDescriptor::new(
        Category::TableFill,
        Tier::Medium,
        format!(
            "Table: x={}, y={}. Find y when x={}.",
            format_number(x1),
            format_number(y1),
            format_number(x2),
        ),
        answer,
        "",
        format!(
            "k = {}/{} = {}.",
            format_number(y1),
            format_number(x1),
            format_number(k),
        ),
    )
    .with_explanation(format!(
        "y = {} * {} = {}.",
        format_number(k),
        format_number(x2),
        format_number(answer),
    ))
    .with_visual(VisualAid::Table { x1, y1, x2 })
}

fn boss() -> ProblemDescriptor {
    let [(xa, ya), (xb, yb)] = BOSS_ROWS;
    let k = ya / xa;
    let answer = k * BOSS_X;
    ProblemDescriptor::new(
        Category::TableFill,
        Tier::Boss,
        format!(
            "BOSS: The table holds the pairs ({}, {}), ({}, {}), ({}, ?). Which number is missing for a direct proportion?",
            format_number(xa),
            format_number(ya),
            format_number(xb),
            format_number(yb),
            format_number(BOSS_X),
        ),
        answer,
        "",
        format!(
            "The coefficient is the same everywhere ({}:{} = {}).",
            format_number(ya),
            format_number(xa),
            format_number(k),
        ),
    )
    .with_explanation(format!(
        "k={}. {} * {} = {}.",
        format_number(k),
        format_number(BOSS_X),
        format_number(k),
        format_number(answer),
    ))
}
