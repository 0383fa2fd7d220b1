//! Tower: recipes that keep a ratio while the batch size changes.

use super::{ProblemDescriptor, Tier, VisualAid};
use crate::catalog::Category;
use crate::numbers::format_number;

/// Concrete mix as cement:sand:stone.
const CONCRETE_MIX: [u32; 3] = [1, 2, 3];
const CONCRETE_TOTAL: f64 = 1_200.0;

pub(super) fn generate(tier: Tier) -> ProblemDescriptor {
    match tier {
        Tier::Easy => easy(),
        Tier::Medium => medium(),
        Tier::Boss => boss(),
    }
}

fn easy() -> ProblemDescriptor {
    let (water, juice) = (4_u32, 1_u32);
    let juice_litres = 2.0;
    let answer = juice_litres * f64::from(water / juice);
    ProblemDescriptor::new(
        Category::RecipeRatio,
        Tier::Easy,
        format!(
            "The water:juice ratio is {water}:{juice}. For {} litres of juice, how much water is needed?",
            format_number(juice_litres),
        ),
        answer,
        "l",
        format!("{water} times more water."),
    )
    .with_explanation(format!(
        "{} * {water} = {}.",
        format_number(juice_litres),
        format_number(answer),
    ))
    .with_visual(VisualAid::Parts {
        first: water,
        second: juice,
    })
}

fn medium() -> ProblemDescriptor {
    let (flour, sugar) = (3_u32, 2_u32);
    let flour_grams = 600.0;
    let per_part = flour_grams / f64::from(flour);
    let answer = per_part * f64::from(sugar);
    ProblemDescriptor::new(
        Category::RecipeRatio,
        Tier::Medium,
        format!(
            "Recipe: flour and sugar in the ratio {flour}:{sugar}. For {}g of flour, how much sugar?",
            format_number(flour_grams),
        ),
        answer,
        "g",
        format!(
            "{} is {flour} parts. 1 part is {}.",
            format_number(flour_grams),
            format_number(per_part),
        ),
    )
    .with_explanation(format!(
        "{sugar} parts * {} = {}.",
        format_number(per_part),
        format_number(answer),
    ))
    .with_visual(VisualAid::Parts {
        first: flour,
        second: sugar,
    })
}

fn boss() -> ProblemDescriptor {
    let [cement, sand, stone] = CONCRETE_MIX;
    let parts = cement + sand + stone;
    let per_part = CONCRETE_TOTAL / f64::from(parts);
    let answer = per_part * f64::from(sand);
    ProblemDescriptor::new(
        Category::RecipeRatio,
        Tier::Boss,
        format!(
            "BOSS: Magic concrete (cement:sand:stone) uses the ratio {cement}:{sand}:{stone}. If you need {}kg of concrete in total, how much sand goes in?",
            format_number(CONCRETE_TOTAL),
        ),
        answer,
        "kg",
        format!("Add up all the parts ({cement}+{sand}+{stone}). Sand is {sand} parts."),
    )
    .with_explanation(format!(
        "{parts} parts in total. {}:{parts} = {}kg per part. Sand ({sand} parts) = {}kg.",
        format_number(CONCRETE_TOTAL),
        format_number(per_part),
        format_number(answer),
    ))
}
