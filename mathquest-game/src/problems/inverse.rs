//! Pyramid: inverse proportion between workers and time.

use super::{ProblemDescriptor, Tier, VisualAid};
use crate::catalog::Category;
use crate::numbers::format_number;

/// The riddle: a cat and a half eats a mouse and a half in a day and a half.
const RIDDLE_DAYS_PER_MOUSE: f64 = 1.5;
const RIDDLE_CATS: f64 = 12.0;
const RIDDLE_DAYS: f64 = 30.0;

pub(super) fn generate(tier: Tier) -> ProblemDescriptor {
    match tier {
        Tier::Easy => easy(),
        Tier::Medium => medium(),
        Tier::Boss => boss(),
    }
}

fn easy() -> ProblemDescriptor {
    let (workers, days) = (4_u32, 10_u32);
    let crew = 8_u32;
    let work = workers * days;
    let answer = f64::from(work) / f64::from(crew);
    ProblemDescriptor::new(
        Category::InverseWorkers,
        Tier::Easy,
        format!("{workers} workers = {days} days. {crew} workers = ? days."),
        answer,
        "days",
        "Twice as many people means half the time.",
    )
    .with_explanation(format!(
        "{workers}*{days}={work}. {work}/{crew}={}.",
        format_number(answer)
    ))
    .with_visual(VisualAid::WorkGrid { workers, days })
}

fn medium() -> ProblemDescriptor {
    let (pumps, hours) = (6_u32, 12_u32);
    let more_pumps = 9_u32;
    let work = pumps * hours;
    let answer = f64::from(work) / f64::from(more_pumps);
    ProblemDescriptor::new(
        Category::InverseWorkers,
        Tier::Medium,
        format!(
            "{pumps} pumps fill a pool in {hours} hours. How long do {more_pumps} pumps take?"
        ),
        answer,
        "hours",
        format!("Total work: {pumps}*{hours}={work}. {work}:{more_pumps}=?"),
    )
    .with_explanation(format!("{work}/{more_pumps}={}.", format_number(answer)))
    .with_visual(VisualAid::WorkGrid {
        workers: pumps,
        days: hours,
    })
}

/// Scaling cats and mice together by 1.5 leaves one cat eating one mouse per
/// 1.5 days; the answer counts those periods rather than a per-day rate.
fn boss() -> ProblemDescriptor {
    let periods = RIDDLE_DAYS / RIDDLE_DAYS_PER_MOUSE;
    let per_cat = periods;
    let answer = RIDDLE_CATS * per_cat;
    ProblemDescriptor::new(
        Category::InverseWorkers,
        Tier::Boss,
        format!(
            "BOSS: A cat and a half eats a mouse and a half in a day and a half. How many mice do {} cats eat in {} days?",
            format_number(RIDDLE_CATS),
            format_number(RIDDLE_DAYS),
        ),
        answer,
        "mice",
        "It's a trick! Find out how much 1 cat eats in 1 day.",
    )
    .with_explanation(format!(
        "1 cat eats 1 mouse in {} days. In 1 day it eats 2/3. (Or: 1 cat eats 1 mouse every {} days.) In {} days ({} periods) 1 cat eats {}. {} cats * {} = {}.",
        format_number(RIDDLE_DAYS_PER_MOUSE),
        format_number(RIDDLE_DAYS_PER_MOUSE),
        format_number(RIDDLE_DAYS),
        format_number(periods),
        format_number(per_cat),
        format_number(RIDDLE_CATS),
        format_number(per_cat),
        format_number(answer),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn more_workers_take_less_time() {
        assert!((generate(Tier::Easy).answer - 5.0).abs() < f64::EPSILON);
        let medium = generate(Tier::Medium);
        assert!((medium.answer - 8.0).abs() < f64::EPSILON);
        assert_eq!(medium.hint, "Total work: 6*12=72. 72:9=?");
    }

    #[test]
    fn cat_riddle_keeps_its_literal_answer() {
        let boss = generate(Tier::Boss);
        assert!((boss.answer - 240.0).abs() < f64::EPSILON);
        assert_eq!(boss.unit, "mice");
        assert!(boss.explanation.unwrap().contains("(20 periods)"));
    }
}
