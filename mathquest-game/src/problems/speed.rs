//! Canyon: rate times time.

use super::{ProblemDescriptor, Tier, VisualAid};
use crate::catalog::Category;
use crate::numbers::format_number;

pub(super) fn generate(tier: Tier) -> ProblemDescriptor {
    match tier {
        Tier::Easy => easy(),
        Tier::Medium => medium(),
        Tier::Boss => boss(),
    }
}

fn easy() -> ProblemDescriptor {
    let speed = 60.0;
    let hours = 2_u32;
    let answer = speed * f64::from(hours);
    ProblemDescriptor::new(
        Category::SpeedDistance,
        Tier::Easy,
        format!(
            "You drive at {} km/h. How far do you get in {hours} hours?",
            format_number(speed),
        ),
        answer,
        "km",
        "Speed * Time.",
    )
    .with_explanation(format!(
        "{} * {hours} = {}.",
        format_number(speed),
        format_number(answer),
    ))
    .with_visual(VisualAid::Timeline { hours })
}

fn medium() -> ProblemDescriptor {
    let distance = 240.0;
    let hours = 4_u32;
    let later_hours = 7.0;
    let speed = distance / f64::from(hours);
    let answer = speed * later_hours;
    ProblemDescriptor::new(
        Category::SpeedDistance,
        Tier::Medium,
        format!(
            "You covered {}km in {hours} hours. How far do you get in {} hours at the same speed?",
            format_number(distance),
            format_number(later_hours),
        ),
        answer,
        "km",
        format!("Find the speed ({}:{hours}).", format_number(distance)),
    )
    .with_explanation(format!(
        "Speed = {} km/h. {} * {} = {}.",
        format_number(speed),
        format_number(speed),
        format_number(later_hours),
        format_number(answer),
    ))
    .with_visual(VisualAid::Timeline { hours })
}

/// Two vehicles closing on each other: the speeds add up.
fn boss() -> ProblemDescriptor {
    let (car, truck) = (80.0, 60.0);
    let gap = 280.0;
    let closing = car + truck;
    let answer = gap / closing;
    ProblemDescriptor::new(
        Category::SpeedDistance,
        Tier::Boss,
        format!(
            "BOSS: A car drives at {}km/h and a truck at {}km/h. They set off towards each other from towns {}km apart. After how many hours do they meet?",
            format_number(car),
            format_number(truck),
            format_number(gap),
        ),
        answer,
        "h",
        format!(
            "Add the speeds (they close in at {}+{} km/h).",
            format_number(car),
            format_number(truck),
        ),
    )
    .with_explanation(format!(
        "Combined speed {} km/h. Time = {} / {} = {} hours.",
        format_number(closing),
        format_number(gap),
        format_number(closing),
        format_number(answer),
    ))
}
