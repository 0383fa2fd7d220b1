//! Market: direct proportion between quantity and price.

use super::{ProblemDescriptor, Tier, VisualAid};
use crate::catalog::Category;
use crate::numbers::format_number;
use crate::personas::Persona;

const CURRENCY: &str = "den.";

/// A priced batch of goods the learner scales up.
struct Stock {
    goods: &'static str,
    quantity: f64,
    price: f64,
    wanted: f64,
    unit: &'static str,
}

const fn easy_stock(persona: Option<Persona>) -> Stock {
    match persona {
        Some(Persona::Builder) => Stock {
            goods: "bricks",
            quantity: 10.0,
            price: 50.0,
            wanted: 20.0,
            unit: "pcs",
        },
        Some(Persona::Explorer) => Stock {
            goods: "water bottles",
            quantity: 5.0,
            price: 100.0,
            wanted: 10.0,
            unit: "pcs",
        },
        Some(Persona::Scholar) | None => Stock {
            goods: "notebooks",
            quantity: 2.0,
            price: 60.0,
            wanted: 4.0,
            unit: "pcs",
        },
    }
}

const fn medium_stock(persona: Option<Persona>) -> Stock {
    match persona {
        Some(Persona::Builder) => Stock {
            goods: "paint",
            quantity: 2.5,
            price: 500.0,
            wanted: 4.0,
            unit: "kg",
        },
        Some(Persona::Explorer) => Stock {
            goods: "fuel",
            quantity: 1.5,
            price: 120.0,
            wanted: 5.0,
            unit: "l",
        },
        Some(Persona::Scholar) | None => Stock {
            goods: "pencils",
            quantity: 6.0,
            price: 234.0,
            wanted: 10.0,
            unit: "pcs",
        },
    }
}

/// Competing offers at the spice stall: (sacks, price).
const BOSS_OFFERS: [(f64, f64); 2] = [(5.0, 2_500.0), (8.0, 3_800.0)];
const BOSS_WANTED: f64 = 10.0;

pub(super) fn generate(tier: Tier, persona: Option<Persona>) -> ProblemDescriptor {
    match tier {
        Tier::Easy => easy(&easy_stock(persona)),
        Tier::Medium => medium(&medium_stock(persona)),
        Tier::Boss => boss(),
    }
}

fn visual(stock: &Stock) -> VisualAid {
    VisualAid::UnitPrice {
        quantity: stock.quantity,
        price: stock.price,
        unit: stock.unit.to_string(),
    }
}

fn easy(stock: &Stock) -> ProblemDescriptor {
    let answer = stock.price / stock.quantity * stock.wanted;
    ProblemDescriptor::new(
        Category::DirectProportion,
        Tier::Easy,
        format!(
            "If {} {} of {} cost {} {CURRENCY}, how much do {} {} cost?",
            format_number(stock.quantity),
            stock.unit,
            stock.goods,
            format_number(stock.price),
            format_number(stock.wanted),
            stock.unit,
        ),
        answer,
        CURRENCY,
        "This one is easy: twice the amount means twice the money.",
    )
    .with_visual(visual(stock))
}

fn medium(stock: &Stock) -> ProblemDescriptor {
    let unit_price = stock.price / stock.quantity;
    let answer = unit_price * stock.wanted;
    ProblemDescriptor::new(
        Category::DirectProportion,
        Tier::Medium,
        format!(
            "You pay {} {CURRENCY} for {} {} of {}. How much do {} {} cost?",
            format_number(stock.price),
            format_number(stock.quantity),
            stock.unit,
            stock.goods,
            format_number(stock.wanted),
            stock.unit,
        ),
        answer,
        CURRENCY,
        format!(
            "First find the price of 1 {} ({}:{}).",
            stock.unit,
            format_number(stock.price),
            format_number(stock.quantity),
        ),
    )
    .with_explanation(format!(
        "1 {} costs {} {CURRENCY} {} * {} = {}.",
        stock.unit,
        format_number(unit_price),
        format_number(stock.wanted),
        format_number(unit_price),
        format_number(answer),
    ))
    .with_visual(visual(stock))
}

fn boss() -> ProblemDescriptor {
    let [(sacks_a, price_a), (sacks_b, price_b)] = BOSS_OFFERS;
    let per_sack_a = price_a / sacks_a;
    let per_sack_b = price_b / sacks_b;
    let cheaper = per_sack_a.min(per_sack_b);
    let answer = cheaper * BOSS_WANTED;
    ProblemDescriptor::new(
        Category::DirectProportion,
        Tier::Boss,
        format!(
            "BOSS: The merchant offers a deal: {} sacks of spice for {} {CURRENCY} or {} sacks for {} {CURRENCY} How much do {} sacks cost at the cheaper offer?",
            format_number(sacks_a),
            format_number(price_a),
            format_number(sacks_b),
            format_number(price_b),
            format_number(BOSS_WANTED),
        ),
        answer,
        CURRENCY,
        "Work out the price of a single sack for both offers and pick the smaller one.",
    )
    .with_explanation(format!(
        "Offer 1: {}/{}={} den. per sack. Offer 2: {}/{}={} den. per sack. The cheaper is {}. {} * {} = {}.",
        format_number(price_a),
        format_number(sacks_a),
        format_number(per_sack_a),
        format_number(price_b),
        format_number(sacks_b),
        format_number(per_sack_b),
        format_number(cheaper),
        format_number(BOSS_WANTED),
        format_number(cheaper),
        format_number(answer),
    ))
}
