//! Judging a submitted answer and pricing a correct one.
//!
//! The evaluator is pure: it receives the problem and the attempt context and
//! returns an [`Evaluation`]. Applying that evaluation (score, mistake log,
//! feedback, timer) is the session's job.
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::constants::{
    ANSWER_TOLERANCE, BASE_POINTS, HINT_PENALTY_PER_ATTEMPT, MAX_ATTEMPTS, MIN_POINTS,
    MSG_INVALID_INPUT, MSG_SHIELDED, SPEED_BONUS, TIER_POINTS,
};
use crate::mistakes::MistakeRecord;
use crate::numbers::format_number;
use crate::personas::{Persona, speed_window_for};
use crate::problems::{ProblemDescriptor, Tier};

/// Leading decimal number, optionally signed, optionally with an exponent.
const NUMBER_PREFIX: &str = r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";

fn number_prefix() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(NUMBER_PREFIX).ok())
        .as_ref()
}

/// Feedback produced by one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Not a number. No attempt consumed.
    InvalidInput,
    Correct {
        points: u32,
    },
    /// Scholar's first miss: reassurance instead of an error.
    Shielded,
    Retry {
        hint: String,
    },
    /// Third miss: the answer is shown and the learner may move on.
    Revealed {
        answer: f64,
        unit: String,
        explanation: Option<String>,
    },
}

impl Outcome {
    /// Learner-facing feedback line.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput => MSG_INVALID_INPUT.to_string(),
            Self::Correct { points } => format!("Correct! +{points} points"),
            Self::Shielded => MSG_SHIELDED.to_string(),
            Self::Retry { hint } => hint.clone(),
            Self::Revealed { answer, unit, .. } => {
                format!("Solution: {} {unit}", format_number(*answer))
            }
        }
    }

    #[must_use]
    pub const fn is_correct(&self) -> bool {
        matches!(self, Self::Correct { .. })
    }

    /// Whether the outcome should be signalled as an error (wrong or not a number).
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !self.is_correct()
    }
}

/// What the evaluator needs to know about the problem instance besides the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttemptContext {
    pub persona: Option<Persona>,
    /// Wrong submissions before this one.
    pub prior_attempts: u8,
    /// Seconds spent on the problem so far.
    pub elapsed: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub outcome: Outcome,
    /// Attempt counter after this submission.
    pub attempts: u8,
    /// Present only on the first wrong attempt of a problem.
    pub mistake: Option<MistakeRecord>,
}

/// Parse a learner's answer.
///
/// Whitespace is removed and the first comma is read as a decimal point; the
/// leading number is then taken, so trailing text such as a unit is ignored.
#[must_use]
pub fn parse_answer(raw: &str) -> Option<f64> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized = compact.replacen(',', ".", 1);
    let matched = number_prefix()?.find(&normalized)?;
    matched
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[must_use]
pub fn is_correct(parsed: f64, expected: f64) -> bool {
    (parsed - expected).abs() < ANSWER_TOLERANCE
}

/// Points for a correct answer at `tier`.
#[must_use]
pub fn score_correct(
    tier: Tier,
    elapsed: u32,
    prior_attempts: u8,
    persona: Option<Persona>,
) -> u32 {
    let mut points = BASE_POINTS + TIER_POINTS * u32::from(tier.index());
    if elapsed < speed_window_for(persona) {
        points += SPEED_BONUS;
    }
    let exempt = persona.is_some_and(Persona::hint_penalty_exempt);
    if prior_attempts > 0 && !exempt {
        let penalty = HINT_PENALTY_PER_ATTEMPT * u32::from(prior_attempts);
        points = points.saturating_sub(penalty).max(MIN_POINTS);
    }
    points
}

/// Judge one submission against the problem.
#[must_use]
pub fn evaluate(raw: &str, problem: &ProblemDescriptor, ctx: &AttemptContext) -> Evaluation {
    let Some(parsed) = parse_answer(raw) else {
        return Evaluation {
            outcome: Outcome::InvalidInput,
            attempts: ctx.prior_attempts,
            mistake: None,
        };
    };

    if is_correct(parsed, problem.answer) {
        let points = score_correct(problem.tier, ctx.elapsed, ctx.prior_attempts, ctx.persona);
        return Evaluation {
            outcome: Outcome::Correct { points },
            attempts: ctx.prior_attempts,
            mistake: None,
        };
    }

    let attempts = ctx.prior_attempts.saturating_add(1);
    let first_miss = attempts == 1;
    let mistake = first_miss.then(|| MistakeRecord::capture(problem));
    let shielded = first_miss && ctx.persona.is_some_and(Persona::shields_first_miss);

    let outcome = if shielded {
        Outcome::Shielded
    } else if attempts >= MAX_ATTEMPTS {
        Outcome::Revealed {
            answer: problem.answer,
            unit: problem.unit.clone(),
            explanation: problem.explanation.clone(),
        }
    } else {
        Outcome::Retry {
            hint: problem.hint.clone(),
        }
    };

    Evaluation {
        outcome,
        attempts,
        mistake,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::problems::generate;

    fn ctx(persona: Option<Persona>, prior_attempts: u8, elapsed: u32) -> AttemptContext {
        AttemptContext {
            persona,
            prior_attempts,
            elapsed,
        }
    }

    #[test]
    fn parse_accepts_comma_whitespace_and_trailing_text() {
        assert_eq!(parse_answer(" 12 "), Some(12.0));
        assert_eq!(parse_answer("2,5"), Some(2.5));
        assert_eq!(parse_answer("1 200"), Some(1200.0));
        assert_eq!(parse_answer("12abc"), Some(12.0));
        assert_eq!(parse_answer("-3.5km"), Some(-3.5));
        assert_eq!(parse_answer(".5"), Some(0.5));
        assert_eq!(parse_answer("1,5,2"), Some(1.5));
    }

    #[test]
    fn parse_rejects_non_numbers() {
        assert_eq!(parse_answer("abc"), None);
        assert_eq!(parse_answer(""), None);
        assert_eq!(parse_answer("   "), None);
        assert_eq!(parse_answer("Infinity"), None);
        assert_eq!(parse_answer("1e999"), None);
        assert_eq!(parse_answer("-"), None);
    }

    #[test]
    fn tolerance_is_strictly_below_a_tenth() {
        let expected = 20.0;
        assert!(is_correct(expected + 0.09, expected));
        assert!(is_correct(expected - 0.09, expected));
        assert!(!is_correct(expected + 0.11, expected));
        assert!(!is_correct(expected - 0.11, expected));
    }

    #[test]
    fn evaluate_applies_tolerance_to_raw_input() {
        let problem = generate(Category::RatioShare, Tier::Easy, None);
        let correct = evaluate("20,09", &problem, &ctx(None, 0, 0));
        assert!(correct.outcome.is_correct());
        let wrong = evaluate("20.11", &problem, &ctx(None, 0, 0));
        assert!(!wrong.outcome.is_correct());
    }

    #[test]
    fn boss_scoring_by_persona() {
        assert_eq!(score_correct(Tier::Boss, 5, 0, Some(Persona::Explorer)), 250);
        assert_eq!(score_correct(Tier::Boss, 5, 2, Some(Persona::Builder)), 250);
        assert_eq!(score_correct(Tier::Boss, 5, 2, Some(Persona::Scholar)), 190);
    }

    #[test]
    fn speed_window_depends_on_persona() {
        assert_eq!(score_correct(Tier::Easy, 29, 0, None), 150);
        assert_eq!(score_correct(Tier::Easy, 30, 0, None), 100);
        assert_eq!(score_correct(Tier::Easy, 44, 0, Some(Persona::Explorer)), 150);
        assert_eq!(score_correct(Tier::Easy, 45, 0, Some(Persona::Explorer)), 100);
    }

    #[test]
    fn penalty_is_floored_and_applies_without_persona() {
        assert_eq!(score_correct(Tier::Easy, 100, 2, None), 40);
        assert_eq!(score_correct(Tier::Easy, 100, 4, None), MIN_POINTS);
        assert_eq!(score_correct(Tier::Medium, 100, 1, Some(Persona::Explorer)), 120);
    }

    #[test]
    fn invalid_input_consumes_no_attempt() {
        let problem = generate(Category::MapScale, Tier::Easy, None);
        let evaluation = evaluate("abc", &problem, &ctx(None, 1, 0));
        assert_eq!(evaluation.outcome, Outcome::InvalidInput);
        assert_eq!(evaluation.attempts, 1);
        assert!(evaluation.mistake.is_none());
    }

    #[test]
    fn three_misses_retry_retry_reveal_with_one_mistake() {
        let problem = generate(Category::DirectProportion, Tier::Medium, Some(Persona::Builder));
        let mut attempts = 0;
        let mut outcomes = Vec::new();
        let mut mistakes = 0;
        for _ in 0..3 {
            let evaluation = evaluate("1", &problem, &ctx(Some(Persona::Builder), attempts, 0));
            attempts = evaluation.attempts;
            mistakes += usize::from(evaluation.mistake.is_some());
            outcomes.push(evaluation.outcome);
        }
        assert!(matches!(outcomes[0], Outcome::Retry { .. }));
        assert!(matches!(outcomes[1], Outcome::Retry { .. }));
        assert!(matches!(outcomes[2], Outcome::Revealed { answer, .. } if (answer - 800.0).abs() < f64::EPSILON));
        assert_eq!(attempts, 3);
        assert_eq!(mistakes, 1);
    }

    #[test]
    fn scholar_first_miss_is_shielded_but_counted() {
        let problem = generate(Category::TableFill, Tier::Easy, Some(Persona::Scholar));
        let scholar = Some(Persona::Scholar);
        let first = evaluate("0", &problem, &ctx(scholar, 0, 0));
        assert_eq!(first.outcome, Outcome::Shielded);
        assert_eq!(first.attempts, 1);
        assert!(first.mistake.is_some());
        let second = evaluate("0", &problem, &ctx(scholar, 1, 0));
        assert!(matches!(second.outcome, Outcome::Retry { .. }));
        let third = evaluate("0", &problem, &ctx(scholar, 2, 0));
        assert!(matches!(third.outcome, Outcome::Revealed { .. }));
        assert!(third.mistake.is_none());
    }

    #[test]
    fn messages_match_feedback_copy() {
        assert_eq!(Outcome::InvalidInput.message(), "Enter a number!");
        assert_eq!(Outcome::Correct { points: 150 }.message(), "Correct! +150 points");
        let revealed = Outcome::Revealed {
            answer: 2.5,
            unit: "kg".to_string(),
            explanation: None,
        };
        assert_eq!(revealed.message(), "Solution: 2.5 kg");
        assert!(revealed.is_error());
    }
}
