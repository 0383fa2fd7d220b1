use std::fmt;

use mathquest_game::ProblemDescriptor;
use mathquest_game::numbers::format_number;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// One submission chosen by a [`LearnerPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnerMove {
    /// Raw text typed into the answer box.
    pub input: String,
    /// Clock ticks that pass before the answer is submitted.
    pub think_secs: u32,
}

impl LearnerMove {
    #[must_use]
    pub fn new(input: impl Into<String>, think_secs: u32) -> Self {
        Self {
            input: input.into(),
            think_secs,
        }
    }
}

/// Policy interface for scripted learners.
pub trait LearnerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Choose the next submission. `submissions` counts earlier submissions on
    /// this problem, invalid ones included.
    fn answer(&mut self, problem: &ProblemDescriptor, submissions: u32) -> LearnerMove;
}

/// Built-in learner behaviours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LearnerStrategy {
    /// Always right, always quick.
    Prodigy,
    /// Seeded mix of right, wrong and slow answers.
    Guesser,
    /// Never right; every problem ends in a reveal.
    Stubborn,
    /// Types something unreadable first, then the right answer.
    Typo,
}

impl LearnerStrategy {
    pub const ALL: [Self; 4] = [Self::Prodigy, Self::Guesser, Self::Stubborn, Self::Typo];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Prodigy => "prodigy",
            Self::Guesser => "guesser",
            Self::Stubborn => "stubborn",
            Self::Typo => "typo",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn LearnerPolicy> {
        match self {
            Self::Prodigy => Box::new(ProdigyPolicy),
            Self::Guesser => Box::new(GuesserPolicy::new(seed)),
            Self::Stubborn => Box::new(StubbornPolicy),
            Self::Typo => Box::new(TypoPolicy),
        }
    }
}

impl fmt::Display for LearnerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const QUICK_SECS: u32 = 5;

fn right(problem: &ProblemDescriptor) -> String {
    format_number(problem.answer)
}

/// Off by at least one whole unit, so never inside the tolerance.
fn wrong(problem: &ProblemDescriptor, submissions: u32) -> String {
    format_number(problem.answer + 1.0 + f64::from(submissions))
}

struct ProdigyPolicy;
struct StubbornPolicy;
struct TypoPolicy;

struct GuesserPolicy {
    rng: ChaCha20Rng,
    accuracy: f64,
}

impl GuesserPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            accuracy: 0.6,
        }
    }
}

impl LearnerPolicy for ProdigyPolicy {
    fn name(&self) -> &'static str {
        "Prodigy"
    }

    fn answer(&mut self, problem: &ProblemDescriptor, _submissions: u32) -> LearnerMove {
        LearnerMove::new(right(problem), QUICK_SECS)
    }
}

impl LearnerPolicy for StubbornPolicy {
    fn name(&self) -> &'static str {
        "Stubborn"
    }

    fn answer(&mut self, problem: &ProblemDescriptor, submissions: u32) -> LearnerMove {
        LearnerMove::new(wrong(problem, submissions), QUICK_SECS * 2)
    }
}

impl LearnerPolicy for TypoPolicy {
    fn name(&self) -> &'static str {
        "Typo"
    }

    fn answer(&mut self, problem: &ProblemDescriptor, submissions: u32) -> LearnerMove {
        if submissions == 0 {
            LearnerMove::new("o_O", QUICK_SECS)
        } else {
            LearnerMove::new(right(problem).replacen('.', ",", 1), QUICK_SECS)
        }
    }
}

impl LearnerPolicy for GuesserPolicy {
    fn name(&self) -> &'static str {
        "Guesser"
    }

    fn answer(&mut self, problem: &ProblemDescriptor, submissions: u32) -> LearnerMove {
        let think_secs = self.rng.gen_range(2..=60);
        if self.rng.gen_bool(self.accuracy) {
            LearnerMove::new(right(problem), think_secs)
        } else {
            LearnerMove::new(wrong(problem, submissions), think_secs)
        }
    }
}
