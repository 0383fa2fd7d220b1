use anyhow::{Result, bail};
use mathquest_game::{
    Advance, AudioCue, Outcome, Persona, QuestEngine, QuestError, RecordingCues, SaveRecord,
    SaveStorage, SessionState, TOPICS, Tier,
};

use crate::logic::policy::{LearnerPolicy, LearnerStrategy};

/// Submissions allowed on one problem before the run is declared stuck.
const MAX_SUBMISSIONS_PER_PROBLEM: u32 = 10;

/// One learner action in a scripted plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    /// Play one topic from the map to its victory screen.
    Topic(u8),
    /// Play every topic in map order.
    Campaign,
    /// Drop the engine and start a new one over the same store.
    Reload,
    /// Instructor panel: unlock the map with the given PIN.
    Unlock(&'static str),
    /// Instructor panel: complete the quest with the given PIN.
    Complete(&'static str),
}

pub type SimulationExpectation = fn(&SimulationSummary) -> Result<()>;

/// A scripted learner and the checks its run must satisfy.
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub strategy: LearnerStrategy,
    pub steps: Vec<PlanStep>,
    pub expectations: Vec<SimulationExpectation>,
}

impl SimulationPlan {
    #[must_use]
    pub fn new(strategy: LearnerStrategy) -> Self {
        Self {
            strategy,
            steps: Vec::new(),
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_step(mut self, step: PlanStep) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: SimulationExpectation) -> Self {
        self.expectations.push(expectation);
        self
    }
}

/// What happened to a single problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemRecord {
    pub topic: u8,
    pub tier: Tier,
    pub outcomes: Vec<Outcome>,
    pub elapsed: u32,
}

impl ProblemRecord {
    #[must_use]
    pub fn points(&self) -> u32 {
        self.outcomes
            .iter()
            .map(|outcome| match outcome {
                Outcome::Correct { points } => *points,
                _ => 0,
            })
            .sum()
    }

    #[must_use]
    pub fn wrong_attempts(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| {
                matches!(
                    outcome,
                    Outcome::Shielded | Outcome::Retry { .. } | Outcome::Revealed { .. }
                )
            })
            .count()
    }

    #[must_use]
    pub fn invalid_inputs(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, Outcome::InvalidInput))
            .count()
    }

    #[must_use]
    pub fn was_revealed(&self) -> bool {
        self.outcomes
            .iter()
            .any(|outcome| matches!(outcome, Outcome::Revealed { .. }))
    }
}

/// Everything a finished run exposes to expectations.
#[derive(Debug, Clone)]
pub struct SimulationSummary {
    pub seed: u64,
    pub persona: Persona,
    pub strategy: LearnerStrategy,
    pub problems: Vec<ProblemRecord>,
    pub completions: Vec<Advance>,
    pub cues: Vec<AudioCue>,
    pub rejected_overrides: usize,
    pub reloads: usize,
    /// Progress observed right before each reload, paired with progress after it.
    pub reload_checks: Vec<(SaveRecord, SaveRecord)>,
    pub final_state: SessionState,
    pub stored: SaveRecord,
}

impl SimulationSummary {
    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.problems.iter().map(ProblemRecord::points).sum()
    }

    #[must_use]
    pub fn missed_problems(&self) -> usize {
        self.problems
            .iter()
            .filter(|problem| problem.wrong_attempts() > 0)
            .count()
    }
}

/// Drives one scripted learner through a [`QuestEngine`].
pub struct SimulationSession<S>
where
    S: SaveStorage + Clone,
{
    storage: S,
    cues: RecordingCues,
    engine: QuestEngine<S, RecordingCues>,
    persona: Persona,
    policy: Box<dyn LearnerPolicy>,
    summary_problems: Vec<ProblemRecord>,
    completions: Vec<Advance>,
    rejected_overrides: usize,
    reload_checks: Vec<(SaveRecord, SaveRecord)>,
}

impl<S> SimulationSession<S>
where
    S: SaveStorage + Clone,
{
    /// Start a fresh quest over `storage` and pick the hero.
    ///
    /// # Errors
    ///
    /// Fails if the stored record cannot be cleared or the hero cannot be chosen.
    pub fn new(storage: S, persona: Persona, strategy: LearnerStrategy, seed: u64) -> Result<Self> {
        let cues = RecordingCues::new();
        let mut engine = QuestEngine::new(storage.clone(), cues.clone());
        engine.reset()?;
        engine.select_persona(persona)?;
        Ok(Self {
            storage,
            cues,
            engine,
            persona,
            policy: strategy.create_policy(seed),
            summary_problems: Vec::new(),
            completions: Vec::new(),
            rejected_overrides: 0,
            reload_checks: Vec::new(),
        })
    }

    /// Execute every step of the plan in order.
    ///
    /// # Errors
    ///
    /// Fails on the first engine error the plan did not ask for.
    pub fn run(&mut self, steps: &[PlanStep]) -> Result<()> {
        for step in steps {
            match step {
                PlanStep::Topic(topic) => self.play_topic(*topic)?,
                PlanStep::Campaign => {
                    for topic in &TOPICS {
                        self.play_topic(topic.id)?;
                    }
                }
                PlanStep::Reload => self.reload()?,
                PlanStep::Unlock(pin) => {
                    let result = self.engine.instructor_unlock_map(pin);
                    self.note_override(result)?;
                }
                PlanStep::Complete(pin) => {
                    let result = self.engine.instructor_complete_game(pin);
                    self.note_override(result)?;
                }
            }
        }
        Ok(())
    }

    fn note_override(&mut self, result: Result<&'static str, QuestError>) -> Result<()> {
        match result {
            Ok(message) => {
                log::debug!("override accepted: {message}");
                Ok(())
            }
            Err(QuestError::InvalidOverrideSecret) => {
                self.rejected_overrides += 1;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn reload(&mut self) -> Result<()> {
        let before = self.engine.session().save_record();
        self.engine = QuestEngine::new(self.storage.clone(), self.cues.clone());
        let after = self.engine.session().save_record();
        self.engine.select_persona(self.persona)?;
        self.reload_checks.push((before, after));
        Ok(())
    }

    fn play_topic(&mut self, topic: u8) -> Result<()> {
        self.engine.enter_topic(topic)?;
        loop {
            let record = self.play_problem(topic)?;
            self.summary_problems.push(record);
            match self.engine.advance()? {
                Advance::NextProblem { .. } => {}
                done @ Advance::TopicCompleted { .. } => {
                    self.completions.push(done);
                    break;
                }
            }
        }
        self.engine.return_to_map()?;
        Ok(())
    }

    fn play_problem(&mut self, topic: u8) -> Result<ProblemRecord> {
        let Some(problem) = self.engine.session().current_problem().cloned() else {
            bail!("topic {topic} has no problem loaded");
        };
        let mut outcomes = Vec::new();
        for submissions in 0..MAX_SUBMISSIONS_PER_PROBLEM {
            let step = self.policy.answer(&problem, submissions);
            if let Some(handle) = self.engine.session().timer_handle() {
                for _ in 0..step.think_secs {
                    self.engine.tick(handle);
                }
            }
            let outcome = self.engine.submit_answer(&step.input)?;
            let finished = matches!(outcome, Outcome::Correct { .. } | Outcome::Revealed { .. });
            outcomes.push(outcome);
            if finished {
                return Ok(ProblemRecord {
                    topic,
                    tier: problem.tier,
                    outcomes,
                    elapsed: self.engine.state().elapsed(),
                });
            }
        }
        bail!(
            "{} never finished topic {topic} {} after {MAX_SUBMISSIONS_PER_PROBLEM} submissions",
            self.policy.name(),
            problem.tier
        )
    }

    /// Close the run and collect the summary.
    #[must_use]
    pub fn finish(self, seed: u64, strategy: LearnerStrategy) -> SimulationSummary {
        let stored = mathquest_game::save::load_save(&self.storage);
        SimulationSummary {
            seed,
            persona: self.persona,
            strategy,
            problems: self.summary_problems,
            completions: self.completions,
            cues: self.cues.played(),
            rejected_overrides: self.rejected_overrides,
            reloads: self.reload_checks.len(),
            reload_checks: self.reload_checks,
            final_state: self.engine.state().clone(),
            stored,
        }
    }
}

/// Run `plan` for one persona and seed over `storage`.
///
/// # Errors
///
/// Fails when the plan hits an engine error it did not script.
pub fn run_plan<S>(
    plan: &SimulationPlan,
    storage: S,
    persona: Persona,
    seed: u64,
) -> Result<SimulationSummary>
where
    S: SaveStorage + Clone,
{
    let mut session = SimulationSession::new(storage, persona, plan.strategy, seed)?;
    session.run(&plan.steps)?;
    Ok(session.finish(seed, plan.strategy))
}
