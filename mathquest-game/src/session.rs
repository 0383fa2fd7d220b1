//! Quest progression state machine.
//!
//! `HeroSelect -> Map -> Level -> Victory -> Map`. Every learner action is a
//! method returning `Result<_, QuestError>`; a rejected action leaves the state
//! untouched. Audio cues are queued for the caller to drain with
//! [`QuestSession::take_cues`].
use serde::Serialize;

use crate::audio::AudioCue;
use crate::catalog::{is_final_topic, topic};
use crate::constants::{
    FRONTIER_MAX, INSTRUCTOR_PIN, MSG_GAME_COMPLETED, MSG_MAP_UNLOCKED, TIERS_PER_TOPIC,
};
use crate::error::QuestError;
use crate::evaluator::{AttemptContext, Outcome, evaluate};
use crate::journal::{Certificate, JournalEntry, certificate, journal, mistake_review};
use crate::mistakes::MistakeRecord;
use crate::personas::Persona;
use crate::problems::{ProblemDescriptor, Tier, generate_at};
use crate::save::SaveRecord;
use crate::state::{ActiveProblem, Inventory, Screen, SessionState};
use crate::timer::TimerHandle;

/// Result of acknowledging a finished problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Advance {
    /// The next tier of the same topic is loaded.
    NextProblem { tier: Tier, handle: TimerHandle },
    /// All three tiers are done; the session is on the victory screen.
    TopicCompleted {
        topic: u8,
        new_artifact: bool,
        frontier: u8,
    },
}

#[derive(Debug, Clone, Default)]
pub struct QuestSession {
    state: SessionState,
    pending_cues: Vec<AudioCue>,
}

impl QuestSession {
    /// A fresh session on the hero selection screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_state(state: SessionState) -> Self {
        Self {
            state,
            pending_cues: Vec::new(),
        }
    }

    /// Resume from a stored record. Mid-topic progress is never stored, so the
    /// session always starts at hero selection.
    #[must_use]
    pub fn from_save(record: SaveRecord) -> Self {
        Self::from_state(record.into_state())
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn save_record(&self) -> SaveRecord {
        SaveRecord::snapshot(&self.state)
    }

    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.state.screen
    }

    #[must_use]
    pub fn current_problem(&self) -> Option<&ProblemDescriptor> {
        self.state.problem.as_ref().map(|problem| &problem.descriptor)
    }

    /// Feedback for the current problem, if any has been produced.
    #[must_use]
    pub fn feedback(&self) -> Option<&Outcome> {
        self.state.problem.as_ref()?.feedback.as_ref()
    }

    /// Handle the external clock must present with each tick.
    #[must_use]
    pub fn timer_handle(&self) -> Option<TimerHandle> {
        self.state.timer.handle()
    }

    #[must_use]
    pub fn is_quest_complete(&self) -> bool {
        self.state.is_quest_complete()
    }

    #[must_use]
    pub fn certificate(&self) -> Option<Certificate> {
        certificate(&self.state)
    }

    #[must_use]
    pub fn journal(&self) -> Vec<JournalEntry> {
        journal(&self.state)
    }

    #[must_use]
    pub fn mistake_review(&self) -> &[MistakeRecord] {
        mistake_review(&self.state)
    }

    /// Drain cues queued since the last call.
    pub fn take_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.pending_cues)
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.state.audio_enabled = enabled;
        if !enabled {
            self.pending_cues.clear();
        }
    }

    pub fn set_student_name(&mut self, name: impl Into<String>) {
        self.state.student_name = name.into();
    }

    fn cue(&mut self, cue: AudioCue) {
        if self.state.audio_enabled {
            self.pending_cues.push(cue);
        }
    }

    fn require_screen(&self, expected: Screen) -> Result<(), QuestError> {
        if self.state.screen == expected {
            Ok(())
        } else {
            Err(QuestError::WrongScreen {
                expected,
                actual: self.state.screen,
            })
        }
    }

    /// Pick the hero. Allowed once per session.
    ///
    /// # Errors
    ///
    /// [`QuestError::PersonaAlreadyChosen`] if a hero is already set, or
    /// [`QuestError::WrongScreen`] outside hero selection.
    pub fn select_persona(&mut self, persona: Persona) -> Result<(), QuestError> {
        if self.state.persona.is_some() {
            return Err(QuestError::PersonaAlreadyChosen);
        }
        self.require_screen(Screen::HeroSelect)?;
        self.state.persona = Some(persona);
        self.state.screen = Screen::Map;
        self.cue(AudioCue::Victory);
        log::info!("hero selected: {persona}");
        Ok(())
    }

    /// Open a topic from the map and load its easy problem.
    ///
    /// # Errors
    ///
    /// [`QuestError::WrongScreen`] away from the map, [`QuestError::UnknownTopic`]
    /// for ids outside the catalog, [`QuestError::TopicLocked`] past the frontier.
    pub fn enter_topic(&mut self, topic_id: u8) -> Result<TimerHandle, QuestError> {
        self.require_screen(Screen::Map)?;
        if topic(topic_id).is_none() {
            return Err(QuestError::UnknownTopic(topic_id));
        }
        if !self.state.is_unlocked(topic_id) {
            return Err(QuestError::TopicLocked {
                topic: topic_id,
                frontier: self.state.frontier,
            });
        }
        let (_, handle) = self.load_problem(topic_id, 0)?;
        self.state.active_topic = Some(topic_id);
        self.state.sub_progress = 0;
        self.state.screen = Screen::Level;
        self.cue(AudioCue::Click);
        log::info!("entered topic {topic_id}");
        Ok(handle)
    }

    fn load_problem(
        &mut self,
        topic_id: u8,
        tier_index: u8,
    ) -> Result<(Tier, TimerHandle), QuestError> {
        let entry = topic(topic_id).ok_or(QuestError::UnknownTopic(topic_id))?;
        let descriptor = generate_at(entry.category, tier_index, self.state.persona)?;
        let tier = descriptor.tier;
        log::debug!("loaded {tier} problem for topic {topic_id}");
        self.state.problem = Some(ActiveProblem::new(descriptor));
        Ok((tier, self.state.timer.restart()))
    }

    /// Judge an answer to the current problem and record its effects.
    ///
    /// # Errors
    ///
    /// [`QuestError::WrongScreen`] outside a level, [`QuestError::NoActiveProblem`]
    /// without a problem, [`QuestError::ProblemClosed`] once the problem was
    /// answered correctly or revealed.
    pub fn submit_answer(&mut self, raw: &str) -> Result<Outcome, QuestError> {
        self.require_screen(Screen::Level)?;
        let elapsed = self.state.timer.elapsed();
        let persona = self.state.persona;
        let problem = self
            .state
            .problem
            .as_mut()
            .ok_or(QuestError::NoActiveProblem)?;
        if problem.is_closed() {
            return Err(QuestError::ProblemClosed);
        }

        let ctx = AttemptContext {
            persona,
            prior_attempts: problem.attempts,
            elapsed,
        };
        let evaluation = evaluate(raw, &problem.descriptor, &ctx);
        problem.attempts = evaluation.attempts;
        problem.feedback = Some(evaluation.outcome.clone());

        if let Some(mistake) = evaluation.mistake {
            self.state.mistakes.record(mistake);
        }
        if let Outcome::Correct { points } = evaluation.outcome {
            self.state.score = self.state.score.saturating_add(points);
        }
        self.state.timer.pause();
        self.cue(if evaluation.outcome.is_correct() {
            AudioCue::Success
        } else {
            AudioCue::Error
        });
        log::debug!(
            "answer {raw:?} -> {:?} (attempts {})",
            evaluation.outcome,
            evaluation.attempts
        );
        Ok(evaluation.outcome)
    }

    /// Acknowledge a solved or revealed problem and move on.
    ///
    /// # Errors
    ///
    /// [`QuestError::NotReadyToAdvance`] while the problem is still open,
    /// [`QuestError::WrongScreen`] / [`QuestError::NoActiveProblem`] otherwise.
    pub fn advance(&mut self) -> Result<Advance, QuestError> {
        self.require_screen(Screen::Level)?;
        let problem = self
            .state
            .problem
            .as_ref()
            .ok_or(QuestError::NoActiveProblem)?;
        if !problem.can_advance() {
            return Err(QuestError::NotReadyToAdvance);
        }
        let topic_id = self.state.active_topic.ok_or(QuestError::NoActiveProblem)?;

        let next = self.state.sub_progress + 1;
        if next >= TIERS_PER_TOPIC {
            self.cue(AudioCue::Click);
            return Ok(self.complete_topic(topic_id));
        }
        let (tier, handle) = self.load_problem(topic_id, next)?;
        self.state.sub_progress = next;
        self.cue(AudioCue::Click);
        Ok(Advance::NextProblem { tier, handle })
    }

    fn complete_topic(&mut self, topic_id: u8) -> Advance {
        let frontier = self.state.frontier;
        if topic_id == frontier && frontier < FRONTIER_MAX {
            self.state.frontier = frontier + 1;
        } else if is_final_topic(topic_id) {
            self.state.frontier = FRONTIER_MAX;
        }
        let new_artifact = self.state.inventory.insert(topic_id);
        self.state.problem = None;
        self.state.timer.stop();
        self.state.screen = Screen::Victory;
        self.cue(AudioCue::Victory);
        log::info!(
            "topic {topic_id} complete (frontier {} -> {}, new artifact: {new_artifact})",
            frontier,
            self.state.frontier
        );
        Advance::TopicCompleted {
            topic: topic_id,
            new_artifact,
            frontier: self.state.frontier,
        }
    }

    /// Leave a level or the victory screen for the map. Level progress is
    /// abandoned and the timer is cancelled.
    ///
    /// # Errors
    ///
    /// [`QuestError::WrongScreen`] from hero selection or the map itself.
    pub fn return_to_map(&mut self) -> Result<(), QuestError> {
        if !matches!(self.state.screen, Screen::Level | Screen::Victory) {
            return Err(QuestError::WrongScreen {
                expected: Screen::Level,
                actual: self.state.screen,
            });
        }
        if self.state.problem.take().is_some() {
            log::debug!("abandoned problem at tier {}", self.state.sub_progress);
        }
        self.state.timer.stop();
        self.state.active_topic = None;
        self.state.sub_progress = 0;
        self.state.screen = Screen::Map;
        self.cue(AudioCue::Click);
        Ok(())
    }

    /// Apply one tick of the external one-second clock.
    pub fn tick(&mut self, handle: TimerHandle) -> bool {
        self.state.screen == Screen::Level && self.state.timer.tick(handle)
    }

    fn check_secret(secret: &str) -> Result<(), QuestError> {
        if secret == INSTRUCTOR_PIN {
            Ok(())
        } else {
            log::warn!("instructor override rejected");
            Err(QuestError::InvalidOverrideSecret)
        }
    }

    /// Instructor override: make every topic reachable.
    ///
    /// # Errors
    ///
    /// [`QuestError::InvalidOverrideSecret`] on a wrong PIN; nothing changes.
    pub fn instructor_unlock_map(&mut self, secret: &str) -> Result<&'static str, QuestError> {
        Self::check_secret(secret)?;
        self.state.frontier = FRONTIER_MAX;
        log::info!("instructor override: map unlocked");
        Ok(MSG_MAP_UNLOCKED)
    }

    /// Instructor override: grant every artifact and unlock the map.
    ///
    /// # Errors
    ///
    /// [`QuestError::InvalidOverrideSecret`] on a wrong PIN; nothing changes.
    pub fn instructor_complete_game(&mut self, secret: &str) -> Result<&'static str, QuestError> {
        Self::check_secret(secret)?;
        self.state.frontier = FRONTIER_MAX;
        self.state.inventory = Inventory::complete();
        log::info!("instructor override: quest completed");
        Ok(MSG_GAME_COMPLETED)
    }

    /// Wipe everything back to a fresh session.
    pub fn reset(&mut self) {
        self.state = SessionState::default();
        self.pending_cues.clear();
        log::info!("session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, TOPICS};
    use crate::problems::generate;

    fn on_map(persona: Persona) -> QuestSession {
        let mut session = QuestSession::new();
        session.select_persona(persona).unwrap();
        session
    }

    fn answer(session: &QuestSession) -> String {
        session.current_problem().unwrap().answer.to_string()
    }

    fn clear_topic(session: &mut QuestSession, topic_id: u8) {
        session.enter_topic(topic_id).unwrap();
        loop {
            let right = answer(session);
            session.submit_answer(&right).unwrap();
            if let Advance::TopicCompleted { .. } = session.advance().unwrap() {
                break;
            }
        }
        assert_eq!(session.screen(), Screen::Victory);
        session.return_to_map().unwrap();
    }

    #[test]
    fn persona_is_chosen_once() {
        let mut session = on_map(Persona::Builder);
        assert_eq!(session.screen(), Screen::Map);
        assert_eq!(
            session.select_persona(Persona::Scholar),
            Err(QuestError::PersonaAlreadyChosen)
        );
        assert_eq!(session.state().persona, Some(Persona::Builder));
        assert_eq!(session.take_cues(), vec![AudioCue::Victory]);
    }

    #[test]
    fn locked_and_unknown_topics_are_rejected() {
        let mut session = on_map(Persona::Explorer);
        assert_eq!(
            session.enter_topic(2),
            Err(QuestError::TopicLocked {
                topic: 2,
                frontier: 1
            })
        );
        assert_eq!(session.enter_topic(0), Err(QuestError::UnknownTopic(0)));
        assert_eq!(session.enter_topic(9), Err(QuestError::UnknownTopic(9)));
        assert_eq!(session.screen(), Screen::Map);
    }

    #[test]
    fn entering_a_topic_loads_the_easy_problem() {
        let mut session = on_map(Persona::Scholar);
        session.enter_topic(1).unwrap();
        assert_eq!(session.screen(), Screen::Level);
        assert_eq!(session.state().sub_progress, 0);
        assert_eq!(
            session.current_problem(),
            Some(&generate(
                Category::DirectProportion,
                Tier::Easy,
                Some(Persona::Scholar)
            ))
        );
    }

    #[test]
    fn first_try_easy_answer_scores_with_speed_bonus() {
        let mut session = on_map(Persona::Builder);
        let handle = session.enter_topic(1).unwrap();
        for _ in 0..5 {
            assert!(session.tick(handle));
        }
        let right = answer(&session);
        assert_eq!(
            session.submit_answer(&right).unwrap(),
            Outcome::Correct { points: 150 }
        );
        assert_eq!(session.state().score, 150);
        assert_eq!(session.state().elapsed(), 5);
        assert!(!session.tick(handle));
        assert_eq!(
            session.submit_answer(&right),
            Err(QuestError::ProblemClosed)
        );
    }

    #[test]
    fn invalid_input_changes_nothing_but_feedback() {
        let mut session = on_map(Persona::Explorer);
        let handle = session.enter_topic(1).unwrap();
        assert_eq!(session.submit_answer("abc").unwrap(), Outcome::InvalidInput);
        assert_eq!(session.state().attempts(), 0);
        assert_eq!(session.state().score, 0);
        assert!(session.state().mistakes.is_empty());
        assert!(!session.tick(handle));
        assert_eq!(session.advance(), Err(QuestError::NotReadyToAdvance));
    }

    #[test]
    fn reveal_after_three_misses_allows_advancing() {
        let mut session = on_map(Persona::Explorer);
        session.enter_topic(1).unwrap();
        let outcomes: Vec<_> = (0..3)
            .map(|_| session.submit_answer("99999").unwrap())
            .collect();
        assert!(matches!(outcomes[0], Outcome::Retry { .. }));
        assert!(matches!(outcomes[1], Outcome::Retry { .. }));
        assert!(matches!(outcomes[2], Outcome::Revealed { .. }));
        assert_eq!(session.state().mistakes.len(), 1);
        assert_eq!(session.submit_answer("1"), Err(QuestError::ProblemClosed));
        let next = session.advance().unwrap();
        assert!(matches!(next, Advance::NextProblem { tier: Tier::Medium, .. }));
        assert_eq!(session.state().attempts(), 0);
        assert_eq!(session.state().elapsed(), 0);
    }

    #[test]
    fn retry_then_correct_applies_hint_penalty() {
        let mut session = on_map(Persona::Explorer);
        session.enter_topic(1).unwrap();
        session.submit_answer("0").unwrap();
        let right = answer(&session);
        assert_eq!(
            session.submit_answer(&right).unwrap(),
            Outcome::Correct { points: 120 }
        );
    }

    #[test]
    fn completing_the_frontier_topic_unlocks_the_next() {
        let mut session = on_map(Persona::Builder);
        session.enter_topic(1).unwrap();
        for _ in 0..2 {
            let right = answer(&session);
            session.submit_answer(&right).unwrap();
            session.advance().unwrap();
        }
        let right = answer(&session);
        session.submit_answer(&right).unwrap();
        assert_eq!(
            session.advance().unwrap(),
            Advance::TopicCompleted {
                topic: 1,
                new_artifact: true,
                frontier: 2
            }
        );
        assert_eq!(session.screen(), Screen::Victory);
        assert!(session.state().inventory.contains(1));
        assert!(session.timer_handle().is_none());
    }

    #[test]
    fn replaying_a_passed_topic_keeps_frontier_and_inventory() {
        let mut session = on_map(Persona::Scholar);
        clear_topic(&mut session, 1);
        clear_topic(&mut session, 2);
        assert_eq!(session.state().frontier, 3);
        clear_topic(&mut session, 1);
        assert_eq!(session.state().frontier, 3);
        assert_eq!(session.state().inventory.ids(), &[1, 2]);
    }

    #[test]
    fn final_topic_sets_the_sentinel_frontier() {
        let mut session = on_map(Persona::Explorer);
        for topic in &TOPICS {
            clear_topic(&mut session, topic.id);
        }
        assert_eq!(session.state().frontier, FRONTIER_MAX);
        assert!(session.is_quest_complete());
        assert!(session.certificate().is_some());
    }

    #[test]
    fn final_topic_after_unlock_override_keeps_sentinel() {
        let mut session = on_map(Persona::Explorer);
        session.instructor_unlock_map(INSTRUCTOR_PIN).unwrap();
        clear_topic(&mut session, 7);
        assert_eq!(session.state().frontier, FRONTIER_MAX);
        assert_eq!(session.state().inventory.ids(), &[7]);
        assert!(!session.is_quest_complete());
    }

    #[test]
    fn leaving_a_level_discards_the_problem_and_timer() {
        let mut session = on_map(Persona::Builder);
        let handle = session.enter_topic(1).unwrap();
        let right = answer(&session);
        session.submit_answer(&right).unwrap();
        session.advance().unwrap();
        session.return_to_map().unwrap();
        assert_eq!(session.screen(), Screen::Map);
        assert!(session.current_problem().is_none());
        assert!(!session.tick(handle));
        session.enter_topic(1).unwrap();
        assert_eq!(session.state().sub_progress, 0);
        assert_eq!(session.return_to_map(), Ok(()));
        assert!(matches!(
            session.return_to_map(),
            Err(QuestError::WrongScreen { .. })
        ));
    }

    #[test]
    fn wrong_pin_is_rejected_without_side_effects() {
        let mut session = on_map(Persona::Scholar);
        let before = session.state().clone();
        let err = session.instructor_unlock_map("000").unwrap_err();
        assert_eq!(err.to_string(), "Wrong PIN!");
        assert_eq!(
            session.instructor_complete_game("000"),
            Err(QuestError::InvalidOverrideSecret)
        );
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn overrides_unlock_and_complete() {
        let mut session = on_map(Persona::Scholar);
        session.instructor_unlock_map("314").unwrap();
        assert_eq!(session.state().frontier, FRONTIER_MAX);
        assert!(session.state().inventory.is_empty());
        session.enter_topic(6).unwrap();
        session.return_to_map().unwrap();
        session.instructor_complete_game("314").unwrap();
        assert!(session.is_quest_complete());
        assert_eq!(session.certificate().unwrap().code, "1000-MST");
    }

    #[test]
    fn muted_sessions_queue_no_cues() {
        let mut session = QuestSession::new();
        session.set_audio_enabled(false);
        session.select_persona(Persona::Builder).unwrap();
        session.enter_topic(1).unwrap();
        session.submit_answer("x").unwrap();
        assert!(session.take_cues().is_empty());
        session.set_audio_enabled(true);
        session.submit_answer("1").unwrap();
        assert_eq!(session.take_cues(), vec![AudioCue::Error]);
    }

    #[test]
    fn cue_sequence_for_a_topic() {
        let mut session = on_map(Persona::Builder);
        session.take_cues();
        session.enter_topic(1).unwrap();
        session.submit_answer("0").unwrap();
        let right = answer(&session);
        session.submit_answer(&right).unwrap();
        session.advance().unwrap();
        assert_eq!(
            session.take_cues(),
            vec![
                AudioCue::Click,
                AudioCue::Error,
                AudioCue::Success,
                AudioCue::Click
            ]
        );
    }

    #[test]
    fn failed_advance_plays_no_click() {
        let mut session = on_map(Persona::Explorer);
        session.enter_topic(1).unwrap();
        session.take_cues();
        assert_eq!(session.advance(), Err(QuestError::NotReadyToAdvance));
        assert!(session.take_cues().is_empty());

        let right = answer(&session);
        session.submit_answer(&right).unwrap();
        session.take_cues();
        session.state.active_topic = Some(99);
        assert_eq!(session.advance(), Err(QuestError::UnknownTopic(99)));
        assert!(session.take_cues().is_empty());
        assert_eq!(session.state().sub_progress, 0);
    }

    #[test]
    fn reset_returns_to_defaults() {
        let mut session = on_map(Persona::Builder);
        clear_topic(&mut session, 1);
        session.set_student_name("Ana");
        session.reset();
        assert_eq!(session.state(), &SessionState::default());
        assert!(session.take_cues().is_empty());
    }
}
