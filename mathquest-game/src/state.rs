use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::catalog::{Artifact, TOPICS, artifact};
use crate::constants::{FRONTIER_MAX, MAX_ATTEMPTS, TOPIC_COUNT};
use crate::evaluator::Outcome;
use crate::mistakes::MistakeLog;
use crate::personas::Persona;
use crate::problems::ProblemDescriptor;
use crate::timer::ProblemTimer;

/// Screen the learner is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    HeroSelect,
    Map,
    Level,
    Victory,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::HeroSelect => "hero-select",
            Self::Map => "map",
            Self::Level => "level",
            Self::Victory => "victory",
        };
        f.write_str(label)
    }
}

/// Collected artifacts, stored by id. Membership is checked before every insert.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory(SmallVec<[u8; TOPIC_COUNT as usize]>);

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every topic strictly before `frontier` contributes its artifact.
    #[must_use]
    pub fn from_frontier(frontier: u8) -> Self {
        Self(
            TOPICS
                .iter()
                .map(|topic| topic.id)
                .filter(|id| *id < frontier)
                .collect(),
        )
    }

    /// Every artifact in catalog order.
    #[must_use]
    pub fn complete() -> Self {
        Self::from_frontier(FRONTIER_MAX)
    }

    /// Insert an artifact id. Returns `false` if it was already owned.
    pub fn insert(&mut self, id: u8) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(id);
        true
    }

    #[must_use]
    pub fn contains(&self, id: u8) -> bool {
        self.0.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True once every artifact in the catalog is owned.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        TOPICS.iter().all(|topic| self.contains(topic.id))
    }

    #[must_use]
    pub fn ids(&self) -> &[u8] {
        &self.0
    }

    /// Owned artifacts in collection order.
    pub fn artifacts(&self) -> impl Iterator<Item = &'static Artifact> + '_ {
        self.0.iter().filter_map(|id| artifact(*id))
    }
}

/// The problem currently on screen, with its per-problem transient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveProblem {
    pub descriptor: ProblemDescriptor,
    /// Wrong submissions so far (0..=3 in practice).
    pub attempts: u8,
    pub feedback: Option<Outcome>,
}

impl ActiveProblem {
    #[must_use]
    pub const fn new(descriptor: ProblemDescriptor) -> Self {
        Self {
            descriptor,
            attempts: 0,
            feedback: None,
        }
    }

    /// Correct or revealed problems take no further submissions.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(
            self.feedback,
            Some(Outcome::Correct { .. } | Outcome::Revealed { .. })
        )
    }

    #[must_use]
    pub const fn can_advance(&self) -> bool {
        matches!(self.feedback, Some(Outcome::Correct { .. })) || self.attempts >= MAX_ATTEMPTS
    }
}

/// The single mutable record owned by a quest session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub screen: Screen,
    pub persona: Option<Persona>,
    pub active_topic: Option<u8>,
    /// Tier index within the active topic (0..=2).
    pub sub_progress: u8,
    /// Highest playable topic id; `FRONTIER_MAX` once every topic is done.
    pub frontier: u8,
    pub inventory: Inventory,
    pub score: u32,
    pub problem: Option<ActiveProblem>,
    pub timer: ProblemTimer,
    pub mistakes: MistakeLog,
    pub student_name: String,
    pub audio_enabled: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            screen: Screen::HeroSelect,
            persona: None,
            active_topic: None,
            sub_progress: 0,
            frontier: 1,
            inventory: Inventory::new(),
            score: 0,
            problem: None,
            timer: ProblemTimer::default(),
            mistakes: MistakeLog::empty(),
            student_name: String::new(),
            audio_enabled: true,
        }
    }
}

impl SessionState {
    /// Whether a topic id may be entered from the map.
    #[must_use]
    pub const fn is_unlocked(&self, topic_id: u8) -> bool {
        topic_id <= self.frontier
    }

    /// Every artifact collected; the map shows the completion overlay.
    #[must_use]
    pub fn is_quest_complete(&self) -> bool {
        self.inventory.is_complete()
    }

    /// Elapsed seconds on the current problem.
    #[must_use]
    pub const fn elapsed(&self) -> u32 {
        self.timer.elapsed()
    }

    #[must_use]
    pub fn attempts(&self) -> u8 {
        self.problem.as_ref().map_or(0, |problem| problem.attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_rejects_duplicates() {
        let mut inventory = Inventory::new();
        assert!(inventory.insert(3));
        assert!(!inventory.insert(3));
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.artifacts().next().map(|a| a.id), Some(3));
    }

    #[test]
    fn inventory_from_frontier_covers_passed_topics() {
        assert!(Inventory::from_frontier(1).is_empty());
        assert_eq!(Inventory::from_frontier(4).ids(), &[1, 2, 3]);
        let full = Inventory::from_frontier(FRONTIER_MAX);
        assert_eq!(full.len(), usize::from(TOPIC_COUNT));
        assert!(full.is_complete());
        assert_eq!(full, Inventory::complete());
    }

    #[test]
    fn fresh_state_starts_at_hero_select() {
        let state = SessionState::default();
        assert_eq!(state.screen, Screen::HeroSelect);
        assert_eq!(state.frontier, 1);
        assert!(state.is_unlocked(1));
        assert!(!state.is_unlocked(2));
        assert!(!state.is_quest_complete());
        assert_eq!(state.attempts(), 0);
        assert!(state.audio_enabled);
    }
}
