//! MathQuest Game Engine
//!
//! Platform-agnostic core of the MathQuest proportion tutor: the deterministic
//! problem generator, the attempt evaluator, the quest progression state machine
//! and the save record codec. Rendering, audio synthesis and the storage medium
//! are supplied by the embedding application through the traits below.

pub mod audio;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod evaluator;
pub mod journal;
pub mod mistakes;
pub mod numbers;
pub mod personas;
pub mod problems;
pub mod save;
pub mod session;
pub mod state;
pub mod timer;

use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

// Re-export commonly used types
pub use audio::{AudioCue, CuePlayer, RecordingCues, SilentCues};
pub use catalog::{Artifact, Category, TOPICS, Topic};
pub use error::QuestError;
pub use evaluator::{AttemptContext, Evaluation, Outcome, evaluate, parse_answer};
pub use journal::{Certificate, JournalEntry, certificate_code};
pub use mistakes::{MistakeLog, MistakeRecord};
pub use personas::{Persona, PersonaProfile};
pub use problems::{ProblemDescriptor, Tier, VisualAid, generate, generate_at};
pub use save::{ArtifactRef, SaveRecord};
pub use session::{Advance, QuestSession};
pub use state::{ActiveProblem, Inventory, Screen, SessionState};
pub use timer::{ProblemTimer, TimerHandle, TimerPhase};

/// Opaque key-value store holding the save record.
/// Platform-specific implementations should provide this
pub trait SaveStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the delete.
    fn delete(&self, key: &str) -> Result<(), Self::Error>;
}

/// In-memory store. Clones share the same map, so a test can keep a handle and
/// inspect what the engine wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }
}

impl SaveStorage for MemoryStorage {
    type Error = Infallible;

    fn load(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.insert(key, value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Binds a [`QuestSession`] to a save store and a cue player.
///
/// The record is read once at construction. After every action that changes a
/// durable field the whole record is rewritten before the action returns.
pub struct QuestEngine<S, C>
where
    S: SaveStorage,
    C: CuePlayer,
{
    session: QuestSession,
    storage: S,
    cues: C,
    last_saved: SaveRecord,
}

impl<S, C> QuestEngine<S, C>
where
    S: SaveStorage,
    C: CuePlayer,
{
    /// Load the stored record (or defaults) and start at hero selection.
    pub fn new(storage: S, cues: C) -> Self {
        let record = save::load_save(&storage);
        let session = QuestSession::from_save(record);
        let last_saved = session.save_record();
        Self {
            session,
            storage,
            cues,
            last_saved,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &QuestSession {
        &self.session
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        self.session.state()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Run one action, deliver its cues, then persist if durable fields moved.
    fn apply<T>(
        &mut self,
        action: impl FnOnce(&mut QuestSession) -> Result<T, QuestError>,
    ) -> Result<T, QuestError> {
        let result = action(&mut self.session);
        for cue in self.session.take_cues() {
            self.cues.play(cue);
        }
        let value = result?;
        self.persist()?;
        Ok(value)
    }

    fn persist(&mut self) -> Result<(), QuestError> {
        let record = self.session.save_record();
        if record == self.last_saved {
            return Ok(());
        }
        save::store_save(&self.storage, &record)?;
        log::debug!(
            "saved record (frontier {}, score {}, mistakes {})",
            record.unlocked_level,
            record.score,
            record.mistakes_log.len()
        );
        self.last_saved = record;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`QuestSession::select_persona`].
    pub fn select_persona(&mut self, persona: Persona) -> Result<(), QuestError> {
        self.apply(|session| session.select_persona(persona))
    }

    /// # Errors
    ///
    /// See [`QuestSession::enter_topic`].
    pub fn enter_topic(&mut self, topic_id: u8) -> Result<TimerHandle, QuestError> {
        self.apply(|session| session.enter_topic(topic_id))
    }

    /// # Errors
    ///
    /// See [`QuestSession::submit_answer`]; also [`QuestError::Storage`] when
    /// the updated record cannot be written.
    pub fn submit_answer(&mut self, raw: &str) -> Result<Outcome, QuestError> {
        self.apply(|session| session.submit_answer(raw))
    }

    /// # Errors
    ///
    /// See [`QuestSession::advance`]; also [`QuestError::Storage`].
    pub fn advance(&mut self) -> Result<Advance, QuestError> {
        self.apply(QuestSession::advance)
    }

    /// # Errors
    ///
    /// See [`QuestSession::return_to_map`].
    pub fn return_to_map(&mut self) -> Result<(), QuestError> {
        self.apply(QuestSession::return_to_map)
    }

    pub fn tick(&mut self, handle: TimerHandle) -> bool {
        self.session.tick(handle)
    }

    /// # Errors
    ///
    /// [`QuestError::InvalidOverrideSecret`] on a wrong PIN; also [`QuestError::Storage`].
    pub fn instructor_unlock_map(&mut self, secret: &str) -> Result<&'static str, QuestError> {
        self.apply(|session| session.instructor_unlock_map(secret))
    }

    /// # Errors
    ///
    /// [`QuestError::InvalidOverrideSecret`] on a wrong PIN; also [`QuestError::Storage`].
    pub fn instructor_complete_game(&mut self, secret: &str) -> Result<&'static str, QuestError> {
        self.apply(|session| session.instructor_complete_game(secret))
    }

    pub fn set_student_name(&mut self, name: impl Into<String>) {
        self.session.set_student_name(name);
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.session.set_audio_enabled(enabled);
    }

    /// Delete the stored record and start over from hero selection.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Storage`] if the record cannot be deleted. The
    /// in-memory session is reset either way.
    pub fn reset(&mut self) -> Result<(), QuestError> {
        self.session.reset();
        self.last_saved = self.session.save_record();
        save::delete_save(&self.storage)
    }
}
