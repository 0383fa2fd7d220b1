use thiserror::Error;

use crate::catalog::Category;
use crate::constants::MSG_WRONG_PIN;
use crate::state::Screen;

/// Errors raised when a quest action is not valid for the current state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestError {
    #[error("no generator for {category} at tier {tier}")]
    UnreachableGeneratorInput { category: Category, tier: u8 },
    #[error("action requires the {expected:?} screen (currently {actual:?})")]
    WrongScreen { expected: Screen, actual: Screen },
    #[error("a hero has already been chosen for this session")]
    PersonaAlreadyChosen,
    #[error("topic {0} does not exist")]
    UnknownTopic(u8),
    #[error("topic {topic} is locked (frontier {frontier})")]
    TopicLocked { topic: u8, frontier: u8 },
    #[error("no problem is loaded")]
    NoActiveProblem,
    #[error("the current problem no longer accepts answers")]
    ProblemClosed,
    #[error("the current problem is not finished yet")]
    NotReadyToAdvance,
    #[error("{}", MSG_WRONG_PIN)]
    InvalidOverrideSecret,
    #[error("save record is malformed: {0}")]
    MalformedSaveRecord(String),
    #[error("save storage failed for '{key}': {message}")]
    Storage { key: String, message: String },
}
