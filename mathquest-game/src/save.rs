//! Save record codec.
//!
//! The durable projection of a session is a single JSON document under
//! [`SAVE_KEY`]. Decoding is tolerant: every field falls back to its default on
//! its own, and bad list entries are dropped one by one, so a damaged record
//! never prevents the quest from starting.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::SaveStorage;
use crate::catalog::Artifact;
use crate::constants::{FRONTIER_MAX, SAVE_KEY};
use crate::error::QuestError;
use crate::mistakes::{MistakeLog, MistakeRecord};
use crate::numbers::whole_f64_to_i64;
use crate::state::{Inventory, Screen, SessionState};

/// Inventory entry as written to the save record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub id: u8,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub rule: String,
}

impl From<&Artifact> for ArtifactRef {
    fn from(artifact: &Artifact) -> Self {
        Self {
            id: artifact.id,
            name: artifact.name.to_string(),
            desc: artifact.desc.to_string(),
            rule: artifact.rule.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub unlocked_level: u8,
    pub inventory: Vec<ArtifactRef>,
    pub score: u32,
    pub mistakes_log: MistakeLog,
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            unlocked_level: 1,
            inventory: Vec::new(),
            score: 0,
            mistakes_log: MistakeLog::empty(),
        }
    }
}

impl SaveRecord {
    /// Project the durable fields out of a session.
    #[must_use]
    pub fn snapshot(state: &SessionState) -> Self {
        Self {
            unlocked_level: state.frontier,
            inventory: state.inventory.artifacts().map(ArtifactRef::from).collect(),
            score: state.score,
            mistakes_log: state.mistakes.clone(),
        }
    }

    /// Build a fresh session from this record.
    ///
    /// The inventory is rebuilt from the frontier rather than taken from the
    /// stored list, which heals records where the two disagree.
    #[must_use]
    pub fn into_state(self) -> SessionState {
        let frontier = self.unlocked_level.clamp(1, FRONTIER_MAX);
        SessionState {
            screen: Screen::HeroSelect,
            frontier,
            inventory: Inventory::from_frontier(frontier),
            score: self.score,
            mistakes: self.mistakes_log,
            ..SessionState::default()
        }
    }

    /// Serialize to the stored JSON shape.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::MalformedSaveRecord`] if serialization fails.
    pub fn encode(&self) -> Result<String, QuestError> {
        serde_json::to_string(self).map_err(|err| QuestError::MalformedSaveRecord(err.to_string()))
    }

    /// Parse a stored record, defaulting each field that is missing or damaged.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::MalformedSaveRecord`] when the text is not a JSON
    /// object at all.
    pub fn decode(raw: &str) -> Result<Self, QuestError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|err| QuestError::MalformedSaveRecord(err.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(QuestError::MalformedSaveRecord(
                "save record is not an object".to_string(),
            ));
        };

        let unlocked_level = fields
            .get("unlockedLevel")
            .and_then(decode_unlocked_level)
            .unwrap_or_else(|| {
                log::warn!("save record: unlockedLevel missing or invalid, using 1");
                1
            });
        let score = fields
            .get("score")
            .and_then(decode_score)
            .unwrap_or_else(|| {
                log::warn!("save record: score missing or invalid, using 0");
                0
            });
        let inventory = decode_list::<ArtifactRef>(fields.get("inventory"), "inventory");
        let mistakes = decode_list::<MistakeRecord>(fields.get("mistakesLog"), "mistakesLog");

        Ok(Self {
            unlocked_level,
            inventory,
            score,
            mistakes_log: MistakeLog::from_records(mistakes),
        })
    }

    /// Decode, falling back to the fresh-quest record on any failure.
    #[must_use]
    pub fn decode_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        Self::decode(raw).unwrap_or_else(|err| {
            log::warn!("{err}; starting from a fresh record");
            Self::default()
        })
    }
}

fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().and_then(whole_f64_to_i64))
}

/// Zero means "never saved a level" and maps to 1; anything past the end clamps.
fn decode_unlocked_level(value: &Value) -> Option<u8> {
    let level = whole_number(value)?;
    if level < 0 {
        return None;
    }
    let clamped = level.clamp(1, i64::from(FRONTIER_MAX));
    u8::try_from(clamped).ok()
}

fn decode_score(value: &Value) -> Option<u32> {
    let score = whole_number(value)?;
    if score < 0 {
        return None;
    }
    Some(u32::try_from(score).unwrap_or(u32::MAX))
}

fn decode_list<T: serde::de::DeserializeOwned>(value: Option<&Value>, field: &str) -> Vec<T> {
    let Some(value) = value else {
        return Vec::new();
    };
    let Some(entries) = value.as_array() else {
        log::warn!("save record: {field} is not a list, ignoring it");
        return Vec::new();
    };
    entries
        .iter()
        .enumerate()
        .filter_map(
            |(index, entry)| match serde_json::from_value::<T>(entry.clone()) {
                Ok(item) => Some(item),
                Err(err) => {
                    log::warn!("save record: dropping {field}[{index}]: {err}");
                    None
                }
            },
        )
        .collect()
}

/// Read the save record once. Missing, unreadable and malformed records all
/// yield the fresh-quest defaults.
pub fn load_save<S: SaveStorage>(storage: &S) -> SaveRecord {
    match storage.load(SAVE_KEY) {
        Ok(raw) => SaveRecord::decode_or_default(raw.as_deref()),
        Err(err) => {
            log::warn!("could not read save record '{SAVE_KEY}': {err}");
            SaveRecord::default()
        }
    }
}

/// Overwrite the save record with `record`.
///
/// # Errors
///
/// Returns [`QuestError::Storage`] when the store rejects the write.
pub fn store_save<S: SaveStorage>(storage: &S, record: &SaveRecord) -> Result<(), QuestError> {
    let encoded = record.encode()?;
    storage.save(SAVE_KEY, &encoded).map_err(|err| {
        log::error!("could not write save record '{SAVE_KEY}': {err}");
        QuestError::Storage {
            key: SAVE_KEY.to_string(),
            message: err.to_string(),
        }
    })
}

/// Remove the save record entirely.
///
/// # Errors
///
/// Returns [`QuestError::Storage`] when the store rejects the delete.
pub fn delete_save<S: SaveStorage>(storage: &S) -> Result<(), QuestError> {
    storage
        .delete(SAVE_KEY)
        .map_err(|err| QuestError::Storage {
            key: SAVE_KEY.to_string(),
            message: err.to_string(),
        })
}
