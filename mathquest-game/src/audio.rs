//! Audio cue names and the collaborator that plays them.
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCue {
    Success,
    Error,
    Click,
    Victory,
}

impl AudioCue {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Click => "click",
            Self::Victory => "victory",
        }
    }
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fire-and-forget sink for cues emitted on state transitions.
pub trait CuePlayer {
    fn play(&self, cue: AudioCue);
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCues;

impl CuePlayer for SilentCues {
    fn play(&self, _cue: AudioCue) {}
}

/// Remembers every cue it was asked to play. Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct RecordingCues {
    played: Rc<RefCell<Vec<AudioCue>>>,
}

impl RecordingCues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn played(&self) -> Vec<AudioCue> {
        self.played.borrow().clone()
    }

    pub fn clear(&self) {
        self.played.borrow_mut().clear();
    }
}

impl CuePlayer for RecordingCues {
    fn play(&self, cue: AudioCue) {
        self.played.borrow_mut().push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_names_match_the_audio_collaborator() {
        let names: Vec<_> = [
            AudioCue::Success,
            AudioCue::Error,
            AudioCue::Click,
            AudioCue::Victory,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(names, ["success", "error", "click", "victory"]);
        assert_eq!(serde_json::to_string(&AudioCue::Click).unwrap(), "\"click\"");
    }

    #[test]
    fn recording_clones_share_history() {
        let cues = RecordingCues::new();
        let handle = cues.clone();
        cues.play(AudioCue::Victory);
        handle.play(AudioCue::Click);
        assert_eq!(cues.played(), vec![AudioCue::Victory, AudioCue::Click]);
        handle.clear();
        assert!(cues.played().is_empty());
    }
}
