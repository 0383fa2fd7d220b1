//! Read-only views for the journal, the completion certificate and the mistake review.
use serde::Serialize;

use crate::catalog::{Artifact, TOPICS, Topic};
use crate::constants::{CERTIFICATE_OFFSET, CERTIFICATE_SUFFIX};
use crate::mistakes::MistakeRecord;
use crate::problems::{Tier, VisualAid, generate};
use crate::state::SessionState;

/// One journal page: a topic's artifact and, once collected, its rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub topic: &'static Topic,
    pub artifact: &'static Artifact,
    pub collected: bool,
    pub rule: Option<&'static str>,
    /// Worked example drawn from the topic's easy problem.
    pub demo: Option<VisualAid>,
}

/// Journal pages in map order, worded for the session's persona.
#[must_use]
pub fn journal(state: &SessionState) -> Vec<JournalEntry> {
    TOPICS
        .iter()
        .map(|topic| {
            let collected = state.inventory.contains(topic.artifact.id);
            let demo = collected
                .then(|| generate(topic.category, Tier::Easy, state.persona).visual)
                .flatten();
            JournalEntry {
                topic,
                artifact: &topic.artifact,
                collected,
                rule: collected.then_some(topic.artifact.rule),
                demo,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Certificate {
    pub student_name: String,
    pub score: u32,
    pub code: String,
}

/// Verification code printed on the certificate, e.g. `1350-MST`.
#[must_use]
pub fn certificate_code(score: u32) -> String {
    format!(
        "{}-{CERTIFICATE_SUFFIX}",
        u64::from(score) + u64::from(CERTIFICATE_OFFSET)
    )
}

/// The certificate, available once every artifact has been collected.
#[must_use]
pub fn certificate(state: &SessionState) -> Option<Certificate> {
    state.is_quest_complete().then(|| Certificate {
        student_name: state.student_name.clone(),
        score: state.score,
        code: certificate_code(state.score),
    })
}

/// Mistakes in the order they were made.
#[must_use]
pub fn mistake_review(state: &SessionState) -> &[MistakeRecord] {
    state.mistakes.all()
}
