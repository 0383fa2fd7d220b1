//! Append-only log of missed problems, surfaced in the end-of-quest review.
use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::problems::{ProblemDescriptor, VisualAid};

/// Snapshot of a problem taken at its first wrong attempt.
///
/// Serialized with the short keys used by existing save records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MistakeRecord {
    #[serde(rename = "q")]
    pub question: String,
    #[serde(rename = "a")]
    pub answer: f64,
    #[serde(rename = "u", default)]
    pub unit: String,
    #[serde(rename = "e", default)]
    pub explanation: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub data: Option<VisualAid>,
}

impl MistakeRecord {
    #[must_use]
    pub fn capture(problem: &ProblemDescriptor) -> Self {
        Self {
            question: problem.question.clone(),
            answer: problem.answer,
            unit: problem.unit.clone(),
            explanation: problem.explanation.clone(),
            category: problem.category,
            data: problem.visual.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct MistakeLog(Vec<MistakeRecord>);

impl MistakeLog {
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn from_records(records: Vec<MistakeRecord>) -> Self {
        Self(records)
    }

    /// Append a record. Callers guarantee at most one record per problem instance.
    pub fn record(&mut self, record: MistakeRecord) {
        self.0.push(record);
    }

    #[must_use]
    pub fn all(&self) -> &[MistakeRecord] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MistakeRecord> {
        self.0.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a MistakeLog {
    type Item = &'a MistakeRecord;
    type IntoIter = std::slice::Iter<'a, MistakeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::{Tier, generate};

    #[test]
    fn capture_copies_the_review_fields() {
        let problem = generate(Category::RatioShare, Tier::Medium, None);
        let record = MistakeRecord::capture(&problem);
        assert_eq!(record.question, problem.question);
        assert!((record.answer - 720.0).abs() < f64::EPSILON);
        assert_eq!(record.explanation, problem.explanation);
        assert_eq!(record.category, Category::RatioShare);
        assert_eq!(
            record.data,
            Some(VisualAid::Parts {
                first: 2,
                second: 3
            })
        );
    }

    #[test]
    fn log_keeps_insertion_order_without_dedup() {
        let mut log = MistakeLog::empty();
        let first = MistakeRecord::capture(&generate(Category::MapScale, Tier::Easy, None));
        let second = MistakeRecord::capture(&generate(Category::TableFill, Tier::Boss, None));
        log.record(first.clone());
        log.record(second.clone());
        log.record(first.clone());
        assert_eq!(log.len(), 3);
        assert_eq!(log.all()[0], first);
        assert_eq!(log.all()[1], second);
        assert_eq!((&log).into_iter().count(), 3);
    }

    #[test]
    fn records_use_short_keys_on_the_wire() {
        let record = MistakeRecord::capture(&generate(Category::SpeedDistance, Tier::Easy, None));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["a"], serde_json::json!(120.0));
        assert_eq!(value["u"], "km");
        assert_eq!(value["category"], "speed_distance");
        assert_eq!(value["data"], serde_json::json!({ "t": 2 }));
    }
}
