use crate::dom::NodePath;
use serde::Serialize;
use thiserror::Error;

/// Why a single keypoint was not highlighted. Never aborts a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The keypoint does not occur verbatim in any single text node
    #[error("keypoint not found in any text node")]
    NotFound,

    /// The matched node changed between snapshot and highlight
    #[error("stale reference at {path}: {detail}")]
    StaleReference { path: NodePath, detail: String },
}

/// Conditions under which a pass does nothing at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum PreconditionFailed {
    #[error("no keypoints to highlight")]
    NoKeypoints,

    #[error("document has no text")]
    EmptyDocument,

    #[error("text has {actual} characters, the service needs at least {min}")]
    TextTooShort { min: usize, actual: usize },
}

/// Wrapper element inserted around a matched substring
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightMarker {
    /// Location of the marker element right after insertion
    pub path: NodePath,

    /// Byte offset of the wrapped text within the original text node
    pub start: usize,

    /// Byte length of the wrapped text
    pub len: usize,

    /// The wrapped text
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedKeypoint {
    /// Position of the keypoint in the input list
    pub index: usize,
    pub keypoint: String,
    pub marker: HighlightMarker,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedKeypoint {
    /// Position of the keypoint in the input list
    pub index: usize,
    pub keypoint: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Outcome of one highlighting pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightReport {
    pub applied_count: usize,
    pub skipped_count: usize,
    pub applied: Vec<AppliedKeypoint>,
    pub skipped: Vec<SkippedKeypoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precondition: Option<PreconditionFailed>,
}

impl HighlightReport {
    /// A report for a pass that was never started
    pub fn precondition_failed(condition: PreconditionFailed) -> Self {
        Self {
            precondition: Some(condition),
            ..Self::default()
        }
    }

    pub fn record_applied(&mut self, index: usize, keypoint: &str, marker: HighlightMarker) {
        self.applied.push(AppliedKeypoint {
            index,
            keypoint: keypoint.to_string(),
            marker,
        });
        self.applied_count = self.applied.len();
    }

    pub fn record_skipped(&mut self, index: usize, keypoint: &str, reason: SkipReason) {
        self.skipped.push(SkippedKeypoint {
            index,
            keypoint: keypoint.to_string(),
            reason,
        });
        self.skipped_count = self.skipped.len();
    }

    /// Total keypoints processed
    pub fn total(&self) -> usize {
        self.applied_count + self.skipped_count
    }

    /// Keypoints that were skipped, in input order
    pub fn skipped_keypoints(&self) -> impl Iterator<Item = &str> {
        self.skipped.iter().map(|s| s.keypoint.as_str())
    }

    /// One-line summary for logs and status bars
    pub fn summary(&self) -> String {
        match self.precondition {
            Some(condition) => format!("nothing highlighted: {}", condition),
            None => format!(
                "highlighted {} of {} keypoints ({} skipped)",
                self.applied_count,
                self.total(),
                self.skipped_count
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_follow_records() {
        let mut report = HighlightReport::default();
        report.record_skipped(0, "absent", SkipReason::NotFound);
        report.record_applied(
            1,
            "present",
            HighlightMarker {
                path: NodePath::from(vec![0, 1]),
                start: 4,
                len: 7,
                text: "present".to_string(),
            },
        );

        assert_eq!(report.applied_count, 1);
        assert_eq!(report.skipped_count, 1);
        assert_eq!(report.total(), 2);
        assert_eq!(report.skipped_keypoints().collect::<Vec<_>>(), vec!["absent"]);
        assert_eq!(report.summary(), "highlighted 1 of 2 keypoints (1 skipped)");
    }

    #[test]
    fn test_precondition_summary() {
        let report = HighlightReport::precondition_failed(PreconditionFailed::EmptyDocument);
        assert_eq!(report.total(), 0);
        assert_eq!(report.summary(), "nothing highlighted: document has no text");
    }

    #[test]
    fn test_report_serialization() {
        let mut report = HighlightReport::default();
        report.record_skipped(0, "lazy dog", SkipReason::NotFound);
        report.record_skipped(
            1,
            "gone",
            SkipReason::StaleReference {
                path: NodePath::from(vec![2]),
                detail: "text changed".to_string(),
            },
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["skipped_count"], 2);
        assert_eq!(json["skipped"][0]["reason"], "not_found");
        assert_eq!(json["skipped"][1]["reason"], "stale_reference");
        assert_eq!(json["skipped"][1]["path"], serde_json::json!([2]));
        assert!(json.get("precondition").is_none());

        let json = serde_json::to_value(HighlightReport::precondition_failed(PreconditionFailed::NoKeypoints)).unwrap();
        assert_eq!(json["precondition"], "no_keypoints");
    }
}
