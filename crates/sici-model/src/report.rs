//! Serializable conformance problem reports.

use serde::{Deserialize, Serialize};

use crate::tracker::ValidationTracker;

/// Problems recorded for a single attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeProblems {
    /// Attribute name (e.g. "title_code").
    pub attribute: String,
    /// Human-readable problem descriptions, in recording order.
    pub messages: Vec<String>,
}

/// Problems recorded for a single segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentProblems {
    /// Segment name: "item", "contribution" or "control".
    pub segment: String,
    /// One entry per attribute with recorded problems, ordered by
    /// attribute name.
    pub problems: Vec<AttributeProblems>,
}

impl SegmentProblems {
    /// Snapshot a tracker's state under the given segment name.
    pub fn from_tracker(segment: &str, tracker: &ValidationTracker) -> Self {
        Self {
            segment: segment.to_string(),
            problems: tracker
                .list()
                .into_iter()
                .map(|(attribute, messages)| AttributeProblems {
                    attribute: attribute.to_string(),
                    messages,
                })
                .collect(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Aggregate problem report across all three segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemReport {
    pub segments: Vec<SegmentProblems>,
}

impl ProblemReport {
    pub fn from_segments(segments: Vec<SegmentProblems>) -> Self {
        Self { segments }
    }

    /// True iff no segment has a recorded problem.
    pub fn is_clean(&self) -> bool {
        self.segments.iter().all(SegmentProblems::is_clean)
    }

    /// Number of attributes with recorded problems, across segments.
    pub fn problem_count(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| segment.problems.len())
            .sum()
    }

    /// Flat iterator over (segment, attribute, messages).
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &[String])> {
        self.segments.iter().flat_map(|segment| {
            segment.problems.iter().map(|entry| {
                (
                    segment.segment.as_str(),
                    entry.attribute.as_str(),
                    entry.messages.as_slice(),
                )
            })
        })
    }
}
