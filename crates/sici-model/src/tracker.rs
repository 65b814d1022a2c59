//! Per-attribute conformance problem bookkeeping.

use std::collections::BTreeMap;

/// Records conformance problems per attribute of a segment.
///
/// An absent attribute key means "no known problem". The tracker is
/// pure bookkeeping: it never inspects values itself, the segment
/// setters decide what to record. Every setter either clears or
/// re-records its attribute in the same operation, so the tracker is
/// always consistent with the last-written value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationTracker {
    problems: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record problems for `attr`, replacing any prior entry.
    ///
    /// An empty message list is equivalent to [`clear`](Self::clear).
    pub fn record(&mut self, attr: &'static str, messages: Vec<String>) {
        if messages.is_empty() {
            self.problems.remove(attr);
        } else {
            self.problems.insert(attr, messages);
        }
    }

    /// Remove the entry for `attr`.
    pub fn clear(&mut self, attr: &'static str) {
        self.problems.remove(attr);
    }

    /// Snapshot of the attribute → problems mapping, ordered by
    /// attribute name.
    pub fn list(&self) -> BTreeMap<&'static str, Vec<String>> {
        self.problems.clone()
    }

    /// Problems recorded for a single attribute, if any.
    pub fn problems_for(&self, attr: &str) -> Option<&[String]> {
        self.problems.get(attr).map(Vec::as_slice)
    }

    /// True iff no attribute has a recorded problem.
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}
