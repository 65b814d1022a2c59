//! Item segment: serial identification and enumeration/chronology.

use std::fmt;

use crate::tracker::ValidationTracker;

pub const ATTR_ISSN: &str = "issn";

/// Identifies the serial item: ISSN, chronology (cover date digits),
/// and either a raw enumeration or the decomposed
/// volume/issue/supplement triple.
///
/// All fields are optional and tracked independently; nothing enforces
/// a combination between the raw enumeration and the decomposed form
/// beyond what parsing produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSegment {
    issn: Option<String>,
    chronology: Option<String>,
    enumeration: Option<String>,
    volume: Option<String>,
    issue: Option<String>,
    suppl_or_idx: Option<String>,
    tracker: ValidationTracker,
}

impl ItemSegment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the ISSN and record shape/check-digit problems for it.
    ///
    /// The value is stored verbatim even when it does not conform; the
    /// violations stay queryable on the tracker.
    pub fn set_issn(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.tracker.record(ATTR_ISSN, issn_problems(&value));
        self.issn = Some(value);
    }

    /// Store the chronology (digits and slashes, without parentheses).
    pub fn set_chronology(&mut self, value: impl Into<String>) {
        self.tracker.clear("chronology");
        self.chronology = Some(value.into());
    }

    /// Store the raw enumeration text.
    pub fn set_enumeration(&mut self, value: impl Into<String>) {
        self.tracker.clear("enumeration");
        self.enumeration = Some(value.into());
    }

    pub fn set_volume(&mut self, value: impl Into<String>) {
        self.tracker.clear("volume");
        self.volume = Some(value.into());
    }

    pub fn set_issue(&mut self, value: impl Into<String>) {
        self.tracker.clear("issue");
        self.issue = Some(value.into());
    }

    /// Store the supplement (`+`) or index (`*`) marker.
    pub fn set_suppl_or_idx(&mut self, value: impl Into<String>) {
        self.tracker.clear("suppl_or_idx");
        self.suppl_or_idx = Some(value.into());
    }

    pub fn issn(&self) -> Option<&str> {
        self.issn.as_deref()
    }

    pub fn chronology(&self) -> Option<&str> {
        self.chronology.as_deref()
    }

    pub fn enumeration(&self) -> Option<&str> {
        self.enumeration.as_deref()
    }

    pub fn volume(&self) -> Option<&str> {
        self.volume.as_deref()
    }

    pub fn issue(&self) -> Option<&str> {
        self.issue.as_deref()
    }

    pub fn suppl_or_idx(&self) -> Option<&str> {
        self.suppl_or_idx.as_deref()
    }

    pub fn tracker(&self) -> &ValidationTracker {
        &self.tracker
    }

    /// Clear every field and every tracked problem.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_valid(&self) -> bool {
        self.tracker.is_clean()
    }
}

impl fmt::Display for ItemSegment {
    /// Canonical layout: `ISSN(CHRONOLOGY)ENUMERATION`.
    ///
    /// The chronology parentheses are omitted entirely when the
    /// chronology is absent. When volume and issue are both present
    /// they render as `volume:issue[:suppl_or_idx]` in place of the
    /// raw enumeration.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(issn) = &self.issn {
            f.write_str(issn)?;
        }
        if let Some(chronology) = &self.chronology {
            write!(f, "({chronology})")?;
        }
        if let (Some(volume), Some(issue)) = (&self.volume, &self.issue) {
            write!(f, "{volume}:{issue}")?;
            if let Some(suppl) = &self.suppl_or_idx {
                write!(f, ":{suppl}")?;
            }
        } else if let Some(enumeration) = &self.enumeration {
            f.write_str(enumeration)?;
        }
        Ok(())
    }
}

/// Conformance problems for an ISSN value.
///
/// Shape is `DDDD-DDD[DX]`; the final character is a modulus-11 check
/// digit (`X` standing for ten).
fn issn_problems(value: &str) -> Vec<String> {
    if !is_issn_shaped(value) {
        return vec![format!("{value:?} is not in NNNN-NNNC form")];
    }
    if !issn_check_digit_matches(value) {
        return vec![format!("{value:?} has a wrong check digit")];
    }
    Vec::new()
}

fn is_issn_shaped(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 9 || bytes[4] != b'-' {
        return false;
    }
    let digits_ok = bytes[..4]
        .iter()
        .chain(&bytes[5..8])
        .all(u8::is_ascii_digit);
    digits_ok && (bytes[8].is_ascii_digit() || bytes[8] == b'X')
}

fn issn_check_digit_matches(value: &str) -> bool {
    let bytes = value.as_bytes();
    let digits = bytes[..4].iter().chain(&bytes[5..8]);
    let sum: u32 = digits
        .zip((2..=8).rev())
        .map(|(b, weight)| u32::from(b - b'0') * weight)
        .sum();
    let expected = (11 - sum % 11) % 11;
    let actual = if bytes[8] == b'X' {
        10
    } else {
        u32::from(bytes[8] - b'0')
    };
    expected == actual
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_parts() {
        let mut item = ItemSegment::new();
        item.set_issn("0361-526X");
        item.set_chronology("2011");
        item.set_enumeration("17:3/4");
        assert_eq!(item.to_string(), "0361-526X(2011)17:3/4");
    }

    #[test]
    fn volume_issue_take_precedence_over_enumeration() {
        let mut item = ItemSegment::new();
        item.set_enumeration("ignored");
        item.set_volume("10");
        item.set_issue("2");
        item.set_suppl_or_idx("+");
        assert_eq!(item.to_string(), "10:2:+");
    }

    #[test]
    fn chronology_parentheses_omitted_when_absent() {
        let mut item = ItemSegment::new();
        item.set_issn("1234-5679");
        assert_eq!(item.to_string(), "1234-5679");
    }

    #[test]
    fn valid_issns_pass() {
        for issn in ["0361-526X", "0066-4200", "0095-4403", "1234-5679"] {
            let mut item = ItemSegment::new();
            item.set_issn(issn);
            assert!(item.is_valid(), "{issn} should validate");
        }
    }

    #[test]
    fn wrong_check_digit_is_advisory() {
        let mut item = ItemSegment::new();
        item.set_issn("0361-5265");
        assert_eq!(item.issn(), Some("0361-5265"));
        assert!(!item.is_valid());
        let problems = item.tracker().problems_for(ATTR_ISSN).unwrap();
        assert!(problems[0].contains("check digit"));
    }

    #[test]
    fn malformed_issn_reports_shape() {
        let mut item = ItemSegment::new();
        item.set_issn("12345678");
        assert!(!item.is_valid());
        let problems = item.tracker().problems_for(ATTR_ISSN).unwrap();
        assert!(problems[0].contains("NNNN-NNNC"));
    }

    #[test]
    fn reset_clears_values_and_problems() {
        let mut item = ItemSegment::new();
        item.set_issn("bogus");
        item.set_volume("3");
        item.reset();
        assert!(item.is_valid());
        assert_eq!(item.issn(), None);
        assert_eq!(item.volume(), None);
        assert_eq!(item.to_string(), "");
    }
}
