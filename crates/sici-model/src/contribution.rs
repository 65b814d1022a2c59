//! Contribution segment: one contribution within the serial item.

use std::fmt;

use crate::tracker::ValidationTracker;

pub const ATTR_LOCATION: &str = "location";
pub const ATTR_TITLE_CODE: &str = "title_code";
pub const ATTR_LOCAL_NUMBER: &str = "local_number";

/// Maximum length of a title code.
pub const TITLE_CODE_MAX_LEN: usize = 6;

/// Describes a single contribution (article, review, letter, ...)
/// inside the item. A SICI need not describe a contribution at all, so
/// a fully empty segment is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionSegment {
    location: Option<String>,
    title_code: Option<String>,
    local_number: Option<String>,
    tracker: ValidationTracker,
}

impl ContributionSegment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the location (starting page or equivalent).
    ///
    /// Validated against the same character class as the title code.
    pub fn set_location(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.tracker
            .record(ATTR_LOCATION, character_class_problems(&value));
        self.location = Some(value);
    }

    /// Store the title code. At most 6 characters from the restricted
    /// alphabet; both violations can be recorded at once.
    pub fn set_title_code(&mut self, value: impl Into<String>) {
        let value = value.into();
        let mut problems = Vec::new();
        if value.chars().count() > TITLE_CODE_MAX_LEN {
            problems.push(format!(
                "{value:?} is longer than {TITLE_CODE_MAX_LEN} characters"
            ));
        }
        problems.extend(character_class_problems(&value));
        self.tracker.record(ATTR_TITLE_CODE, problems);
        self.title_code = Some(value);
    }

    /// Store the local number.
    pub fn set_local_number(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.tracker
            .record(ATTR_LOCAL_NUMBER, character_class_problems(&value));
        self.local_number = Some(value);
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn title_code(&self) -> Option<&str> {
        self.title_code.as_deref()
    }

    pub fn local_number(&self) -> Option<&str> {
        self.local_number.as_deref()
    }

    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    pub fn has_title_code(&self) -> bool {
        self.title_code.is_some()
    }

    pub fn has_local_number(&self) -> bool {
        self.local_number.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.title_code.is_none() && self.local_number.is_none()
    }

    pub fn tracker(&self) -> &ValidationTracker {
        &self.tracker
    }

    /// Clear every field and every tracked problem.
    ///
    /// The control segment's derived code-structure default depends on
    /// this segment; the owning aggregate invalidates that cache
    /// whenever it resets the contribution.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_valid(&self) -> bool {
        self.tracker.is_clean()
    }
}

impl fmt::Display for ContributionSegment {
    /// Canonical layout: `LOCATION:TITLECODE:LOCALNUM`, with a double
    /// colon marking a local number that stands alone.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            f.write_str(location)?;
        }
        if let Some(title_code) = &self.title_code {
            write!(f, ":{title_code}")?;
        }
        if let Some(local_number) = &self.local_number {
            if self.location.is_some() || self.title_code.is_some() {
                write!(f, ":{local_number}")?;
            } else {
                write!(f, "::{local_number}")?;
            }
        }
        Ok(())
    }
}

/// The restricted alphabet shared by location, title code, and local
/// number: ASCII letters, digits, and the hyphen.
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

fn character_class_problems(value: &str) -> Vec<String> {
    if value.chars().all(is_token_char) {
        Vec::new()
    } else {
        vec![format!(
            "{value:?} contains characters outside letters, digits and '-'"
        )]
    }
}
