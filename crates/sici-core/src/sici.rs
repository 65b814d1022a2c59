//! The SICI root aggregate.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use sici_model::control::SUPPORTED_VERSION;
use sici_model::{
    ContributionSegment, ControlSegment, ItemSegment, ProblemReport, SegmentProblems,
};

use crate::error::{Result, SiciError};
use crate::mode::Mode;
use crate::parse;

/// Result of a lax-mode (or successful strict-mode) parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    /// All three segments finished tokenization without recorded
    /// problems.
    pub valid: bool,
    /// Regenerating the canonical string reproduced the raw input
    /// character for character.
    pub round_trip: bool,
}

/// A Serial Item and Contribution Identifier.
///
/// Owns exactly one item, contribution, and control segment. Attributes
/// can be populated directly through the segment mutators or by
/// [`parse`](Self::parse); either way validation is recorded at write
/// time and the canonical string is always available, valid or not.
#[derive(Debug, Clone, Default)]
pub struct Sici {
    mode: Mode,
    parsed_string: Option<String>,
    item: ItemSegment,
    contribution: ContributionSegment,
    control: ControlSegment,
}

impl Sici {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Construct with a mode name ("strict"/"lax", case- and
    /// whitespace-insensitive). An unrecognized name is a hard error.
    pub fn with_mode_name(value: &str) -> Result<Self> {
        Ok(Self::new(Mode::parse(value)?))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The raw string captured by the most recent [`parse`](Self::parse).
    pub fn parsed_string(&self) -> Option<&str> {
        self.parsed_string.as_deref()
    }

    pub fn item(&self) -> &ItemSegment {
        &self.item
    }

    pub fn item_mut(&mut self) -> &mut ItemSegment {
        &mut self.item
    }

    pub fn contribution(&self) -> &ContributionSegment {
        &self.contribution
    }

    pub fn contribution_mut(&mut self) -> &mut ContributionSegment {
        &mut self.contribution
    }

    pub fn control(&self) -> &ControlSegment {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut ControlSegment {
        &mut self.control
    }

    /// The control segment's csi, deriving and caching the default
    /// from the contribution segment when no explicit value is set.
    pub fn csi(&self) -> String {
        self.control.csi(&self.contribution)
    }

    /// Reset the contribution segment and invalidate the control
    /// segment's cached csi default so it recomputes from the emptied
    /// contribution.
    pub fn reset_contribution(&mut self) {
        self.contribution.reset();
        self.control.invalidate_csi_default();
    }

    /// Reset all three segments to "no value set" and forget the last
    /// parsed string.
    pub fn reset(&mut self) {
        self.item.reset();
        self.reset_contribution();
        self.control.reset();
        self.parsed_string = None;
    }

    /// Conjunction of the three segments' validity. Reflects what the
    /// mutators recorded; nothing is re-validated here.
    pub fn is_valid(&self) -> bool {
        self.item.is_valid() && self.contribution.is_valid() && self.control.is_valid()
    }

    /// Aggregate problem report across the three segments.
    pub fn problems(&self) -> ProblemReport {
        ProblemReport::from_segments(vec![
            SegmentProblems::from_tracker("item", self.item.tracker()),
            SegmentProblems::from_tracker("contribution", self.contribution.tracker()),
            SegmentProblems::from_tracker("control", self.control.tracker()),
        ])
    }

    /// Tokenize `raw` into the segments and report validity and
    /// round-trip fidelity.
    ///
    /// Prior state is cleared first, so re-parsing overwrites both the
    /// captured raw string and every attribute. In strict mode an
    /// empty input or a terminal version marker other than `;2-c`
    /// fails before any attribute is touched, and a non-conforming
    /// result fails after tokenization; lax mode reports the same
    /// conditions through the returned outcome and leaves the
    /// partially-populated state in place.
    pub fn parse(&mut self, raw: &str) -> Result<ParseOutcome> {
        if self.mode.is_strict() {
            if raw.is_empty() {
                return Err(SiciError::EmptyInput);
            }
            if let Some(found) = parse::terminal_version(raw)
                && !SUPPORTED_VERSION.starts_with(found)
            {
                return Err(SiciError::UnsupportedVersion { found });
            }
        }

        self.reset();
        self.parsed_string = Some(raw.to_string());
        parse::tokenize_into(self, raw);

        let valid = self.is_valid();
        let round_trip = self.canonical() == raw;
        debug!(valid, round_trip, "parsed identifier");

        if self.mode.is_strict() && !valid {
            return Err(SiciError::NonConforming {
                report: self.problems(),
            });
        }
        Ok(ParseOutcome { valid, round_trip })
    }

    /// Render the canonical string:
    /// item `<` contribution `>` control `-` check character.
    ///
    /// Always available, conforming or not. The check character is
    /// computed over everything before the final hyphen.
    pub fn canonical(&self) -> String {
        let prefix = format!(
            "{}<{}>{}",
            self.item,
            self.contribution,
            self.control.render(&self.contribution)
        );
        let check = sici_checksum::check_char(&prefix);
        format!("{prefix}-{check}")
    }
}

impl fmt::Display for Sici {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
