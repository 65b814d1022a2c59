//! Control segment: structural metadata and standard version.

use std::cell::Cell;

use crate::contribution::ContributionSegment;
use crate::tracker::ValidationTracker;

pub const ATTR_CSI: &str = "csi";
pub const ATTR_DPI: &str = "dpi";
pub const ATTR_MFI: &str = "mfi";
pub const ATTR_VERSION: &str = "version";

/// The sixteen medium/format identifier codes, case-sensitive.
pub const MEDIUM_FORMAT_CODES: [&str; 16] = [
    "CD", "CF", "CO", "CT", "HD", "HE", "SC", "TB", "TH", "TL", "TS", "TX", "VX", "ZN", "ZU", "ZZ",
];

/// The medium/format identifier default.
pub const DEFAULT_MFI: &str = "ZU";

/// The only standard version this engine accepts without a problem
/// report.
pub const SUPPORTED_VERSION: &str = "2";

/// Structural metadata: code structure identifier (csi), derivative
/// part identifier (dpi), medium/format identifier (mfi), and the
/// standard version.
///
/// Every field renders with an explicit or default value, so the
/// segment never needs presence checks when serialized. The csi
/// default is derived from the sibling contribution segment and cached
/// on first read; the cache can go stale if the contribution changes
/// afterwards, which the owning aggregate compensates for by
/// invalidating it whenever the contribution is reset.
#[derive(Debug, Clone, Default)]
pub struct ControlSegment {
    csi: Option<String>,
    csi_default: Cell<Option<u8>>,
    dpi: Option<String>,
    mfi: Option<String>,
    version: Option<String>,
    tracker: ValidationTracker,
}

impl ControlSegment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the code structure identifier. Accepts 1, 2 or 3; any
    /// other value is stored and recorded as a problem.
    pub fn set_csi(&mut self, value: impl Into<String>) {
        let value = value.into();
        let problems = if matches!(value.as_str(), "1" | "2" | "3") {
            Vec::new()
        } else {
            vec![format!("{value:?} is not one of 1, 2 or 3")]
        };
        self.tracker.record(ATTR_CSI, problems);
        self.csi = Some(value);
    }

    /// Store the derivative part identifier. Accepts 0 through 3.
    pub fn set_dpi(&mut self, value: impl Into<String>) {
        let value = value.into();
        let problems = if matches!(value.as_str(), "0" | "1" | "2" | "3") {
            Vec::new()
        } else {
            vec![format!("{value:?} is not one of 0, 1, 2 or 3")]
        };
        self.tracker.record(ATTR_DPI, problems);
        self.dpi = Some(value);
    }

    /// Store the medium/format identifier. Accepts exactly one of the
    /// sixteen codes, case-sensitively.
    pub fn set_mfi(&mut self, value: impl Into<String>) {
        let value = value.into();
        let problems = if MEDIUM_FORMAT_CODES.contains(&value.as_str()) {
            Vec::new()
        } else {
            vec![format!("{value:?} is not a known medium/format code")]
        };
        self.tracker.record(ATTR_MFI, problems);
        self.mfi = Some(value);
    }

    /// Store the standard version. Only version 2 is supported.
    pub fn set_version(&mut self, value: impl Into<String>) {
        let value = value.into();
        let problems = if value == SUPPORTED_VERSION {
            Vec::new()
        } else {
            vec![format!(
                "unsupported standard version {value:?} (expected {SUPPORTED_VERSION})"
            )]
        };
        self.tracker.record(ATTR_VERSION, problems);
        self.version = Some(value);
    }

    /// The csi value: explicit if one was set, otherwise the default
    /// derived from the contribution segment, cached on first read.
    ///
    /// Derivation: 3 when the contribution has a local number, else 2
    /// when it has a location or title code, else 1.
    pub fn csi(&self, contribution: &ContributionSegment) -> String {
        if let Some(explicit) = &self.csi {
            return explicit.clone();
        }
        let derived = match self.csi_default.get() {
            Some(cached) => cached,
            None => {
                let computed = derive_csi(contribution);
                self.csi_default.set(Some(computed));
                computed
            }
        };
        derived.to_string()
    }

    /// The explicitly set csi, ignoring the derived default.
    pub fn explicit_csi(&self) -> Option<&str> {
        self.csi.as_deref()
    }

    /// Drop the cached derived csi so the next read recomputes it.
    pub fn invalidate_csi_default(&self) {
        self.csi_default.set(None);
    }

    pub fn dpi(&self) -> &str {
        self.dpi.as_deref().unwrap_or("0")
    }

    pub fn mfi(&self) -> &str {
        self.mfi.as_deref().unwrap_or(DEFAULT_MFI)
    }

    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(SUPPORTED_VERSION)
    }

    pub fn tracker(&self) -> &ValidationTracker {
        &self.tracker
    }

    /// Render the fixed `csi.dpi.mfi;version` layout.
    pub fn render(&self, contribution: &ContributionSegment) -> String {
        format!(
            "{}.{}.{};{}",
            self.csi(contribution),
            self.dpi(),
            self.mfi(),
            self.version()
        )
    }

    /// Clear all four fields, the cached csi default, and all
    /// problems.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_valid(&self) -> bool {
        self.tracker.is_clean()
    }
}

fn derive_csi(contribution: &ContributionSegment) -> u8 {
    if contribution.has_local_number() {
        3
    } else if contribution.has_location() || contribution.has_title_code() {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_render_without_any_mutation() {
        let control = ControlSegment::new();
        let contribution = ContributionSegment::new();
        assert_eq!(control.render(&contribution), "1.0.ZU;2");
    }

    #[test]
    fn csi_derives_from_contribution_state() {
        let control = ControlSegment::new();

        let mut with_local_number = ContributionSegment::new();
        with_local_number.set_local_number("17");
        assert_eq!(control.csi(&with_local_number), "3");

        let control = ControlSegment::new();
        let mut with_title_code = ContributionSegment::new();
        with_title_code.set_title_code("KTSW");
        assert_eq!(control.csi(&with_title_code), "2");

        let control = ControlSegment::new();
        assert_eq!(control.csi(&ContributionSegment::new()), "1");
    }

    #[test]
    fn derived_csi_is_cached_until_invalidated() {
        let control = ControlSegment::new();
        let mut contribution = ContributionSegment::new();
        assert_eq!(control.csi(&contribution), "1");

        // Cache keeps the first answer even though the input changed.
        contribution.set_local_number("17");
        assert_eq!(control.csi(&contribution), "1");

        control.invalidate_csi_default();
        assert_eq!(control.csi(&contribution), "3");
    }

    #[test]
    fn explicit_csi_wins_over_derivation() {
        let mut control = ControlSegment::new();
        let mut contribution = ContributionSegment::new();
        contribution.set_local_number("17");
        control.set_csi("2");
        assert_eq!(control.csi(&contribution), "2");
    }

    #[test]
    fn out_of_range_values_are_stored_and_reported() {
        let mut control = ControlSegment::new();
        control.set_csi("7");
        control.set_dpi("9");
        control.set_mfi("QQ");
        control.set_version("3");
        assert!(!control.is_valid());
        assert_eq!(control.tracker().list().len(), 4);
        let contribution = ContributionSegment::new();
        assert_eq!(control.render(&contribution), "7.9.QQ;3");
    }

    #[test]
    fn mfi_is_case_sensitive() {
        let mut control = ControlSegment::new();
        control.set_mfi("tx");
        assert!(!control.is_valid());
        control.set_mfi("TX");
        assert!(control.is_valid());
    }

    #[test]
    fn reset_restores_derived_defaults() {
        let mut control = ControlSegment::new();
        control.set_csi("3");
        control.set_dpi("2");
        control.set_mfi("CD");
        control.set_version("9");
        control.reset();
        assert!(control.is_valid());
        assert_eq!(control.render(&ContributionSegment::new()), "1.0.ZU;2");
    }
}
