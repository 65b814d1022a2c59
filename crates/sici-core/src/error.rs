//! Error types for the SICI engine.

use thiserror::Error;

use sici_model::ProblemReport;

/// Errors raised by construction and by strict-mode parsing.
///
/// Lax-mode parsing never fails; per-attribute conformance violations
/// are recorded on the segment trackers instead of being raised.
#[derive(Debug, Error)]
pub enum SiciError {
    /// Unrecognized operating mode name at construction.
    #[error("unknown mode {value:?} (expected \"strict\" or \"lax\")")]
    UnknownMode { value: String },

    /// Strict mode refuses to parse an empty string.
    #[error("cannot parse an empty identifier in strict mode")]
    EmptyInput,

    /// Strict mode refuses an identifier whose terminal version marker
    /// names an unsupported standard version. Raised before
    /// tokenization touches any attribute.
    #[error("unsupported standard version {found:?} (expected '2')")]
    UnsupportedVersion { found: char },

    /// Strict mode: tokenization finished but left conformance
    /// problems behind.
    #[error("identifier has conformance problems in strict mode")]
    NonConforming { report: ProblemReport },
}

/// Result type alias for SICI engine operations.
pub type Result<T> = std::result::Result<T, SiciError>;
