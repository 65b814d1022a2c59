//! Parse, validate, mutate, and serialize Serial Item and Contribution
//! Identifiers (SICI, ANSI/NISO Z39.56).
//!
//! The [`Sici`] aggregate owns one item, contribution, and control
//! segment and orchestrates tokenization, canonical serialization, and
//! round-trip verification. Validation is advisory throughout: setters
//! store non-conforming values and record the violations, so malformed
//! real-world identifiers can still be parsed, stringified, and
//! diagnosed.
//!
//! ```
//! use sici_core::{Mode, Sici};
//!
//! let mut sici = Sici::new(Mode::Lax);
//! let outcome = sici.parse("0066-4200(1990)25<>1.0.TX;2-I").unwrap();
//! assert!(outcome.valid);
//! assert!(outcome.round_trip);
//! assert_eq!(sici.item().issn(), Some("0066-4200"));
//! ```

pub mod error;
pub mod mode;
mod parse;
pub mod sici;

pub use error::{Result, SiciError};
pub use mode::Mode;
pub use sici::{ParseOutcome, Sici};
