//! Serialization, reset, and default-derivation guarantees.

use proptest::option;
use proptest::prelude::*;

use sici_core::{Mode, Sici};

#[test]
fn stringification_has_no_side_effects() {
    let mut sici = Sici::new(Mode::Lax);
    sici.item_mut().set_issn("0361-526X");
    sici.item_mut().set_chronology("2011");
    sici.contribution_mut().set_title_code("KTSW");
    sici.control_mut().set_dpi("1");

    let first = sici.to_string();
    let second = sici.to_string();
    assert_eq!(first, second);
}

#[test]
fn fresh_aggregate_serializes_defaults() {
    let sici = Sici::new(Mode::Lax);
    assert_eq!(sici.to_string(), "<>1.0.ZU;2-0");
}

#[test]
fn reset_is_complete() {
    let mut sici = Sici::new(Mode::Lax);
    sici.parse("0361-5265(2011)17:3/4<60-61:AAAAAA>2.0.ZU;2-")
        .unwrap();
    assert!(!sici.is_valid());

    sici.reset();
    assert!(sici.is_valid());
    assert_eq!(sici.parsed_string(), None);
    assert_eq!(sici.item().issn(), None);
    assert!(sici.contribution().is_empty());
    assert_eq!(sici.csi(), "1");
    assert_eq!(sici.to_string(), "<>1.0.ZU;2-0");
}

#[test]
fn csi_derives_three_with_local_number() {
    let mut sici = Sici::new(Mode::Lax);
    sici.contribution_mut().set_local_number("17");
    assert_eq!(sici.csi(), "3");
}

#[test]
fn csi_derives_two_with_location_or_title_code() {
    let mut sici = Sici::new(Mode::Lax);
    sici.contribution_mut().set_location("62");
    assert_eq!(sici.csi(), "2");

    let mut sici = Sici::new(Mode::Lax);
    sici.contribution_mut().set_title_code("KTSW");
    assert_eq!(sici.csi(), "2");
}

#[test]
fn csi_derives_one_when_contribution_is_empty() {
    let sici = Sici::new(Mode::Lax);
    assert_eq!(sici.csi(), "1");
}

#[test]
fn derived_csi_goes_stale_until_contribution_reset() {
    let mut sici = Sici::new(Mode::Lax);
    assert_eq!(sici.csi(), "1");

    // The cached default survives a later contribution change.
    sici.contribution_mut().set_local_number("17");
    assert_eq!(sici.csi(), "1");

    // Resetting the contribution invalidates the cache.
    sici.reset_contribution();
    sici.contribution_mut().set_local_number("17");
    assert_eq!(sici.csi(), "3");
    assert!(sici.to_string().contains(">3.0.ZU;2-"));
}

#[test]
fn explicit_csi_is_not_overwritten_by_derivation() {
    let mut sici = Sici::new(Mode::Lax);
    sici.control_mut().set_csi("2");
    sici.contribution_mut().set_local_number("17");
    assert_eq!(sici.csi(), "2");
}

prop_compose! {
    /// A conforming identifier assembled through the mutators.
    fn conforming_sici()(
        issn in option::of("[0-9]{4}-[0-9]{3}[0-9X]"),
        chronology in option::of("[0-9]{4}(/[0-9]{2})?"),
        volume_issue in option::of(("[0-9]{1,3}", "[0-9]{1,2}")),
        location in option::of("[0-9]{1,4}(-[0-9]{1,4})?"),
        title_code in option::of("[A-Z]{1,6}"),
        local_number in option::of("[0-9]{1,4}"),
        csi in option::of("[1-3]"),
        dpi in option::of("[0-3]"),
        mfi in prop::sample::select(vec!["CD", "HD", "SC", "TX", "ZU", "ZZ"]),
    ) -> Sici {
        let mut sici = Sici::new(Mode::Lax);
        if let Some(issn) = issn {
            sici.item_mut().set_issn(issn);
        }
        if let Some(chronology) = chronology {
            sici.item_mut().set_chronology(chronology);
        }
        if let Some((volume, issue)) = volume_issue {
            sici.item_mut().set_volume(volume);
            sici.item_mut().set_issue(issue);
        }
        if let Some(location) = location {
            sici.contribution_mut().set_location(location);
        }
        if let Some(title_code) = title_code {
            sici.contribution_mut().set_title_code(title_code);
        }
        if let Some(local_number) = local_number {
            sici.contribution_mut().set_local_number(local_number);
        }
        if let Some(csi) = csi {
            sici.control_mut().set_csi(csi);
        }
        if let Some(dpi) = dpi {
            sici.control_mut().set_dpi(dpi);
        }
        sici.control_mut().set_mfi(mfi);
        sici
    }
}

proptest! {
    /// Serializing twice always yields identical output.
    #[test]
    fn to_string_is_idempotent(sici in conforming_sici()) {
        prop_assert_eq!(sici.to_string(), sici.to_string());
    }

    /// The canonical form of a mutation-built identifier survives a
    /// parse round trip character for character.
    #[test]
    fn canonical_strings_round_trip(built in conforming_sici()) {
        let canonical = built.to_string();
        let mut reparsed = Sici::new(Mode::Lax);
        let outcome = reparsed.parse(&canonical).unwrap();
        prop_assert!(outcome.round_trip, "no round trip for {}", canonical);
    }
}
