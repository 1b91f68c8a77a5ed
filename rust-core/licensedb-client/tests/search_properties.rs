// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Property-based tests for client-side license search

use licensedb_client::search::{matches_search, DEFAULT_SEARCH_FIELDS};
use licensedb_client::types::LicenseInput;
use licensedb_client::LicenseDocument;
use proptest::prelude::*;
use serde_json::{json, Value};

/// Generate license-like full names
fn arb_full_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .-]{5,40}"
}

/// Generate SPDX-like short names
fn arb_short_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9.-]{2,16}"
}

fn document(full_name: &str, short_name: &str) -> LicenseDocument {
    serde_json::from_value(json!({
        "_id": "id",
        "_rev": "1-a",
        "type": "license",
        "fullName": full_name,
        "shortName": short_name
    }))
    .unwrap()
}

proptest! {
    #[test]
    fn test_any_substring_of_full_name_matches_in_any_case(
        full_name in arb_full_name(),
        short_name in arb_short_name(),
        start in 0usize..40,
        len in 1usize..10,
    ) {
        let doc = document(&full_name, &short_name);
        let start = start % full_name.len();
        let end = (start + len).min(full_name.len());
        let needle = &full_name[start..end];

        prop_assert!(matches_search(&doc, &needle.to_uppercase(), DEFAULT_SEARCH_FIELDS));
        prop_assert!(matches_search(&doc, &needle.to_lowercase(), DEFAULT_SEARCH_FIELDS));
    }

    #[test]
    fn test_needle_absent_from_all_fields_never_matches(
        full_name in "[a-m ]{5,30}",
        short_name in "[a-m-]{2,10}",
        needle in "[n-z]{1,5}",
    ) {
        let doc = document(&full_name, &short_name);
        prop_assert!(!matches_search(&doc, &needle, DEFAULT_SEARCH_FIELDS));
    }

    #[test]
    fn test_written_document_always_carries_license_discriminator(
        full_name in arb_full_name(),
        short_name in arb_short_name(),
        spoofed_type in "[a-z]{1,12}",
        revision in proptest::option::of("[0-9]{1,3}-[a-f0-9]{8}"),
    ) {
        let input = LicenseInput::new(full_name.clone(), short_name.clone())
            .with_field("type", spoofed_type)
            .with_field("_rev", "0-bogus");
        let doc = input.to_document(revision.as_deref());

        prop_assert_eq!(&doc["type"], &Value::from("license"));
        prop_assert_eq!(&doc["fullName"], &Value::from(full_name));
        prop_assert_eq!(doc.get("_rev").cloned(), revision.map(Value::from));
    }
}
