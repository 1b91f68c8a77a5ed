// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Client-side substring search.
//!
//! Mango selectors have no portable full-text predicate, so search fetches
//! every license and filters locally. Each call costs one unbounded `_find`
//! and transfers every license body, text included; for large catalogs use
//! the selector lookups in [`crate::repository`] where possible.

use tracing::debug;

use crate::error::Result;
use crate::repository::LicenseRepository;
use crate::types::{fields, LicenseDocument};

/// Fields searched when the caller does not name any.
pub const DEFAULT_SEARCH_FIELDS: &[&str] = &[fields::FULL_NAME, fields::SHORT_NAME, fields::TEXT];

impl LicenseRepository {
    /// Licenses where any of `search_fields` contains `needle`,
    /// case-insensitively. `None` searches [`DEFAULT_SEARCH_FIELDS`].
    pub async fn search_licenses(
        &self,
        needle: &str,
        search_fields: Option<&[&str]>,
    ) -> Result<Vec<LicenseDocument>> {
        let search_fields = search_fields.unwrap_or(DEFAULT_SEARCH_FIELDS);
        let all = self.list_licenses(None).await?;
        let total = all.len();

        let hits: Vec<LicenseDocument> = all
            .into_iter()
            .filter(|doc| matches_search(doc, needle, search_fields))
            .collect();

        debug!(needle, total, hits = hits.len(), "Client-side license search");
        Ok(hits)
    }
}

/// `true` if any of `search_fields` on `doc` contains `needle`, ignoring
/// case. Stops at the first matching field; absent fields never match.
pub fn matches_search(doc: &LicenseDocument, needle: &str, search_fields: &[&str]) -> bool {
    let needle = needle.to_lowercase();
    search_fields.iter().any(|field| {
        doc.field_text(field)
            .is_some_and(|value| value.to_lowercase().contains(&needle))
    })
}
