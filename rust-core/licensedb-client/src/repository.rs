// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! License operations on top of [`CouchClient`].
//!
//! Lookups are pushed to CouchDB as `_find` selectors; CRUD goes through the
//! document paths. Every write carries the revision the caller read, and a
//! stale one comes back as a 409 [`LicenseDbError::Remote`]. Nothing here
//! re-reads and retries: whoever lost the race re-fetches and decides.
//!
//! [`LicenseDbError::Remote`]: crate::error::LicenseDbError::Remote

use reqwest::Method;
use serde::de::IgnoredAny;
use serde_json::Value;
use tracing::{info, instrument};

use crate::client::CouchClient;
use crate::config::CouchConfig;
use crate::error::Result;
use crate::query::FindQuery;
use crate::types::{fields, FindResponse, LicenseDocument, LicenseInput, MutationResult};

/// Boolean license attributes that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LicenseFlag {
    /// `OSIApproved`
    OsiApproved,
    /// `checked` (reviewed by a curator)
    Checked,
}

impl LicenseFlag {
    /// Wire key of the flag.
    pub fn field(self) -> &'static str {
        match self {
            LicenseFlag::OsiApproved => fields::OSI_APPROVED,
            LicenseFlag::Checked => fields::CHECKED,
        }
    }
}

/// Domain-level access to the license documents of one database.
#[derive(Debug, Clone)]
pub struct LicenseRepository {
    client: CouchClient,
}

impl LicenseRepository {
    /// Build a repository with its own client from `config`.
    pub fn new(config: CouchConfig) -> Result<Self> {
        Ok(Self::from_client(CouchClient::new(&config)?))
    }

    pub fn from_client(client: CouchClient) -> Self {
        Self { client }
    }

    /// Underlying transport, for server-level calls.
    pub fn client(&self) -> &CouchClient {
        &self.client
    }

    // -- Queries ------------------------------------------------------------

    /// Run a `_find` query and return the matching documents.
    pub async fn find(&self, query: &FindQuery) -> Result<Vec<LicenseDocument>> {
        let body = serde_json::to_value(query)?;
        let response: FindResponse<LicenseDocument> = self
            .client
            .request(Method::POST, "/_find", Some(&body))
            .await?;
        Ok(response.docs)
    }

    /// All licenses, optionally capped at `limit`.
    pub async fn list_licenses(&self, limit: Option<usize>) -> Result<Vec<LicenseDocument>> {
        self.find(&FindQuery::licenses().limit(limit)).await
    }

    /// Licenses whose `shortName` equals `short_name` exactly. Short names
    /// are not unique, so this may return several documents.
    pub async fn find_by_short_name(&self, short_name: &str) -> Result<Vec<LicenseDocument>> {
        self.find(&FindQuery::licenses().field_eq(fields::SHORT_NAME, short_name))
            .await
    }

    /// Licenses whose `flag` is set to `value`.
    pub async fn find_by_flag(
        &self,
        flag: LicenseFlag,
        value: bool,
    ) -> Result<Vec<LicenseDocument>> {
        self.find(&FindQuery::licenses().field_eq(flag.field(), value))
            .await
    }

    pub async fn osi_approved_licenses(&self) -> Result<Vec<LicenseDocument>> {
        self.find_by_flag(LicenseFlag::OsiApproved, true).await
    }

    /// Licenses a curator has reviewed.
    pub async fn checked_licenses(&self) -> Result<Vec<LicenseDocument>> {
        self.find_by_flag(LicenseFlag::Checked, true).await
    }

    /// Licenses still pending review.
    pub async fn unchecked_licenses(&self) -> Result<Vec<LicenseDocument>> {
        self.find_by_flag(LicenseFlag::Checked, false).await
    }

    /// Number of license documents. The query is projected onto `_id` so
    /// license bodies are not transferred.
    pub async fn count_licenses(&self) -> Result<usize> {
        let body = serde_json::to_value(FindQuery::licenses().project([fields::ID]))?;
        let response: FindResponse<IgnoredAny> = self
            .client
            .request(Method::POST, "/_find", Some(&body))
            .await?;
        Ok(response.docs.len())
    }

    // -- CRUD ---------------------------------------------------------------

    /// Fetch one license by id. A missing id is a 404 remote rejection, an
    /// empty one a validation error.
    pub async fn get_license(&self, id: &str) -> Result<LicenseDocument> {
        self.client
            .document_request(Method::GET, id, None, None)
            .await
    }

    /// Store a new license. CouchDB assigns the id and first revision.
    #[instrument(skip(self, input), fields(short_name = %input.short_name))]
    pub async fn create_license(&self, input: &LicenseInput) -> Result<MutationResult> {
        let body = Value::Object(input.to_document(None));
        let result: MutationResult = self.client.request(Method::POST, "", Some(&body)).await?;
        info!(id = %result.id, rev = %result.revision, "License created");
        Ok(result)
    }

    /// Replace license `id` at `revision` with `input`.
    ///
    /// The body is a full replacement; fields left out of `input` are gone
    /// afterwards. A stale `revision` fails with a 409.
    #[instrument(skip(self, input), fields(short_name = %input.short_name))]
    pub async fn update_license(
        &self,
        id: &str,
        revision: &str,
        input: &LicenseInput,
    ) -> Result<MutationResult> {
        let body = Value::Object(input.to_document(Some(revision)));
        let result: MutationResult = self
            .client
            .document_request(Method::PUT, id, None, Some(&body))
            .await?;
        info!(rev = %result.revision, "License updated");
        Ok(result)
    }

    /// Delete license `id` at `revision`. Stale revisions fail with a 409,
    /// unknown ids with a 404.
    #[instrument(skip(self))]
    pub async fn delete_license(&self, id: &str, revision: &str) -> Result<MutationResult> {
        let result: MutationResult = self
            .client
            .document_request(Method::DELETE, id, Some(revision), None)
            .await?;
        info!("License deleted");
        Ok(result)
    }
}
