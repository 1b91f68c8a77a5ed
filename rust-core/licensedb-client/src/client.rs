// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Authenticated HTTP transport against one CouchDB database.
//!
//! [`CouchClient`] owns the database URL and a `reqwest` client whose default
//! headers carry the Basic credential (encoded once, here) and the JSON
//! content type. It performs exactly one request per call: no retries, no
//! fallbacks. Non-2xx answers become [`LicenseDbError::Remote`] with the raw
//! body, connection-level faults become [`LicenseDbError::Transport`].

use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::CouchConfig;
use crate::error::{LicenseDbError, Result};

// ---------------------------------------------------------------------------
// CouchClient
// ---------------------------------------------------------------------------

/// Low-level client for a single CouchDB database.
///
/// Holds no per-call state, so a shared reference can be used from any
/// number of tasks at once.
#[derive(Debug, Clone)]
pub struct CouchClient {
    /// Server root, e.g. `http://localhost:5984`.
    server_url: String,
    /// `<server_url>/<database>`, parsed so document ids can be pushed as
    /// escaped path segments.
    database_url: Url,
    /// `reqwest` client with the auth and content-type headers baked in.
    http: reqwest::Client,
}

impl CouchClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseDbError::Config`] if the URL does not parse, the
    /// database name is empty, or the credentials cannot form a header value.
    pub fn new(config: &CouchConfig) -> Result<Self> {
        let server_url = config.server_url().to_string();
        Url::parse(&server_url)
            .map_err(|e| LicenseDbError::Config(format!("Invalid base URL '{server_url}': {e}")))?;

        if config.database.trim().is_empty() {
            return Err(LicenseDbError::Config(
                "Database name must not be empty".to_string(),
            ));
        }

        let database_url = Url::parse(&config.database_url())
            .map_err(|e| LicenseDbError::Config(format!("Invalid database URL: {e}")))?;
        if database_url.cannot_be_a_base() {
            return Err(LicenseDbError::Config(format!(
                "Base URL '{server_url}' cannot address documents"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            basic_auth_header(&config.username, &config.password)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            database_url,
            server_url,
            http,
        })
    }

    /// Server root URL.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Database URL that document paths are appended to.
    pub fn database_url(&self) -> &str {
        self.database_url.as_str()
    }

    /// URL of document `id`, with `?rev=` appended when `revision` is given.
    ///
    /// The id is pushed as one escaped path segment, so ids containing `/`
    /// or `?` still address a single document.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseDbError::Validation`] for an empty id, which would
    /// otherwise address the database itself.
    pub fn document_url(&self, id: &str, revision: Option<&str>) -> Result<Url> {
        if id.is_empty() {
            return Err(LicenseDbError::Validation(
                "Document id must not be empty".to_string(),
            ));
        }

        let mut url = self.database_url.clone();
        url.path_segments_mut()
            .map_err(|()| LicenseDbError::Config("Database URL cannot take a path".to_string()))?
            .pop_if_empty()
            .push(id);
        if let Some(rev) = revision {
            url.query_pairs_mut().append_pair("rev", rev);
        }
        Ok(url)
    }

    // -- Requests -----------------------------------------------------------

    /// Send `method` to `<database_url><path>` with an optional JSON body.
    ///
    /// `path` is appended verbatim and may carry a query string. For
    /// single documents use [`document_request`](Self::document_request),
    /// which escapes the id.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T> {
        let url = format!("{}{}", self.database_url, path);
        self.execute(method, url, body).await
    }

    /// Send `method` to document `id`, optionally pinned to `revision`.
    pub async fn document_request<T: DeserializeOwned>(
        &self,
        method: Method,
        id: &str,
        revision: Option<&str>,
        body: Option<&Value>,
    ) -> Result<T> {
        let url = self.document_url(id, revision)?;
        self.execute(method, url.into(), body).await
    }

    /// Same as [`request`](Self::request) but relative to the server root,
    /// for endpoints such as `/_all_dbs` that live outside the database.
    pub async fn server_request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.server_url, path);
        self.execute(method, url, None).await
    }

    #[instrument(level = "debug", skip(self, body))]
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: Option<&Value>,
    ) -> Result<T> {
        let mut builder = self.http.request(method, url.as_str());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "CouchDB request failed before a response arrived");
            LicenseDbError::Transport(e)
        })?;

        self.handle_response(response).await
    }

    // -- Response handling --------------------------------------------------

    /// Decode a 2xx body as `T`, or turn anything else into a remote rejection.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %body, "CouchDB rejected request");
            return Err(LicenseDbError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "CouchDB response");
        Ok(serde_json::from_str(&body)?)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `Basic base64(username:password)`, flagged sensitive so it never shows up
/// in `Debug` output of the header map.
fn basic_auth_header(username: &str, password: &str) -> Result<HeaderValue> {
    let encoded = general_purpose::STANDARD.encode(format!("{username}:{password}"));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
        .map_err(|e| LicenseDbError::Config(format!("Invalid credentials: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}
