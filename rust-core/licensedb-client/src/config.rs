// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Connection configuration.
//!
//! A [`CouchConfig`] is handed to the client constructor once and never
//! consulted again; each client is independently configured. This crate does
//! not read environment variables or files, callers that want that can
//! deserialize the config from whatever source they use.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// Connection parameters for one license database.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct CouchConfig {
    /// Server URL without the database (e.g. `http://localhost:5984`).
    pub url: String,
    /// Database holding the license documents.
    pub database: String,
    /// Basic-auth user.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
    /// Per-request timeout. `None` leaves it to the HTTP client and server.
    #[serde(with = "optional_secs")]
    pub timeout: Option<Duration>,
}

impl Default for CouchConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5984".to_string(),
            database: "sw360db".to_string(),
            username: "admin".to_string(),
            password: "password".to_string(),
            timeout: None,
        }
    }
}

impl CouchConfig {
    /// Config for `database` on the server at `url`, with default credentials.
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Replace the Basic-auth credential pair.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set an explicit per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Server URL with trailing slashes removed.
    pub fn server_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// `<server>/<database>`, the prefix every document path hangs off.
    pub fn database_url(&self) -> String {
        format!("{}/{}", self.server_url(), self.database)
    }
}

impl fmt::Debug for CouchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CouchConfig")
            .field("url", &self.url)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// `timeout` is written as whole seconds in config sources.
mod optional_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}
