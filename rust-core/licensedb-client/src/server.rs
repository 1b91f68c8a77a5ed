// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Server-level calls that do not touch the license database itself.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::CouchClient;
use crate::error::Result;

/// Welcome document served at the CouchDB root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Greeting, `"Welcome"` on stock CouchDB.
    #[serde(default)]
    pub couchdb: String,
    /// Server version string.
    #[serde(default)]
    pub version: String,
    /// Vendor, features, uuid and whatever else the server reports.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CouchClient {
    /// Fetch the server's welcome document. Doubles as a connection and
    /// credential check.
    pub async fn server_info(&self) -> Result<ServerInfo> {
        self.server_request(Method::GET, "/").await
    }

    /// Names of all databases on the server.
    pub async fn list_databases(&self) -> Result<Vec<String>> {
        self.server_request(Method::GET, "/_all_dbs").await
    }
}
