// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Error types for the licensedb client.
//!
//! All fallible operations in this crate return [`Result<T>`], an alias for
//! `std::result::Result<T, LicenseDbError>`. The database's own refusals
//! (not found, revision conflict, bad credentials, validation) all arrive as
//! [`LicenseDbError::Remote`]; the client does not branch on status codes
//! itself, callers do via the inspection helpers below.

use thiserror::Error;

/// Error type for licensedb client operations.
#[derive(Error, Debug)]
pub enum LicenseDbError {
    /// The database answered with a non-2xx status.
    #[error("HTTP {status} Error: {body}")]
    Remote {
        /// HTTP status code (e.g. 404, 409, 401).
        status: u16,
        /// Raw response body as sent by the database.
        body: String,
    },

    /// The request never produced an HTTP response (DNS, refused, reset).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A successful response did not have the expected JSON shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// An argument was refused before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The client could not be constructed from the supplied configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl LicenseDbError {
    /// HTTP status of a remote rejection, `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            LicenseDbError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for a 404 (missing document, deleted document, unknown database).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// `true` for a 409, which CouchDB returns for a stale or missing revision.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    /// `true` for 401 and 403.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// Crate-level result alias using [`LicenseDbError`].
pub type Result<T> = std::result::Result<T, LicenseDbError>;
