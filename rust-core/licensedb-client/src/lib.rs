// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! # licensedb client
//!
//! A Rust client library for the license catalog kept in an SW360-style
//! CouchDB database. License records share the database with other document
//! types and are told apart by the `type: "license"` discriminator.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use licensedb_client::config::CouchConfig;
//! use licensedb_client::repository::LicenseRepository;
//! use licensedb_client::types::LicenseInput;
//!
//! # async fn run() -> licensedb_client::error::Result<()> {
//! let config = CouchConfig::new("http://localhost:5984", "sw360db")
//!     .with_credentials("admin", "password");
//! let repo = LicenseRepository::new(config)?;
//!
//! let created = repo
//!     .create_license(&LicenseInput::new("MIT License", "MIT").osi_approved(true))
//!     .await?;
//! let mit = repo.get_license(&created.id).await?;
//! assert_eq!(mit.short_name, "MIT");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Immutable connection configuration.
//! - [`client`] — Authenticated HTTP transport against the database.
//! - [`server`] — Server-level calls (connection test, database listing).
//! - [`types`] — License documents, write payloads and mutation results.
//! - [`query`] — Mango selector queries for the `_find` endpoint.
//! - [`repository`] — License CRUD and selector-backed lookups.
//! - [`search`] — Client-side substring search over fetched licenses.
//! - [`display`] — Human-readable rendering of license documents.
//! - [`error`] — Error types and the crate-level `Result` alias.

pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod query;
pub mod repository;
pub mod search;
pub mod server;
pub mod types;

pub use client::CouchClient;
pub use config::CouchConfig;
pub use error::{LicenseDbError, Result};
pub use repository::{LicenseFlag, LicenseRepository};
pub use types::{LicenseDocument, LicenseInput, MutationResult};
