// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Output selection for query results: rendered tables/cards or raw JSON.

use clap::ValueEnum;
use licensedb_client::display::{render_license, render_table};
use licensedb_client::LicenseDocument;

/// Available output formats.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tables for lists, detailed cards for single documents.
    Table,
    /// Pretty-printed JSON as stored.
    Json,
}

pub fn print_documents(docs: &[LicenseDocument], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(docs)?),
        OutputFormat::Table if docs.is_empty() => println!("No licenses found"),
        OutputFormat::Table => {
            println!("{}", render_table(docs));
            println!("{} license(s)", docs.len());
        }
    }
    Ok(())
}

pub fn print_document(doc: &LicenseDocument, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(doc)?),
        OutputFormat::Table => print!("{}", render_license(doc, true)),
    }
    Ok(())
}
