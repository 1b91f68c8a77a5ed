// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Human-readable rendering of license documents.
//!
//! Two shapes:
//! - **Card**: one framed block per license, optionally with the license text.
//! - **Table**: one row per license using `comfy-table`.
//!
//! Truncation happens only here; stored text is never shortened.

use std::fmt::Write as _;

use comfy_table::{Cell, ContentArrangement, Table};

use crate::types::LicenseDocument;

/// Characters of license text shown in a detailed card.
pub const TEXT_PREVIEW_CHARS: usize = 500;

const RULE_WIDTH: usize = 60;

/// Render a single license as a framed card.
///
/// With `detailed`, the license text follows, cut at
/// [`TEXT_PREVIEW_CHARS`] characters with a trailing `...` when longer.
pub fn render_license(doc: &LicenseDocument, detailed: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Short Name:   {}", doc.short_name);
    let _ = writeln!(out, "Full Name:    {}", doc.full_name);
    let _ = writeln!(out, "ID:           {}", doc.id);
    let _ = writeln!(out, "Revision:     {}", doc.revision);
    let _ = writeln!(out, "OSI Approved: {}", yes_no(doc.osi_approved));
    let _ = writeln!(out, "Checked:      {}", yes_no(doc.checked));

    if detailed {
        if let Some(text) = doc.text.as_deref().filter(|t| !t.is_empty()) {
            let _ = writeln!(out);
            let _ = writeln!(out, "License Text:");
            let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
            let _ = writeln!(out, "{}", truncate_text(text, TEXT_PREVIEW_CHARS));
        }
    }

    let _ = writeln!(out, "{rule}");
    out
}

/// Render licenses as a table of short name, full name, flags and id.
pub fn render_table(docs: &[LicenseDocument]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Short Name"),
        Cell::new("Full Name"),
        Cell::new("OSI"),
        Cell::new("Checked"),
        Cell::new("ID"),
    ]);

    for doc in docs {
        table.add_row(vec![
            Cell::new(&doc.short_name),
            Cell::new(&doc.full_name),
            Cell::new(yes_no(doc.osi_approved)),
            Cell::new(yes_no(doc.checked)),
            Cell::new(&doc.id),
        ]);
    }

    table.to_string()
}

/// First `max_chars` characters of `text`, with `...` appended if cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
