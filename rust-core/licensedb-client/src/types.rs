// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! License documents as stored in the SW360 CouchDB database.
//!
//! [`LicenseDocument`] is the read model returned by lookups, [`LicenseInput`]
//! the write payload for create and update, [`MutationResult`] what CouchDB
//! answers to every write. Field names on the wire follow SW360's schema
//! (`fullName`, `OSIApproved`, ...), which is why most fields carry a serde
//! rename.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Discriminator value marking a document as a license record.
pub const LICENSE_TYPE: &str = "license";

/// Wire keys of the fixed license fields.
pub mod fields {
    /// Store-assigned document id.
    pub const ID: &str = "_id";
    /// Store-assigned revision token.
    pub const REV: &str = "_rev";
    /// Discriminator shared by every SW360 document type.
    pub const TYPE: &str = "type";
    /// Human-readable license name.
    pub const FULL_NAME: &str = "fullName";
    /// SPDX-style identifier.
    pub const SHORT_NAME: &str = "shortName";
    /// License body.
    pub const TEXT: &str = "text";
    /// OSI approval flag.
    pub const OSI_APPROVED: &str = "OSIApproved";
    /// Review flag.
    pub const CHECKED: &str = "checked";
}

// ---------------------------------------------------------------------------
// LicenseDocument (read model)
// ---------------------------------------------------------------------------

/// A persisted license as returned by `GET /{id}` or `_find`.
///
/// `id` and `revision` together name exactly one stored version. Keys that
/// are not part of the fixed schema land in [`extra`](Self::extra) unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev")]
    pub revision: String,
    #[serde(rename = "type", default = "license_type")]
    pub document_type: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "shortName")]
    pub short_name: String,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,
    #[serde(rename = "OSIApproved", default, deserialize_with = "lenient_flag")]
    pub osi_approved: bool,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub checked: bool,
    /// Open-schema fields the caller stored alongside the fixed ones.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn license_type() -> String {
    LICENSE_TYPE.to_string()
}

/// Flags written by older SW360 releases may be `"YES"`/`"NA"` strings or
/// `null`. Only `true`, `"yes"` and `"true"` (any case) count as set.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::String(s) => s.eq_ignore_ascii_case("yes") || s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// Non-string license text (`null`, numbers, objects) reads as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

impl LicenseDocument {
    /// Textual value of a field by its wire key, for search and display.
    ///
    /// Fixed fields are read from their typed slots; anything else comes from
    /// [`extra`](Self::extra), with non-string JSON rendered compactly.
    /// Returns `None` when the document does not carry the field.
    pub fn field_text(&self, name: &str) -> Option<String> {
        match name {
            fields::ID => Some(self.id.clone()),
            fields::REV => Some(self.revision.clone()),
            fields::TYPE => Some(self.document_type.clone()),
            fields::FULL_NAME => Some(self.full_name.clone()),
            fields::SHORT_NAME => Some(self.short_name.clone()),
            fields::TEXT => self.text.clone(),
            fields::OSI_APPROVED => Some(self.osi_approved.to_string()),
            fields::CHECKED => Some(self.checked.to_string()),
            other => self.extra.get(other).map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
        }
    }

    /// Write payload carrying this document's current content, for
    /// read-modify-write updates.
    pub fn to_input(&self) -> LicenseInput {
        LicenseInput {
            full_name: self.full_name.clone(),
            short_name: self.short_name.clone(),
            text: self.text.clone(),
            osi_approved: self.osi_approved,
            checked: self.checked,
            extra: self.extra.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// LicenseInput (create / update payload)
// ---------------------------------------------------------------------------

/// Payload for creating or replacing a license.
///
/// CouchDB updates replace the whole document, so an update must carry every
/// field that should survive it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicenseInput {
    pub full_name: String,
    pub short_name: String,
    pub text: Option<String>,
    pub osi_approved: bool,
    pub checked: bool,
    /// Additional fields persisted verbatim.
    pub extra: Map<String, Value>,
}

impl LicenseInput {
    pub fn new(full_name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            short_name: short_name.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn osi_approved(mut self, approved: bool) -> Self {
        self.osi_approved = approved;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Add an open-schema field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Build the JSON body sent to CouchDB.
    ///
    /// Merge order: extension fields first, then the fixed fields and the
    /// `type` discriminator on top of them. `_id` and `_rev` never come from
    /// the extension map; `_rev` is only written when `revision` is given.
    pub fn to_document(&self, revision: Option<&str>) -> Map<String, Value> {
        let mut doc: Map<String, Value> = self
            .extra
            .iter()
            .filter(|(key, _)| key.as_str() != fields::ID && key.as_str() != fields::REV)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if let Some(rev) = revision {
            doc.insert(fields::REV.to_string(), Value::from(rev));
        }
        doc.insert(fields::TYPE.to_string(), Value::from(LICENSE_TYPE));
        doc.insert(fields::FULL_NAME.to_string(), Value::from(self.full_name.as_str()));
        doc.insert(fields::SHORT_NAME.to_string(), Value::from(self.short_name.as_str()));
        match &self.text {
            Some(text) => {
                doc.insert(fields::TEXT.to_string(), Value::from(text.as_str()));
            }
            None => {
                doc.remove(fields::TEXT);
            }
        }
        doc.insert(fields::OSI_APPROVED.to_string(), Value::Bool(self.osi_approved));
        doc.insert(fields::CHECKED.to_string(), Value::Bool(self.checked));
        doc
    }
}

// ---------------------------------------------------------------------------
// MutationResult
// ---------------------------------------------------------------------------

/// CouchDB's answer to a create, update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResult {
    pub ok: bool,
    pub id: String,
    /// The revision now current (for deletes, the tombstone revision).
    #[serde(rename = "rev")]
    pub revision: String,
}

/// Body of a `_find` reply. Only `docs` matters here.
#[derive(Debug, Deserialize)]
pub(crate) struct FindResponse<T> {
    pub docs: Vec<T>,
}
