// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Mango selector queries for CouchDB's `_find` endpoint.
//!
//! Only field-equality predicates are needed: every query starts from the
//! license discriminator and narrows it with further `field == value`
//! conditions, which CouchDB combines with an implicit AND.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::{fields, LICENSE_TYPE};

/// Request body for `POST /{db}/_find`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindQuery {
    selector: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<String>>,
}

impl FindQuery {
    /// Selector matching every license document.
    pub fn licenses() -> Self {
        let mut selector = Map::new();
        selector.insert(fields::TYPE.to_string(), Value::from(LICENSE_TYPE));
        Self {
            selector,
            limit: None,
            fields: None,
        }
    }

    /// Add an equality predicate. The discriminator cannot be overridden.
    pub fn field_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        if field != fields::TYPE {
            self.selector.insert(field.to_string(), value.into());
        }
        self
    }

    /// Cap the number of returned documents. `None` and `Some(0)` both leave
    /// the cap to the server.
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|n| *n > 0);
        self
    }

    /// Project the result documents onto `fields`.
    pub fn project<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn selector(&self) -> &Map<String, Value> {
        &self.selector
    }
}
