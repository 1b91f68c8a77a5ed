// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! In-process CouchDB stand-in for integration tests.
//!
//! Implements just enough of the CouchDB HTTP API for the client: Basic
//! auth, `_find` with equality selectors, `limit` and `fields`, document
//! CRUD with revision checks, the server root and `_all_dbs`.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use licensedb_client::{CouchConfig, LicenseRepository};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

pub const DATABASE: &str = "sw360db";
pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "password";
/// `Basic base64("admin:password")`
const EXPECTED_AUTH: &str = "Basic YWRtaW46cGFzc3dvcmQ=";

#[derive(Default)]
struct Inner {
    docs: BTreeMap<String, Value>,
    find_requests: Vec<Value>,
}

/// Shared state of the fake server.
#[derive(Clone, Default)]
pub struct FakeCouch {
    inner: Arc<Mutex<Inner>>,
}

impl FakeCouch {
    /// Every `_find` body received so far, in order.
    pub fn find_requests(&self) -> Vec<Value> {
        self.inner.lock().unwrap().find_requests.clone()
    }

    /// Store a raw document as-is, bypassing the HTTP API.
    pub fn seed(&self, id: &str, mut doc: Value) -> String {
        let rev = format!("1-{}", uuid::Uuid::new_v4().simple());
        doc["_id"] = json!(id);
        doc["_rev"] = json!(rev);
        self.inner.lock().unwrap().docs.insert(id.to_string(), doc);
        rev
    }

    /// Raw stored document, if present.
    pub fn raw(&self, id: &str) -> Option<Value> {
        self.inner.lock().unwrap().docs.get(id).cloned()
    }
}

/// A running fake server plus a repository pointed at it.
pub struct Harness {
    pub addr: SocketAddr,
    pub couch: FakeCouch,
    pub repo: LicenseRepository,
}

impl Harness {
    pub fn config(&self) -> CouchConfig {
        CouchConfig::new(format!("http://{}", self.addr), DATABASE)
            .with_credentials(USERNAME, PASSWORD)
    }
}

/// Start the fake CouchDB on an ephemeral port.
pub async fn start() -> Harness {
    let couch = FakeCouch::default();
    let app = router(couch.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = CouchConfig::new(format!("http://{addr}"), DATABASE)
        .with_credentials(USERNAME, PASSWORD);
    let repo = LicenseRepository::new(config).unwrap();

    Harness { addr, couch, repo }
}

fn router(couch: FakeCouch) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/_all_dbs", get(all_dbs))
        .route("/{db}", post(create_doc))
        .route("/{db}/_find", post(find))
        .route(
            "/{db}/{id}",
            get(get_doc).put(put_doc).delete(delete_doc),
        )
        .layer(middleware::from_fn(require_basic_auth))
        .with_state(couch)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn couch_error(status: StatusCode, error: &str, reason: &str) -> Response {
    (status, Json(json!({"error": error, "reason": reason}))).into_response()
}

fn check_db(db: &str) -> Result<(), Response> {
    if db == DATABASE {
        Ok(())
    } else {
        Err(couch_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "Database does not exist.",
        ))
    }
}

fn next_rev(current: Option<&str>) -> String {
    let generation = current
        .and_then(|rev| rev.split('-').next())
        .and_then(|n| n.parse::<u64>().ok())
        .unwrap_or(0);
    format!("{}-{}", generation + 1, uuid::Uuid::new_v4().simple())
}

async fn require_basic_auth(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(EXPECTED_AUTH);

    if authorized {
        next.run(request).await
    } else {
        couch_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Name or password is incorrect.",
        )
    }
}

async fn root() -> Json<Value> {
    Json(json!({
        "couchdb": "Welcome",
        "version": "3.3.3",
        "vendor": {"name": "The Apache Software Foundation"}
    }))
}

async fn all_dbs() -> Json<Value> {
    Json(json!(["_replicator", "_users", DATABASE]))
}

async fn find(
    State(couch): State<FakeCouch>,
    Path(db): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = check_db(&db) {
        return resp;
    }

    let mut inner = couch.inner.lock().unwrap();
    inner.find_requests.push(body.clone());

    let Some(selector) = body.get("selector").and_then(Value::as_object) else {
        return couch_error(
            StatusCode::BAD_REQUEST,
            "bad_request",
            "Missing required key: selector",
        );
    };
    let limit = body
        .get("limit")
        .and_then(Value::as_u64)
        .map(|n| n as usize)
        .unwrap_or(usize::MAX);
    let projection: Option<Vec<String>> = body.get("fields").and_then(Value::as_array).map(|f| {
        f.iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    });

    let docs: Vec<Value> = inner
        .docs
        .values()
        .filter(|doc| selector.iter().all(|(k, v)| doc.get(k) == Some(v)))
        .take(limit)
        .map(|doc| match &projection {
            Some(keep) => {
                let projected: Map<String, Value> = keep
                    .iter()
                    .filter_map(|k| doc.get(k).map(|v| (k.clone(), v.clone())))
                    .collect();
                Value::Object(projected)
            }
            None => doc.clone(),
        })
        .collect();

    Json(json!({"docs": docs, "bookmark": "nil"})).into_response()
}

async fn create_doc(
    State(couch): State<FakeCouch>,
    Path(db): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    if let Err(resp) = check_db(&db) {
        return resp;
    }

    let mut inner = couch.inner.lock().unwrap();
    let id = body
        .get("_id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());
    if inner.docs.contains_key(&id) {
        return couch_error(StatusCode::CONFLICT, "conflict", "Document update conflict.");
    }

    let rev = next_rev(None);
    body["_id"] = json!(id);
    body["_rev"] = json!(rev);
    inner.docs.insert(id.clone(), body);

    (
        StatusCode::CREATED,
        Json(json!({"ok": true, "id": id, "rev": rev})),
    )
        .into_response()
}

async fn get_doc(
    State(couch): State<FakeCouch>,
    Path((db, id)): Path<(String, String)>,
) -> Response {
    if let Err(resp) = check_db(&db) {
        return resp;
    }

    match couch.inner.lock().unwrap().docs.get(&id) {
        Some(doc) => Json(doc.clone()).into_response(),
        None => couch_error(StatusCode::NOT_FOUND, "not_found", "missing"),
    }
}

async fn put_doc(
    State(couch): State<FakeCouch>,
    Path((db, id)): Path<(String, String)>,
    Json(mut body): Json<Value>,
) -> Response {
    if let Err(resp) = check_db(&db) {
        return resp;
    }

    let mut inner = couch.inner.lock().unwrap();
    let supplied = body.get("_rev").and_then(Value::as_str).map(str::to_string);
    let current = inner
        .docs
        .get(&id)
        .and_then(|doc| doc.get("_rev"))
        .and_then(Value::as_str)
        .map(str::to_string);

    if supplied != current {
        return couch_error(StatusCode::CONFLICT, "conflict", "Document update conflict.");
    }

    let rev = next_rev(current.as_deref());
    body["_id"] = json!(id);
    body["_rev"] = json!(rev);
    inner.docs.insert(id.clone(), body);

    (
        StatusCode::CREATED,
        Json(json!({"ok": true, "id": id, "rev": rev})),
    )
        .into_response()
}

#[derive(Deserialize)]
struct RevParam {
    rev: Option<String>,
}

async fn delete_doc(
    State(couch): State<FakeCouch>,
    Path((db, id)): Path<(String, String)>,
    Query(params): Query<RevParam>,
) -> Response {
    if let Err(resp) = check_db(&db) {
        return resp;
    }

    let mut inner = couch.inner.lock().unwrap();
    let current = match inner.docs.get(&id) {
        Some(doc) => doc["_rev"].as_str().unwrap_or_default().to_string(),
        None => return couch_error(StatusCode::NOT_FOUND, "not_found", "missing"),
    };

    if params.rev.as_deref() != Some(current.as_str()) {
        return couch_error(StatusCode::CONFLICT, "conflict", "Document update conflict.");
    }

    inner.docs.remove(&id);
    let rev = next_rev(Some(&current));
    Json(json!({"ok": true, "id": id, "rev": rev})).into_response()
}
