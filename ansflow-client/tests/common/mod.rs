//! In-process fake of the AnsFlow backend
//!
//! Serves every path under `/api/v1/` from in-memory collections, records
//! each request it sees, and can be told to answer a path with a canned
//! response or to reject tokens.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use ansflow_client::{AnsflowClient, ClientConfig, MemoryTokenStore, Session};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const TEST_TOKEN: &str = "test-token";
pub const CREATED_AT: &str = "2025-07-15T10:00:00Z";

/// One request as the backend received it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct Collection {
    rows: Vec<Value>,
    paginated: bool,
}

#[derive(Debug, Default)]
struct Backend {
    requests: Mutex<Vec<Recorded>>,
    collections: Mutex<HashMap<String, Collection>>,
    canned: Mutex<HashMap<String, (u16, Value)>>,
    accepted_token: Mutex<Option<String>>,
    next_id: Mutex<i64>,
}

pub struct TestServer {
    addr: SocketAddr,
    backend: Arc<Backend>,
}

impl TestServer {
    pub async fn start() -> Self {
        let backend = Arc::new(Backend {
            next_id: Mutex::new(100),
            ..Default::default()
        });

        let app = Router::new().fallback(handle).with_state(backend.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, backend }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A client holding [`TEST_TOKEN`]
    pub fn client(&self) -> AnsflowClient {
        self.client_with_session(Session::new(Arc::new(MemoryTokenStore::with_token(
            TEST_TOKEN,
        ))))
    }

    pub fn client_with_session(&self, session: Session) -> AnsflowClient {
        AnsflowClient::new(&ClientConfig::new(self.server_url()), session).unwrap()
    }

    /// Serve `rows` at `path` (below `/api/v1`), optionally inside the
    /// `{count, next, previous, results}` envelope
    pub fn seed(&self, path: &str, rows: Vec<Value>, paginated: bool) {
        self.backend
            .collections
            .lock()
            .unwrap()
            .insert(path.to_string(), Collection { rows, paginated });
    }

    /// Answer every request to `path` with `status` and `body`
    pub fn respond(&self, path: &str, status: u16, body: Value) {
        self.backend
            .canned
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body));
    }

    /// Reject every request not carrying `Bearer {token}`
    pub fn accept_only(&self, token: &str) {
        *self.backend.accepted_token.lock().unwrap() = Some(token.to_string());
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.backend.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<Recorded> {
        let full = format!("/api/v1{}", path);
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == full)
            .collect()
    }

    pub fn rows(&self, path: &str) -> Vec<Value> {
        self.backend
            .collections
            .lock()
            .unwrap()
            .get(path)
            .map(|c| c.rows.clone())
            .unwrap_or_default()
    }
}

async fn handle(
    State(backend): State<Arc<Backend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body: Option<Value> = serde_json::from_slice(&body).ok();

    backend.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    let Some(path) = uri.path().strip_prefix("/api/v1") else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if let Some(token) = backend.accepted_token.lock().unwrap().as_ref() {
        if authorization.as_deref() != Some(format!("Bearer {}", token).as_str()) {
            return reply(401, json!({"detail": "Given token not valid for any token type"}));
        }
    }

    if let Some((status, canned)) = backend.canned.lock().unwrap().get(path) {
        return reply(*status, canned.clone());
    }

    let mut collections = backend.collections.lock().unwrap();

    if let Some(collection) = collections.get_mut(path) {
        return match method {
            Method::GET => {
                let rows = Value::Array(collection.rows.clone());
                if collection.paginated {
                    reply(
                        200,
                        json!({
                            "count": collection.rows.len(),
                            "next": null,
                            "previous": null,
                            "results": rows,
                        }),
                    )
                } else {
                    reply(200, rows)
                }
            }
            Method::POST => {
                let mut record = body.unwrap_or_else(|| json!({}));
                let mut next_id = backend.next_id.lock().unwrap();
                *next_id += 1;
                record["id"] = json!(*next_id);
                record["created_at"] = json!(CREATED_AT);
                collection.rows.push(record.clone());
                reply(201, record)
            }
            _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
        };
    }

    // `{collection}{id}/`
    let trimmed = path.trim_end_matches('/');
    if let Some((parent, id)) = trimmed.rsplit_once('/') {
        let parent = format!("{}/", parent);
        if let (Some(collection), Ok(id)) = (collections.get_mut(&parent), id.parse::<i64>()) {
            let position = collection.rows.iter().position(|r| r["id"] == json!(id));
            return match (method, position) {
                (_, None) => reply(404, json!({"detail": "Not found."})),
                (Method::GET, Some(i)) => reply(200, collection.rows[i].clone()),
                (Method::PATCH | Method::PUT, Some(i)) => {
                    if let (Some(row), Some(Value::Object(changes))) =
                        (collection.rows[i].as_object_mut(), body)
                    {
                        row.extend(changes);
                    }
                    reply(200, collection.rows[i].clone())
                }
                (Method::DELETE, Some(i)) => {
                    collection.rows.remove(i);
                    StatusCode::NO_CONTENT.into_response()
                }
                _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
            };
        }
    }

    reply(404, json!({"detail": "Not found."}))
}

fn reply(status: u16, body: Value) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body)).into_response()
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn inventory(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "format_type": "ini",
        "content": "[web]\nweb1.example.com",
        "created_at": CREATED_AT,
    })
}

pub fn registry(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "url": "https://registry.example.com",
        "registry_type": "private",
        "status": "active",
        "created_at": CREATED_AT,
    })
}

pub fn tool(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "tool_type": "jenkins",
        "base_url": "http://jenkins.local:8080",
        "status": "active",
        "created_at": CREATED_AT,
    })
}

pub fn pipeline(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "is_active": true,
        "execution_mode": "local",
        "created_at": CREATED_AT,
    })
}

pub fn execution(id: i64, pipeline: i64, status: &str) -> Value {
    json!({
        "id": id,
        "pipeline": pipeline,
        "status": status,
        "trigger_type": "manual",
        "created_at": CREATED_AT,
    })
}
