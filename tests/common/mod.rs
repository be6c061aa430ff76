//! In-process mock of the three registry services for integration tests.
//! One axum server exposes /auth, /documents and /activity with the same
//! wire contract as the real services: token in X-Auth-Token, `{error}`
//! failure bodies, `{documents}` / `{activities}` / `{success, document}`
//! envelopes.

// each test crate uses a different subset of the fixture helpers
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use notarium::config::Endpoints;

#[derive(Clone)]
pub struct MockUser {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
}

pub struct MockState {
    users: Vec<MockUser>,
    tokens: HashMap<String, usize>, // token -> user index
    documents: Vec<Value>,
    activities: Vec<(usize, Value)>, // (user index, entry)
    next_token: u64,
    next_doc_id: i64,
    next_activity_id: i64,
    /// GET /auth calls observed, for "no network call" assertions.
    pub auth_get_calls: usize,
}

pub struct MockRegistry {
    pub endpoints: Endpoints,
    pub state: Arc<Mutex<MockState>>,
}

impl MockRegistry {
    /// Issue a token directly, bypassing login (simulates a token persisted
    /// by an earlier run).
    pub fn issue_token(&self, email: &str) -> String {
        let mut s = self.state.lock();
        let idx = s.users.iter().position(|u| u.email == email).expect("unknown user");
        s.next_token += 1;
        let token = format!("tok-{}", s.next_token);
        s.tokens.insert(token.clone(), idx);
        token
    }

    pub fn revoke_token(&self, token: &str) {
        self.state.lock().tokens.remove(token);
    }

    pub fn auth_get_calls(&self) -> usize {
        self.state.lock().auth_get_calls
    }

    pub fn document_count(&self) -> usize {
        self.state.lock().documents.len()
    }
}

fn user_json(s: &MockState, idx: usize) -> Value {
    let u = &s.users[idx];
    json!({
        "id": idx as i64 + 1,
        "email": u.email,
        "full_name": u.full_name,
        "role": u.role,
        "phone": null,
        "region": "Moscow",
    })
}

fn seed_documents(next_id: &mut i64) -> Vec<Value> {
    let mut docs = Vec::new();
    let mut push = |number: &str, doc_type: &str, status: &str, p1: &str, subject: &str| {
        *next_id += 1;
        docs.push(json!({
            "id": *next_id,
            "number": number,
            "type": doc_type,
            "date": "2026-08-01",
            "registration_date": "2026-08-01T10:00:00",
            "status": status,
            "party1_name": p1,
            "party1_passport": "4509 123456",
            "party2_name": null,
            "party2_passport": null,
            "subject": subject,
            "notes": null,
            "created_by_name": "Notary One",
        }));
    };
    push("1N-1090/2026", "power_of_attorney", "registered", "Ivanov I.I.", "Power of attorney for vehicle");
    push("2N-1101/2026", "will", "registered", "Petrov P.P.", "Last will");
    push("3N-1102/2026", "contract", "processing", "Sidorov S.S.", "Apartment sale contract");
    docs
}

fn authed_user(s: &MockState, headers: &HeaderMap) -> Option<usize> {
    let token = headers.get("X-Auth-Token")?.to_str().ok()?;
    s.tokens.get(token).copied()
}

type Shared = Arc<Mutex<MockState>>;

async fn auth_post(State(state): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body.get("email").and_then(|v| v.as_str()).unwrap_or("");
    let password = body.get("password").and_then(|v| v.as_str()).unwrap_or("");
    let mut s = state.lock();
    let Some(idx) = s
        .users
        .iter()
        .position(|u| u.email == email && u.password == password)
    else {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid credentials"})));
    };
    s.next_token += 1;
    let token = format!("tok-{}", s.next_token);
    s.tokens.insert(token.clone(), idx);
    s.next_activity_id += 1;
    let entry = json!({
        "id": s.next_activity_id,
        "action_type": "login",
        "description": format!("User {} logged in", s.users[idx].full_name),
        "created_at": "2026-08-23T09:00:00",
        "document_number": null,
    });
    s.activities.push((idx, entry));
    let user = user_json(&s, idx);
    (StatusCode::OK, Json(json!({"token": token, "user": user})))
}

async fn auth_get(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let mut s = state.lock();
    s.auth_get_calls += 1;
    match authed_user(&s, &headers) {
        Some(idx) => (StatusCode::OK, Json(json!({"user": user_json(&s, idx)}))),
        None => (StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid or expired token"}))),
    }
}

async fn documents_get(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    // A marker search term makes this response slow, for stale-response tests.
    if params.get("search").map(|s| s.as_str()) == Some("slow-marker") {
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    }
    let s = state.lock();
    let matches = |d: &Value| -> bool {
        if let Some(q) = params.get("search") {
            let hit = ["number", "party1_name", "party2_name"].iter().any(|f| {
                d.get(f)
                    .and_then(|v| v.as_str())
                    .map(|v| v.contains(q.as_str()))
                    .unwrap_or(false)
            });
            if !hit {
                return false;
            }
        }
        if let Some(t) = params.get("type") {
            if d.get("type").and_then(|v| v.as_str()) != Some(t.as_str()) {
                return false;
            }
        }
        if let Some(st) = params.get("status") {
            if d.get("status").and_then(|v| v.as_str()) != Some(st.as_str()) {
                return false;
            }
        }
        true
    };
    let docs: Vec<Value> = s.documents.iter().filter(|d| matches(d)).cloned().collect();
    (StatusCode::OK, Json(json!({"documents": docs})))
}

async fn documents_post(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut s = state.lock();
    let Some(idx) = authed_user(&s, &headers) else {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid or expired token"})));
    };
    let role = s.users[idx].role.as_str();
    if role != "notary" && role != "admin" {
        return (StatusCode::FORBIDDEN, Json(json!({"error": "Only notaries can register documents"})));
    }
    for field in ["document_type", "document_date", "party1_name", "party1_passport", "subject"] {
        if body.get(field).and_then(|v| v.as_str()).map(str::is_empty).unwrap_or(true) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": format!("Missing required field: {}", field)})),
            );
        }
    }
    s.next_doc_id += 1;
    let id = s.next_doc_id;
    let number = format!("{}N-0823/2026", id);
    let doc = json!({
        "id": id,
        "number": number,
        "type": body["document_type"],
        "date": body["document_date"],
        "registration_date": "2026-08-23T12:00:00",
        "status": "registered",
        "party1_name": body["party1_name"],
        "party1_passport": body["party1_passport"],
        "party2_name": body.get("party2_name").cloned().unwrap_or(Value::Null),
        "party2_passport": body.get("party2_passport").cloned().unwrap_or(Value::Null),
        "subject": body["subject"],
        "notes": body.get("notes").cloned().unwrap_or(Value::Null),
        "created_by_name": s.users[idx].full_name,
    });
    s.documents.push(doc.clone());
    s.next_activity_id += 1;
    let entry = json!({
        "id": s.next_activity_id,
        "action_type": "register",
        "description": format!("Registered document {}", number),
        "created_at": "2026-08-23T12:00:00",
        "document_number": number,
    });
    s.activities.push((idx, entry));
    (StatusCode::OK, Json(json!({"success": true, "document": doc})))
}

async fn activity_get(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let s = state.lock();
    let Some(idx) = authed_user(&s, &headers) else {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Authentication required"})));
    };
    // newest first, as the real service orders by created_at DESC
    let items: Vec<Value> = s
        .activities
        .iter()
        .rev()
        .filter(|(owner, _)| *owner == idx)
        .map(|(_, e)| e.clone())
        .collect();
    (StatusCode::OK, Json(json!({"activities": items})))
}

/// Start the mock services on an ephemeral port. Seeded users:
/// notary@example.com / admin@example.com / viewer@example.com, all with
/// password "secret", plus three documents.
pub async fn spawn() -> MockRegistry {
    let mut next_doc_id = 0;
    let documents = seed_documents(&mut next_doc_id);
    let state = Arc::new(Mutex::new(MockState {
        users: vec![
            MockUser {
                email: "notary@example.com".into(),
                password: "secret".into(),
                full_name: "Notary One".into(),
                role: "notary".into(),
            },
            MockUser {
                email: "admin@example.com".into(),
                password: "secret".into(),
                full_name: "Admin One".into(),
                role: "admin".into(),
            },
            MockUser {
                email: "viewer@example.com".into(),
                password: "secret".into(),
                full_name: "Viewer One".into(),
                role: "viewer".into(),
            },
        ],
        tokens: HashMap::new(),
        documents,
        activities: Vec::new(),
        next_token: 0,
        next_doc_id,
        next_activity_id: 0,
        auth_get_calls: 0,
    }));

    let app = Router::new()
        .route("/auth", get(auth_get).post(auth_post))
        .route("/documents", get(documents_get).post(documents_post))
        .route("/activity", get(activity_get))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base = format!("http://{}", addr);
    let endpoints = Endpoints::new(
        &format!("{base}/auth"),
        &format!("{base}/documents"),
        &format!("{base}/activity"),
    )
    .unwrap();
    MockRegistry { endpoints, state }
}
