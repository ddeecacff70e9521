use axum::{
    extract::{Multipart, Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use shared_types::ImageArtifact;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use studio_client::{SessionContext, StudioClient};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How `GET /bookings` wraps its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListShape {
    #[default]
    Bare,
    Data,
    Bookings,
    /// An object with no recognizable collection key.
    Unknown,
}

/// A file part received by `POST /student-id`.
#[derive(Debug, Clone)]
pub struct ReceivedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// In-memory backend state.
#[derive(Debug, Default)]
pub struct MockState {
    pub bookings: Vec<Value>,
    pub students: Vec<Value>,
    pub users: HashMap<String, String>,
    pub next_id: u64,
    pub booking_shape: ListShape,
    /// Requests seen, keyed by `"METHOD /path"` (without the `/api` prefix).
    pub hits: HashMap<String, usize>,
    /// Served instead of the next request's real response.
    pub fail_next: Option<(StatusCode, Value)>,
    pub last_text_fields: HashMap<String, String>,
    pub last_files: HashMap<String, ReceivedFile>,
}

impl MockState {
    fn id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Shared = Arc<Mutex<MockState>>;

/// A running mock of the studio backend bound to an ephemeral port.
pub struct MockBackend {
    pub base_url: String,
    pub state: Shared,
    task: JoinHandle<()>,
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl MockBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState::default()));
        let api = Router::new()
            .route("/bookings", get(list_bookings).post(create_booking))
            .route("/bookings/user/{username}", get(user_bookings))
            .route("/bookings/{id}", put(update_booking).delete(delete_booking))
            .route("/student-id", get(list_students).post(create_student))
            .route("/student-id/user/{username}", get(user_students))
            .route("/student-id/{id}", put(update_student).delete(delete_student))
            .route("/admin/register", post(register))
            .route("/admin/login", post(login))
            .route("/admin/me", get(me))
            .route("/admin/update", put(update_admin))
            .route("/admin/delete/{id}", axum::routing::delete(delete_admin))
            .route("/services", get(services))
            .layer(middleware::from_fn_with_state(state.clone(), track))
            .with_state(state.clone());
        let app = Router::new().nest("/api", api);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend crashed");
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
            task,
        }
    }

    pub fn client(&self) -> StudioClient {
        StudioClient::new(self.base_url.clone(), Duration::from_secs(5)).expect("Failed to build client")
    }

    /// Number of requests seen for `"METHOD /path"`.
    pub fn hits(&self, key: &str) -> usize {
        self.state.lock().unwrap().hits.get(key).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.lock().unwrap().hits.values().sum()
    }

    pub fn fail_next(&self, status: StatusCode, body: Value) {
        self.state.lock().unwrap().fail_next = Some((status, body));
    }

    pub fn set_booking_shape(&self, shape: ListShape) {
        self.state.lock().unwrap().booking_shape = shape;
    }

    /// Insert a booking as the backend would store it; returns its id.
    pub fn seed_booking(&self, fields: Value) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.id();
        let mut record = json!({
            "id": id,
            "fullname": "Ana Cruz",
            "email": "ana@example.com",
            "phonenumber": "09123456789",
            "location": "Quezon City",
            "category": "wedding",
            "Package_type": "Gold Package",
            "date": "2026-11-02",
            "time": "09:00",
            "details": "",
            "status": "Pending"
        });
        merge(&mut record, fields);
        state.bookings.push(record);
        id.to_string()
    }

    pub fn seed_student(&self, fields: Value) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.id();
        let mut record = json!({
            "id": id,
            "lrn": "123456789012",
            "firstname": "Lia",
            "lastname": "Gomez",
            "phone": "09123456789",
            "grade": "Grade 8",
            "section": "Rizal",
            "emName": "Rosa Gomez",
            "emPhone": "09998887777",
            "emAddress": "12 Mabini St",
            "submitted_at": "2026-10-01T08:00:00Z"
        });
        merge(&mut record, fields);
        state.students.push(record);
        id.to_string()
    }

    pub fn booking(&self, id: &str) -> Option<Value> {
        find(&self.state.lock().unwrap().bookings, id).cloned()
    }

    pub fn student(&self, id: &str) -> Option<Value> {
        find(&self.state.lock().unwrap().students, id).cloned()
    }

    pub fn add_user(&self, username: &str, password: &str) {
        self.state
            .lock()
            .unwrap()
            .users
            .insert(username.to_string(), password.to_string());
    }
}

/// A session stored in a fresh temp file.
pub fn temp_session() -> Arc<SessionContext> {
    let path = std::env::temp_dir()
        .join("studio-tests")
        .join(format!("session-{}.json", uuid::Uuid::new_v4()));
    Arc::new(SessionContext::init(path))
}

/// Smallest valid PNG, wrapped as an artifact.
pub fn png_artifact() -> ImageArtifact {
    const PNG: [u8; 67] = [
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52, 0x00, 0x00,
        0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4, 0x89, 0x00, 0x00, 0x00,
        0x0a, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d,
        0xb4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];
    ImageArtifact::from_bytes("image/png", &PNG)
}

fn merge(target: &mut Value, fields: Value) {
    if let (Value::Object(target), Value::Object(fields)) = (target, fields) {
        target.extend(fields);
    }
}

fn id_of(record: &Value) -> String {
    match &record["id"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn find<'a>(records: &'a [Value], id: &str) -> Option<&'a Value> {
    records.iter().find(|r| id_of(r) == id)
}

fn find_mut<'a>(records: &'a mut [Value], id: &str) -> Option<&'a mut Value> {
    records.iter_mut().find(|r| id_of(r) == id)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"success": false, "message": "Record not found"}))).into_response()
}

/// Count every request and serve an injected failure when one is queued.
async fn track(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let key = format!("{} {}", req.method(), req.uri().path());
    let failure = {
        let mut state = state.lock().unwrap();
        *state.hits.entry(key).or_default() += 1;
        state.fail_next.take()
    };
    match failure {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => next.run(req).await,
    }
}

async fn list_bookings(State(state): State<Shared>) -> Json<Value> {
    let state = state.lock().unwrap();
    let items = Value::Array(state.bookings.clone());
    Json(match state.booking_shape {
        ListShape::Bare => items,
        ListShape::Data => json!({"success": true, "data": items}),
        ListShape::Bookings => json!({"success": true, "bookings": items}),
        ListShape::Unknown => json!({"success": true, "results": items}),
    })
}

async fn user_bookings(State(state): State<Shared>, Path(username): Path<String>) -> Json<Value> {
    let state = state.lock().unwrap();
    let items: Vec<Value> = state
        .bookings
        .iter()
        .filter(|b| b["username"] == username.as_str())
        .cloned()
        .collect();
    Json(json!({"success": true, "bookings": items}))
}

async fn create_booking(State(state): State<Shared>, Json(mut body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    let id = state.id();
    merge(&mut body, json!({"id": id, "status": "Pending"}));
    state.bookings.push(body.clone());
    (StatusCode::CREATED, Json(json!({"success": true, "booking": body})))
}

async fn update_booking(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    match find_mut(&mut state.bookings, &id) {
        Some(record) => {
            record["status"] = body["status"].clone();
            Json(json!({"success": true, "booking": record.clone()})).into_response()
        }
        None => not_found(),
    }
}

async fn delete_booking(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    let before = state.bookings.len();
    state.bookings.retain(|b| id_of(b) != id);
    if state.bookings.len() == before {
        return not_found();
    }
    Json(json!({"success": true})).into_response()
}

async fn list_students(State(state): State<Shared>) -> Json<Value> {
    let state = state.lock().unwrap();
    Json(json!({"success": true, "students": state.students.clone()}))
}

async fn user_students(State(state): State<Shared>, Path(username): Path<String>) -> Json<Value> {
    let state = state.lock().unwrap();
    let items: Vec<Value> = state
        .students
        .iter()
        .filter(|s| s["username"] == username.as_str())
        .cloned()
        .collect();
    Json(Value::Array(items))
}

async fn create_student(State(state): State<Shared>, mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    let mut text = HashMap::new();
    let mut files = HashMap::new();
    while let Some(field) = multipart.next_field().await.expect("Malformed multipart body") {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.expect("Unreadable multipart field").to_vec();
        match file_name {
            Some(file_name) => {
                files.insert(name, ReceivedFile { file_name, content_type, bytes });
            }
            None => {
                text.insert(name, String::from_utf8_lossy(&bytes).into_owned());
            }
        }
    }

    let mut state = state.lock().unwrap();
    let id = state.id();
    let mut record = json!({"id": id});
    for (key, value) in &text {
        record[key.as_str()] = Value::String(value.clone());
    }
    state.students.push(record.clone());
    state.last_text_fields = text;
    state.last_files = files;
    (StatusCode::CREATED, Json(json!({"success": true, "student": record})))
}

async fn update_student(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    match find_mut(&mut state.students, &id) {
        Some(record) => {
            record["status"] = body["status"].clone();
            Json(json!({"success": true})).into_response()
        }
        None => not_found(),
    }
}

async fn delete_student(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    let before = state.students.len();
    state.students.retain(|s| id_of(s) != id);
    if state.students.len() == before {
        return not_found();
    }
    Json(json!({"success": true})).into_response()
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    let mut state = state.lock().unwrap();
    if state.users.contains_key(&username) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"success": false, "message": "username already exists"})),
        )
            .into_response();
    }
    state.users.insert(username, password);
    (StatusCode::CREATED, Json(json!({"success": true}))).into_response()
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let state = state.lock().unwrap();
    if state.users.get(username).map(String::as_str) != Some(password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid username or password"})),
        )
            .into_response();
    }
    Json(json!({
        "token": format!("token-{}", username),
        "user": {"userID": 1, "userName": username}
    }))
    .into_response()
}

async fn me(headers: axum::http::HeaderMap) -> Response {
    match bearer_user(&headers) {
        Some(username) => Json(json!({"user": {"id": 1, "username": username}})).into_response(),
        None => (StatusCode::UNAUTHORIZED, Json(json!({"message": "Missing token"}))).into_response(),
    }
}

fn bearer_user(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer token-"))
        .map(str::to_string)
}

async fn update_admin(
    State(state): State<Shared>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let Some(username) = bearer_user(&headers) else {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Missing token"}))).into_response();
    };
    let mut state = state.lock().unwrap();
    if let Some(password) = body["password"].as_str() {
        state.users.insert(username, password.to_string());
    }
    Json(json!({"success": true})).into_response()
}

async fn delete_admin(
    State(state): State<Shared>,
    headers: axum::http::HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let Some(username) = bearer_user(&headers) else {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Missing token"}))).into_response();
    };
    if id != "1" {
        return not_found();
    }
    state.lock().unwrap().users.remove(&username);
    Json(json!({"success": true})).into_response()
}

async fn services() -> Json<Value> {
    Json(json!({
        "services": [{
            "id": "newborn",
            "name": "Newborn Sessions",
            "packageInfo": [{"name": "Sleepy Baby", "price": "₱ 6,000", "features": ["2 Hours"]}]
        }]
    }))
}
