//! In-process posts backend for exercising the HTTP store and the board flows.

use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use shared::{
    domain::{Post, PostId},
    protocol::{NewPost, PostPatch},
};
use tokio::{net::TcpListener, sync::Mutex};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    List,
    Fetch,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy)]
pub enum Fault {
    Status(StatusCode),
    /// 200 with a body that is not JSON.
    Garbage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub line: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct BackendState {
    posts: Vec<Post>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
    faults: HashMap<Route, Fault>,
}

impl BackendState {
    fn record(&mut self, line: String, body: Option<Value>) {
        self.requests.push(RecordedRequest { line, body });
    }
}

#[derive(Clone)]
pub struct MockBackend {
    state: Arc<Mutex<BackendState>>,
}

impl MockBackend {
    pub async fn request_lines(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .requests
            .iter()
            .map(|request| request.line.clone())
            .collect()
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn clear_requests(&self) {
        self.state.lock().await.requests.clear();
    }

    pub async fn fail(&self, route: Route, fault: Fault) {
        self.state.lock().await.faults.insert(route, fault);
    }

    pub async fn heal(&self, route: Route) {
        self.state.lock().await.faults.remove(&route);
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state.lock().await.posts.clone()
    }
}

pub fn post(id: i64, title: &str, content: &str, author: Option<&str>) -> Post {
    Post {
        id: PostId::from(id),
        title: title.to_string(),
        content: content.to_string(),
        author: author.map(str::to_string),
    }
}

pub async fn spawn_backend(posts: Vec<Post>) -> Result<(Url, MockBackend)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let next_id = posts
        .iter()
        .filter_map(|post| post.id.as_str().parse::<i64>().ok())
        .max()
        .unwrap_or(0)
        + 1;
    let backend = MockBackend {
        state: Arc::new(Mutex::new(BackendState {
            posts,
            next_id,
            ..BackendState::default()
        })),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:id",
            get(fetch_post).patch(update_post).delete(delete_post),
        )
        .with_state(backend.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok((Url::parse(&format!("http://{addr}/posts"))?, backend))
}

/// A collection URL nothing is listening on.
pub async fn unreachable_base_url() -> Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(Url::parse(&format!("http://{addr}/posts"))?)
}

/// Numeric backends treat `01` and `1` as the same row.
fn same_id(stored: &PostId, requested: &str) -> bool {
    match (stored.as_str().parse::<i64>(), requested.parse::<i64>()) {
        (Ok(stored), Ok(requested)) => stored == requested,
        _ => stored.as_str() == requested,
    }
}

fn fault_response(fault: Fault) -> Response {
    match fault {
        Fault::Status(status) => status.into_response(),
        Fault::Garbage => (StatusCode::OK, "<html>not json</html>").into_response(),
    }
}

async fn list_posts(State(backend): State<MockBackend>) -> Response {
    let mut state = backend.state.lock().await;
    state.record("GET /posts".to_string(), None);
    if let Some(fault) = state.faults.get(&Route::List) {
        return fault_response(*fault);
    }
    Json(state.posts.clone()).into_response()
}

async fn fetch_post(State(backend): State<MockBackend>, Path(id): Path<String>) -> Response {
    let mut state = backend.state.lock().await;
    state.record(format!("GET /posts/{id}"), None);
    if let Some(fault) = state.faults.get(&Route::Fetch) {
        return fault_response(*fault);
    }
    match state.posts.iter().find(|post| same_id(&post.id, &id)) {
        Some(post) => Json(post.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create_post(State(backend): State<MockBackend>, Json(body): Json<Value>) -> Response {
    let mut state = backend.state.lock().await;
    state.record("POST /posts".to_string(), Some(body.clone()));
    if let Some(fault) = state.faults.get(&Route::Create) {
        return fault_response(*fault);
    }
    let Ok(new_post) = serde_json::from_value::<NewPost>(body) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let id = state.next_id;
    state.next_id += 1;
    let created = post(id, &new_post.title, &new_post.content, Some(&new_post.author));
    state.posts.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_post(
    State(backend): State<MockBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = backend.state.lock().await;
    state.record(format!("PATCH /posts/{id}"), Some(body.clone()));
    if let Some(fault) = state.faults.get(&Route::Update) {
        return fault_response(*fault);
    }
    let Ok(patch) = serde_json::from_value::<PostPatch>(body) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    match state.posts.iter_mut().find(|post| post.id.as_str() == id) {
        Some(post) => {
            post.title = patch.title;
            post.content = patch.content;
            Json(post.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_post(State(backend): State<MockBackend>, Path(id): Path<String>) -> Response {
    let mut state = backend.state.lock().await;
    state.record(format!("DELETE /posts/{id}"), None);
    if let Some(fault) = state.faults.get(&Route::Delete) {
        return fault_response(*fault);
    }
    let before = state.posts.len();
    state.posts.retain(|post| post.id.as_str() != id);
    if state.posts.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(serde_json::json!({})).into_response()
}
