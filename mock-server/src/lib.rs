use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Title bound enforced on create and update, mirroring the client-side rule.
const MAX_TITLE_LEN: usize = 200;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response envelope for the paginated list endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoPage {
    pub list: Vec<Todo>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_page: u64,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub done: Option<bool>,
}

#[derive(Deserialize)]
struct ListParams {
    page: Option<u64>,
    page_size: Option<u64>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// In-memory store. Ids are assigned sequentially starting at 1, like the
/// autoincrement key the real backend uses.
#[derive(Default)]
pub struct Store {
    next_id: u64,
    todos: HashMap<u64, Todo>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/health", get(health))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", patch(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"ok": true}))
}

async fn list_todos(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<TodoPage> {
    let page = params.page.unwrap_or(1).max(1);
    let page_size = match params.page_size {
        Some(s) if (1..=100).contains(&s) => s,
        _ => 10,
    };

    let store = db.read().await;
    let mut items: Vec<Todo> = store.todos.values().cloned().collect();
    // Most recent first; id breaks created_at ties so the order is total.
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let total = items.len() as u64;
    let list: Vec<Todo> = items
        .into_iter()
        .skip(((page - 1) * page_size) as usize)
        .take(page_size as usize)
        .collect();

    Json(TodoPage {
        list,
        page,
        page_size,
        total,
        total_page: total.div_ceil(page_size),
    })
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), (StatusCode, Json<ErrorBody>)> {
    if !valid_title(&input.title) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody { error: "invalid payload" }),
        ));
    }
    let now = Utc::now();
    let mut store = db.write().await;
    store.next_id += 1;
    let todo = Todo {
        id: store.next_id,
        title: input.title,
        done: false,
        created_at: now,
        updated_at: now,
    };
    store.todos.insert(todo.id, todo.clone());
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, (StatusCode, Json<ErrorBody>)> {
    if let Some(title) = &input.title {
        if !valid_title(title) {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorBody { error: "invalid payload" }),
            ));
        }
    }
    let mut store = db.write().await;
    let todo = store
        .todos
        .get_mut(&id)
        .ok_or((StatusCode::NOT_FOUND, Json(ErrorBody { error: "not found" })))?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(done) = input.done {
        todo.done = done;
    }
    todo.updated_at = Utc::now();
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

fn valid_title(title: &str) -> bool {
    !title.is_empty() && title.chars().count() <= MAX_TITLE_LEN
}
