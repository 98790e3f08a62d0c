//! HTTP API for the todo collection.
//!
//! Four routes over one resource. Each handler is a single store call with
//! its failure translated into a `{message}` response.

pub mod config;
pub mod error;
pub mod model;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{Config, ConfigError, StoreKind};
pub use error::{ApiError, ErrorBody, StoreError};
pub use model::{Todo, TodoId, TodoInput};
pub use store::{MemoryStore, MongoStore, TodoStore};

pub type SharedStore = Arc<dyn TodoStore>;

pub fn app(store: SharedStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

pub async fn run(listener: TcpListener, store: SharedStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

/// Open the backend named by `config`. A failed MongoDB ping is logged but
/// does not stop startup; requests fail with 500 until the database is up.
pub async fn open_store(config: &Config) -> Result<SharedStore, StoreError> {
    match config.store {
        StoreKind::Memory => {
            tracing::info!("using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreKind::Mongo => {
            let store = MongoStore::connect(&config.mongodb_uri, &config.database).await?;
            match store.ping().await {
                Ok(()) => tracing::info!(database = %config.database, "DB connected"),
                Err(e) => tracing::error!(error = %e, "DB connection failed"),
            }
            Ok(Arc::new(store))
        }
    }
}

async fn list_todos(State(store): State<SharedStore>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(store.list().await?))
}

async fn create_todo(
    State(store): State<SharedStore>,
    payload: Result<Json<TodoInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(input) = payload?;
    let todo = store.create(input.validate()?).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    payload: Result<Json<TodoInput>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id: TodoId = id.parse()?;
    let Json(input) = payload?;
    store
        .update(id, input.validate()?)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

// No existence check: deleting an unknown id is still 204.
async fn delete_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: TodoId = id.parse()?;
    store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn not_found() -> impl IntoResponse {
    let body = ErrorBody {
        message: "Resource not found".to_string(),
    };
    (StatusCode::NOT_FOUND, Json(body))
}

async fn method_not_allowed() -> impl IntoResponse {
    let body = ErrorBody {
        message: "Method not allowed".to_string(),
    };
    (StatusCode::METHOD_NOT_ALLOWED, Json(body))
}
