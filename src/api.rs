//! HTTP surface for the School API.
//!
//! This module exposes a compact Axum router over the student service:
//!
//! - `GET /students` – List students, optionally filtered by a case-sensitive name `prefix`
//!   (the legacy `prefixo` parameter is accepted too).
//! - `GET /students/:id` – Fetch a single student.
//! - `POST /students` – Insert a student; `409` when the id already exists.
//! - `PUT /students/:id` – Overwrite a student; `404` when the body id is unknown.
//! - `DELETE /students/:id` – Remove a student; `204` on success.
//! - `GET /metrics` – Observe CRUD counters and the current store size.
//! - `GET /commands` – Machine-readable command catalog for quick discovery by tools/hosts.
//!
//! Failures are reported as bare status codes with empty bodies.

use crate::metrics::MetricsSnapshot;
use crate::students::{NameFilter, Student, StudentApi, StudentError, StudentPayload};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the HTTP router exposing the student API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: StudentApi + 'static,
{
    Router::new()
        .route(
            "/students",
            get(list_students::<S>).post(create_student::<S>),
        )
        .route(
            "/students/:id",
            get(get_student::<S>)
                .put(update_student::<S>)
                .delete(delete_student::<S>),
        )
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Query parameter carrying the name prefix, and its legacy spelling.
const PREFIX_PARAM: &str = "prefix";
const LEGACY_PREFIX_PARAM: &str = "prefixo";

/// Pick the name prefix out of raw query pairs.
///
/// The first `prefix` wins, then the first `prefixo`. Repeated or unknown keys are ignored
/// so listing never fails on the query string.
fn prefix_from_query(pairs: Vec<(String, String)>) -> Option<String> {
    let mut legacy = None;
    for (key, value) in pairs {
        match key.as_str() {
            PREFIX_PARAM => return Some(value),
            LEGACY_PREFIX_PARAM if legacy.is_none() => legacy = Some(value),
            _ => {}
        }
    }
    legacy
}

/// List students, optionally restricted to names starting with `prefix`.
async fn list_students<S>(
    State(service): State<Arc<S>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<Student>>
where
    S: StudentApi,
{
    let filter = NameFilter::from_prefix(prefix_from_query(pairs));
    Json(service.list(filter).await)
}

/// Fetch the student stored under `id`.
async fn get_student<S>(
    State(service): State<Arc<S>>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, AppError>
where
    S: StudentApi,
{
    Ok(Json(service.get(id).await?))
}

/// Insert a new student and echo it back with `201 Created`.
async fn create_student<S>(
    State(service): State<Arc<S>>,
    Json(payload): Json<StudentPayload>,
) -> Result<(StatusCode, Json<Student>), AppError>
where
    S: StudentApi,
{
    let student = service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Overwrite the student at `id` with the request body.
async fn update_student<S>(
    State(service): State<Arc<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<StudentPayload>,
) -> Result<Json<Student>, AppError>
where
    S: StudentApi,
{
    Ok(Json(service.update(id, payload).await?))
}

/// Remove the student stored under `id`.
async fn delete_student<S>(
    State(service): State<Arc<S>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError>
where
    S: StudentApi,
{
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Return CRUD counters and the current number of stored students.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: StudentApi,
{
    Json(service.metrics_snapshot().await)
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery/UX in hosts and tools.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "list_students",
                method: "GET",
                path: "/students",
                description: "List students. Optional `prefix` query keeps names starting with it (case-sensitive).",
                request_example: None,
            },
            CommandDescriptor {
                name: "get_student",
                method: "GET",
                path: "/students/{id}",
                description: "Return one student, or 404 when the id is unknown.",
                request_example: None,
            },
            CommandDescriptor {
                name: "create_student",
                method: "POST",
                path: "/students",
                description: "Insert a student and return it with 201, or 409 when the id already exists.",
                request_example: Some(json!({ "id": 1, "name": "Miguel" })),
            },
            CommandDescriptor {
                name: "update_student",
                method: "PUT",
                path: "/students/{id}",
                description: "Overwrite a student and return it, or 404 when the body id is unknown.",
                request_example: Some(json!({ "id": 1, "name": "Miguel Souza" })),
            },
            CommandDescriptor {
                name: "delete_student",
                method: "DELETE",
                path: "/students/{id}",
                description: "Remove a student and return 204, or 404 when the id is unknown.",
                request_example: None,
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return CRUD counters and the current store size.",
                request_example: None,
            },
        ],
    })
}

struct AppError(StudentError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            StudentError::NotFound(_) => StatusCode::NOT_FOUND,
            StudentError::Conflict(_) => StatusCode::CONFLICT,
            StudentError::MissingId => StatusCode::UNPROCESSABLE_ENTITY,
        };
        tracing::debug!(error = %self.0, status = status.as_u16(), "Request rejected");
        status.into_response()
    }
}

impl From<StudentError> for AppError {
    fn from(inner: StudentError) -> Self {
        Self(inner)
    }
}
