//! Rollbook Console — Embedded web UI served from the binary.
//!
//! Covers the whole record lifecycle: roster listing with search, add/edit/delete
//! forms, bulk file upload, and spreadsheet export.

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use rollbook_core::config::RollbookConfig;
use rollbook_core::db::repository::StudentStore;
use rollbook_core::db::sqlite::SqliteStudentStore;
use rollbook_core::models::{NewStudent, Student};

/// Shared application state for all console routes.
pub struct AppState {
    pub store: SqliteStudentStore,
    pub config: RollbookConfig,
}

/// Build the console router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(index))
        .route("/add", get(add_page).post(add_submit))
        .route("/students/:id/edit", get(edit_page).post(edit_submit))
        .route("/students/:id/delete", post(delete_student))
        .route("/upload", post(upload))
        .route("/export", get(export))
        .with_state(state)
}

// -- Health --

async fn health() -> &'static str {
    "ok"
}

// -- Templates --

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    instance_name: String,
    students: Vec<Student>,
    total: i64,
    query: String,
    msg: String,
}

#[derive(Template)]
#[template(path = "add.html")]
struct AddTemplate;

#[derive(Template)]
#[template(path = "edit.html")]
struct EditTemplate {
    student: Student,
}

// -- Query and form params --

#[derive(serde::Deserialize, Default)]
struct IndexQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    msg: String,
}

#[derive(serde::Deserialize)]
struct StudentForm {
    name: String,
    age: i64,
}

/// Redirect back to the roster with a one-shot message in the query string.
fn redirect_with_msg(msg: &str) -> Redirect {
    let encoded = utf8_percent_encode(msg, NON_ALPHANUMERIC).to_string();
    Redirect::to(&format!("/?msg={encoded}"))
}

// -- Handlers --

async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IndexQuery>,
) -> IndexTemplate {
    let search = if params.q.trim().is_empty() {
        None
    } else {
        Some(params.q.as_str())
    };
    let students = state.store.list(search).await.unwrap_or_default();
    let total = state.store.count().await.unwrap_or(0);

    IndexTemplate {
        instance_name: state.config.rollbook.instance_name.clone(),
        students,
        total,
        query: params.q,
        msg: params.msg,
    }
}

async fn add_page() -> AddTemplate {
    AddTemplate
}

async fn add_submit(
    State(state): State<Arc<AppState>>,
    axum::Form(form): axum::Form<StudentForm>,
) -> Redirect {
    match state
        .store
        .insert(&NewStudent::new(form.name, form.age))
        .await
    {
        Ok(_) => redirect_with_msg("Student added."),
        Err(e) => {
            tracing::error!("failed to add student: {e}");
            redirect_with_msg(&format!("Could not add student: {e}"))
        }
    }
}

async fn edit_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> axum::response::Result<EditTemplate, (StatusCode, Html<String>)> {
    match state.store.get(id).await {
        Ok(Some(student)) => Ok(EditTemplate { student }),
        _ => Err((
            StatusCode::NOT_FOUND,
            Html("<h1>Student not found</h1><a href=\"/\">Back to Students</a>".to_string()),
        )),
    }
}

async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Form(form): axum::Form<StudentForm>,
) -> Redirect {
    match state.store.update(id, &form.name, form.age).await {
        Ok(true) => redirect_with_msg("Student updated."),
        Ok(false) => redirect_with_msg("Student not found."),
        Err(e) => {
            tracing::error!("failed to update student {id}: {e}");
            redirect_with_msg(&format!("Could not update student: {e}"))
        }
    }
}

async fn delete_student(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Redirect {
    match state.store.delete(id).await {
        Ok(true) => redirect_with_msg("Student deleted."),
        Ok(false) => redirect_with_msg("Student not found."),
        Err(e) => {
            tracing::error!("failed to delete student {id}: {e}");
            redirect_with_msg(&format!("Could not delete student: {e}"))
        }
    }
}

async fn upload(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Redirect {
    let mut uploaded: Option<(String, Vec<u8>)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let filename = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => uploaded = Some((filename, bytes.to_vec())),
                    Err(e) => {
                        tracing::error!("failed to read upload: {e}");
                        return redirect_with_msg("Upload failed.");
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!("malformed multipart request: {e}");
                return redirect_with_msg("Upload failed.");
            }
        }
    }

    let Some((filename, bytes)) = uploaded else {
        return redirect_with_msg("No file selected.");
    };
    if filename.is_empty() || bytes.is_empty() {
        return redirect_with_msg("No file selected.");
    }

    retain_upload(&state.config, &filename, &bytes);

    match rollbook_core::import::import_bytes(&state.store, &filename, &bytes).await {
        Ok(count) => redirect_with_msg(&format!("Imported {count} students from {filename}.")),
        Err(e) => redirect_with_msg(&format!("Import failed: {e}")),
    }
}

/// Keep a copy of the uploaded file under the configured upload directory.
/// Retention is best effort and never fails the import itself.
fn retain_upload(config: &RollbookConfig, filename: &str, bytes: &[u8]) {
    let Some(basename) = std::path::Path::new(filename).file_name() else {
        return;
    };
    let dir = config.upload_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!("could not create upload dir {}: {e}", dir.display());
        return;
    }
    let dest = dir.join(basename);
    if let Err(e) = std::fs::write(&dest, bytes) {
        tracing::warn!("could not retain upload {}: {e}", dest.display());
    }
}

async fn export(State(state): State<Arc<AppState>>) -> Response {
    let students = match state.store.list(None).await {
        Ok(students) => students,
        Err(e) => {
            tracing::error!("export query failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "export failed").into_response();
        }
    };

    match rollbook_core::export::export_students(&students) {
        Ok(bytes) => (
            [
                (
                    header::CONTENT_TYPE,
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                ),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"students.xlsx\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("export failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "export failed").into_response()
        }
    }
}
