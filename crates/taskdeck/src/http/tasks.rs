use actix_web::http::header::{ContentDisposition, LOCATION};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use taskdeck_app::{ExportFile, ExportFormat};
use taskdeck_core::{Task, TaskId};

use super::error::{ApiError, not_found};
use super::AppState;

/// `?query=&onlyIncomplete=` accepted by search and export.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub only_incomplete: bool,
}

impl SearchQuery {
    fn text(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }
}

pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.tasks.get_all().await?))
}

pub async fn search(
    state: web::Data<AppState>,
    params: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let tasks = state.tasks.search(params.text(), params.only_incomplete).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

pub async fn export_xlsx(
    state: web::Data<AppState>,
    params: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    export(&state, &params, ExportFormat::Xlsx).await
}

pub async fn export_csv(
    state: web::Data<AppState>,
    params: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    export(&state, &params, ExportFormat::Csv).await
}

async fn export(state: &AppState, params: &SearchQuery, format: ExportFormat) -> Result<HttpResponse, ApiError> {
    let file = state
        .tasks
        .export(params.text(), params.only_incomplete, format)
        .await?;
    Ok(attachment(file))
}

fn attachment(file: ExportFile) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(file.format.content_type())
        .insert_header(ContentDisposition::attachment(file.file_name))
        .body(file.bytes)
}

pub async fn get(state: web::Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    Ok(match state.tasks.get_by_id(TaskId(id)).await? {
        Some(task) => HttpResponse::Ok().json(task),
        None => not_found("Task", id),
    })
}

pub async fn create(state: web::Data<AppState>, body: web::Json<Task>) -> Result<HttpResponse, ApiError> {
    let created = state.tasks.create(body.into_inner()).await?;
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("/tasks/{}", created.id)))
        .json(created))
}

pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<Task>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    Ok(match state.tasks.update(TaskId(id), body.into_inner()).await? {
        Some(task) => HttpResponse::Ok().json(task),
        None => not_found("Task", id),
    })
}

pub async fn delete(state: web::Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    Ok(if state.tasks.delete(TaskId(id)).await? {
        HttpResponse::NoContent().finish()
    } else {
        not_found("Task", id)
    })
}
