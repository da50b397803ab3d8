use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, web};
use taskdeck_core::{User, UserId};

use super::error::{ApiError, not_found};
use super::AppState;

pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.users.get_all().await?))
}

pub async fn list_active(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.users.get_active().await?))
}

pub async fn get(state: web::Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    Ok(match state.users.get_by_id(UserId(id)).await? {
        Some(user) => HttpResponse::Ok().json(user),
        None => not_found("User", id),
    })
}

pub async fn create(state: web::Data<AppState>, body: web::Json<User>) -> Result<HttpResponse, ApiError> {
    let created = state.users.create(body.into_inner()).await?;
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("/users/{}", created.id)))
        .json(created))
}

pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<User>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    Ok(match state.users.update(UserId(id), body.into_inner()).await? {
        Some(user) => HttpResponse::Ok().json(user),
        None => not_found("User", id),
    })
}

pub async fn delete(state: web::Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    Ok(if state.users.delete(UserId(id)).await? {
        HttpResponse::NoContent().finish()
    } else {
        not_found("User", id)
    })
}
