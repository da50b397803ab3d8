//! HTTP surface for tasks and users.

mod error;
mod tasks;
mod users;

use actix_files::Files;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use taskdeck_app::{Backend, Backends, ServerConfig, TaskService, UserService};
use taskdeck_core::{Task, User};
use tracing::{info, warn};

/// Services shared by every worker.
pub struct AppState {
    pub tasks: TaskService<Backend<Task>>,
    pub users: UserService<Backend<User>>,
}

impl AppState {
    pub fn new(backends: Backends) -> Self {
        let Backends { tasks, users } = backends;
        Self {
            tasks: TaskService::new(tasks),
            users: UserService::new(users),
        }
    }
}

/// Wrap an extractor failure in the `{"error": ...}` envelope.
fn extractor_error<E>(err: E, status: StatusCode) -> actix_web::Error
where
    E: fmt::Debug + fmt::Display + 'static,
{
    let response = error::error_body(status, &err.to_string());
    InternalError::from_response(err, response).into()
}

/// Register the `/tasks` and `/users` routes plus extractor error handling.
/// Unparsable path ids are 404, bad bodies and query strings are 400.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req| extractor_error(err, StatusCode::BAD_REQUEST)),
    )
    .app_data(web::PathConfig::default().error_handler(|err, _req| extractor_error(err, StatusCode::NOT_FOUND)))
    .app_data(
        web::QueryConfig::default().error_handler(|err, _req| extractor_error(err, StatusCode::BAD_REQUEST)),
    )
    .service(
        web::scope("/tasks")
            .route("", web::get().to(tasks::list))
            .route("", web::post().to(tasks::create))
            .route("/search", web::get().to(tasks::search))
            .route("/export", web::get().to(tasks::export_xlsx))
            .route("/export/csv", web::get().to(tasks::export_csv))
            .route("/{id}", web::get().to(tasks::get))
            .route("/{id}", web::put().to(tasks::update))
            .route("/{id}", web::delete().to(tasks::delete)),
    )
    .service(
        web::scope("/users")
            .route("", web::get().to(users::list))
            .route("", web::post().to(users::create))
            .route("/active", web::get().to(users::list_active))
            .route("/{id}", web::get().to(users::get))
            .route("/{id}", web::put().to(users::update))
            .route("/{id}", web::delete().to(users::delete)),
    );
}

/// Mount `dir` at `/` with `index.html` as the directory index, when it exists.
pub fn static_files(dir: &Path) -> impl FnOnce(&mut web::ServiceConfig) {
    let dir = dir.to_path_buf();
    move |cfg| {
        if dir.is_dir() {
            cfg.service(Files::new("/", dir).index_file("index.html"));
        } else {
            warn!(dir = %dir.display(), "Static directory missing, front end disabled");
        }
    }
}

/// Run the HTTP server until it is stopped.
///
/// # Errors
/// Returns an error if the listen address cannot be bound or the server
/// fails while running.
pub async fn serve(server: &ServerConfig, backends: Backends) -> Result<()> {
    let state = web::Data::new(AppState::new(backends));
    let static_dir = server.static_dir.clone();

    info!(bind = %server.bind, static_dir = %static_dir.display(), "Starting HTTP server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes)
            .configure(static_files(&static_dir))
    })
    .bind(&server.bind)
    .with_context(|| format!("failed to bind {}", server.bind))?
    .run()
    .await
    .context("HTTP server failed")
}
