//! Task use-cases: validation, search, CRUD and export.

use anyhow::Error;
use taskdeck_core::{Task, TaskId, TextMatcher, validate_title};
use thiserror::Error as ThisError;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::export::{ExportError, ExportFile, ExportFormat, export_tasks};
use crate::repository::Repository;

/// Errors surfaced by the services.
#[derive(ThisError, Debug)]
pub enum ServiceError {
    /// Input broke a business rule.
    #[error("{0}")]
    Validation(String),
    /// Input collides with existing data.
    #[error("{0}")]
    Conflict(String),
    /// Backing repository returned an error.
    #[error("repository error: {0}")]
    Repository(#[from] Error),
    /// Export encoding failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl ServiceError {
    pub(crate) fn repository<E: Into<Error>>(err: E) -> Self {
        Self::Repository(err.into())
    }
}

/// Task use-cases on top of an injected repository.
#[derive(Debug)]
pub struct TaskService<R> {
    repo: R,
}

impl<R> TaskService<R>
where
    R: Repository<Task>,
{
    /// Wrap `repo`.
    pub const fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Every task in id order.
    ///
    /// # Errors
    /// Returns [`ServiceError::Repository`] when the repository fails.
    pub async fn get_all(&self) -> Result<Vec<Task>, ServiceError> {
        self.repo.list().await.map_err(ServiceError::repository)
    }

    /// Tasks whose title or description contains `query` (case-insensitive),
    /// optionally dropping completed ones. A blank query keeps everything.
    ///
    /// # Errors
    /// Returns [`ServiceError::Repository`] when the repository fails.
    pub async fn search(&self, query: &str, only_incomplete: bool) -> Result<Vec<Task>, ServiceError> {
        let mut tasks = self.get_all().await?;
        if let Some(matcher) = TextMatcher::new(query) {
            tasks.retain(|task| matcher.matches(task));
        }
        if only_incomplete {
            tasks.retain(|task| !task.is_done());
        }
        debug!(query, only_incomplete, hits = tasks.len(), "Searched tasks");
        Ok(tasks)
    }

    /// # Errors
    /// Returns [`ServiceError::Repository`] when the repository fails.
    pub async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, ServiceError> {
        self.repo.get(id).await.map_err(ServiceError::repository)
    }

    /// Validate and store a new task. A caller-supplied id or `updated_at`
    /// is dropped.
    ///
    /// # Errors
    /// Returns [`ServiceError::Validation`] for a blank or overlong title,
    /// [`ServiceError::Repository`] when storing fails.
    pub async fn create(&self, mut task: Task) -> Result<Task, ServiceError> {
        validate_title(&task.title).map_err(|err| ServiceError::Validation(err.to_string()))?;
        task.id = TaskId::UNASSIGNED;
        task.updated_at = None;
        let created = self.repo.add(task).await.map_err(ServiceError::repository)?;
        info!(id = %created.id, "Created task");
        Ok(created)
    }

    /// Replace the editable fields of task `id` with those of `task`. The
    /// stored id and creation time are kept whatever `task` carries. A missing
    /// id is `Ok(None)` whatever the payload.
    ///
    /// # Errors
    /// Returns [`ServiceError::Validation`] for a blank or overlong title,
    /// [`ServiceError::Repository`] when the repository fails.
    pub async fn update(&self, id: TaskId, task: Task) -> Result<Option<Task>, ServiceError> {
        let Some(mut existing) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        validate_title(&task.title).map_err(|err| ServiceError::Validation(err.to_string()))?;
        existing.overlay_from(&task);
        let updated = self.repo.update(existing).await.map_err(ServiceError::repository)?;
        if updated.is_some() {
            info!(%id, "Updated task");
        }
        Ok(updated)
    }

    /// # Errors
    /// Returns [`ServiceError::Repository`] when the repository fails.
    pub async fn delete(&self, id: TaskId) -> Result<bool, ServiceError> {
        let deleted = self.repo.delete(id).await.map_err(ServiceError::repository)?;
        if deleted {
            info!(%id, "Deleted task");
        }
        Ok(deleted)
    }

    /// Run [`Self::search`] and encode the whole result set.
    ///
    /// # Errors
    /// Returns [`ServiceError::Repository`] when the repository fails and
    /// [`ServiceError::Export`] when encoding fails.
    pub async fn export(
        &self,
        query: &str,
        only_incomplete: bool,
        format: ExportFormat,
    ) -> Result<ExportFile, ServiceError> {
        let tasks = self.search(query, only_incomplete).await?;
        let file = export_tasks(&tasks, format, OffsetDateTime::now_utc())?;
        info!(rows = tasks.len(), file = %file.file_name, "Exported tasks");
        Ok(file)
    }
}
