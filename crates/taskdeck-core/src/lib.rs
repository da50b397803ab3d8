//! Domain types shared by every taskdeck surface.

/// Identifier types.
pub mod id;
/// Partial updates applied by the tool bridge.
pub mod patch;
/// Status and priority enumerations.
pub mod state;
/// Query matching over task text.
pub mod text_matcher;
/// User accounts.
pub mod user;

pub use crate::id::{TaskId, UserId};
pub use crate::patch::{FieldPatch, TaskPatch};
pub use crate::state::{Priority, TaskStatus, UnknownVariant};
pub use crate::text_matcher::TextMatcher;
pub use crate::user::User;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Date, OffsetDateTime};

/// Longest title the relational schema accepts.
pub const MAX_TITLE_LEN: usize = 500;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// A tracked unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier; `0` until the task has been added.
    #[serde(default)]
    pub id: TaskId,
    /// Short human-readable summary.
    #[serde(default)]
    pub title: String,
    /// Longer free-form notes.
    #[serde(default)]
    pub description: Option<String>,
    /// Completion state.
    #[serde(default)]
    pub status: TaskStatus,
    /// Urgency.
    #[serde(default)]
    pub priority: Priority,
    /// Calendar day the task should be finished by.
    #[serde(default, with = "iso_date::option")]
    pub due_date: Option<Date>,
    /// Person responsible for the task.
    #[serde(default)]
    pub assignee: Option<String>,
    /// Free-text grouping tag.
    #[serde(default)]
    pub category: Option<String>,
    /// Creation instant, fixed once the task is stored.
    #[serde(default = "OffsetDateTime::now_utc", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Instant of the last successful update.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl Default for Task {
    fn default() -> Self {
        Self::new("")
    }
}

impl Task {
    /// Unsaved task with default status and priority, created now.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TaskId::UNASSIGNED,
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            priority: Priority::default(),
            due_date: None,
            assignee: None,
            category: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// True when the task is finished.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.status.is_done()
    }

    /// Copy every user-editable field from `incoming`, leaving `id` and the
    /// timestamps untouched.
    pub fn overlay_from(&mut self, incoming: &Self) {
        self.title.clone_from(&incoming.title);
        self.description.clone_from(&incoming.description);
        self.status = incoming.status;
        self.priority = incoming.priority;
        self.due_date = incoming.due_date;
        self.assignee.clone_from(&incoming.assignee);
        self.category.clone_from(&incoming.category);
    }
}

/// Rejection reasons for a task title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TitleError {
    /// Empty or whitespace-only.
    #[error("Task title is required.")]
    Blank,
    /// Longer than [`MAX_TITLE_LEN`] characters.
    #[error("Task title must be at most 500 characters.")]
    TooLong,
}

/// Check a title against the rules every write path shares.
///
/// # Errors
/// Returns [`TitleError`] when the title is blank or too long.
pub fn validate_title(title: &str) -> Result<(), TitleError> {
    if title.trim().is_empty() {
        return Err(TitleError::Blank);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TitleError::TooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn new_task_starts_pending_and_unassigned() {
        let task = Task::new("A").with_description("B");
        assert_eq!(task.id, TaskId::UNASSIGNED);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.description.as_deref(), Some("B"));
        assert!(task.updated_at.is_none());
        assert!(!task.is_done());
    }

    #[test]
    fn overlay_keeps_identity_and_timestamps() {
        let created = datetime!(2024-05-01 10:00 UTC);
        let mut stored = Task {
            id: TaskId(3),
            created_at: created,
            ..Task::new("old")
        };
        let incoming = Task {
            id: TaskId(99),
            due_date: Some(date!(2024 - 06 - 01)),
            assignee: Some("alice".into()),
            ..Task::new("new").with_status(TaskStatus::Completed)
        };

        stored.overlay_from(&incoming);

        assert_eq!(stored.id, TaskId(3));
        assert_eq!(stored.created_at, created);
        assert_eq!(stored.title, "new");
        assert_eq!(stored.status, TaskStatus::Completed);
        assert_eq!(stored.due_date, Some(date!(2024 - 06 - 01)));
        assert_eq!(stored.assignee.as_deref(), Some("alice"));
    }

    #[test]
    fn title_rules() {
        assert_eq!(validate_title("ship it"), Ok(()));
        assert_eq!(validate_title(""), Err(TitleError::Blank));
        assert_eq!(validate_title(" \t\n"), Err(TitleError::Blank));
        assert_eq!(validate_title(&"x".repeat(MAX_TITLE_LEN)), Ok(()));
        assert_eq!(
            validate_title(&"x".repeat(MAX_TITLE_LEN + 1)),
            Err(TitleError::TooLong)
        );
    }

    #[test]
    fn json_uses_camel_case_and_iso_dates() {
        let task = Task {
            id: TaskId(5),
            due_date: Some(date!(2025 - 01 - 31)),
            created_at: datetime!(2025-01-01 08:30 UTC),
            ..Task::new("Write docs").with_priority(Priority::High)
        };
        let value = serde_json::to_value(&task).unwrap_or_else(|err| panic!("serialize: {err}"));
        assert_eq!(value["id"], 5);
        assert_eq!(value["dueDate"], "2025-01-31");
        assert_eq!(value["priority"], "High");
        assert_eq!(value["status"], "Pending");
        assert_eq!(value["createdAt"], "2025-01-01T08:30:00Z");
        assert!(value["updatedAt"].is_null());
    }

    #[test]
    fn json_payload_without_optional_fields_gets_defaults() {
        let task: Task = serde_json::from_str(r#"{"title":"A","description":"B"}"#)
            .unwrap_or_else(|err| panic!("deserialize: {err}"));
        assert_eq!(task.id, TaskId::UNASSIGNED);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.due_date.is_none());
        assert!(task.created_at <= OffsetDateTime::now_utc());
    }
}
