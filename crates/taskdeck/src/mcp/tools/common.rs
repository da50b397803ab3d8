//! Shared helpers for MCP tool implementations.

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use taskdeck_core::{Priority, TaskStatus};
use taskdeck_store_sqlite::{SqliteStore, SqliteStoreError};
use time::Date;
use time::macros::format_description;

/// Run a blocking store operation on the blocking pool.
pub async fn with_store<F, R>(store: SqliteStore, action: F) -> Result<R, McpError>
where
    F: FnOnce(&SqliteStore) -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || action(&store))
        .await
        .map_err(|e| McpError::internal_error(format!("Task join error: {e}"), None))
}

/// Pretty JSON text content.
pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str =
        serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

/// Tool-level failure reported back to the caller as an error result.
pub fn tool_error(message: impl std::fmt::Display) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error: {message}"))])
}

pub fn task_not_found(id: i64) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Task with ID {id} not found"))])
}

/// JSON on success, error result on store failure.
pub fn store_result<T: Serialize>(result: Result<T, SqliteStoreError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => json_result(&value),
        Err(err) => Ok(tool_error(err)),
    }
}

pub fn parse_status(raw: Option<&str>) -> Result<Option<TaskStatus>, String> {
    raw.map(str::parse).transpose().map_err(|err| format!("{err}"))
}

pub fn parse_priority(raw: Option<&str>) -> Result<Option<Priority>, String> {
    raw.map(str::parse).transpose().map_err(|err| format!("{err}"))
}

pub fn parse_due_date(raw: Option<&str>) -> Result<Option<Date>, String> {
    raw.map(|text| {
        Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
            .map_err(|err| format!("invalid due date '{text}': {err}"))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[tokio::test]
    async fn runs_blocking_action_on_cloned_store() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let store = SqliteStore::open(dir.path().join("t.db")).unwrap_or_else(|err| panic!("open: {err}"));

        let (first, second) = tokio::join!(
            with_store(store.clone(), |store| store.list_tasks().map(|tasks| tasks.len())),
            with_store(store, |store| store.list_tables()),
        );

        assert_eq!(first.ok().and_then(Result::ok), Some(0));
        assert_eq!(second.ok().and_then(Result::ok).map(|t| t.len()), Some(2));
    }

    #[test]
    fn field_parsers() {
        assert_eq!(parse_status(Some("in progress")), Ok(Some(TaskStatus::InProgress)));
        assert_eq!(parse_status(None), Ok(None));
        assert!(parse_status(Some("blocked")).is_err());
        assert_eq!(parse_priority(Some("critical")), Ok(Some(Priority::Critical)));
        assert_eq!(parse_due_date(Some("2025-07-01")), Ok(Some(date!(2025 - 07 - 01))));
        assert!(parse_due_date(Some("07/01/2025")).is_err());
    }
}
