//! Create task tool implementation.

use crate::mcp::params::CreateTaskParams;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use taskdeck_core::{Task, validate_title};
use taskdeck_store_sqlite::SqliteStore;

use super::common::{parse_due_date, parse_priority, parse_status, store_result, tool_error, with_store};

/// Insert a task built from the parameters.
pub async fn handle_create_task(
    store: SqliteStore,
    Parameters(params): Parameters<CreateTaskParams>,
) -> Result<CallToolResult, McpError> {
    let task = match build_task(params) {
        Ok(task) => task,
        Err(message) => return Ok(tool_error(message)),
    };
    store_result(with_store(store, move |store| store.add_task(&task)).await?)
}

fn build_task(params: CreateTaskParams) -> Result<Task, String> {
    validate_title(&params.title).map_err(|err| err.to_string())?;
    Ok(Task {
        description: params.description,
        status: parse_status(params.status.as_deref())?.unwrap_or_default(),
        priority: parse_priority(params.priority.as_deref())?.unwrap_or_default(),
        due_date: parse_due_date(params.due_date.as_deref())?,
        assignee: params.assignee,
        category: params.category,
        ..Task::new(params.title)
    })
}
