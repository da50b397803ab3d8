//! Delete task tool implementation.

use crate::mcp::params::DeleteTaskParams;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content};
use taskdeck_core::TaskId;
use taskdeck_store_sqlite::SqliteStore;

use super::common::{task_not_found, tool_error, with_store};

/// Delete a task by ID.
pub async fn handle_delete_task(
    store: SqliteStore,
    Parameters(params): Parameters<DeleteTaskParams>,
) -> Result<CallToolResult, McpError> {
    let id = params.id;
    Ok(match with_store(store, move |store| store.delete_task(TaskId(id))).await? {
        Ok(true) => CallToolResult::success(vec![Content::text(format!(
            "Task with ID {id} deleted successfully"
        ))]),
        Ok(false) => task_not_found(id),
        Err(err) => tool_error(err),
    })
}
