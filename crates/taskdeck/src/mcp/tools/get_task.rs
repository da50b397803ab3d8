//! Get task tool implementation.

use crate::mcp::params::GetTaskParams;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use taskdeck_core::TaskId;
use taskdeck_store_sqlite::SqliteStore;

use super::common::{json_result, task_not_found, tool_error, with_store};

/// Fetch a single task by ID.
pub async fn handle_get_task(
    store: SqliteStore,
    Parameters(params): Parameters<GetTaskParams>,
) -> Result<CallToolResult, McpError> {
    let id = params.id;
    match with_store(store, move |store| store.get_task(TaskId(id))).await? {
        Ok(Some(task)) => json_result(&task),
        Ok(None) => Ok(task_not_found(id)),
        Err(err) => Ok(tool_error(err)),
    }
}
