//! Search tasks tool implementation.

use crate::mcp::params::SearchTasksParams;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use taskdeck_store_sqlite::SqliteStore;

use super::common::{store_result, with_store};

/// Search tasks by title or description.
pub async fn handle_search_tasks(
    store: SqliteStore,
    Parameters(params): Parameters<SearchTasksParams>,
) -> Result<CallToolResult, McpError> {
    let SearchTasksParams { query, only_incomplete } = params;
    store_result(with_store(store, move |store| store.search_tasks(&query, only_incomplete)).await?)
}
