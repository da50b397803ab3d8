//! List tasks tool implementation.

use rmcp::ErrorData as McpError;
use rmcp::model::CallToolResult;
use taskdeck_store_sqlite::SqliteStore;

use super::common::{store_result, with_store};

/// List every task ordered by id.
pub async fn handle_list_tasks(store: SqliteStore) -> Result<CallToolResult, McpError> {
    store_result(with_store(store, |store| store.list_tasks()).await?)
}
