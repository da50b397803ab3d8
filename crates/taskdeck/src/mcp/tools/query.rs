//! Read-only SQL tool implementation.

use crate::mcp::params::QueryParams;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use taskdeck_store_sqlite::SqliteStore;

use super::common::{store_result, with_store};

/// Run a `SELECT` and return the rows as JSON objects.
pub async fn handle_query(
    store: SqliteStore,
    Parameters(params): Parameters<QueryParams>,
) -> Result<CallToolResult, McpError> {
    store_result(with_store(store, move |store| store.query_readonly(&params.sql)).await?)
}
