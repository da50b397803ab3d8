//! Describe table tool implementation.

use crate::mcp::params::DescribeTableParams;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use taskdeck_store_sqlite::SqliteStore;

use super::common::{store_result, with_store};

/// Column layout of one table.
pub async fn handle_describe_table(
    store: SqliteStore,
    Parameters(params): Parameters<DescribeTableParams>,
) -> Result<CallToolResult, McpError> {
    store_result(with_store(store, move |store| store.describe_table(&params.table)).await?)
}
