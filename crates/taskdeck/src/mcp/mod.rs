//! MCP server exposing the task table over stdio.

mod params;
mod tools;

pub use params::*;

use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::tool::{ToolCallContext, ToolRouter};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, InitializeResult, ListToolsResult, ProtocolVersion,
    ServerCapabilities,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, tool, tool_router};
use taskdeck_store_sqlite::SqliteStore;

/// MCP server for taskdeck. Talks to the SQLite file directly.
#[derive(Clone)]
pub struct TaskdeckServer {
    tool_router: ToolRouter<Self>,
    store: SqliteStore,
}

#[tool_router]
impl TaskdeckServer {
    /// Create a new MCP server instance.
    pub fn new(store: SqliteStore) -> Self {
        Self {
            tool_router: Self::tool_router(),
            store,
        }
    }

    #[tool(description = "List all tasks ordered by ID")]
    async fn list_tasks(&self) -> Result<CallToolResult, McpError> {
        tools::list_tasks::handle_list_tasks(self.store.clone()).await
    }

    #[tool(description = "Fetch a single task by ID")]
    async fn get_task(&self, params: Parameters<GetTaskParams>) -> Result<CallToolResult, McpError> {
        tools::get_task::handle_get_task(self.store.clone(), params).await
    }

    #[tool(description = "Create a new task with title, description, status, priority, due date, assignee and category")]
    async fn create_task(&self, params: Parameters<CreateTaskParams>) -> Result<CallToolResult, McpError> {
        tools::create_task::handle_create_task(self.store.clone(), params).await
    }

    /// Partial update; only supplied fields change.
    #[tool(description = "Update an existing task. Only the supplied fields are changed; clear_* flags reset optional fields")]
    async fn update_task(&self, params: Parameters<UpdateTaskParams>) -> Result<CallToolResult, McpError> {
        tools::update_task::handle_update_task(self.store.clone(), params).await
    }

    #[tool(description = "Delete a task by ID")]
    async fn delete_task(&self, params: Parameters<DeleteTaskParams>) -> Result<CallToolResult, McpError> {
        tools::delete_task::handle_delete_task(self.store.clone(), params).await
    }

    #[tool(description = "Search tasks whose title or description contains the query, optionally skipping completed ones")]
    async fn search_tasks(&self, params: Parameters<SearchTasksParams>) -> Result<CallToolResult, McpError> {
        tools::search_tasks::handle_search_tasks(self.store.clone(), params).await
    }

    /// Raw read-only SQL.
    #[tool(description = "Execute a read-only SQL query (SELECT statements only) against the task database")]
    async fn query(&self, params: Parameters<QueryParams>) -> Result<CallToolResult, McpError> {
        tools::query::handle_query(self.store.clone(), params).await
    }

    #[tool(description = "List the tables in the task database")]
    async fn list_tables(&self) -> Result<CallToolResult, McpError> {
        tools::list_tables::handle_list_tables(self.store.clone()).await
    }

    #[tool(description = "Describe the columns of a table")]
    async fn describe_table(&self, params: Parameters<DescribeTableParams>) -> Result<CallToolResult, McpError> {
        tools::describe_table::handle_describe_table(self.store.clone(), params).await
    }
}

impl ServerHandler for TaskdeckServer {
    fn get_info(&self) -> InitializeResult {
        let capabilities = ServerCapabilities::builder()
            .enable_tools()
            .enable_tool_list_changed()
            .build();

        InitializeResult {
            protocol_version: ProtocolVersion::LATEST,
            capabilities,
            server_info: Implementation {
                name: "taskdeck".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Manage the taskdeck task list stored in SQLite.".into()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_context = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_context).await
    }
}
