//! Parameter definitions for MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for fetching one task.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTaskParams {
    /// Task ID.
    pub id: i64,
}

/// Parameters for deleting one task.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteTaskParams {
    /// Task ID.
    pub id: i64,
}

/// Parameters for creating a new task.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct CreateTaskParams {
    /// Task title (required, at most 500 characters).
    pub title: String,
    /// Optional task description.
    #[serde(default)]
    pub description: Option<String>,
    /// Pending, InProgress or Completed. Defaults to Pending.
    #[serde(default)]
    pub status: Option<String>,
    /// Low, Medium, High or Critical. Defaults to Medium.
    #[serde(default)]
    pub priority: Option<String>,
    /// Due date as YYYY-MM-DD.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Person responsible for the task.
    #[serde(default)]
    pub assignee: Option<String>,
    /// Free-text category.
    #[serde(default)]
    pub category: Option<String>,
}

/// Parameters for updating an existing task. Omitted fields are left as they are.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTaskParams {
    /// Task ID to update.
    pub id: i64,
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// If true, clears the description.
    #[serde(default)]
    pub clear_description: bool,
    /// New status: Pending, InProgress or Completed.
    #[serde(default)]
    pub status: Option<String>,
    /// New priority: Low, Medium, High or Critical.
    #[serde(default)]
    pub priority: Option<String>,
    /// New due date as YYYY-MM-DD.
    #[serde(default)]
    pub due_date: Option<String>,
    /// If true, clears the due date.
    #[serde(default)]
    pub clear_due_date: bool,
    /// New assignee.
    #[serde(default)]
    pub assignee: Option<String>,
    /// If true, clears the assignee.
    #[serde(default)]
    pub clear_assignee: bool,
    /// New category.
    #[serde(default)]
    pub category: Option<String>,
    /// If true, clears the category.
    #[serde(default)]
    pub clear_category: bool,
}

/// Parameters for searching tasks.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchTasksParams {
    /// Text matched against title and description.
    pub query: String,
    /// Only show tasks that are not completed.
    #[serde(default, alias = "onlyIncomplete")]
    pub only_incomplete: bool,
}

/// Parameters for a raw read-only query.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct QueryParams {
    /// SQL query to execute (SELECT statements only).
    pub sql: String,
}

/// Parameters for describing a table.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DescribeTableParams {
    /// Table name.
    pub table: String,
}
