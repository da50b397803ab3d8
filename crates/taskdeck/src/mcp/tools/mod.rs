//! MCP tool implementations.

pub mod common;
pub mod create_task;
pub mod delete_task;
pub mod describe_table;
pub mod get_task;
pub mod list_tables;
pub mod list_tasks;
pub mod query;
pub mod search_tasks;
pub mod update_task;
