//! Update task tool implementation.

use crate::mcp::params::UpdateTaskParams;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use taskdeck_core::{FieldPatch, TaskId, TaskPatch};
use taskdeck_store_sqlite::SqliteStore;

use super::common::{json_result, parse_due_date, parse_priority, parse_status, task_not_found, tool_error, with_store};

/// Apply the supplied fields to an existing task.
pub async fn handle_update_task(
    store: SqliteStore,
    Parameters(params): Parameters<UpdateTaskParams>,
) -> Result<CallToolResult, McpError> {
    let id = params.id;
    let patch = match build_patch(params) {
        Ok(patch) => patch,
        Err(message) => return Ok(tool_error(message)),
    };
    match with_store(store, move |store| store.patch_task(TaskId(id), &patch)).await? {
        Ok(Some(task)) => json_result(&task),
        Ok(None) => Ok(task_not_found(id)),
        Err(err) => Ok(tool_error(err)),
    }
}

fn build_patch(params: UpdateTaskParams) -> Result<TaskPatch, String> {
    let patch = TaskPatch {
        title: params.title,
        description: FieldPatch::from_parts(params.description, params.clear_description),
        status: parse_status(params.status.as_deref())?,
        priority: parse_priority(params.priority.as_deref())?,
        due_date: FieldPatch::from_parts(parse_due_date(params.due_date.as_deref())?, params.clear_due_date),
        assignee: FieldPatch::from_parts(params.assignee, params.clear_assignee),
        category: FieldPatch::from_parts(params.category, params.clear_category),
    };
    patch.validate().map_err(|err| err.to_string())?;
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::TaskStatus;

    #[test]
    fn only_supplied_fields_end_up_in_patch() {
        let patch = build_patch(UpdateTaskParams {
            id: 1,
            status: Some("Completed".into()),
            clear_assignee: true,
            ..UpdateTaskParams::default()
        })
        .unwrap_or_else(|err| panic!("build patch: {err}"));

        assert_eq!(patch.status, Some(TaskStatus::Completed));
        assert_eq!(patch.assignee, Some(FieldPatch::Clear));
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
    }

    #[test]
    fn blank_title_is_refused() {
        let result = build_patch(UpdateTaskParams {
            id: 1,
            title: Some(" ".into()),
            ..UpdateTaskParams::default()
        });
        assert_eq!(result, Err("Task title is required.".to_owned()));
    }
}
