use rusqlite::{Connection, OptionalExtension, params};
use taskdeck_core::patch::column_binding;
use taskdeck_core::{Priority, Task, TaskId, TaskPatch, TaskStatus};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::rows::{format_date, format_timestamp, select_tasks, task_from_row};
use crate::{Result, SqliteStore};

impl SqliteStore {
    /// All tasks in id order.
    ///
    /// # Errors
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(select_tasks!("ORDER BY id"))?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Task with `id`, if present.
    ///
    /// # Errors
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        Self::fetch_task(&self.connect()?, id)
    }

    /// Insert `task` under a fresh id and return the stored row. The id on
    /// `task` is ignored.
    ///
    /// # Errors
    /// Returns an error if the insert fails, e.g. when the title breaks a
    /// column constraint.
    pub fn add_task(&self, task: &Task) -> Result<Task> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO tasks (title, description, status, priority, due_date, assignee, category, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                task.title,
                task.description,
                task.status.as_str(),
                task.priority.as_str(),
                task.due_date.map(format_date).transpose()?,
                task.assignee,
                task.category,
                format_timestamp(task.created_at)?,
                task.updated_at.map(format_timestamp).transpose()?,
            ],
        )?;
        let id = TaskId(conn.last_insert_rowid());
        info!(%id, "Inserted task");
        let stored = conn.query_row(select_tasks!("WHERE id = ?1"), params![id.get()], task_from_row)?;
        Ok(stored)
    }

    /// Overwrite the editable columns of the row with `task.id` and stamp
    /// `updated_at`. Returns `None` when no such row exists.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub fn update_task(&self, task: &Task) -> Result<Option<Task>> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE tasks
             SET title = ?1, description = ?2, status = ?3, priority = ?4, due_date = ?5,
                 assignee = ?6, category = ?7, updated_at = ?8
             WHERE id = ?9",
            params![
                task.title,
                task.description,
                task.status.as_str(),
                task.priority.as_str(),
                task.due_date.map(format_date).transpose()?,
                task.assignee,
                task.category,
                format_timestamp(OffsetDateTime::now_utc())?,
                task.id.get(),
            ],
        )?;
        if changed == 0 {
            debug!(id = %task.id, "Update skipped, task missing");
            return Ok(None);
        }
        Self::fetch_task(&conn, task.id)
    }

    /// Apply only the fields present in `patch`. An empty patch leaves the row
    /// (and its `updated_at`) untouched.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub fn patch_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Option<Task>> {
        let conn = self.connect()?;
        if patch.is_empty() {
            return Self::fetch_task(&conn, id);
        }

        let (set_description, description) = column_binding(patch.description.as_ref());
        let (set_due, due_date) = column_binding(patch.due_date.as_ref());
        let (set_assignee, assignee) = column_binding(patch.assignee.as_ref());
        let (set_category, category) = column_binding(patch.category.as_ref());

        let changed = conn.execute(
            "UPDATE tasks SET
               title       = COALESCE(?1, title),
               description = CASE WHEN ?2 THEN ?3 ELSE description END,
               status      = COALESCE(?4, status),
               priority    = COALESCE(?5, priority),
               due_date    = CASE WHEN ?6 THEN ?7 ELSE due_date END,
               assignee    = CASE WHEN ?8 THEN ?9 ELSE assignee END,
               category    = CASE WHEN ?10 THEN ?11 ELSE category END,
               updated_at  = ?12
             WHERE id = ?13",
            params![
                patch.title,
                set_description,
                description,
                patch.status.map(TaskStatus::as_str),
                patch.priority.map(Priority::as_str),
                set_due,
                due_date.copied().map(format_date).transpose()?,
                set_assignee,
                assignee,
                set_category,
                category,
                format_timestamp(OffsetDateTime::now_utc())?,
                id.get(),
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        info!(%id, "Patched task");
        Self::fetch_task(&conn, id)
    }

    /// Remove the row with `id`. Returns whether a row was deleted.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn delete_task(&self, id: TaskId) -> Result<bool> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id.get()])?;
        debug!(%id, deleted = changed > 0, "Delete task");
        Ok(changed > 0)
    }

    /// Tasks whose title or description contains `query` (ASCII
    /// case-insensitive), optionally excluding completed ones. A blank query
    /// matches everything.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn search_tasks(&self, query: &str, only_incomplete: bool) -> Result<Vec<Task>> {
        let query = query.trim();
        let pattern = (!query.is_empty()).then(|| format!("%{}%", escape_like(query)));
        let conn = self.connect()?;
        let mut stmt = conn.prepare(select_tasks!(
            r"WHERE (?1 IS NULL OR title LIKE ?1 ESCAPE '\' OR description LIKE ?1 ESCAPE '\')
                AND (?2 = 0 OR status <> 'Completed')
              ORDER BY id"
        ))?;
        let tasks = stmt
            .query_map(params![pattern, only_incomplete], task_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    fn fetch_task(conn: &Connection, id: TaskId) -> Result<Option<Task>> {
        let task = conn
            .query_row(select_tasks!("WHERE id = ?1"), params![id.get()], task_from_row)
            .optional()?;
        Ok(task)
    }
}

fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
