use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use taskdeck_app::{Repository, TaskService};
use taskdeck_core::Task;
use taskdeck_store_sqlite::SqliteStore;
use tracing::info;

/// Create the schema at `path` and optionally insert the demo tasks.
pub fn init_db(path: &Path, seed: bool, out: &mut impl Write) -> Result<()> {
    let store =
        SqliteStore::open(path).with_context(|| format!("failed to open database {}", path.display()))?;
    writeln!(out, "initialized database: {}", store.path().display())?;
    if seed {
        let inserted = store.seed_demo_tasks().context("failed to insert demo tasks")?;
        info!(inserted, "Seeded demo tasks");
        writeln!(out, "inserted {inserted} demo tasks")?;
    }
    Ok(())
}

/// Print tasks through the service, filtered like `GET /tasks/search`.
pub async fn ls<R: Repository<Task>>(
    service: &TaskService<R>,
    query: Option<&str>,
    only_incomplete: bool,
    out: &mut impl Write,
) -> Result<()> {
    let tasks = service.search(query.unwrap_or_default(), only_incomplete).await?;
    if tasks.is_empty() {
        if query.is_some() || only_incomplete {
            writeln!(out, "No tasks matched the provided filters")?;
        } else {
            writeln!(out, "No tasks found")?;
        }
        return Ok(());
    }

    writeln!(out, "ID | Status | Priority | Due | Assignee | Title")?;
    writeln!(out, "-- | ------ | -------- | --- | -------- | -----")?;
    for task in &tasks {
        writeln!(out, "{}", format_row(task))?;
    }
    Ok(())
}

fn format_row(task: &Task) -> String {
    let due = task.due_date.map_or_else(|| "-".to_owned(), |date| date.to_string());
    format!(
        "{} | {} | {} | {} | {} | {}",
        task.id,
        task.status,
        task.priority,
        due,
        task.assignee.as_deref().unwrap_or("-"),
        task.title
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_app::InMemoryRepository;
    use taskdeck_core::{Priority, TaskId, TaskStatus};
    use time::macros::date;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap_or_else(|err| panic!("utf8: {err}"))
    }

    #[test]
    fn row_uses_placeholders_for_missing_fields() {
        let bare = Task {
            id: TaskId(7),
            ..Task::new("Tidy desk")
        };
        assert_eq!(format_row(&bare), "7 | Pending | Medium | - | - | Tidy desk");

        let full = Task {
            id: TaskId(8),
            due_date: Some(date!(2025 - 02 - 14)),
            assignee: Some("kim".into()),
            ..Task::new("Book venue")
                .with_status(TaskStatus::InProgress)
                .with_priority(Priority::High)
        };
        assert_eq!(format_row(&full), "8 | InProgress | High | 2025-02-14 | kim | Book venue");
    }

    #[tokio::test]
    async fn ls_filters_completed_tasks() {
        let service = TaskService::new(InMemoryRepository::with_sample_tasks());
        let mut buf = Vec::new();
        ls(&service, None, true, &mut buf)
            .await
            .unwrap_or_else(|err| panic!("ls: {err}"));
        let text = output(buf);
        assert!(text.starts_with("ID | Status"));
        assert!(!text.contains("Completed"));
    }

    #[tokio::test]
    async fn ls_reports_empty_results() {
        let service = TaskService::new(InMemoryRepository::<Task>::new());
        let mut buf = Vec::new();
        ls(&service, None, false, &mut buf)
            .await
            .unwrap_or_else(|err| panic!("ls: {err}"));
        assert_eq!(output(buf), "No tasks found\n");

        let mut buf = Vec::new();
        ls(&service, Some("nothing"), false, &mut buf)
            .await
            .unwrap_or_else(|err| panic!("ls: {err}"));
        assert_eq!(output(buf), "No tasks matched the provided filters\n");
    }

    #[test]
    fn init_db_creates_and_seeds() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = dir.path().join("nested").join("tasks.db");
        let mut buf = Vec::new();
        init_db(&path, true, &mut buf).unwrap_or_else(|err| panic!("init-db: {err}"));

        assert!(path.exists());
        assert!(output(buf).contains("inserted 23 demo tasks"));
        let store = SqliteStore::open(&path).unwrap_or_else(|err| panic!("open: {err}"));
        assert_eq!(store.list_tasks().map(|tasks| tasks.len()).ok(), Some(23));
    }
}
