use rusqlite::params;
use taskdeck_core::Priority::{self, Critical, High, Low, Medium};
use taskdeck_core::TaskStatus::{self, Completed, InProgress, Pending};
use time::{Duration, OffsetDateTime};
use tracing::info;

use crate::rows::{format_date, format_timestamp};
use crate::{Result, SqliteStore};

struct DemoTask {
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: Priority,
    due_in_days: i64,
    assignee: &'static str,
}

const fn demo(
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: Priority,
    due_in_days: i64,
    assignee: &'static str,
) -> DemoTask {
    DemoTask {
        title,
        description,
        status,
        priority,
        due_in_days,
        assignee,
    }
}

const DEMO_TASKS: &[DemoTask] = &[
    demo("Prepare Tabnine demo", "C# API + MCP DB context", InProgress, High, 2, "robbie"),
    demo("Review PRs", "Check main repo PRs", Pending, Medium, 7, "robbie"),
    demo("Fix flaky test", "Stabilize CI test", Pending, Critical, 1, "qa-team"),
    demo("Update API documentation", "Add OpenAPI specs for all endpoints", Pending, Medium, 5, "alice"),
    demo("Implement user authentication", "Add JWT-based authentication system", InProgress, High, 10, "bob"),
    demo("Fix database migration script", "Resolve issues with schema migration", Pending, Critical, 1, "charlie"),
    demo("Code review for feature branch", "Review pull request #142", Pending, Medium, 3, "diana"),
    demo("Optimize database queries", "Improve performance of task search endpoint", InProgress, High, 7, "alice"),
    demo("Write unit tests for TaskService", "Achieve 80% code coverage", Pending, Medium, 6, "bob"),
    demo("Deploy to staging environment", "Deploy latest build to staging server", Completed, High, -2, "devops"),
    demo("Update dependencies", "Upgrade all packages to latest versions", Pending, Low, 14, "charlie"),
    demo("Create user dashboard", "Build frontend dashboard for task management", InProgress, High, 12, "diana"),
    demo("Setup CI/CD pipeline", "Configure GitHub Actions for automated deployment", Completed, Critical, -5, "devops"),
    demo("Refactor TaskRepository", "Improve code structure and error handling", Pending, Low, 15, "alice"),
    demo("Add logging middleware", "Implement request/response logging", InProgress, Medium, 4, "bob"),
    demo("Security audit", "Conduct security review of API endpoints", Pending, Critical, 3, "security-team"),
    demo("Performance testing", "Load test API with 1000 concurrent users", Pending, High, 8, "qa-team"),
    demo("Setup monitoring", "Configure application monitoring and alerts", InProgress, High, 5, "devops"),
    demo("Create API client library", "Build a client SDK for the API", Pending, Medium, 20, "alice"),
    demo("Database backup strategy", "Implement automated database backups", Pending, Critical, 2, "devops"),
    demo("Update README", "Add installation and usage instructions", Completed, Low, -1, "charlie"),
    demo("Implement task filtering", "Add advanced filtering options to search endpoint", InProgress, Medium, 9, "diana"),
    demo("Setup error tracking", "Integrate error monitoring", Pending, Medium, 6, "bob"),
];

impl SqliteStore {
    /// Insert the demo task set in one transaction, with due dates relative to
    /// today. Returns the number of rows added.
    ///
    /// # Errors
    /// Returns an error if any insert fails; nothing is committed in that case.
    pub fn seed_demo_tasks(&self) -> Result<usize> {
        let now = OffsetDateTime::now_utc();
        let created_at = format_timestamp(now)?;
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (title, description, status, priority, due_date, assignee, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for task in DEMO_TASKS {
                let due = now
                    .date()
                    .checked_add(Duration::days(task.due_in_days))
                    .map(format_date)
                    .transpose()?;
                let updated_at = task.status.is_done().then_some(created_at.as_str());
                stmt.execute(params![
                    task.title,
                    task.description,
                    task.status.as_str(),
                    task.priority.as_str(),
                    due,
                    task.assignee,
                    created_at,
                    updated_at,
                ])?;
            }
        }
        tx.commit()?;
        info!(count = DEMO_TASKS.len(), "Seeded demo tasks");
        Ok(DEMO_TASKS.len())
    }
}
