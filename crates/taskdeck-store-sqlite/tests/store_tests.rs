#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskdeck_core::{FieldPatch, Priority, Task, TaskId, TaskPatch, TaskStatus, User};
use taskdeck_store_sqlite::{SqliteStore, SqliteStoreError};
use tempfile::TempDir;
use time::macros::{date, datetime};

fn setup() -> (TempDir, SqliteStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(dir.path().join("tasks.db")).unwrap();
    (dir, store)
}

#[test]
fn ids_are_assigned_in_insertion_order() {
    let (_dir, store) = setup();

    let first = store
        .add_task(&Task {
            id: TaskId(42),
            ..Task::new("first")
        })
        .unwrap();
    let second = store.add_task(&Task::new("second")).unwrap();

    assert_eq!(first.id, TaskId(1));
    assert_eq!(second.id, TaskId(2));
    assert_eq!(first.status, TaskStatus::Pending);
    let titles: Vec<_> = store.list_tasks().unwrap().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, ["first", "second"]);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let (_dir, store) = setup();
    let first = store.add_task(&Task::new("a")).unwrap();
    assert!(store.delete_task(first.id).unwrap());
    let next = store.add_task(&Task::new("b")).unwrap();
    assert_eq!(next.id, TaskId(2));
}

#[test]
fn add_get_roundtrip_preserves_fields() {
    let (_dir, store) = setup();
    let created = datetime!(2025-02-01 09:15:30 UTC);
    let task = Task {
        due_date: Some(date!(2025 - 02 - 14)),
        assignee: Some("alice".into()),
        category: Some("ops".into()),
        created_at: created,
        ..Task::new("Rotate keys")
            .with_description("quarterly")
            .with_priority(Priority::Critical)
            .with_status(TaskStatus::InProgress)
    };

    let stored = store.add_task(&task).unwrap();
    let fetched = store.get_task(stored.id).unwrap().unwrap();

    assert_eq!(fetched, Task { id: stored.id, ..task });
}

#[test]
fn update_overwrites_fields_and_stamps_updated_at() {
    let (_dir, store) = setup();
    let stored = store
        .add_task(&Task::new("A").with_description("B"))
        .unwrap();

    let mut edit = stored.clone();
    edit.title = "A2".into();
    let updated = store.update_task(&edit).unwrap().unwrap();

    assert_eq!(updated.title, "A2");
    assert_eq!(updated.description.as_deref(), Some("B"));
    assert_eq!(updated.created_at, stored.created_at);
    assert!(updated.updated_at.is_some());
}

#[test]
fn update_of_missing_row_creates_nothing() {
    let (_dir, store) = setup();
    let ghost = Task {
        id: TaskId(999),
        ..Task::new("ghost")
    };
    assert!(store.update_task(&ghost).unwrap().is_none());
    assert!(store.list_tasks().unwrap().is_empty());
}

#[test]
fn delete_is_idempotent() {
    let (_dir, store) = setup();
    assert!(!store.delete_task(TaskId(999)).unwrap());

    let task = store.add_task(&Task::new("x")).unwrap();
    assert!(store.delete_task(task.id).unwrap());
    assert!(!store.delete_task(task.id).unwrap());
    assert!(store.get_task(task.id).unwrap().is_none());
}

#[test]
fn overlong_title_is_rejected_by_schema() {
    let (_dir, store) = setup();
    let err = store.add_task(&Task::new("x".repeat(501))).unwrap_err();
    assert!(matches!(err, SqliteStoreError::Sql(_)));
}

#[test]
fn patch_applies_only_supplied_fields() {
    let (_dir, store) = setup();
    let stored = store
        .add_task(&Task {
            assignee: Some("bob".into()),
            category: Some("web".into()),
            ..Task::new("Ship").with_description("v1")
        })
        .unwrap();

    let patch = TaskPatch {
        status: Some(TaskStatus::Completed),
        assignee: Some(FieldPatch::Clear),
        due_date: Some(FieldPatch::Set(date!(2025 - 06 - 30))),
        ..TaskPatch::default()
    };
    let patched = store.patch_task(stored.id, &patch).unwrap().unwrap();

    assert_eq!(patched.title, "Ship");
    assert_eq!(patched.description.as_deref(), Some("v1"));
    assert_eq!(patched.status, TaskStatus::Completed);
    assert_eq!(patched.assignee, None);
    assert_eq!(patched.category.as_deref(), Some("web"));
    assert_eq!(patched.due_date, Some(date!(2025 - 06 - 30)));
    assert!(patched.updated_at.is_some());
}

#[test]
fn empty_patch_leaves_row_untouched() {
    let (_dir, store) = setup();
    let stored = store.add_task(&Task::new("Ship")).unwrap();

    let same = store.patch_task(stored.id, &TaskPatch::default()).unwrap().unwrap();
    assert_eq!(same, stored);
    assert!(store.patch_task(TaskId(77), &TaskPatch::default()).unwrap().is_none());
}

#[test]
fn patch_of_missing_row_returns_none() {
    let (_dir, store) = setup();
    let patch = TaskPatch {
        title: Some("new".into()),
        ..TaskPatch::default()
    };
    assert!(store.patch_task(TaskId(5), &patch).unwrap().is_none());
}

#[test]
fn search_matches_title_or_description_and_filters_completed() {
    let (_dir, store) = setup();
    store.add_task(&Task::new("Write report")).unwrap();
    store
        .add_task(&Task::new("Plan").with_description("report outline"))
        .unwrap();
    store
        .add_task(&Task::new("Old REPORT").with_status(TaskStatus::Completed))
        .unwrap();
    store.add_task(&Task::new("100% done?")).unwrap();

    let titles = |tasks: Vec<Task>| tasks.into_iter().map(|t| t.title).collect::<Vec<_>>();

    assert_eq!(
        titles(store.search_tasks("report", false).unwrap()),
        ["Write report", "Plan", "Old REPORT"]
    );
    assert_eq!(
        titles(store.search_tasks(" report ", true).unwrap()),
        ["Write report", "Plan"]
    );
    assert_eq!(titles(store.search_tasks("%", false).unwrap()), ["100% done?"]);
    assert_eq!(store.search_tasks("", false).unwrap(), store.list_tasks().unwrap());
    assert!(
        store
            .search_tasks("", true)
            .unwrap()
            .iter()
            .all(|task| !task.is_done())
    );
}

#[test]
fn readonly_query_returns_objects_and_refuses_writes() {
    let (_dir, store) = setup();
    store
        .add_task(&Task::new("Count me").with_priority(Priority::High))
        .unwrap();

    let rows = store
        .query_readonly("  select id, title, priority, 1.5 AS ratio, NULL AS nothing FROM tasks")
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], 1);
    assert_eq!(rows[0]["title"], "Count me");
    assert_eq!(rows[0]["priority"], "High");
    assert_eq!(rows[0]["ratio"], 1.5);
    assert!(rows[0]["nothing"].is_null());

    assert!(matches!(
        store.query_readonly("DELETE FROM tasks"),
        Err(SqliteStoreError::NotSelect)
    ));
    let _ = store.query_readonly("SELECT 1; DELETE FROM tasks");
    assert_eq!(store.list_tasks().unwrap().len(), 1);
}

#[test]
fn introspection_lists_and_describes_tables() {
    let (_dir, store) = setup();
    assert_eq!(store.list_tables().unwrap(), ["tasks", "users"]);

    let columns = store.describe_table("tasks").unwrap();
    let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "id",
            "title",
            "description",
            "status",
            "priority",
            "due_date",
            "assignee",
            "category",
            "created_at",
            "updated_at"
        ]
    );
    assert_eq!(columns[0].primary_key, 1);
    assert!(columns[1].not_null);
    assert_eq!(columns[3].default_value.as_deref(), Some("'Pending'"));

    assert!(matches!(
        store.describe_table("tasks; DROP TABLE tasks"),
        Err(SqliteStoreError::InvalidIdentifier(_))
    ));
    assert!(matches!(
        store.describe_table("nope"),
        Err(SqliteStoreError::InvalidIdentifier(_))
    ));
}

#[test]
fn user_crud_enforces_unique_email() {
    let (_dir, store) = setup();
    let ada = store.add_user(&User::new("Ada", "ada@example.invalid")).unwrap();
    let bob = store.add_user(&User::new("Bob", "bob@example.invalid")).unwrap();
    assert!(ada.is_active);

    let dup = store.add_user(&User::new("Ada 2", "ada@example.invalid")).unwrap_err();
    assert!(matches!(dup, SqliteStoreError::DuplicateEmail));

    let mut edit = bob.clone();
    edit.email = ada.email.clone();
    assert!(matches!(
        store.update_user(&edit),
        Err(SqliteStoreError::DuplicateEmail)
    ));

    edit.email = "robert@example.invalid".into();
    edit.is_active = false;
    let updated = store.update_user(&edit).unwrap().unwrap();
    assert_eq!(updated.email, "robert@example.invalid");
    assert!(!updated.is_active);
    assert_eq!(updated.created_at, bob.created_at);

    assert!(store.delete_user(ada.id).unwrap());
    assert!(!store.delete_user(ada.id).unwrap());
    assert_eq!(store.list_users().unwrap(), vec![updated]);
}

#[test]
fn demo_seed_inserts_every_row() {
    let (_dir, store) = setup();
    let count = store.seed_demo_tasks().unwrap();
    let tasks = store.list_tasks().unwrap();

    assert_eq!(tasks.len(), count);
    assert_eq!(tasks[0].title, "Prepare Tabnine demo");
    assert!(tasks.iter().all(|task| task.due_date.is_some()));
    assert!(
        tasks
            .iter()
            .filter(|task| task.is_done())
            .all(|task| task.updated_at.is_some())
    );
}

#[test]
fn clones_share_the_same_file() {
    let (_dir, store) = setup();
    let other = store.clone();
    let task = store.add_task(&Task::new("shared")).unwrap();
    assert_eq!(other.get_task(task.id).unwrap(), Some(task));
}
