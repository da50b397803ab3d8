//! Async adapter running `SqliteStore` calls on the blocking pool.

use taskdeck_core::{Task, TaskId, User, UserId};
use taskdeck_store_sqlite::{SqliteStore, SqliteStoreError};

use crate::repository::Repository;

/// Run `op` against a clone of `store` without blocking the async runtime.
async fn blocking<T, F>(store: &SqliteStore, op: F) -> Result<T, SqliteStoreError>
where
    T: Send + 'static,
    F: FnOnce(&SqliteStore) -> Result<T, SqliteStoreError> + Send + 'static,
{
    let store = store.clone();
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| SqliteStoreError::Other(format!("Task join error: {e}")))?
}

impl Repository<Task> for SqliteStore {
    type Error = SqliteStoreError;

    async fn list(&self) -> Result<Vec<Task>, Self::Error> {
        blocking(self, SqliteStore::list_tasks).await
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>, Self::Error> {
        blocking(self, move |store| store.get_task(id)).await
    }

    async fn add(&self, entity: Task) -> Result<Task, Self::Error> {
        blocking(self, move |store| store.add_task(&entity)).await
    }

    async fn update(&self, entity: Task) -> Result<Option<Task>, Self::Error> {
        blocking(self, move |store| store.update_task(&entity)).await
    }

    async fn delete(&self, id: TaskId) -> Result<bool, Self::Error> {
        blocking(self, move |store| store.delete_task(id)).await
    }
}

impl Repository<User> for SqliteStore {
    type Error = SqliteStoreError;

    async fn list(&self) -> Result<Vec<User>, Self::Error> {
        blocking(self, SqliteStore::list_users).await
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, Self::Error> {
        blocking(self, move |store| store.get_user(id)).await
    }

    async fn add(&self, entity: User) -> Result<User, Self::Error> {
        blocking(self, move |store| store.add_user(&entity)).await
    }

    async fn update(&self, entity: User) -> Result<Option<User>, Self::Error> {
        blocking(self, move |store| store.update_user(&entity)).await
    }

    async fn delete(&self, id: UserId) -> Result<bool, Self::Error> {
        blocking(self, move |store| store.delete_user(id)).await
    }
}
