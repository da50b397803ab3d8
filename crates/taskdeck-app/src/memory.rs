//! Process-local repository.

use std::convert::Infallible;
use taskdeck_core::{Task, TaskStatus};
use tokio::sync::Mutex;
use tracing::debug;

use crate::repository::{Entity, Repository};

/// Entities plus the id counter; guarded together so assignment and insertion
/// are one step.
#[derive(Debug)]
struct State<E> {
    items: Vec<E>,
    next_id: i64,
}

/// Repository backed by a `Vec` behind one async mutex.
///
/// Ids start at 1 and are never reused, even after deletion. All data is lost
/// when the value is dropped.
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    state: Mutex<State<E>>,
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryRepository<E> {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl<E: Entity> InMemoryRepository<E> {
    /// Repository pre-populated through the regular add path, so the seed
    /// receives ids `1..=n` in order.
    #[must_use]
    pub fn with_seed(items: impl IntoIterator<Item = E>) -> Self {
        let mut state = State {
            items: Vec::new(),
            next_id: 1,
        };
        for item in items {
            state.insert(item);
        }
        Self {
            state: Mutex::new(state),
        }
    }
}

impl<E: Entity> State<E> {
    fn insert(&mut self, mut entity: E) -> E {
        entity.set_id(E::Id::from(self.next_id));
        self.next_id += 1;
        self.items.push(entity.clone());
        entity
    }
}

impl InMemoryRepository<Task> {
    /// The three example tasks shown on a fresh in-memory server.
    #[must_use]
    pub fn with_sample_tasks() -> Self {
        Self::with_seed([
            Task::new("Prepare Tabnine demo")
                .with_description("Create small C# API to showcase Tabnine capabilities."),
            Task::new("Review pull requests").with_description("Look at today's PRs in the main repo."),
            Task::new("Refactor old code")
                .with_description("Cleanup obsolete services.")
                .with_status(TaskStatus::Completed),
        ])
    }
}

impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    type Error = Infallible;

    async fn list(&self) -> Result<Vec<E>, Self::Error> {
        Ok(self.state.lock().await.items.clone())
    }

    async fn get(&self, id: E::Id) -> Result<Option<E>, Self::Error> {
        let state = self.state.lock().await;
        Ok(state.items.iter().find(|item| item.id() == id).cloned())
    }

    async fn add(&self, entity: E) -> Result<E, Self::Error> {
        let stored = self.state.lock().await.insert(entity);
        debug!(id = %stored.id(), "Added entity in memory");
        Ok(stored)
    }

    async fn update(&self, entity: E) -> Result<Option<E>, Self::Error> {
        let mut state = self.state.lock().await;
        let Some(stored) = state.items.iter_mut().find(|item| item.id() == entity.id()) else {
            return Ok(None);
        };
        stored.apply_update(&entity);
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: E::Id) -> Result<bool, Self::Error> {
        let mut state = self.state.lock().await;
        let before = state.items.len();
        state.items.retain(|item| item.id() != id);
        Ok(state.items.len() != before)
    }
}
