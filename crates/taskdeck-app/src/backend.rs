//! Runtime choice between the in-memory and SQLite repositories.

use anyhow::{Context, Error, Result};
use taskdeck_core::{Task, User};
use taskdeck_store_sqlite::SqliteStore;
use tracing::info;

use crate::config::{BackendKind, StorageConfig};
use crate::memory::InMemoryRepository;
use crate::repository::{Entity, Repository};

/// Repository selected by configuration.
#[derive(Debug)]
pub enum Backend<E> {
    /// Process-local storage.
    Memory(InMemoryRepository<E>),
    /// SQLite file.
    Sqlite(SqliteStore),
}

/// Task and user repositories opened from one storage configuration.
#[derive(Debug)]
pub struct Backends {
    /// Task repository.
    pub tasks: Backend<Task>,
    /// User repository.
    pub users: Backend<User>,
}

impl Backends {
    /// Open the configured storage. For SQLite both repositories share one
    /// database file; for memory each gets its own collection.
    ///
    /// # Errors
    /// Returns an error if the SQLite database cannot be opened.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        match config.backend {
            BackendKind::Memory => {
                info!(seed = config.seed, "Using in-memory storage");
                let tasks = if config.seed {
                    InMemoryRepository::with_sample_tasks()
                } else {
                    InMemoryRepository::new()
                };
                Ok(Self {
                    tasks: Backend::Memory(tasks),
                    users: Backend::Memory(InMemoryRepository::new()),
                })
            }
            BackendKind::Sqlite => {
                let store = SqliteStore::open(&config.path)
                    .with_context(|| format!("failed to open database {}", config.path.display()))?;
                Ok(Self {
                    tasks: Backend::Sqlite(store.clone()),
                    users: Backend::Sqlite(store),
                })
            }
        }
    }
}

impl<E> Repository<E> for Backend<E>
where
    E: Entity,
    InMemoryRepository<E>: Repository<E>,
    SqliteStore: Repository<E>,
{
    type Error = Error;

    async fn list(&self) -> Result<Vec<E>> {
        match self {
            Self::Memory(repo) => repo.list().await.map_err(Into::into),
            Self::Sqlite(store) => store.list().await.map_err(Into::into),
        }
    }

    async fn get(&self, id: E::Id) -> Result<Option<E>> {
        match self {
            Self::Memory(repo) => repo.get(id).await.map_err(Into::into),
            Self::Sqlite(store) => store.get(id).await.map_err(Into::into),
        }
    }

    async fn add(&self, entity: E) -> Result<E> {
        match self {
            Self::Memory(repo) => repo.add(entity).await.map_err(Into::into),
            Self::Sqlite(store) => store.add(entity).await.map_err(Into::into),
        }
    }

    async fn update(&self, entity: E) -> Result<Option<E>> {
        match self {
            Self::Memory(repo) => repo.update(entity).await.map_err(Into::into),
            Self::Sqlite(store) => store.update(entity).await.map_err(Into::into),
        }
    }

    async fn delete(&self, id: E::Id) -> Result<bool> {
        match self {
            Self::Memory(repo) => repo.delete(id).await.map_err(Into::into),
            Self::Sqlite(store) => store.delete(id).await.map_err(Into::into),
        }
    }
}
