//! Storage contract shared by every backend.

use anyhow::Error;
use std::fmt;
use std::future::Future;
use taskdeck_core::{Task, TaskId, User, UserId};
use time::OffsetDateTime;

/// A record a [`Repository`] can hold.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identifier type; built from the store's integer counter.
    type Id: Copy + Eq + fmt::Display + From<i64> + Send + Sync + 'static;

    /// Current identifier.
    fn id(&self) -> Self::Id;

    /// Replace the identifier.
    fn set_id(&mut self, id: Self::Id);

    /// Copy the mutable fields of `incoming` into `self` and stamp whatever
    /// modification metadata the entity tracks.
    fn apply_update(&mut self, incoming: &Self);
}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> TaskId {
        self.id
    }

    fn set_id(&mut self, id: TaskId) {
        self.id = id;
    }

    fn apply_update(&mut self, incoming: &Self) {
        self.overlay_from(incoming);
        self.updated_at = Some(OffsetDateTime::now_utc());
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }

    fn set_id(&mut self, id: UserId) {
        self.id = id;
    }

    fn apply_update(&mut self, incoming: &Self) {
        self.overlay_from(incoming);
    }
}

/// CRUD over one entity type.
///
/// Every entity handed out is an owned copy; mutating it has no effect on
/// stored state until [`Repository::update`] succeeds.
pub trait Repository<E: Entity>: Send + Sync {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error> + Send;

    /// Every entity in id order.
    ///
    /// # Errors
    /// Returns a store-specific error when reading fails.
    fn list(&self) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send;

    /// Entity with `id`; absence is `Ok(None)`.
    ///
    /// # Errors
    /// Returns a store-specific error when reading fails.
    fn get(&self, id: E::Id) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send;

    /// Store `entity` under a freshly assigned id and return the stored copy.
    /// Any id already on `entity` is ignored.
    ///
    /// # Errors
    /// Returns a store-specific error when writing fails.
    fn add(&self, entity: E) -> impl Future<Output = Result<E, Self::Error>> + Send;

    /// Overwrite the mutable fields of the stored entity with the same id.
    /// Returns `Ok(None)` and changes nothing when no such entity exists.
    ///
    /// # Errors
    /// Returns a store-specific error when writing fails.
    fn update(&self, entity: E) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send;

    /// Remove the entity with `id`; returns whether anything was removed.
    ///
    /// # Errors
    /// Returns a store-specific error when writing fails.
    fn delete(&self, id: E::Id) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}

impl<E, R> Repository<E> for &R
where
    E: Entity,
    R: Repository<E>,
{
    type Error = R::Error;

    fn list(&self) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send {
        (**self).list()
    }

    fn get(&self, id: E::Id) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send {
        (**self).get(id)
    }

    fn add(&self, entity: E) -> impl Future<Output = Result<E, Self::Error>> + Send {
        (**self).add(entity)
    }

    fn update(&self, entity: E) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send {
        (**self).update(entity)
    }

    fn delete(&self, id: E::Id) -> impl Future<Output = Result<bool, Self::Error>> + Send {
        (**self).delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn task_update_keeps_identity_and_stamps_time() {
        let created = datetime!(2024-01-01 0:00 UTC);
        let mut stored = Task {
            id: TaskId(4),
            created_at: created,
            ..Task::new("before")
        };
        let incoming = Task {
            id: TaskId(8),
            ..Task::new("after")
        };

        stored.apply_update(&incoming);

        assert_eq!(stored.id(), TaskId(4));
        assert_eq!(stored.title, "after");
        assert_eq!(stored.created_at, created);
        assert!(stored.updated_at.is_some());
    }

    #[test]
    fn user_update_copies_editable_fields() {
        let mut stored = User::new("Ada", "ada@example.invalid");
        stored.set_id(UserId(1));
        let mut incoming = User::new("Ada L.", "lovelace@example.invalid");
        incoming.is_active = false;

        stored.apply_update(&incoming);

        assert_eq!(stored.id(), UserId(1));
        assert_eq!(stored.email, "lovelace@example.invalid");
        assert!(!stored.is_active);
    }
}
