//! User use-cases: validation, unique email and CRUD.

use taskdeck_core::{User, UserId};
use taskdeck_store_sqlite::SqliteStoreError;
use tracing::info;

use crate::repository::Repository;
use crate::service::ServiceError;

const DUPLICATE_EMAIL: &str = "A user with this email already exists";

/// User use-cases on top of an injected repository.
#[derive(Debug)]
pub struct UserService<R> {
    repo: R,
}

impl<R> UserService<R>
where
    R: Repository<User>,
{
    /// Wrap `repo`.
    pub const fn new(repo: R) -> Self {
        Self { repo }
    }

    /// # Errors
    /// Returns [`ServiceError::Repository`] when the repository fails.
    pub async fn get_all(&self) -> Result<Vec<User>, ServiceError> {
        self.repo.list().await.map_err(ServiceError::repository)
    }

    /// Users with `is_active` set.
    ///
    /// # Errors
    /// Returns [`ServiceError::Repository`] when the repository fails.
    pub async fn get_active(&self) -> Result<Vec<User>, ServiceError> {
        let mut users = self.get_all().await?;
        users.retain(|user| user.is_active);
        Ok(users)
    }

    /// # Errors
    /// Returns [`ServiceError::Repository`] when the repository fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, ServiceError> {
        self.repo.get(id).await.map_err(ServiceError::repository)
    }

    /// Store a new user after checking that its email is present and unused.
    ///
    /// # Errors
    /// Returns [`ServiceError::Validation`] for a blank email,
    /// [`ServiceError::Conflict`] when the email is taken and
    /// [`ServiceError::Repository`] when storing fails.
    pub async fn create(&self, mut user: User) -> Result<User, ServiceError> {
        Self::validate(&user)?;
        self.ensure_email_free(&user.email, None).await?;
        user.id = UserId::UNASSIGNED;
        let created = self.repo.add(user).await.map_err(conflict_or_repository)?;
        info!(id = %created.id, "Created user");
        Ok(created)
    }

    /// Replace name, email and active flag of user `id`.
    ///
    /// # Errors
    /// Same as [`Self::create`].
    pub async fn update(&self, id: UserId, mut user: User) -> Result<Option<User>, ServiceError> {
        Self::validate(&user)?;
        self.ensure_email_free(&user.email, Some(id)).await?;
        user.id = id;
        self.repo.update(user).await.map_err(conflict_or_repository)
    }

    /// # Errors
    /// Returns [`ServiceError::Repository`] when the repository fails.
    pub async fn delete(&self, id: UserId) -> Result<bool, ServiceError> {
        self.repo.delete(id).await.map_err(ServiceError::repository)
    }

    fn validate(user: &User) -> Result<(), ServiceError> {
        if user.email.trim().is_empty() {
            return Err(ServiceError::Validation("User email is required.".into()));
        }
        if user.name.trim().is_empty() {
            return Err(ServiceError::Validation("User name is required.".into()));
        }
        Ok(())
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<UserId>) -> Result<(), ServiceError> {
        let taken = self
            .get_all()
            .await?
            .iter()
            .any(|user| user.has_email(email) && Some(user.id) != owner);
        if taken {
            return Err(ServiceError::Conflict(DUPLICATE_EMAIL.into()));
        }
        Ok(())
    }
}

/// The SQLite `UNIQUE` constraint still catches races between the check and
/// the write.
fn conflict_or_repository<E: Into<anyhow::Error>>(err: E) -> ServiceError {
    let err = err.into();
    if matches!(err.downcast_ref::<SqliteStoreError>(), Some(SqliteStoreError::DuplicateEmail)) {
        ServiceError::Conflict(DUPLICATE_EMAIL.into())
    } else {
        ServiceError::Repository(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRepository;

    fn service() -> UserService<InMemoryRepository<User>> {
        UserService::new(InMemoryRepository::new())
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() -> Result<(), ServiceError> {
        let service = service();
        service.create(User::new("Ada", "ada@example.invalid")).await?;
        let err = service.create(User::new("Other", " ADA@example.invalid ")).await;
        assert!(matches!(err, Err(ServiceError::Conflict(msg)) if msg == DUPLICATE_EMAIL));
        Ok(())
    }

    #[tokio::test]
    async fn update_may_keep_own_email_but_not_take_another() -> Result<(), ServiceError> {
        let service = service();
        let ada = service.create(User::new("Ada", "ada@example.invalid")).await?;
        let bob = service.create(User::new("Bob", "bob@example.invalid")).await?;

        let renamed = service
            .update(ada.id, User::new("Ada Lovelace", "ada@example.invalid"))
            .await?;
        assert_eq!(renamed.map(|user| user.name), Some("Ada Lovelace".to_owned()));

        let err = service.update(bob.id, User::new("Bob", "ada@example.invalid")).await;
        assert!(matches!(err, Err(ServiceError::Conflict(_))));
        assert!(service.update(UserId(99), User::new("Z", "z@example.invalid")).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn active_listing_hides_inactive_users() -> Result<(), ServiceError> {
        let service = service();
        service.create(User::new("Ada", "ada@example.invalid")).await?;
        let mut inactive = User::new("Bob", "bob@example.invalid");
        inactive.is_active = false;
        service.create(inactive).await?;

        let active = service.get_active().await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Ada");
        assert_eq!(service.get_all().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn blank_email_is_rejected() {
        let err = service().create(User::new("Ada", " ")).await;
        assert!(matches!(err, Err(ServiceError::Validation(_))));
    }
}
