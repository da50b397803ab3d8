use rusqlite::{OptionalExtension, params};
use taskdeck_core::{User, UserId};
use tracing::info;

use crate::rows::{format_timestamp, select_users, user_from_row};
use crate::{Result, SqliteStore, SqliteStoreError};

impl SqliteStore {
    /// All users in id order.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(select_users!("ORDER BY id"))?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    /// User with `id`, if present.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let conn = self.connect()?;
        let user = conn
            .query_row(select_users!("WHERE id = ?1"), params![id.get()], user_from_row)
            .optional()?;
        Ok(user)
    }

    /// Insert `user` under a fresh id.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError::DuplicateEmail`] when the email is taken,
    /// or another error if the insert fails.
    pub fn add_user(&self, user: &User) -> Result<User> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO users (name, email, is_active, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![user.name, user.email, user.is_active, format_timestamp(user.created_at)?],
        )
        .map_err(unique_email)?;
        let id = conn.last_insert_rowid();
        info!(id, "Inserted user");
        let stored = conn.query_row(select_users!("WHERE id = ?1"), params![id], user_from_row)?;
        Ok(stored)
    }

    /// Overwrite name, email and active flag of the row with `user.id`.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError::DuplicateEmail`] when the new email belongs
    /// to another user, or another error if the update fails.
    pub fn update_user(&self, user: &User) -> Result<Option<User>> {
        let changed = self
            .connect()?
            .execute(
                "UPDATE users SET name = ?1, email = ?2, is_active = ?3 WHERE id = ?4",
                params![user.name, user.email, user.is_active, user.id.get()],
            )
            .map_err(unique_email)?;
        if changed == 0 {
            return Ok(None);
        }
        self.get_user(user.id)
    }

    /// Remove the row with `id`. Returns whether a row was deleted.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn delete_user(&self, id: UserId) -> Result<bool> {
        let changed = self
            .connect()?
            .execute("DELETE FROM users WHERE id = ?1", params![id.get()])?;
        Ok(changed > 0)
    }
}

fn unique_email(err: rusqlite::Error) -> SqliteStoreError {
    let err = SqliteStoreError::from(err);
    if err.is_unique_violation() {
        SqliteStoreError::DuplicateEmail
    } else {
        err
    }
}
