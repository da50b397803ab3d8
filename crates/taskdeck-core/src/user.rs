use crate::id::UserId;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A person who can be assigned work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier; `0` until the user has been added.
    #[serde(default)]
    pub id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contact address, unique per store.
    #[serde(default)]
    pub email: String,
    /// Inactive users are kept but hidden from the active listing.
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    /// Creation instant.
    #[serde(default = "OffsetDateTime::now_utc", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const fn active_by_default() -> bool {
    true
}

impl User {
    /// Unsaved active user created now.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::UNASSIGNED,
            name: name.into(),
            email: email.into(),
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Copy the editable fields from `incoming`.
    pub fn overlay_from(&mut self, incoming: &Self) {
        self.name.clone_from(&incoming.name);
        self.email.clone_from(&incoming.email);
        self.is_active = incoming.is_active;
    }

    /// Case-insensitive email comparison.
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_is_active_defaults_to_true() {
        let user: User = serde_json::from_str(r#"{"name":"Ada","email":"ada@example.invalid"}"#)
            .unwrap_or_else(|err| panic!("deserialize: {err}"));
        assert!(user.is_active);
        assert_eq!(user.id, UserId::UNASSIGNED);
    }

    #[test]
    fn email_comparison_ignores_case_and_padding() {
        let user = User::new("Ada", "Ada@Example.invalid");
        assert!(user.has_email(" ada@example.INVALID "));
        assert!(!user.has_email("bob@example.invalid"));
    }
}
