use time::Date;

use crate::{Priority, TaskStatus, TitleError, validate_title};

/// Change to a nullable column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Overwrite with a value.
    Set(T),
    /// Reset to NULL.
    Clear,
}

impl<T> FieldPatch<T> {
    /// Build from an optional new value plus an explicit clear flag.
    /// A supplied value wins over `clear`.
    #[must_use]
    pub fn from_parts(value: Option<T>, clear: bool) -> Option<Self> {
        match (value, clear) {
            (Some(value), _) => Some(Self::Set(value)),
            (None, true) => Some(Self::Clear),
            (None, false) => None,
        }
    }
}

/// Split an optional patch into a "touch this column" flag and the value to
/// bind (NULL for both "untouched" and "clear").
#[must_use]
pub fn column_binding<T>(patch: Option<&FieldPatch<T>>) -> (bool, Option<&T>) {
    match patch {
        None => (false, None),
        Some(FieldPatch::Clear) => (true, None),
        Some(FieldPatch::Set(value)) => (true, Some(value)),
    }
}

/// Field-level change set for a stored task. Absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// Description change.
    pub description: Option<FieldPatch<String>>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New priority.
    pub priority: Option<Priority>,
    /// Due date change.
    pub due_date: Option<FieldPatch<Date>>,
    /// Assignee change.
    pub assignee: Option<FieldPatch<String>>,
    /// Category change.
    pub category: Option<FieldPatch<String>>,
}

impl TaskPatch {
    /// Returns true when applying the patch would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.assignee.is_none()
            && self.category.is_none()
    }

    /// Apply the title rule to a supplied title.
    ///
    /// # Errors
    /// Returns [`TitleError`] when the new title is blank or too long.
    pub fn validate(&self) -> Result<(), TitleError> {
        self.title.as_deref().map_or(Ok(()), validate_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_prefers_value_over_clear() {
        assert_eq!(FieldPatch::from_parts(Some(1), true), Some(FieldPatch::Set(1)));
        assert_eq!(FieldPatch::<i32>::from_parts(None, true), Some(FieldPatch::Clear));
        assert_eq!(FieldPatch::<i32>::from_parts(None, false), None);
    }

    #[test]
    fn column_binding_distinguishes_clear_from_untouched() {
        let clear = FieldPatch::<String>::Clear;
        let set = FieldPatch::Set("x".to_owned());
        assert_eq!(column_binding::<String>(None), (false, None));
        assert_eq!(column_binding(Some(&clear)), (true, None));
        assert_eq!(column_binding(Some(&set)), (true, Some(&"x".to_owned())));
    }

    #[test]
    fn empty_patch_is_detected_and_titles_are_checked() {
        assert!(TaskPatch::default().is_empty());

        let patch = TaskPatch {
            title: Some("  ".into()),
            ..TaskPatch::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(patch.validate(), Err(TitleError::Blank));

        let status_only = TaskPatch {
            status: Some(TaskStatus::Completed),
            ..TaskPatch::default()
        };
        assert_eq!(status_only.validate(), Ok(()));
    }
}
