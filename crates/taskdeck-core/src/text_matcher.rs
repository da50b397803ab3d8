use crate::Task;

/// Case-insensitive substring matcher for task title and description.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Normalize a query string into a matcher. Returns `None` for blank inputs.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_lowercase(),
        })
    }

    /// Normalized needle (trimmed, lowercased).
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Determine whether the title or the description contains the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_field(&task.title)
            || task
                .description
                .as_deref()
                .is_some_and(|description| self.matches_field(description))
    }

    fn matches_field(&self, value: &str) -> bool {
        !value.is_empty() && value.to_lowercase().contains(&self.needle)
    }
}
