//! View filter enumeration.

use crate::model::task::Task;
use std::fmt::{Display, Formatter};

/// Token for the unfiltered view.
pub const FILTER_ALL: &str = "all";
/// Token for the incomplete-only view.
pub const FILTER_ACTIVE: &str = "active";
/// Token for the completed-only view.
pub const FILTER_COMPLETED: &str = "completed";

const SUPPORTED_FILTER_TOKENS: &[&str] = &[FILTER_ALL, FILTER_ACTIVE, FILTER_COMPLETED];

/// View selector over the task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    /// Stable token used in storage and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => FILTER_ALL,
            Self::Active => FILTER_ACTIVE,
            Self::Completed => FILTER_COMPLETED,
        }
    }

    /// Short label used by the counter line.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Parses an exact token. Case and surrounding whitespace are significant.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            FILTER_ALL => Some(Self::All),
            FILTER_ACTIVE => Some(Self::Active),
            FILTER_COMPLETED => Some(Self::Completed),
            _ => None,
        }
    }

    /// Parses a token, falling back to `All` for anything unrecognized.
    pub fn coerce(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    /// Returns whether `task` belongs to this view.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl Display for TaskFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns every accepted filter token.
pub fn supported_filter_tokens() -> &'static [&'static str] {
    SUPPORTED_FILTER_TOKENS
}

#[cfg(test)]
mod tests {
    use super::{supported_filter_tokens, TaskFilter};
    use crate::model::task::Task;

    #[test]
    fn parses_all_supported_tokens() {
        for token in supported_filter_tokens() {
            let filter = TaskFilter::parse(token).expect("supported token");
            assert_eq!(filter.as_str(), *token);
        }
    }

    #[test]
    fn coerce_falls_back_to_all() {
        assert_eq!(TaskFilter::coerce(Some("bogus")), TaskFilter::All);
        assert_eq!(TaskFilter::coerce(None), TaskFilter::All);
        assert_eq!(TaskFilter::coerce(Some("Active")), TaskFilter::All);
        assert_eq!(TaskFilter::coerce(Some(" active")), TaskFilter::All);
        assert_eq!(TaskFilter::coerce(Some("completed")), TaskFilter::Completed);
    }

    #[test]
    fn matches_selects_by_completion() {
        let mut task = Task::new("x", None).unwrap();
        assert!(TaskFilter::All.matches(&task));
        assert!(TaskFilter::Active.matches(&task));
        assert!(!TaskFilter::Completed.matches(&task));

        task.toggle();
        assert!(TaskFilter::All.matches(&task));
        assert!(!TaskFilter::Active.matches(&task));
        assert!(TaskFilter::Completed.matches(&task));
    }
}
