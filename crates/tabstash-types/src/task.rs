//! The remote task-list record.

use serde::{Deserialize, Serialize};

use crate::tabs::TabRef;

/// A task as the remote task-list service represents it.
///
/// `id` is assigned by the server; a task built locally carries `None` until
/// the insert round-trip completes. Absent optional fields are omitted from
/// the serialized body rather than sent as explicit nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Due instant as an RFC 3339 string, the wire format the service uses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
}

impl Task {
    /// Create a new, not-yet-filed task with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            notes: None,
            due: None,
        }
    }

    /// Set the notes body.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the due instant (RFC 3339).
    pub fn with_due(mut self, due: impl Into<String>) -> Self {
        self.due = Some(due.into());
        self
    }

    /// Build a task from a tab selection.
    ///
    /// The notes body carries one URL per line, so the resulting task is a
    /// self-contained reading list for the tabs it replaced.
    pub fn from_tabs(
        title: impl Into<String>,
        tabs: &[TabRef],
        due: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Self {
        let notes = tabs
            .iter()
            .map(|tab| tab.url.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let mut task = Self::new(title);
        if !notes.is_empty() {
            task.notes = Some(notes);
        }
        if let Some(due) = due {
            task.due = Some(due.to_rfc3339());
        }
        task
    }

    /// Whether the server has assigned this task an id.
    pub fn is_created(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_has_no_id() {
        let task = Task::new("read later");
        assert_eq!(task.title, "read later");
        assert!(task.id.is_none());
        assert!(!task.is_created());
    }

    #[test]
    fn test_builder_methods() {
        let task = Task::new("t")
            .with_notes("https://example.com")
            .with_due("2026-01-02T00:00:00+00:00");
        assert_eq!(task.notes.as_deref(), Some("https://example.com"));
        assert_eq!(task.due.as_deref(), Some("2026-01-02T00:00:00+00:00"));
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let task = Task::new("t");
        let json = serde_json::to_value(&task).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("notes"));
        assert!(!obj.contains_key("due"));
        assert_eq!(obj["title"], "t");
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let task: Task = serde_json::from_str(r#"{"id":"1","title":"A"}"#).unwrap();
        assert_eq!(task.id.as_deref(), Some("1"));
        assert_eq!(task.title, "A");
        assert!(task.notes.is_none());
        assert!(task.due.is_none());
    }

    #[test]
    fn test_from_tabs_joins_urls() {
        let tabs = vec![
            TabRef::new("Docs", "https://docs.rs"),
            TabRef::new("Crates", "https://crates.io"),
        ];
        let task = Task::from_tabs("tabs for tomorrow", &tabs, None);
        assert_eq!(
            task.notes.as_deref(),
            Some("https://docs.rs\nhttps://crates.io")
        );
        assert!(task.due.is_none());
    }

    #[test]
    fn test_from_tabs_empty_selection_has_no_notes() {
        let task = Task::from_tabs("empty", &[], None);
        assert!(task.notes.is_none());
    }
}
