use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Numeric rank used by the priority sort (higher = more urgent)
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Parse a priority name (case-insensitive)
    pub fn parse(s: &str) -> Option<Priority> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A single task. Serializes to the persisted JSON shape directly:
/// camelCase keys, RFC 3339 timestamps, optional fields omitted when absent
/// (`starred` omitted when false).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, stable for the task's lifetime
    pub id: String,
    /// Never empty or whitespace-only
    pub text: String,
    pub completed: bool,
    /// Set once at creation, never mutated
    pub created_at: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Local>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub starred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Task {
    /// Create a new task with a fresh id and creation-time defaults.
    /// The caller is responsible for trimming and rejecting blank text.
    pub fn new(text: String) -> Self {
        Task {
            id: Uuid::new_v4().to_string(),
            text,
            completed: false,
            created_at: Local::now(),
            due_date: None,
            priority: None,
            starred: false,
            notes: None,
        }
    }
}

/// A partial update to a task: only fields present in the mask are applied.
/// The outer `Option` is the mask; for fields that are themselves optional on
/// `Task`, the inner `Option` distinguishes "set" from "clear".
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<DateTime<Local>>>,
    pub priority: Option<Option<Priority>>,
    pub starred: Option<bool>,
    pub notes: Option<Option<String>>,
}

impl TaskPatch {
    pub fn new() -> Self {
        TaskPatch::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn due_date(mut self, due: Option<DateTime<Local>>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn priority(mut self, priority: Option<Priority>) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn starred(mut self, starred: bool) -> Self {
        self.starred = Some(starred);
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Merge this patch into a task, field by field. Unset mask entries
    /// leave the existing value untouched. `created_at` and `id` are not
    /// patchable.
    pub fn apply(self, task: &mut Task) {
        if let Some(text) = self.text {
            task.text = text;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(starred) = self.starred {
            task.starred = starred;
        }
        if let Some(notes) = self.notes {
            task.notes = notes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_task_defaults() {
        let before = Local::now();
        let task = Task::new("Buy milk".into());
        let after = Local::now();

        assert!(!task.id.is_empty());
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert!(!task.starred);
        assert!(task.created_at >= before && task.created_at <= after);
        assert!(task.due_date.is_none());
        assert!(task.priority.is_none());
        assert!(task.notes.is_none());
    }

    #[test]
    fn new_tasks_get_distinct_ids() {
        let a = Task::new("a".into());
        let b = Task::new("b".into());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn priority_rank_order() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn priority_parse_round_trip() {
        for p in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(Priority::parse(p.name()), Some(p));
        }
        assert_eq!(Priority::parse("HIGH"), Some(Priority::High));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn patch_applies_only_masked_fields() {
        let mut task = Task::new("A".into());
        TaskPatch::new().completed(true).apply(&mut task);

        assert_eq!(task.text, "A");
        assert!(task.completed);
        assert!(!task.starred);
    }

    #[test]
    fn patch_can_set_and_clear_optional_fields() {
        let mut task = Task::new("A".into());
        let due = Local.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();

        TaskPatch::new()
            .due_date(Some(due))
            .priority(Some(Priority::High))
            .notes(Some("context".into()))
            .apply(&mut task);
        assert_eq!(task.due_date, Some(due));
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.notes.as_deref(), Some("context"));

        TaskPatch::new()
            .due_date(None)
            .priority(None)
            .notes(None)
            .apply(&mut task);
        assert!(task.due_date.is_none());
        assert!(task.priority.is_none());
        assert!(task.notes.is_none());
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut task = Task::new("A".into());
        let original = task.clone();
        TaskPatch::new().apply(&mut task);
        assert_eq!(task, original);
    }
}
