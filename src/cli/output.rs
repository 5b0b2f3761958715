use serde::Serialize;

use crate::model::task::Task;
use crate::ops::view::{DueLabel, TaskCounts, due_label};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskViewJson<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    /// Render-time label, never part of the persisted shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_label: Option<String>,
}

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub tasks: Vec<TaskViewJson<'a>>,
    pub counts: TaskCounts,
}

pub fn task_to_json(task: &Task) -> TaskViewJson<'_> {
    TaskViewJson {
        task,
        due_label: task.due_date.map(|d| due_label(d).to_string()),
    }
}

// ---------------------------------------------------------------------------
// Plain listing
// ---------------------------------------------------------------------------

/// One listing line: `[x] * 1a2b3c4d  text  (Today) [high]`
pub fn format_task_line(task: &Task) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    let star = if task.starred { '*' } else { ' ' };
    let mut line = format!("[{}] {} {}  {}", check, star, short_id(&task.id), task.text);
    if let Some(due) = task.due_date {
        let label = due_label(due);
        match label {
            DueLabel::Overdue => line.push_str(&format!("  ({}!)", label)),
            _ => line.push_str(&format!("  ({})", label)),
        }
    }
    if let Some(priority) = task.priority {
        line.push_str(&format!("  [{}]", priority.name()));
    }
    line
}

/// Leading id segment shown in listings; enough to address a task by prefix
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}
