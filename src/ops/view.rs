use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Days, Local};
use serde::Serialize;

use crate::model::filter::{Filters, SortKey, SortOrder, StatusFilter};
use crate::model::task::{Priority, Task};

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Project the collection through a filter/sort configuration.
///
/// Pure over its inputs: no I/O, no mutation, safe to call on every render.
/// Ties keep the collection's native newest-first order (stable sort).
pub fn project<'a>(tasks: &'a [Task], filters: &Filters) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| keep(t, filters.status))
        .collect();
    visible.sort_by(|a, b| compare(a, b, filters.sort_by, filters.sort_order));
    visible
}

fn keep(task: &Task, status: StatusFilter) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Active => !task.completed,
        StatusFilter::Completed => task.completed,
        StatusFilter::Starred => task.starred && !task.completed,
    }
}

fn compare(a: &Task, b: &Task, key: SortKey, order: SortOrder) -> Ordering {
    match key {
        // Undated tasks sort after dated ones no matter the direction; only
        // the dated-vs-dated comparison respects asc/desc.
        SortKey::DueDate => match (a.due_date, b.due_date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => apply_order(x.cmp(&y), order),
        },
        SortKey::Created => apply_order(a.created_at.cmp(&b.created_at), order),
        SortKey::Alphabetical => {
            apply_order(a.text.to_lowercase().cmp(&b.text.to_lowercase()), order)
        }
        SortKey::Priority => {
            let rank = |t: &Task| t.priority.unwrap_or(Priority::Low).rank();
            apply_order(rank(a).cmp(&rank(b)), order)
        }
    }
}

fn apply_order(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

// ---------------------------------------------------------------------------
// Due-date labels
// ---------------------------------------------------------------------------

/// Display label for a due date, relative to `now`. Recomputed at render
/// time, never stored on the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueLabel {
    Today,
    Tomorrow,
    Overdue,
    /// Short month/day, e.g. "Sep 4"
    Date(String),
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueLabel::Today => write!(f, "Today"),
            DueLabel::Tomorrow => write!(f, "Tomorrow"),
            DueLabel::Overdue => write!(f, "Overdue"),
            DueLabel::Date(s) => write!(f, "{}", s),
        }
    }
}

/// Label a due date against the current moment.
pub fn due_label(due: DateTime<Local>) -> DueLabel {
    due_label_at(due, Local::now())
}

/// Label a due date against an explicit "now" (calendar days in local time).
pub fn due_label_at(due: DateTime<Local>, now: DateTime<Local>) -> DueLabel {
    let today = now.date_naive();
    let due_day = due.date_naive();
    if due_day == today {
        DueLabel::Today
    } else if Some(due_day) == today.checked_add_days(Days::new(1)) {
        DueLabel::Tomorrow
    } else if due < now {
        DueLabel::Overdue
    } else {
        DueLabel::Date(due.format("%b %-d").to_string())
    }
}

// ---------------------------------------------------------------------------
// Aggregate counts
// ---------------------------------------------------------------------------

/// Counts over the full, unfiltered collection
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub active: usize,
    pub completed: usize,
    /// Starred and not completed
    pub starred: usize,
    pub total: usize,
}

pub fn counts(tasks: &[Task]) -> TaskCounts {
    let mut counts = TaskCounts::default();
    for task in tasks {
        if task.completed {
            counts.completed += 1;
        } else {
            counts.active += 1;
            if task.starred {
                counts.starred += 1;
            }
        }
        counts.total += 1;
    }
    counts
}
