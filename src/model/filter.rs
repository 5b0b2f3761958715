use serde::{Deserialize, Serialize};

/// Which tasks the view keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
    /// Starred and not completed — a completed task never shows here
    Starred,
}

impl StatusFilter {
    pub fn parse(s: &str) -> Option<StatusFilter> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Some(StatusFilter::All),
            "active" => Some(StatusFilter::Active),
            "completed" | "done" => Some(StatusFilter::Completed),
            "starred" => Some(StatusFilter::Starred),
            _ => None,
        }
    }
}

/// Which field the view sorts by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Created,
    #[serde(rename = "dueDate")]
    DueDate,
    Priority,
    Alphabetical,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<SortKey> {
        match s.to_ascii_lowercase().as_str() {
            "created" => Some(SortKey::Created),
            "due" | "duedate" => Some(SortKey::DueDate),
            "priority" => Some(SortKey::Priority),
            "alpha" | "alphabetical" => Some(SortKey::Alphabetical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<SortOrder> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Filter and sort configuration for one projection call. Owned by the
/// presentation layer; the core never stores or mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Filters {
    pub status: StatusFilter,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}
