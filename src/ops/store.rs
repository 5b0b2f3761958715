use std::path::PathBuf;

use tracing::{debug, warn};

use crate::io::storage;
use crate::model::task::{Task, TaskPatch};

/// Sole owner and mutator of the task collection.
///
/// The in-memory list is authoritative for the session; every mutation is
/// followed by one full-collection write to the task file. Storage failures
/// are logged and swallowed — the store keeps working in memory, and the
/// next successful mutation re-writes the full state anyway.
///
/// Native order is newest-first: `create` prepends. Display order is the
/// projector's job (`ops::view`), not the store's.
pub struct TaskStore {
    tasks: Vec<Task>,
    path: PathBuf,
    loading: bool,
}

impl TaskStore {
    /// Create a store bound to a task file, with an empty collection and
    /// hydration still pending (`is_loading` is true until `hydrate`).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TaskStore {
            tasks: Vec::new(),
            path: path.into(),
            loading: true,
        }
    }

    /// Create and hydrate in one step.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = TaskStore::new(path);
        store.hydrate();
        store
    }

    /// Load the saved collection, if any. Missing, unreadable, or malformed
    /// data all fall back to an empty collection — never fatal.
    pub fn hydrate(&mut self) {
        match storage::read_tasks(&self.path) {
            Ok(Some(tasks)) => {
                debug!(count = tasks.len(), path = %self.path.display(), "hydrated task file");
                self.tasks = tasks;
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "no task file, starting empty");
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not load tasks, starting empty");
            }
        }
        self.loading = false;
    }

    /// True until hydration has completed
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The collection in native (newest-first) order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Add a new task from user text. Blank input (empty after trimming) is
    /// rejected and the collection is unchanged. Returns the created task.
    pub fn create(&mut self, text: &str) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.tasks.insert(0, Task::new(text.to_string()));
        self.persist();
        Some(&self.tasks[0])
    }

    /// Apply a partial update to the task with the given id. Unknown ids are
    /// a no-op. A blank replacement text is dropped from the patch (the rest
    /// still applies) — text is never stored empty.
    pub fn update(&mut self, id: &str, mut patch: TaskPatch) {
        if let Some(text) = patch.text.take() {
            let text = text.trim();
            if !text.is_empty() {
                patch.text = Some(text.to_string());
            }
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return;
        };
        patch.apply(task);
        self.persist();
    }

    /// Remove the task with the given id, if present.
    pub fn delete(&mut self, id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.persist();
        }
    }

    /// Remove every completed task.
    pub fn clear_completed(&mut self) {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        if self.tasks.len() != before {
            self.persist();
        }
    }

    fn persist(&self) {
        if let Err(e) = storage::write_tasks(&self.path, &self.tasks) {
            warn!(path = %self.path.display(), error = %e, "could not save tasks, keeping in-memory state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::read_tasks;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> TaskStore {
        TaskStore::open(dir.path().join("tasks.json"))
    }

    #[test]
    fn open_without_file_starts_empty_and_loaded() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(!store.is_loading());
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn loading_flag_clears_on_hydrate() {
        let dir = TempDir::new().unwrap();
        let mut store = TaskStore::new(dir.path().join("tasks.json"));
        assert!(store.is_loading());
        store.hydrate();
        assert!(!store.is_loading());
    }

    #[test]
    fn create_rejects_blank_input() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(store.create("").is_none());
        assert!(store.create("   ").is_none());
        assert!(store.tasks().is_empty());
        // Nothing was persisted either
        assert!(!dir.path().join("tasks.json").exists());
    }

    #[test]
    fn create_trims_and_prepends() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.create("  first  ").unwrap();
        store.create("second").unwrap();

        let texts: Vec<_> = store.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[test]
    fn create_defaults() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let task = store.create("Buy milk").unwrap();
        assert!(!task.completed);
        assert!(!task.starred);
        assert!(task.due_date.is_none());
        assert!(task.priority.is_none());
        assert!(task.notes.is_none());
    }

    #[test]
    fn update_is_a_partial_merge() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let id = store.create("A").unwrap().id.clone();

        store.update(&id, TaskPatch::new().completed(true));

        let task = store.get(&id).unwrap();
        assert_eq!(task.text, "A");
        assert!(task.completed);
        assert!(!task.starred);
    }

    #[test]
    fn update_unknown_id_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.create("A").unwrap();
        store.update("no-such-id", TaskPatch::new().completed(true));
        assert!(!store.tasks()[0].completed);
    }

    #[test]
    fn update_drops_blank_text_but_applies_the_rest() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let id = store.create("Keep me").unwrap().id.clone();

        store.update(&id, TaskPatch::new().text("   ").starred(true));

        let task = store.get(&id).unwrap();
        assert_eq!(task.text, "Keep me");
        assert!(task.starred);
    }

    #[test]
    fn delete_removes_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let id = store.create("A").unwrap().id.clone();

        store.delete(&id);
        assert!(store.tasks().is_empty());
        store.delete(&id);
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn clear_completed_twice_equals_once() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let done = store.create("done").unwrap().id.clone();
        store.create("open").unwrap();
        store.update(&done, TaskPatch::new().completed(true));

        store.clear_completed();
        let after_once: Vec<_> = store.tasks().to_vec();
        store.clear_completed();

        assert_eq!(store.tasks(), &after_once[..]);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].text, "open");
    }

    #[test]
    fn mutations_persist_to_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::open(&path);
        let id = store.create("survive me").unwrap().id.clone();
        store.update(&id, TaskPatch::new().starred(true));

        let reopened = TaskStore::open(&path);
        assert_eq!(reopened.tasks(), store.tasks());
        assert!(reopened.get(&id).unwrap().starred);
    }

    #[test]
    fn malformed_file_hydrates_empty_and_store_stays_usable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "not json {{{").unwrap();

        let mut store = TaskStore::open(&path);
        assert!(store.tasks().is_empty());

        store.create("fresh start").unwrap();
        assert_eq!(read_tasks(&path).unwrap().unwrap().len(), 1);
    }

    #[test]
    fn write_failure_keeps_in_memory_state() {
        // Point the store at a path whose parent is a regular file, so
        // every persist fails
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let mut store = TaskStore::open(blocker.join("tasks.json"));
        store.create("still here").unwrap();
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].text, "still here");
    }
}
