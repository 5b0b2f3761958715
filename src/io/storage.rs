use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::task::Task;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed task data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Default location of the task file: `<data dir>/taskpad/tasks.json`,
/// falling back to the current directory when no data dir is known.
pub fn default_store_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("taskpad").join("tasks.json"),
        None => PathBuf::from("tasks.json"),
    }
}

/// Read the serialized collection. A missing file is `Ok(None)` ("no saved
/// data"); an unreadable or malformed file is an error — callers decide
/// whether that is fatal (the store treats it as no saved data too).
pub fn read_tasks(path: &Path) -> Result<Option<Vec<Task>>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| StorageError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let tasks = serde_json::from_str(&content)?;
    Ok(Some(tasks))
}

/// Write the full collection atomically: serialize to a temp file in the
/// target directory, then rename over the task file.
pub fn write_tasks(path: &Path, tasks: &[Task]) -> Result<(), StorageError> {
    let content = serde_json::to_string_pretty(tasks)?;
    atomic_write(path, content.as_bytes()).map_err(|e| StorageError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir)?;
    }
    let mut tmp = NamedTempFile::new_in(if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    })?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
