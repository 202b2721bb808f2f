use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::task::Task;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read tasks file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Tasks file does not hold valid task data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write tasks file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Task with ID {0} not found")]
    NotFound(u64),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Owns the in-memory task list and keeps the backing file in sync.
///
/// Ids are dense and 1-based: after any mutation the task at position `i`
/// has `id == i + 1`. Removal renumbers everything after the removed task,
/// so ids are positional references, not permanent handles.
///
/// Every mutation rewrites the whole file. When the write fails the
/// in-memory mutation stands and the next mutation retries the write; the
/// file is only guaranteed current after a mutation that returned `Ok`.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Opens the store at `path`. A missing file is a normal empty store;
    /// a file that exists but does not parse as a task list is fatal.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let tasks = if path.exists() {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str::<Vec<Task>>(&raw)?
        } else {
            Vec::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            tasks,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All tasks in id order. Empty when the store holds nothing.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add(&mut self, description: &str) -> Result<Task, PersistError> {
        let task = Task::new(self.tasks.len() as u64 + 1, description);
        self.tasks.push(task.clone());
        self.save()?;
        Ok(task)
    }

    pub fn toggle(&mut self, id: u64) -> Result<Task, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.completed = !task.completed;
        let updated = task.clone();
        self.save()?;
        Ok(updated)
    }

    pub fn update(&mut self, id: u64, description: &str) -> Result<Task, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.description = description.to_string();
        let updated = task.clone();
        self.save()?;
        Ok(updated)
    }

    pub fn remove(&mut self, id: u64) -> Result<Task, StoreError> {
        let idx = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.tasks.remove(idx);
        self.renumber();
        self.save()?;
        Ok(removed)
    }

    /// Tasks whose description contains `keyword` as a case-insensitive
    /// substring, in id order.
    pub fn search(&self, keyword: &str) -> Vec<&Task> {
        let needle = keyword.to_lowercase();
        self.tasks
            .iter()
            .filter(|task| task.description.to_lowercase().contains(&needle))
            .collect()
    }

    fn renumber(&mut self) {
        for (idx, task) in self.tasks.iter_mut().enumerate() {
            task.id = idx as u64 + 1;
        }
    }

    fn save(&self) -> Result<(), PersistError> {
        let raw = serde_json::to_string_pretty(&self.tasks)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
