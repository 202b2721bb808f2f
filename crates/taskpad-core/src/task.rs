use serde::{Deserialize, Serialize};

/// One to-do item. Ids are positional: the store keeps them dense and
/// 1-based, so an id held across a removal may point at a different task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub id: u64,
    pub description: String,
    pub completed: bool,
}

impl Task {
    pub fn new(id: u64, description: &str) -> Self {
        Self {
            id,
            description: description.to_string(),
            completed: false,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Pending"
        }
    }
}

pub fn render_task_line(task: &Task) -> String {
    format!("{}. {} [{}]", task.id, task.description, task.status_label())
}
