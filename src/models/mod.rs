mod project;
mod task;
mod document;

pub use project::{NewProject, Project, ProjectUpdate, DEFAULT_PROJECT_STATUS, PROJECT_STATUSES};
pub use task::{NewTask, ProjectTask, DEFAULT_PRIORITY, DEFAULT_TASK_STATUS, PRIORITIES, TASK_STATUSES};
pub use document::{Document, NewDocument};
