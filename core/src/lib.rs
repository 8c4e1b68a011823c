pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use error::{Result, StoreError};
pub use model::task::Task;
pub use repository::{FileTaskRepository, TaskRepository};
pub use service::task_service::{next_id, sort_tasks, SortOrder, TaskService};
