use crate::error::Result;
use crate::model::task::Task;

/// Persistence contract for the task collection. `load` returns the full
/// collection (empty when nothing has been persisted yet); `save`
/// overwrites the durable copy with the full collection.
pub trait TaskRepository {
    fn load(&self) -> Result<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> Result<()>;
}

impl<R: TaskRepository> TaskRepository for &R {
    fn load(&self) -> Result<Vec<Task>> {
        R::load(*self)
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        R::save(*self, tasks)
    }
}
