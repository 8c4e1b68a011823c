use crate::error::{Result, StoreError};
use crate::model::task::Task;
use crate::repository::TaskRepository;
use crate::time;

/// Listing order. Storage order is insertion order; sorting by creation
/// time is a presentation-time transform only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortOrder {
    Insertion,
    CreatedAt,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Insertion
    }
}

/// The in-memory task collection plus its persistence. The collection is
/// owned exclusively for the lifetime of the process and flushed to the
/// repository after every mutation; a failed save leaves the in-memory
/// state mutated but not durable, and the error propagates to the caller.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn load(repo: R) -> Result<Self> {
        let tasks = repo.load()?;
        Ok(Self { repo, tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn list(&self, order: SortOrder) -> Vec<Task> {
        let mut tasks = self.tasks.clone();
        sort_tasks(&mut tasks, order);
        tasks
    }

    pub fn get(&self, id: u64) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Appends a new pending task and persists. The description is
    /// trimmed; callers are expected to reject empty input, but the store
    /// guards anyway.
    pub fn add(&mut self, description: &str) -> Result<Task> {
        let desc = description.trim();
        if desc.is_empty() {
            return Err(StoreError::EmptyDescription);
        }
        let task = Task::new(next_id(&self.tasks), desc.to_string());
        self.tasks.push(task.clone());
        self.repo.save(&self.tasks)?;
        Ok(task)
    }

    /// Flips `done`. Completing stamps `completed_at`; re-opening clears
    /// it back to null, dropping the old completion time.
    pub fn toggle_done(&mut self, id: u64) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.done = !task.done;
        task.completed_at = if task.done { Some(time::now()) } else { None };
        let updated = task.clone();
        self.repo.save(&self.tasks)?;
        Ok(updated)
    }

    /// Replaces the description only; `done` and both timestamps are left
    /// alone. An edit that does not change the text skips the write.
    pub fn edit(&mut self, id: u64, new_description: &str) -> Result<Task> {
        let desc = new_description.trim();
        if desc.is_empty() {
            return Err(StoreError::EmptyDescription);
        }
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        if task.desc == desc {
            return Ok(task.clone());
        }
        task.desc = desc.to_string();
        let updated = task.clone();
        self.repo.save(&self.tasks)?;
        Ok(updated)
    }

    pub fn remove(&mut self, id: u64) -> Result<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.tasks.remove(pos);
        self.repo.save(&self.tasks)?;
        Ok(removed)
    }
}

/// Next id = max existing id + 1, recomputed from the current set, so
/// removals leave gaps instead of freeing ids for reuse.
pub fn next_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

pub fn sort_tasks(tasks: &mut [Task], order: SortOrder) {
    if order == SortOrder::CreatedAt {
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::cell::RefCell;
    use std::io;

    #[derive(Default)]
    struct MemoryRepo {
        saved: RefCell<Vec<Task>>,
        save_count: RefCell<usize>,
    }

    impl TaskRepository for MemoryRepo {
        fn load(&self) -> Result<Vec<Task>> {
            Ok(self.saved.borrow().clone())
        }

        fn save(&self, tasks: &[Task]) -> Result<()> {
            *self.saved.borrow_mut() = tasks.to_vec();
            *self.save_count.borrow_mut() += 1;
            Ok(())
        }
    }

    struct BrokenRepo;

    impl TaskRepository for BrokenRepo {
        fn load(&self) -> Result<Vec<Task>> {
            Ok(Vec::new())
        }

        fn save(&self, _tasks: &[Task]) -> Result<()> {
            Err(StoreError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    #[test]
    fn test_add_assigns_increasing_ids_from_one() {
        let repo = MemoryRepo::default();
        let mut service = TaskService::load(&repo).unwrap();

        let first = service.add("Buy milk").unwrap();
        assert_eq!(first.id, 1);
        assert!(!first.done);
        assert_eq!(first.completed_at, None);

        assert_eq!(service.add("Water plants").unwrap().id, 2);
        assert_eq!(service.add("Ship release").unwrap().id, 3);
        assert_eq!(*repo.save_count.borrow(), 3);
    }

    #[test]
    fn test_add_trims_description() {
        let repo = MemoryRepo::default();
        let mut service = TaskService::load(&repo).unwrap();
        let task = service.add("  Buy milk  ").unwrap();
        assert_eq!(task.desc, "Buy milk");
    }

    #[test]
    fn test_add_rejects_whitespace_description() {
        let repo = MemoryRepo::default();
        let mut service = TaskService::load(&repo).unwrap();
        assert!(matches!(
            service.add("   "),
            Err(StoreError::EmptyDescription)
        ));
        assert!(service.tasks().is_empty());
        assert_eq!(*repo.save_count.borrow(), 0);
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let repo = MemoryRepo::default();
        let mut service = TaskService::load(&repo).unwrap();
        for desc in ["one", "two", "three"] {
            service.add(desc).unwrap();
        }

        service.remove(2).unwrap();
        let ids: Vec<u64> = service.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert_eq!(service.add("New").unwrap().id, 4);
    }

    #[test]
    fn test_toggle_done_stamps_and_clears_completed_at() {
        let repo = MemoryRepo::default();
        let mut service = TaskService::load(&repo).unwrap();
        service.add("Buy milk").unwrap();

        let done = service.toggle_done(1).unwrap();
        assert!(done.done);
        assert!(done.completed_at.is_some());

        let undone = service.toggle_done(1).unwrap();
        assert!(!undone.done);
        assert_eq!(undone.completed_at, None);
    }

    #[test]
    fn test_toggle_done_unknown_id_is_not_found_and_writes_nothing() {
        let repo = MemoryRepo::default();
        let mut service = TaskService::load(&repo).unwrap();
        service.add("Buy milk").unwrap();
        let before = service.tasks().to_vec();
        let saves = *repo.save_count.borrow();

        assert!(matches!(
            service.toggle_done(99),
            Err(StoreError::NotFound(99))
        ));
        assert_eq!(service.tasks(), &before[..]);
        assert_eq!(*repo.save_count.borrow(), saves);
    }

    #[test]
    fn test_edit_replaces_description_only() {
        let repo = MemoryRepo::default();
        let mut service = TaskService::load(&repo).unwrap();
        service.add("Buy milk").unwrap();
        service.toggle_done(1).unwrap();
        let before = service.get(1).unwrap().clone();

        let edited = service.edit(1, "Buy oat milk").unwrap();
        assert_eq!(edited.desc, "Buy oat milk");
        assert_eq!(edited.done, before.done);
        assert_eq!(edited.created_at, before.created_at);
        assert_eq!(edited.completed_at, before.completed_at);
    }

    #[test]
    fn test_edit_empty_description_changes_nothing() {
        let repo = MemoryRepo::default();
        let mut service = TaskService::load(&repo).unwrap();
        service.add("Buy milk").unwrap();

        assert!(matches!(
            service.edit(1, "  "),
            Err(StoreError::EmptyDescription)
        ));
        assert_eq!(service.get(1).unwrap().desc, "Buy milk");
    }

    #[test]
    fn test_edit_unchanged_description_skips_the_write() {
        let repo = MemoryRepo::default();
        let mut service = TaskService::load(&repo).unwrap();
        service.add("Buy milk").unwrap();
        let saves = *repo.save_count.borrow();

        service.edit(1, "Buy milk").unwrap();
        assert_eq!(*repo.save_count.borrow(), saves);
    }

    #[test]
    fn test_remove_unknown_id_is_not_found_and_store_unchanged() {
        let repo = MemoryRepo::default();
        let mut service = TaskService::load(&repo).unwrap();
        service.add("Buy milk").unwrap();
        let before = service.tasks().to_vec();

        assert!(matches!(service.remove(99), Err(StoreError::NotFound(99))));
        assert_eq!(service.tasks(), &before[..]);
    }

    #[test]
    fn test_load_picks_up_previously_saved_tasks() {
        let repo = MemoryRepo::default();
        let mut service = TaskService::load(&repo).unwrap();
        service.add("Buy milk").unwrap();
        service.toggle_done(1).unwrap();
        let expected = service.tasks().to_vec();

        let reopened = TaskService::load(&repo).unwrap();
        assert_eq!(reopened.tasks(), &expected[..]);
    }

    #[test]
    fn test_failed_save_propagates_but_memory_stays_valid() {
        let mut service = TaskService::load(BrokenRepo).unwrap();

        assert!(matches!(service.add("Buy milk"), Err(StoreError::Io(_))));
        // The change is in memory even though it is not durable.
        assert_eq!(service.tasks().len(), 1);
        assert_eq!(service.tasks()[0].desc, "Buy milk");
    }

    #[test]
    fn test_list_sorted_by_created_at() {
        let repo = MemoryRepo::default();
        {
            let mut service = TaskService::load(&repo).unwrap();
            service.add("first").unwrap();
            service.add("second").unwrap();
        }
        // Force reverse creation order in storage.
        repo.saved.borrow_mut()[0].created_at = time::now() + Duration::hours(1);

        let service = TaskService::load(&repo).unwrap();

        let by_insertion: Vec<u64> = service
            .list(SortOrder::Insertion)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(by_insertion, vec![1, 2]);

        let by_creation: Vec<u64> = service
            .list(SortOrder::CreatedAt)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(by_creation, vec![2, 1]);

        // list() is a pure read; storage order is untouched.
        assert_eq!(
            service.tasks().iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_next_id_on_empty_store() {
        assert_eq!(next_id(&[]), 1);
    }
}
