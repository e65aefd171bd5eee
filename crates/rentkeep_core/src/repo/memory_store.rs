//! In-process task store.
//!
//! Interchangeable with [`SqliteTaskRepository`](super::task_repo::SqliteTaskRepository)
//! for callers that do not want a database file, and for exercising report
//! logic against rows SQLite constraints would refuse (e.g. dangling
//! property references).

use super::task_repo::{TaskListQuery, TaskStore};
use super::{RepoError, RepoResult};
use crate::model::task::Task;
use crate::model::RecordId;
use std::cell::{Cell, RefCell};
use std::cmp::Reverse;

#[derive(Debug)]
pub struct MemoryTaskStore {
    tasks: RefCell<Vec<Task>>,
    next_id: Cell<RecordId>,
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self {
            tasks: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store by inserting each task in order.
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> RepoResult<Self> {
        let store = Self::new();
        for task in tasks {
            store.insert_task(&task)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }
}

impl TaskStore for MemoryTaskStore {
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .borrow()
            .iter()
            .filter(|task| query.matches(task))
            .cloned()
            .collect();
        tasks.sort_by_key(|task| Reverse((task.start_date.clone(), task.id)));
        Ok(tasks)
    }

    fn get_task(&self, id: RecordId) -> RepoResult<Option<Task>> {
        Ok(self
            .tasks
            .borrow()
            .iter()
            .find(|task| task.id == Some(id))
            .cloned())
    }

    fn insert_task(&self, task: &Task) -> RepoResult<RecordId> {
        task.validate()?;

        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let mut stored = task.clone();
        stored.id = Some(id);
        self.tasks.borrow_mut().push(stored);
        Ok(id)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        let id = task.id.ok_or(RepoError::MissingId("task"))?;
        task.validate()?;

        let mut tasks = self.tasks.borrow_mut();
        let slot = tasks
            .iter_mut()
            .find(|stored| stored.id == Some(id))
            .ok_or(RepoError::NotFound { entity: "task", id })?;
        *slot = task.clone();
        Ok(())
    }

    fn delete_task(&self, id: RecordId) -> RepoResult<()> {
        let mut tasks = self.tasks.borrow_mut();
        let before = tasks.len();
        tasks.retain(|task| task.id != Some(id));
        if tasks.len() == before {
            return Err(RepoError::NotFound { entity: "task", id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryTaskStore;
    use crate::model::task::{PaymentStatus, Task};
    use crate::repo::task_repo::{TaskListQuery, TaskStore};
    use crate::repo::RepoError;

    #[test]
    fn insert_assigns_sequential_ids_and_ignores_input_id() {
        let store = MemoryTaskStore::new();
        let mut task = Task::new("Clean gutters");
        task.id = Some(42);

        assert_eq!(store.insert_task(&task).unwrap(), 1);
        assert_eq!(store.insert_task(&task).unwrap(), 2);
        assert!(store.get_task(42).unwrap().is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn list_orders_by_start_date_desc() {
        let mut early = Task::new("early");
        early.start_date = "2024-01-01".to_string();
        let mut late = Task::new("late");
        late.start_date = "2024-06-01".to_string();
        let store = MemoryTaskStore::with_tasks([early, late]).unwrap();

        let listed = store.list_tasks(&TaskListQuery::default()).unwrap();
        assert_eq!(listed[0].description, "late");
        assert_eq!(listed[1].description, "early");
    }

    #[test]
    fn update_and_delete_report_missing_rows() {
        let store = MemoryTaskStore::new();
        let id = store.insert_task(&Task::new("Replace filter")).unwrap();

        let mut stored = store.get_task(id).unwrap().unwrap();
        stored.payment_status = PaymentStatus::Paid;
        store.update_task(&stored).unwrap();
        assert!(store.get_task(id).unwrap().unwrap().is_paid());

        store.delete_task(id).unwrap();
        assert!(matches!(
            store.delete_task(id),
            Err(RepoError::NotFound { id: missing, .. }) if missing == id
        ));
        assert!(matches!(
            store.update_task(&Task::new("never saved")),
            Err(RepoError::MissingId("task"))
        ));
    }
}
