//! Task use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points over any [`TaskStore`].
//! - Apply status changes and spawn successor occurrences on request.
//!
//! # Invariants
//! - Successors are only inserted when a caller asks; nothing is automatic.
//! - Spawning twice for the same task inserts two successors.
//! - A scoped service treats other owners' tasks as missing and stamps its
//!   owner on every task it writes.

use crate::model::task::{CompletionStatus, PaymentStatus, Task};
use crate::model::{OwnerId, RecordId};
use crate::recurrence::{generate_next_task, next_occurrence_date};
use crate::repo::task_repo::{TaskListQuery, TaskStore};
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    TaskNotFound(RecordId),
    /// The task is not recurring or has no computable next date.
    NotSchedulable(RecordId),
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::NotSchedulable(id) => write!(
                f,
                "task {id} has no next occurrence (needs recurring=yes, a known interval and a YYYY-MM-DD end date)"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity: "task", id } => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Use-case service wrapper for task operations.
pub struct TaskService<S: TaskStore> {
    store: S,
    owner: Option<OwnerId>,
}

impl<S: TaskStore> TaskService<S> {
    /// Creates an unscoped service over every row.
    pub fn new(store: S) -> Self {
        Self { store, owner: None }
    }

    /// Restricts every read and write to tasks owned by `owner`
    /// (`None` = all rows).
    pub fn scoped_to(mut self, owner: Option<OwnerId>) -> Self {
        self.owner = owner;
        self
    }

    pub fn create_task(&self, task: &Task) -> RepoResult<RecordId> {
        self.store.insert_task(&self.stamped(task))
    }

    pub fn get_task(&self, id: RecordId) -> RepoResult<Option<Task>> {
        Ok(self.store.get_task(id)?.filter(|task| self.in_scope(task)))
    }

    pub fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        match self.owner {
            Some(owner) => self.store.list_tasks(&TaskListQuery {
                owner: Some(owner),
                ..query.clone()
            }),
            None => self.store.list_tasks(query),
        }
    }

    pub fn update_task(&self, task: &Task) -> TaskServiceResult<()> {
        if let Some(id) = task.id {
            self.load(id)?;
        }
        Ok(self.store.update_task(&self.stamped(task))?)
    }

    pub fn delete_task(&self, id: RecordId) -> TaskServiceResult<()> {
        self.load(id)?;
        Ok(self.store.delete_task(id)?)
    }

    /// Sets the completion status of an existing task.
    pub fn set_completion(
        &self,
        id: RecordId,
        status: CompletionStatus,
    ) -> TaskServiceResult<Task> {
        let mut task = self.load(id)?;
        task.completion_status = status;
        self.store.update_task(&task)?;
        Ok(task)
    }

    /// Sets the payment status of an existing task.
    pub fn set_payment(&self, id: RecordId, status: PaymentStatus) -> TaskServiceResult<Task> {
        let mut task = self.load(id)?;
        task.payment_status = status;
        self.store.update_task(&task)?;
        Ok(task)
    }

    /// Inserts the successor occurrence of task `id` and returns its id.
    ///
    /// # Errors
    /// - `TaskNotFound` when `id` does not exist.
    /// - `NotSchedulable` when no next occurrence date can be computed.
    pub fn spawn_next_occurrence(&self, id: RecordId) -> TaskServiceResult<RecordId> {
        let original = self.load(id)?;
        if next_occurrence_date(&original).is_none() {
            warn!(
                "event=task_spawn module=service status=error task_id={} error_code=not_schedulable",
                id
            );
            return Err(TaskServiceError::NotSchedulable(id));
        }

        let successor = generate_next_task(&original);
        let new_id = self.store.insert_task(&successor)?;
        info!(
            "event=task_spawn module=service status=ok task_id={} successor_id={} interval={}",
            id, new_id, successor.recurrence_interval
        );
        Ok(new_id)
    }

    fn load(&self, id: RecordId) -> TaskServiceResult<Task> {
        self.get_task(id)?
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    fn in_scope(&self, task: &Task) -> bool {
        self.owner.map_or(true, |owner| task.owner == Some(owner))
    }

    fn stamped(&self, task: &Task) -> Task {
        let mut task = task.clone();
        if self.owner.is_some() {
            task.owner = self.owner;
        }
        task
    }
}
