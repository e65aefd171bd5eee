//! Task store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and filtered listing over the `tasks` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Task::validate()` before SQL mutations.
//! - Read paths reject unknown status spellings instead of masking them;
//!   NULL statuses read back as their column defaults.
//! - `cost` NULL is read back as `0.0` and NULL text columns as empty.
//! - Listing order is `start_date DESC, id DESC`.

use super::{owner_to_db, parse_owner, text_or, RepoError, RepoResult};
use crate::model::task::{parse_recurring, recurring_to_db, CompletionStatus, PaymentStatus, Task};
use crate::model::{OwnerId, RecordId};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    owner,
    property_id,
    contact_id,
    description,
    start_date,
    end_date,
    cost,
    payment_status,
    completion_status,
    recurring,
    recurrence_interval,
    notes
FROM tasks";

/// Filter options for listing tasks. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskListQuery {
    /// Tenant scope; `None` lists every owner's rows.
    pub owner: Option<OwnerId>,
    pub property_id: Option<RecordId>,
    pub payment_status: Option<PaymentStatus>,
    pub completion_status: Option<CompletionStatus>,
    pub recurring: Option<bool>,
}

impl TaskListQuery {
    /// Query scoped to one owner, or unscoped when `owner` is `None`.
    pub fn for_owner(owner: Option<OwnerId>) -> Self {
        Self {
            owner,
            ..Self::default()
        }
    }

    /// Returns whether `task` passes every set filter.
    pub fn matches(&self, task: &Task) -> bool {
        self.owner.map_or(true, |owner| task.owner == Some(owner))
            && self
                .property_id
                .map_or(true, |id| task.property_id == Some(id))
            && self
                .payment_status
                .map_or(true, |status| task.payment_status == status)
            && self
                .completion_status
                .map_or(true, |status| task.completion_status == status)
            && self.recurring.map_or(true, |flag| task.recurring == flag)
    }
}

/// Storage contract consumed by reports and services.
pub trait TaskStore {
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>>;
    fn get_task(&self, id: RecordId) -> RepoResult<Option<Task>>;
    /// Inserts `task` and returns the assigned id; `task.id` is ignored.
    fn insert_task(&self, task: &Task) -> RepoResult<RecordId>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn delete_task(&self, id: RecordId) -> RepoResult<()>;
}

impl<S: TaskStore + ?Sized> TaskStore for &S {
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        (**self).list_tasks(query)
    }

    fn get_task(&self, id: RecordId) -> RepoResult<Option<Task>> {
        (**self).get_task(id)
    }

    fn insert_task(&self, task: &Task) -> RepoResult<RecordId> {
        (**self).insert_task(task)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        (**self).update_task(task)
    }

    fn delete_task(&self, id: RecordId) -> RepoResult<()> {
        (**self).delete_task(id)
    }
}

/// SQLite-backed task store.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskStore for SqliteTaskRepository<'_> {
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(owner) = query.owner {
            sql.push_str(" AND owner = ?");
            bind_values.push(Value::Text(owner.to_string()));
        }
        if let Some(property_id) = query.property_id {
            sql.push_str(" AND property_id = ?");
            bind_values.push(Value::Integer(property_id));
        }
        if let Some(status) = query.payment_status {
            sql.push_str(" AND payment_status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(status) = query.completion_status {
            sql.push_str(" AND completion_status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(recurring) = query.recurring {
            sql.push_str(" AND recurring = ?");
            bind_values.push(Value::Text(recurring_to_db(recurring).to_string()));
        }

        sql.push_str(" ORDER BY start_date DESC, id DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        debug!(
            "event=task_list module=repo status=ok count={}",
            tasks.len()
        );
        Ok(tasks)
    }

    fn get_task(&self, id: RecordId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn insert_task(&self, task: &Task) -> RepoResult<RecordId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                owner,
                property_id,
                contact_id,
                description,
                start_date,
                end_date,
                cost,
                payment_status,
                completion_status,
                recurring,
                recurrence_interval,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                owner_to_db(task.owner),
                task.property_id,
                task.contact_id,
                task.description.as_str(),
                task.start_date.as_str(),
                task.end_date.as_str(),
                task.cost,
                task.payment_status.as_str(),
                task.completion_status.as_str(),
                recurring_to_db(task.recurring),
                task.recurrence_interval.as_str(),
                task.notes.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        let id = task.id.ok_or(RepoError::MissingId("task"))?;
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                owner = ?1,
                property_id = ?2,
                contact_id = ?3,
                description = ?4,
                start_date = ?5,
                end_date = ?6,
                cost = ?7,
                payment_status = ?8,
                completion_status = ?9,
                recurring = ?10,
                recurrence_interval = ?11,
                notes = ?12
             WHERE id = ?13;",
            params![
                owner_to_db(task.owner),
                task.property_id,
                task.contact_id,
                task.description.as_str(),
                task.start_date.as_str(),
                task.end_date.as_str(),
                task.cost,
                task.payment_status.as_str(),
                task.completion_status.as_str(),
                recurring_to_db(task.recurring),
                task.recurrence_interval.as_str(),
                task.notes.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "task", id });
        }

        Ok(())
    }

    fn delete_task(&self, id: RecordId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "task", id });
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let payment_text = text_or(row, "payment_status", PaymentStatus::default().as_str())?;
    let payment_status = PaymentStatus::parse(&payment_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid payment status `{payment_text}` in tasks.payment_status"
        ))
    })?;

    let completion_text =
        text_or(row, "completion_status", CompletionStatus::default().as_str())?;
    let completion_status = CompletionStatus::parse(&completion_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid completion status `{completion_text}` in tasks.completion_status"
        ))
    })?;

    let recurring_text = text_or(row, "recurring", recurring_to_db(false))?;
    let recurring = parse_recurring(&recurring_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid recurring flag `{recurring_text}` in tasks.recurring"
        ))
    })?;

    Ok(Task {
        id: Some(row.get("id")?),
        owner: parse_owner(row.get("owner")?, "tasks.owner")?,
        property_id: row.get("property_id")?,
        contact_id: row.get("contact_id")?,
        description: row.get("description")?,
        start_date: text_or(row, "start_date", "")?,
        end_date: text_or(row, "end_date", "")?,
        cost: row.get::<_, Option<f64>>("cost")?.unwrap_or(0.0),
        payment_status,
        completion_status,
        recurring,
        recurrence_interval: text_or(row, "recurrence_interval", "")?,
        notes: text_or(row, "notes", "")?,
    })
}
