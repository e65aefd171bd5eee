use rentkeep_core::db::open_db_in_memory;
use rentkeep_core::{
    CompletionStatus, PaymentStatus, Property, PropertyRepository, RecurrenceInterval, RepoError,
    SqlitePropertyRepository, SqliteTaskRepository, Task, TaskListQuery, TaskStore,
};
use uuid::Uuid;

fn task(description: &str, start: &str, cost: f64) -> Task {
    let mut task = Task::new(description);
    task.start_date = start.to_string();
    task.cost = cost;
    task
}

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut original = task("Monthly pool maintenance", "2024-03-01", 300.0)
        .recurring_every(RecurrenceInterval::Monthly);
    original.end_date = "2024-03-31".to_string();
    original.notes = "chlorine + filter".to_string();
    let id = repo.insert_task(&original).unwrap();

    let loaded = repo.get_task(id).unwrap().unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.description, "Monthly pool maintenance");
    assert_eq!(loaded.cost, 300.0);
    assert!(loaded.recurring);
    assert_eq!(loaded.interval(), Some(RecurrenceInterval::Monthly));
    assert_eq!(loaded.payment_status, PaymentStatus::Unpaid);
    assert_eq!(loaded.completion_status, CompletionStatus::Incomplete);
    assert_eq!(loaded.notes, "chlorine + filter");
}

#[test]
fn get_missing_task_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    assert!(repo.get_task(12345).unwrap().is_none());
}

#[test]
fn update_existing_task() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let id = repo.insert_task(&task("Lawn mowing", "2024-04-01", 100.0)).unwrap();
    let mut stored = repo.get_task(id).unwrap().unwrap();
    stored.payment_status = PaymentStatus::Paid;
    stored.completion_status = CompletionStatus::Complete;
    stored.end_date = "2024-04-02".to_string();
    repo.update_task(&stored).unwrap();

    let loaded = repo.get_task(id).unwrap().unwrap();
    assert!(loaded.is_paid());
    assert!(loaded.is_complete());
    assert_eq!(loaded.end_date, "2024-04-02");
}

#[test]
fn update_and_delete_missing_rows_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut ghost = Task::new("ghost");
    ghost.id = Some(77);
    assert!(matches!(
        repo.update_task(&ghost).unwrap_err(),
        RepoError::NotFound { entity: "task", id: 77 }
    ));
    assert!(matches!(
        repo.delete_task(77).unwrap_err(),
        RepoError::NotFound { entity: "task", id: 77 }
    ));
    assert!(matches!(
        repo.update_task(&Task::new("unsaved")).unwrap_err(),
        RepoError::MissingId("task")
    ));
}

#[test]
fn delete_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let id = repo.insert_task(&Task::new("Replace smoke detector")).unwrap();
    repo.delete_task(id).unwrap();
    assert!(repo.get_task(id).unwrap().is_none());
}

#[test]
fn validation_failure_blocks_insert_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut negative = Task::new("Refund?");
    negative.cost = -20.0;
    assert!(matches!(
        repo.insert_task(&negative).unwrap_err(),
        RepoError::Validation(_)
    ));

    let id = repo.insert_task(&Task::new("Valid")).unwrap();
    let mut stored = repo.get_task(id).unwrap().unwrap();
    stored.description = "  ".to_string();
    assert!(matches!(
        repo.update_task(&stored).unwrap_err(),
        RepoError::Validation(_)
    ));
}

#[test]
fn null_cost_reads_back_as_zero() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (description, cost) VALUES ('No quote yet', NULL);",
        [],
    )
    .unwrap();

    let repo = SqliteTaskRepository::new(&conn);
    let tasks = repo.list_tasks(&TaskListQuery::default()).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].cost, 0.0);
}

#[test]
fn stored_rows_failing_write_validation_still_list() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO tasks (description, cost, payment_status) VALUES ('   ', 40.0, 'paid');
         INSERT INTO tasks (description, cost) VALUES ('Refund', -15.0);",
    )
    .unwrap();

    let repo = SqliteTaskRepository::new(&conn);
    let tasks = repo.list_tasks(&TaskListQuery::default()).unwrap();
    assert_eq!(tasks.len(), 2);

    // Writing the blank row back still goes through validation.
    let blank = tasks.iter().find(|task| task.cost == 40.0).unwrap();
    assert!(matches!(
        repo.update_task(blank).unwrap_err(),
        RepoError::Validation(_)
    ));
}

#[test]
fn invalid_persisted_owner_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (owner, description) VALUES ('not-a-uuid', 'Broken row');",
        [],
    )
    .unwrap();

    let repo = SqliteTaskRepository::new(&conn);
    let err = repo.list_tasks(&TaskListQuery::default()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("tasks.owner")));
}

#[test]
fn list_orders_by_start_date_desc() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    repo.insert_task(&task("middle", "2024-02-10", 1.0)).unwrap();
    repo.insert_task(&task("oldest", "2024-01-05", 1.0)).unwrap();
    repo.insert_task(&task("newest", "2024-03-20", 1.0)).unwrap();

    let order: Vec<String> = repo
        .list_tasks(&TaskListQuery::default())
        .unwrap()
        .into_iter()
        .map(|task| task.description)
        .collect();
    assert_eq!(order, vec!["newest", "middle", "oldest"]);
}

#[test]
fn list_filters_by_status_recurrence_and_property() {
    let conn = open_db_in_memory().unwrap();
    let properties = SqlitePropertyRepository::new(&conn);
    let loft = properties
        .create_property(&Property::new("Downtown Loft", "123 Main St"))
        .unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut paid = task("paid", "2024-01-01", 10.0);
    paid.payment_status = PaymentStatus::Paid;
    paid.property_id = Some(loft);
    repo.insert_task(&paid).unwrap();

    let mut done = task("done", "2024-01-02", 20.0).recurring_every(RecurrenceInterval::Weekly);
    done.completion_status = CompletionStatus::Complete;
    repo.insert_task(&done).unwrap();

    repo.insert_task(&task("open", "2024-01-03", 30.0)).unwrap();

    let unpaid = repo
        .list_tasks(&TaskListQuery {
            payment_status: Some(PaymentStatus::Unpaid),
            ..TaskListQuery::default()
        })
        .unwrap();
    assert_eq!(unpaid.len(), 2);

    let incomplete = repo
        .list_tasks(&TaskListQuery {
            completion_status: Some(CompletionStatus::Incomplete),
            ..TaskListQuery::default()
        })
        .unwrap();
    assert_eq!(incomplete.len(), 2);

    let recurring = repo
        .list_tasks(&TaskListQuery {
            recurring: Some(true),
            ..TaskListQuery::default()
        })
        .unwrap();
    assert_eq!(recurring.len(), 1);
    assert_eq!(recurring[0].description, "done");

    let at_loft = repo
        .list_tasks(&TaskListQuery {
            property_id: Some(loft),
            ..TaskListQuery::default()
        })
        .unwrap();
    assert_eq!(at_loft.len(), 1);
    assert_eq!(at_loft[0].description, "paid");
}

#[test]
fn owner_scope_hides_other_tenants_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let mut mine = Task::new("alice's task");
    mine.owner = Some(alice);
    repo.insert_task(&mine).unwrap();

    let mut theirs = Task::new("bob's task");
    theirs.owner = Some(bob);
    repo.insert_task(&theirs).unwrap();

    repo.insert_task(&Task::new("unowned")).unwrap();

    let scoped = repo.list_tasks(&TaskListQuery::for_owner(Some(alice))).unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].owner, Some(alice));

    let unscoped = repo.list_tasks(&TaskListQuery::for_owner(None)).unwrap();
    assert_eq!(unscoped.len(), 3);
}

#[test]
fn sqlite_and_memory_stores_agree_on_filters() {
    let conn = open_db_in_memory().unwrap();
    let sqlite = SqliteTaskRepository::new(&conn);
    let memory = rentkeep_core::MemoryTaskStore::new();

    let mut weekly = task("weekly", "2024-05-01", 5.0).recurring_every(RecurrenceInterval::Weekly);
    weekly.completion_status = CompletionStatus::Complete;
    let one_off = task("one-off", "2024-05-02", 7.0);

    for store in [&sqlite as &dyn TaskStore, &memory as &dyn TaskStore] {
        store.insert_task(&weekly).unwrap();
        store.insert_task(&one_off).unwrap();
    }

    let query = TaskListQuery {
        recurring: Some(true),
        completion_status: Some(CompletionStatus::Complete),
        ..TaskListQuery::default()
    };
    let from_sqlite = sqlite.list_tasks(&query).unwrap();
    let from_memory = memory.list_tasks(&query).unwrap();
    assert_eq!(from_sqlite, from_memory);
}
