use rentkeep_core::db::open_db_in_memory;
use rentkeep_core::{
    generate_next_task, next_occurrence_date, CompletionStatus, PaymentStatus,
    RecurrenceInterval, SqliteTaskRepository, Task, TaskListQuery, TaskService,
    TaskServiceError, TaskStore,
};
use uuid::Uuid;

fn completed_weekly(end: &str) -> Task {
    let mut task = Task::new("Lawn mowing").recurring_every(RecurrenceInterval::Weekly);
    task.start_date = "2024-01-08".to_string();
    task.end_date = end.to_string();
    task.cost = 100.0;
    task.payment_status = PaymentStatus::Paid;
    task.completion_status = CompletionStatus::Complete;
    task
}

#[test]
fn spawn_next_occurrence_persists_successor() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let id = service.create_task(&completed_weekly("2024-01-15")).unwrap();
    let next_id = service.spawn_next_occurrence(id).unwrap();

    let next = service.get_task(next_id).unwrap().unwrap();
    assert_eq!(next.start_date, "2024-01-15");
    assert_eq!(next.end_date, "2024-01-22");
    assert_eq!(next.payment_status, PaymentStatus::Unpaid);
    assert_eq!(next.completion_status, CompletionStatus::Incomplete);
    assert_eq!(next.cost, 100.0);

    // The original is left untouched.
    let original = service.get_task(id).unwrap().unwrap();
    assert!(original.is_paid());
    assert!(original.is_complete());
}

#[test]
fn spawning_twice_creates_duplicate_successors() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let service = TaskService::new(&repo);

    let id = service.create_task(&completed_weekly("2024-01-15")).unwrap();
    service.spawn_next_occurrence(id).unwrap();
    service.spawn_next_occurrence(id).unwrap();

    let all = repo.list_tasks(&Default::default()).unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn spawn_rejects_task_with_malformed_end_date() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let id = service.create_task(&completed_weekly("next tuesday")).unwrap();
    assert!(matches!(
        service.spawn_next_occurrence(id),
        Err(TaskServiceError::NotSchedulable(rejected)) if rejected == id
    ));
}

#[test]
fn scoped_service_cannot_spawn_or_touch_another_owners_task() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let alice_tasks = TaskService::new(&repo).scoped_to(Some(alice));
    let bob_tasks = TaskService::new(&repo).scoped_to(Some(bob));

    let id = alice_tasks
        .create_task(&completed_weekly("2024-01-15"))
        .unwrap();
    assert_eq!(repo.get_task(id).unwrap().unwrap().owner, Some(alice));

    assert!(matches!(
        bob_tasks.spawn_next_occurrence(id),
        Err(TaskServiceError::TaskNotFound(missing)) if missing == id
    ));
    assert!(bob_tasks.get_task(id).unwrap().is_none());
    assert!(matches!(
        bob_tasks.delete_task(id),
        Err(TaskServiceError::TaskNotFound(_))
    ));
    assert!(bob_tasks
        .list_tasks(&TaskListQuery::default())
        .unwrap()
        .is_empty());
    assert_eq!(repo.list_tasks(&TaskListQuery::default()).unwrap().len(), 1);

    let next_id = alice_tasks.spawn_next_occurrence(id).unwrap();
    assert_eq!(repo.get_task(next_id).unwrap().unwrap().owner, Some(alice));
}

#[test]
fn chained_generation_walks_fixed_offsets() {
    let mut task = completed_weekly("2024-01-31");
    task.recurrence_interval = "monthly".to_string();

    let second = generate_next_task(&task);
    assert_eq!(second.end_date, "2024-03-01");
    let third = generate_next_task(&second);
    assert_eq!(third.start_date, "2024-03-01");
    assert_eq!(third.end_date, "2024-03-31");
    assert_eq!(next_occurrence_date(&third).as_deref(), Some("2024-04-30"));
}
