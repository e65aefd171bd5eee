//! Next-occurrence scheduling for recurring tasks.
//!
//! # Responsibility
//! - Compute the date a recurring task comes due again.
//! - Build the unsaved successor task for a completed occurrence.
//!
//! # Invariants
//! - Offsets are fixed day counts (1/7/30/365); months and leap years are
//!   not calendar-aware.
//! - Unknown cadences produce no date, unlike the yearly projection which
//!   counts them once.
//! - Nothing here persists; callers insert the successor themselves.

use crate::model::task::{CompletionStatus, PaymentStatus, Task};
use chrono::{Duration, NaiveDate};

/// Stored date format for task start/end dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` task date.
pub fn parse_task_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Next due date after `task.end_date`.
///
/// Returns `None` when the task is not recurring, its end date is empty or
/// malformed, or its cadence is not recognized.
pub fn next_occurrence(task: &Task) -> Option<NaiveDate> {
    if !task.recurring {
        return None;
    }
    let end = parse_task_date(&task.end_date)?;
    let interval = task.interval()?;
    end.checked_add_signed(Duration::days(interval.step_days()))
}

/// [`next_occurrence`] rendered as `YYYY-MM-DD`.
pub fn next_occurrence_date(task: &Task) -> Option<String> {
    next_occurrence(task).map(|date| date.format(DATE_FORMAT).to_string())
}

/// Builds the unsaved successor of `original`.
///
/// The successor starts where the original ended, ends at the next
/// occurrence (empty when none can be computed) and is always unpaid and
/// incomplete.
pub fn generate_next_task(original: &Task) -> Task {
    Task {
        id: None,
        owner: original.owner,
        property_id: original.property_id,
        contact_id: original.contact_id,
        description: original.description.clone(),
        start_date: original.end_date.clone(),
        end_date: next_occurrence_date(original).unwrap_or_default(),
        cost: original.cost,
        payment_status: PaymentStatus::Unpaid,
        completion_status: CompletionStatus::Incomplete,
        recurring: original.recurring,
        recurrence_interval: original.recurrence_interval.clone(),
        notes: original.notes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_next_task, next_occurrence_date};
    use crate::model::task::{CompletionStatus, PaymentStatus, RecurrenceInterval, Task};

    fn recurring(end: &str, interval: RecurrenceInterval) -> Task {
        let mut task = Task::new("Lawn mowing").recurring_every(interval);
        task.end_date = end.to_string();
        task
    }

    #[test]
    fn weekly_adds_seven_days() {
        let task = recurring("2024-01-15", RecurrenceInterval::Weekly);
        assert_eq!(next_occurrence_date(&task).as_deref(), Some("2024-01-22"));
    }

    #[test]
    fn monthly_adds_thirty_days_not_a_calendar_month() {
        let task = recurring("2024-01-31", RecurrenceInterval::Monthly);
        assert_eq!(next_occurrence_date(&task).as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn yearly_adds_365_days_across_leap_day() {
        let task = recurring("2024-01-01", RecurrenceInterval::Yearly);
        assert_eq!(next_occurrence_date(&task).as_deref(), Some("2024-12-31"));
    }

    #[test]
    fn daily_rolls_over_month_end() {
        let task = recurring("2023-02-28", RecurrenceInterval::Daily);
        assert_eq!(next_occurrence_date(&task).as_deref(), Some("2023-03-01"));
    }

    #[test]
    fn non_recurring_task_has_no_next_date() {
        let mut task = recurring("2024-01-15", RecurrenceInterval::Weekly);
        task.recurring = false;
        assert_eq!(next_occurrence_date(&task), None);
    }

    #[test]
    fn missing_or_malformed_end_date_has_no_next_date() {
        assert_eq!(
            next_occurrence_date(&recurring("", RecurrenceInterval::Daily)),
            None
        );
        assert_eq!(
            next_occurrence_date(&recurring("15/01/2024", RecurrenceInterval::Daily)),
            None
        );
        assert_eq!(
            next_occurrence_date(&recurring("2024-02-30", RecurrenceInterval::Daily)),
            None
        );
    }

    #[test]
    fn unknown_interval_has_no_next_date() {
        let mut task = recurring("2024-01-15", RecurrenceInterval::Weekly);
        task.recurrence_interval = "quarterly".to_string();
        assert_eq!(next_occurrence_date(&task), None);
        task.recurrence_interval.clear();
        assert_eq!(next_occurrence_date(&task), None);
    }

    #[test]
    fn successor_resets_statuses_and_copies_details() {
        let mut original = recurring("2024-01-15", RecurrenceInterval::Weekly);
        original.id = Some(9);
        original.property_id = Some(2);
        original.contact_id = Some(4);
        original.start_date = "2024-01-08".to_string();
        original.cost = 100.0;
        original.notes = "back yard".to_string();
        original.payment_status = PaymentStatus::Paid;
        original.completion_status = CompletionStatus::Complete;

        let next = generate_next_task(&original);
        assert_eq!(next.id, None);
        assert_eq!(next.start_date, "2024-01-15");
        assert_eq!(next.end_date, "2024-01-22");
        assert_eq!(next.payment_status, PaymentStatus::Unpaid);
        assert_eq!(next.completion_status, CompletionStatus::Incomplete);
        assert_eq!(next.property_id, Some(2));
        assert_eq!(next.contact_id, Some(4));
        assert_eq!(next.cost, 100.0);
        assert_eq!(next.description, original.description);
        assert_eq!(next.notes, "back yard");
        assert!(next.recurring);
        assert_eq!(next.recurrence_interval, "weekly");
    }

    #[test]
    fn successor_of_unschedulable_task_has_empty_end_date() {
        let mut original = Task::new("One-off");
        original.end_date = "2024-05-05".to_string();
        original.payment_status = PaymentStatus::Paid;

        let next = generate_next_task(&original);
        assert_eq!(next.start_date, "2024-05-05");
        assert!(next.end_date.is_empty());
        assert_eq!(next.payment_status, PaymentStatus::Unpaid);
    }
}
