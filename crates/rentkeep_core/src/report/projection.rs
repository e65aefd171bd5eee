//! Yearly cost projection from completed recurring tasks.
//!
//! Each completed recurring task is assumed to continue indefinitely at its
//! last cost. Unknown or empty cadences count once per year.

use crate::model::task::Task;

/// Yearly cost of one task, or `None` when it does not feed the projection.
///
/// Only tasks that are both recurring and complete qualify.
pub fn annualized_cost(task: &Task) -> Option<f64> {
    if !task.recurring || !task.is_complete() {
        return None;
    }
    let multiplier = task.interval().map_or(1.0, |interval| interval.annual_multiplier());
    Some(task.cost * multiplier)
}

/// Sums [`annualized_cost`] over every qualifying task.
pub fn yearly_projection(tasks: &[Task]) -> f64 {
    tasks.iter().filter_map(annualized_cost).sum()
}

#[cfg(test)]
mod tests {
    use super::{annualized_cost, yearly_projection};
    use crate::model::task::{CompletionStatus, RecurrenceInterval, Task};

    fn completed(cost: f64, interval: &str) -> Task {
        let mut task = Task::new("recurring job");
        task.cost = cost;
        task.recurring = true;
        task.recurrence_interval = interval.to_string();
        task.completion_status = CompletionStatus::Complete;
        task
    }

    #[test]
    fn monthly_task_projects_twelve_times_cost() {
        assert_eq!(yearly_projection(&[completed(300.0, "monthly")]), 3600.0);
    }

    #[test]
    fn multiplier_table_matches_cadence() {
        assert_eq!(annualized_cost(&completed(2.0, "daily")), Some(730.0));
        assert_eq!(annualized_cost(&completed(100.0, "weekly")), Some(5200.0));
        assert_eq!(annualized_cost(&completed(180.0, "yearly")), Some(180.0));
    }

    #[test]
    fn unknown_or_empty_interval_counts_once() {
        assert_eq!(annualized_cost(&completed(40.0, "")), Some(40.0));
        assert_eq!(annualized_cost(&completed(40.0, "biweekly")), Some(40.0));
    }

    #[test]
    fn non_recurring_and_incomplete_tasks_do_not_change_projection() {
        let base = vec![completed(100.0, "weekly"), completed(180.0, "yearly")];
        let before = yearly_projection(&base);

        let mut one_off = Task::new("one-off repair");
        one_off.cost = 400.0;
        one_off.completion_status = CompletionStatus::Complete;

        let mut open = Task::new("pool service").recurring_every(RecurrenceInterval::Monthly);
        open.cost = 300.0;

        let mut extended = base.clone();
        extended.push(one_off);
        extended.push(open);
        assert_eq!(yearly_projection(&extended), before);
    }

    #[test]
    fn empty_input_projects_zero() {
        assert_eq!(yearly_projection(&[]), 0.0);
    }
}
