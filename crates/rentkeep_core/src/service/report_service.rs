//! Report use-case service.
//!
//! Fetches tasks (and properties for name resolution) from storage, scoped
//! to an optional owner, and runs the pure aggregators in `crate::report`.

use crate::model::period::MonthPeriod;
use crate::model::task::Task;
use crate::model::OwnerId;
use crate::report::{
    cost_summary, monthly_breakdown, yearly_projection, CostSummary, MonthlyBreakdown,
};
use crate::repo::property_repo::PropertyRepository;
use crate::repo::task_repo::{TaskListQuery, TaskStore};
use crate::repo::RepoResult;
use log::debug;

pub struct ReportService<T: TaskStore, P: PropertyRepository> {
    tasks: T,
    properties: P,
    owner: Option<OwnerId>,
}

impl<T: TaskStore, P: PropertyRepository> ReportService<T, P> {
    /// Creates an unscoped report service over every row.
    pub fn new(tasks: T, properties: P) -> Self {
        Self {
            tasks,
            properties,
            owner: None,
        }
    }

    /// Restricts every report to rows owned by `owner` (`None` = all rows).
    pub fn scoped_to(mut self, owner: Option<OwnerId>) -> Self {
        self.owner = owner;
        self
    }

    pub fn cost_summary(&self) -> RepoResult<CostSummary> {
        let summary = cost_summary(&self.scoped_tasks(TaskListQuery::default())?);
        debug!(
            "event=report_summary module=service status=ok total={:.2}",
            summary.total
        );
        Ok(summary)
    }

    pub fn yearly_projection(&self) -> RepoResult<f64> {
        // The store narrows to recurring rows; the projector re-checks both flags.
        let query = TaskListQuery {
            recurring: Some(true),
            ..TaskListQuery::default()
        };
        let projection = yearly_projection(&self.scoped_tasks(query)?);
        debug!(
            "event=report_projection module=service status=ok total={:.2}",
            projection
        );
        Ok(projection)
    }

    pub fn monthly_breakdown(&self, period: MonthPeriod) -> RepoResult<MonthlyBreakdown> {
        let tasks = self.scoped_tasks(TaskListQuery::default())?;
        let properties = self.properties.list_properties(self.owner)?;
        let breakdown = monthly_breakdown(&tasks, &properties, period);
        debug!(
            "event=report_monthly module=service status=ok period={} properties={} total={:.2}",
            period,
            breakdown.by_property.len(),
            breakdown.total
        );
        Ok(breakdown)
    }

    fn scoped_tasks(&self, query: TaskListQuery) -> RepoResult<Vec<Task>> {
        self.tasks.list_tasks(&TaskListQuery {
            owner: self.owner,
            ..query
        })
    }
}
