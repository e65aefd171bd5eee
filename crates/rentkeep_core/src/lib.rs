//! Core domain logic for rental property maintenance tracking.
//! This crate owns storage, reporting and recurrence rules; front ends only
//! parse input and print results.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod recurrence;
pub mod report;
pub mod repo;
pub mod service;

pub use config::{default_db_path, AppConfig, ConfigError, ConfigOverrides};
pub use logging::{
    default_log_level, init_from_config, init_logging, logging_status, LogTarget, LoggingError,
};
pub use model::contact::Contact;
pub use model::period::{MonthPeriod, PeriodParseError};
pub use model::property::Property;
pub use model::task::{CompletionStatus, PaymentStatus, RecurrenceInterval, Task};
pub use model::{ModelValidationError, OwnerId, RecordId};
pub use recurrence::{generate_next_task, next_occurrence, next_occurrence_date};
pub use report::{
    annualized_cost, cost_summary, monthly_breakdown, yearly_projection, CostSummary,
    MonthlyBreakdown,
};
pub use repo::contact_repo::{ContactListQuery, ContactRepository, SqliteContactRepository};
pub use repo::memory_store::MemoryTaskStore;
pub use repo::property_repo::{PropertyRepository, SqlitePropertyRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskListQuery, TaskStore};
pub use repo::{RepoError, RepoResult};
pub use service::report_service::ReportService;
pub use service::task_service::{TaskService, TaskServiceError, TaskServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
