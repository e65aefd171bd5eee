//! Cost reports over task collections.
//!
//! # Responsibility
//! - Aggregate paid/unpaid totals and per-property monthly costs.
//! - Annualize completed recurring task costs.
//!
//! # Invariants
//! - Functions here are pure; they never touch storage.
//! - Empty input yields zero aggregates, never an error.
//! - Tenant scoping happens when tasks are fetched, not here.

pub mod cost;
pub mod projection;

pub use cost::{cost_summary, monthly_breakdown, CostSummary, MonthlyBreakdown, TOTAL_KEY};
pub use projection::{annualized_cost, yearly_projection};
