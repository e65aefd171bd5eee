//! Domain model for rental maintenance tracking.
//!
//! # Responsibility
//! - Define canonical records for properties, contacts and tasks.
//! - Keep wire/storage spellings (`paid`, `complete`, `yes`) in one place.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never reused.
//! - Every record is validated before it is written.

pub mod contact;
pub mod period;
pub mod property;
pub mod task;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier shared by all entities.
pub type RecordId = i64;

/// Tenant identifier used for row-level scoping.
pub type OwnerId = uuid::Uuid;

/// Validation failure raised before any write reaches storage.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// A required text field is empty after trimming.
    EmptyField(&'static str),
    /// Cost is negative, NaN or infinite.
    InvalidCost(f64),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "`{field}` must not be empty"),
            Self::InvalidCost(cost) => {
                write!(f, "cost must be a non-negative finite amount, got {cost}")
            }
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::EmptyField(field));
    }
    Ok(())
}
