//! Maintenance task model.
//!
//! # Responsibility
//! - Define the task record every report and recurrence helper reads.
//! - Map payment/completion/recurrence states to their stored spellings.
//!
//! # Invariants
//! - `cost` is finite and non-negative; storage NULL reads back as `0.0`.
//! - `recurrence_interval` keeps the raw stored text. It is only consulted
//!   when `recurring` is set, and unknown values are preserved so callers
//!   can decide how to treat them.

use super::{require_text, ModelValidationError, OwnerId, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "paid" => Some(Self::Paid),
            "unpaid" => Some(Self::Unpaid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Complete,
    #[default]
    Incomplete,
}

impl CompletionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Incomplete => "incomplete",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "complete" => Some(Self::Complete),
            "incomplete" => Some(Self::Incomplete),
            _ => None,
        }
    }
}

/// Recognized recurrence cadences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceInterval {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceInterval {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Parses the stored spelling. Empty and unknown text yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Occurrences per year used to annualize one occurrence's cost.
    pub fn annual_multiplier(self) -> f64 {
        match self {
            Self::Daily => 365.0,
            Self::Weekly => 52.0,
            Self::Monthly => 12.0,
            Self::Yearly => 1.0,
        }
    }

    /// Fixed day offset between occurrences.
    ///
    /// Months are 30 days and years 365 days; no calendar awareness.
    pub fn step_days(self) -> i64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::Monthly => 30,
            Self::Yearly => 365,
        }
    }
}

/// One maintenance work item tied to a property and a service contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// `None` until the store assigns one.
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerId>,
    #[serde(default)]
    pub property_id: Option<RecordId>,
    #[serde(default)]
    pub contact_id: Option<RecordId>,
    pub description: String,
    /// `YYYY-MM-DD`, may be empty.
    #[serde(default)]
    pub start_date: String,
    /// `YYYY-MM-DD`, empty while the task is still open.
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub completion_status: CompletionStatus,
    /// Serialized as `yes` / `no`.
    #[serde(default, with = "yes_no")]
    pub recurring: bool,
    /// Raw cadence text; see [`Task::interval`].
    #[serde(default)]
    pub recurrence_interval: String,
    #[serde(default)]
    pub notes: String,
}

impl Task {
    /// Creates an unsaved, unpaid, incomplete, non-recurring task.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: None,
            owner: None,
            property_id: None,
            contact_id: None,
            description: description.into(),
            start_date: String::new(),
            end_date: String::new(),
            cost: 0.0,
            payment_status: PaymentStatus::Unpaid,
            completion_status: CompletionStatus::Incomplete,
            recurring: false,
            recurrence_interval: String::new(),
            notes: String::new(),
        }
    }

    /// Marks the task as recurring with the given cadence.
    pub fn recurring_every(mut self, interval: RecurrenceInterval) -> Self {
        self.recurring = true;
        self.recurrence_interval = interval.as_str().to_string();
        self
    }

    /// Parsed cadence, or `None` for empty/unknown text.
    pub fn interval(&self) -> Option<RecurrenceInterval> {
        RecurrenceInterval::parse(&self.recurrence_interval)
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    pub fn is_complete(&self) -> bool {
        self.completion_status == CompletionStatus::Complete
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("description", &self.description)?;
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(ModelValidationError::InvalidCost(self.cost));
        }
        Ok(())
    }
}

/// Stored spelling of the recurring flag.
pub fn recurring_to_db(recurring: bool) -> &'static str {
    if recurring {
        "yes"
    } else {
        "no"
    }
}

pub fn parse_recurring(value: &str) -> Option<bool> {
    match value {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

mod yes_no {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::recurring_to_db(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_recurring(&raw)
            .ok_or_else(|| D::Error::custom(format!("expected `yes` or `no`, got `{raw}`")))
    }
}
