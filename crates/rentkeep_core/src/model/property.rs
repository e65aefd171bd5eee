//! Rental property record.

use super::{require_text, ModelValidationError, OwnerId, RecordId};
use serde::{Deserialize, Serialize};

/// Default status for newly created properties.
pub const DEFAULT_PROPERTY_STATUS: &str = "active";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerId>,
    pub name: String,
    pub address: String,
    /// Free text; `active` and `inactive` are the values in practice.
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    DEFAULT_PROPERTY_STATUS.to_string()
}

impl Property {
    /// Creates an unsaved, active property.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: None,
            owner: None,
            name: name.into(),
            address: address.into(),
            status: default_status(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("name", &self.name)?;
        require_text("address", &self.address)
    }

    pub fn is_active(&self) -> bool {
        self.status == DEFAULT_PROPERTY_STATUS
    }
}
