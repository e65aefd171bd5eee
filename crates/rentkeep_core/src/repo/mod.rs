//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from reporting and service code.
//!
//! # Invariants
//! - Repository writes must call the model's `validate()` before persistence.
//! - Reads never re-validate; rows written by older schemas (nullable text
//!   columns, blank descriptions) must still load.
//! - Repository APIs return semantic errors (`NotFound`, `MissingId`) in
//!   addition to DB transport errors.

pub mod contact_repo;
pub mod memory_store;
pub mod property_repo;
pub mod task_repo;

use crate::db::DbError;
use crate::model::{ModelValidationError, OwnerId, RecordId};
use rusqlite::Row;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error shared by all entity repositories.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    NotFound {
        entity: &'static str,
        id: RecordId,
    },
    /// Update was called on a record that was never persisted.
    MissingId(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::MissingId(entity) => write!(f, "{entity} has no id; insert it first"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::MissingId(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn owner_to_db(owner: Option<OwnerId>) -> Option<String> {
    owner.map(|id| id.to_string())
}

pub(crate) fn parse_owner(value: Option<String>, column: &str) -> RepoResult<Option<OwnerId>> {
    match value {
        Some(text) => Uuid::parse_str(&text).map(Some).map_err(|_| {
            RepoError::InvalidData(format!("invalid owner value `{text}` in {column}"))
        }),
        None => Ok(None),
    }
}

/// Reads a nullable text column, mapping NULL to `fallback`.
pub(crate) fn text_or(row: &Row<'_>, column: &str, fallback: &str) -> rusqlite::Result<String> {
    Ok(row
        .get::<_, Option<String>>(column)?
        .unwrap_or_else(|| fallback.to_string()))
}
