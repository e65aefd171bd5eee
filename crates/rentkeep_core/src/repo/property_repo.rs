//! Property repository contract and SQLite implementation.

use super::{owner_to_db, parse_owner, text_or, RepoError, RepoResult};
use crate::model::property::{Property, DEFAULT_PROPERTY_STATUS};
use crate::model::{OwnerId, RecordId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const PROPERTY_SELECT_SQL: &str = "SELECT id, owner, name, address, status FROM properties";

/// Repository interface for property CRUD operations.
pub trait PropertyRepository {
    fn create_property(&self, property: &Property) -> RepoResult<RecordId>;
    fn get_property(&self, id: RecordId) -> RepoResult<Option<Property>>;
    /// Lists properties ordered by name, optionally scoped to one owner.
    fn list_properties(&self, owner: Option<OwnerId>) -> RepoResult<Vec<Property>>;
    fn update_property(&self, property: &Property) -> RepoResult<()>;
    fn delete_property(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed property repository.
pub struct SqlitePropertyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePropertyRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PropertyRepository for SqlitePropertyRepository<'_> {
    fn create_property(&self, property: &Property) -> RepoResult<RecordId> {
        property.validate()?;

        self.conn.execute(
            "INSERT INTO properties (owner, name, address, status) VALUES (?1, ?2, ?3, ?4);",
            params![
                owner_to_db(property.owner),
                property.name.as_str(),
                property.address.as_str(),
                property.status.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_property(&self, id: RecordId) -> RepoResult<Option<Property>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROPERTY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_property_row(row)?));
        }
        Ok(None)
    }

    fn list_properties(&self, owner: Option<OwnerId>) -> RepoResult<Vec<Property>> {
        let mut sql = format!("{PROPERTY_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();
        if let Some(owner) = owner {
            sql.push_str(" AND owner = ?");
            bind_values.push(Value::Text(owner.to_string()));
        }
        sql.push_str(" ORDER BY name ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut properties = Vec::new();
        while let Some(row) = rows.next()? {
            properties.push(parse_property_row(row)?);
        }
        Ok(properties)
    }

    fn update_property(&self, property: &Property) -> RepoResult<()> {
        let id = property.id.ok_or(RepoError::MissingId("property"))?;
        property.validate()?;

        let changed = self.conn.execute(
            "UPDATE properties
             SET owner = ?1, name = ?2, address = ?3, status = ?4
             WHERE id = ?5;",
            params![
                owner_to_db(property.owner),
                property.name.as_str(),
                property.address.as_str(),
                property.status.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "property",
                id,
            });
        }
        Ok(())
    }

    fn delete_property(&self, id: RecordId) -> RepoResult<()> {
        // Tasks keep their cost; the schema nulls their property reference.
        let changed = self
            .conn
            .execute("DELETE FROM properties WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "property",
                id,
            });
        }
        Ok(())
    }
}

fn parse_property_row(row: &Row<'_>) -> RepoResult<Property> {
    Ok(Property {
        id: Some(row.get("id")?),
        owner: parse_owner(row.get("owner")?, "properties.owner")?,
        name: row.get("name")?,
        address: row.get("address")?,
        status: text_or(row, "status", DEFAULT_PROPERTY_STATUS)?,
    })
}
