//! Contact repository contract and SQLite implementation.

use super::{owner_to_db, parse_owner, text_or, RepoError, RepoResult};
use crate::model::contact::Contact;
use crate::model::{OwnerId, RecordId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const CONTACT_SELECT_SQL: &str =
    "SELECT id, owner, name, company, phone, email, service_type FROM contacts";

/// Query options for listing contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactListQuery {
    pub owner: Option<OwnerId>,
    /// Exact match on `service_type`, e.g. `plumber`.
    pub service_type: Option<String>,
}

/// Repository interface for contact CRUD operations.
pub trait ContactRepository {
    fn create_contact(&self, contact: &Contact) -> RepoResult<RecordId>;
    fn get_contact(&self, id: RecordId) -> RepoResult<Option<Contact>>;
    /// Lists contacts ordered by name.
    fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<Contact>>;
    fn update_contact(&self, contact: &Contact) -> RepoResult<()>;
    fn delete_contact(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact(&self, contact: &Contact) -> RepoResult<RecordId> {
        contact.validate()?;

        self.conn.execute(
            "INSERT INTO contacts (owner, name, company, phone, email, service_type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                owner_to_db(contact.owner),
                contact.name.as_str(),
                contact.company.as_str(),
                contact.phone.as_str(),
                contact.email.as_str(),
                contact.service_type.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_contact(&self, id: RecordId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }
        Ok(None)
    }

    fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<Contact>> {
        let mut sql = format!("{CONTACT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(owner) = query.owner {
            sql.push_str(" AND owner = ?");
            bind_values.push(Value::Text(owner.to_string()));
        }
        if let Some(service_type) = query.service_type.as_deref() {
            sql.push_str(" AND service_type = ?");
            bind_values.push(Value::Text(service_type.to_string()));
        }
        sql.push_str(" ORDER BY name ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }

    fn update_contact(&self, contact: &Contact) -> RepoResult<()> {
        let id = contact.id.ok_or(RepoError::MissingId("contact"))?;
        contact.validate()?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET owner = ?1, name = ?2, company = ?3, phone = ?4, email = ?5, service_type = ?6
             WHERE id = ?7;",
            params![
                owner_to_db(contact.owner),
                contact.name.as_str(),
                contact.company.as_str(),
                contact.phone.as_str(),
                contact.email.as_str(),
                contact.service_type.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "contact",
                id,
            });
        }
        Ok(())
    }

    fn delete_contact(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "contact",
                id,
            });
        }
        Ok(())
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    Ok(Contact {
        id: Some(row.get("id")?),
        owner: parse_owner(row.get("owner")?, "contacts.owner")?,
        name: row.get("name")?,
        company: text_or(row, "company", "")?,
        phone: text_or(row, "phone", "")?,
        email: text_or(row, "email", "")?,
        service_type: text_or(row, "service_type", "")?,
    })
}
