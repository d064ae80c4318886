//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{ContactId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Contact, ContactFields};
use crate::domain::repository::ContactRepository;
use crate::error::ContactResult;

/// PostgreSQL-backed contact repository
#[derive(Clone)]
pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ContactRepository for PgContactRepository {
    async fn create(&self, contact: &Contact) -> ContactResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contacts (
                contact_id,
                name,
                email,
                phone,
                company,
                notes,
                owner_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(contact.contact_id.as_uuid())
        .bind(&contact.fields.name)
        .bind(&contact.fields.email)
        .bind(&contact.fields.phone)
        .bind(&contact.fields.company)
        .bind(&contact.fields.notes)
        .bind(contact.owner_id.as_uuid())
        .bind(contact.created_at)
        .bind(contact.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, contact_id: &ContactId) -> ContactResult<Option<Contact>> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT
                contact_id,
                name,
                email,
                phone,
                company,
                notes,
                owner_id,
                created_at,
                updated_at
            FROM contacts
            WHERE contact_id = $1
            "#,
        )
        .bind(contact_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_contact()))
    }

    async fn list(&self) -> ContactResult<Vec<Contact>> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT
                contact_id,
                name,
                email,
                phone,
                company,
                notes,
                owner_id,
                created_at,
                updated_at
            FROM contacts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_contact()).collect())
    }

    async fn update(&self, contact: &Contact) -> ContactResult<()> {
        sqlx::query(
            r#"
            UPDATE contacts SET
                name = $2,
                email = $3,
                phone = $4,
                company = $5,
                notes = $6,
                updated_at = $7
            WHERE contact_id = $1
            "#,
        )
        .bind(contact.contact_id.as_uuid())
        .bind(&contact.fields.name)
        .bind(&contact.fields.email)
        .bind(&contact.fields.phone)
        .bind(&contact.fields.company)
        .bind(&contact.fields.notes)
        .bind(contact.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, contact_id: &ContactId) -> ContactResult<bool> {
        let deleted = sqlx::query("DELETE FROM contacts WHERE contact_id = $1")
            .bind(contact_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ContactRow {
    contact_id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    company: Option<String>,
    notes: Option<String>,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContactRow {
    fn into_contact(self) -> Contact {
        Contact {
            contact_id: ContactId::from_uuid(self.contact_id),
            fields: ContactFields {
                name: self.name,
                email: self.email,
                phone: self.phone,
                company: self.company,
                notes: self.notes,
            },
            owner_id: UserId::from_uuid(self.owner_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
