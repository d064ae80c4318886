//! Contact Entity
//!
//! A CRM contact. Contacts are shared across the team; `owner_id` records
//! which principal created the record.

use chrono::{DateTime, Utc};
use kernel::id::{ContactId, UserId};

use crate::error::{ContactError, ContactResult};

/// Maximum length for free-text fields in Unicode code points
pub const MAX_FIELD_LENGTH: usize = 200;

/// Mutable contact fields, validated once at the boundary
#[derive(Debug, Clone)]
pub struct ContactFields {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

impl ContactFields {
    /// Validate and normalize raw input
    pub fn new(
        name: String,
        email: Option<String>,
        phone: Option<String>,
        company: Option<String>,
        notes: Option<String>,
    ) -> ContactResult<Self> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ContactError::Validation("Name must not be empty".into()));
        }
        if name.chars().count() > MAX_FIELD_LENGTH {
            return Err(ContactError::Validation(format!(
                "Name must not exceed {} characters",
                MAX_FIELD_LENGTH
            )));
        }

        Ok(Self {
            name,
            email: normalize_optional("Email", email)?,
            phone: normalize_optional("Phone", phone)?,
            company: normalize_optional("Company", company)?,
            notes: normalize_optional("Notes", notes)?,
        })
    }
}

// Empty strings collapse to None so the store never holds "" markers
fn normalize_optional(field: &str, value: Option<String>) -> ContactResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => {
            let v = v.trim().to_string();
            if v.is_empty() {
                return Ok(None);
            }
            if v.chars().count() > MAX_FIELD_LENGTH {
                return Err(ContactError::Validation(format!(
                    "{} must not exceed {} characters",
                    field, MAX_FIELD_LENGTH
                )));
            }
            Ok(Some(v))
        }
    }
}

/// Contact entity
#[derive(Debug, Clone)]
pub struct Contact {
    pub contact_id: ContactId,
    pub fields: ContactFields,
    /// Principal that created the contact
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Create a new contact owned by a principal
    pub fn new(fields: ContactFields, owner_id: UserId) -> Self {
        let now = Utc::now();

        Self {
            contact_id: ContactId::new(),
            fields,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields
    pub fn apply(&mut self, fields: ContactFields) {
        self.fields = fields;
        self.updated_at = Utc::now();
    }
}
