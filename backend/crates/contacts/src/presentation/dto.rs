//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entities::Contact;

/// Create/update contact request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

/// Contact projection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactView {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub owner_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&Contact> for ContactView {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.contact_id.to_string(),
            name: contact.fields.name.clone(),
            email: contact.fields.email.clone(),
            phone: contact.fields.phone.clone(),
            company: contact.fields.company.clone(),
            notes: contact.fields.notes.clone(),
            owner_id: contact.owner_id.to_string(),
            created_at: contact.created_at.timestamp_millis(),
            updated_at: contact.updated_at.timestamp_millis(),
        }
    }
}

/// List response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactListResponse {
    pub contacts: Vec<ContactView>,
}
