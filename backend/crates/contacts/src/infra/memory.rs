//! In-memory Repository Implementation
//!
//! Backing store for unit and handler tests. Not intended for production.

use std::collections::HashMap;
use std::sync::Mutex;

use kernel::id::ContactId;
use uuid::Uuid;

use crate::domain::entities::Contact;
use crate::domain::repository::ContactRepository;
use crate::error::{ContactError, ContactResult};

/// HashMap-backed contact repository
#[derive(Default)]
pub struct InMemoryContactRepository {
    contacts: Mutex<HashMap<Uuid, Contact>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_contacts<T>(
        &self,
        f: impl FnOnce(&mut HashMap<Uuid, Contact>) -> T,
    ) -> ContactResult<T> {
        let mut contacts = self
            .contacts
            .lock()
            .map_err(|_| ContactError::Internal("Contact store lock poisoned".into()))?;
        Ok(f(&mut contacts))
    }
}

impl ContactRepository for InMemoryContactRepository {
    async fn create(&self, contact: &Contact) -> ContactResult<()> {
        self.with_contacts(|contacts| {
            contacts.insert(*contact.contact_id.as_uuid(), contact.clone());
        })
    }

    async fn find_by_id(&self, contact_id: &ContactId) -> ContactResult<Option<Contact>> {
        self.with_contacts(|contacts| contacts.get(contact_id.as_uuid()).cloned())
    }

    async fn list(&self) -> ContactResult<Vec<Contact>> {
        self.with_contacts(|contacts| {
            let mut all: Vec<Contact> = contacts.values().cloned().collect();
            all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            all
        })
    }

    async fn update(&self, contact: &Contact) -> ContactResult<()> {
        self.with_contacts(|contacts| {
            contacts.insert(*contact.contact_id.as_uuid(), contact.clone());
        })
    }

    async fn delete(&self, contact_id: &ContactId) -> ContactResult<bool> {
        self.with_contacts(|contacts| contacts.remove(contact_id.as_uuid()).is_some())
    }
}
