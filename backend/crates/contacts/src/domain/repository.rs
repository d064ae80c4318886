//! Repository Traits

use kernel::id::ContactId;

use crate::domain::entities::Contact;
use crate::error::ContactResult;

/// Contact repository trait
#[trait_variant::make(ContactRepository: Send)]
pub trait LocalContactRepository {
    /// Create a new contact
    async fn create(&self, contact: &Contact) -> ContactResult<()>;

    /// Find contact by ID
    async fn find_by_id(&self, contact_id: &ContactId) -> ContactResult<Option<Contact>>;

    /// List all contacts, newest first
    async fn list(&self) -> ContactResult<Vec<Contact>>;

    /// Update a contact
    async fn update(&self, contact: &Contact) -> ContactResult<()>;

    /// Delete a contact; false when it did not exist
    async fn delete(&self, contact_id: &ContactId) -> ContactResult<bool>;
}
