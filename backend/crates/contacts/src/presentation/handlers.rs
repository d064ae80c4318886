//! HTTP Handlers
//!
//! All routes assume the bearer-token gate already ran; the principal
//! arrives via the `CurrentUser` extension.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;
use uuid::Uuid;

use auth::middleware::CurrentUser;
use kernel::id::ContactId;

use crate::domain::entities::{Contact, ContactFields};
use crate::domain::repository::ContactRepository;
use crate::error::{ContactError, ContactResult};
use crate::presentation::dto::{ContactListResponse, ContactRequest, ContactView};

/// Shared state for contact handlers
pub struct ContactsAppState<R>
where
    R: ContactRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> Clone for ContactsAppState<R>
where
    R: ContactRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

fn fields_from_request(req: ContactRequest) -> ContactResult<ContactFields> {
    ContactFields::new(req.name, req.email, req.phone, req.company, req.notes)
}

/// POST /api/v1/contacts
pub async fn create_contact<R>(
    State(state): State<ContactsAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<ContactRequest>,
) -> ContactResult<(StatusCode, Json<ContactView>)>
where
    R: ContactRepository + Send + Sync + 'static,
{
    let fields = fields_from_request(req)?;
    let contact = Contact::new(fields, current.user_id);

    state.repo.create(&contact).await?;

    tracing::info!(contact_id = %contact.contact_id, owner_id = %current.user_id, "Contact created");

    Ok((StatusCode::CREATED, Json(ContactView::from(&contact))))
}

/// GET /api/v1/contacts
pub async fn list_contacts<R>(
    State(state): State<ContactsAppState<R>>,
) -> ContactResult<Json<ContactListResponse>>
where
    R: ContactRepository + Send + Sync + 'static,
{
    let contacts = state.repo.list().await?;

    Ok(Json(ContactListResponse {
        contacts: contacts.iter().map(ContactView::from).collect(),
    }))
}

/// GET /api/v1/contacts/{id}
pub async fn get_contact<R>(
    State(state): State<ContactsAppState<R>>,
    Path(id): Path<Uuid>,
) -> ContactResult<Json<ContactView>>
where
    R: ContactRepository + Send + Sync + 'static,
{
    let contact = state
        .repo
        .find_by_id(&ContactId::from_uuid(id))
        .await?
        .ok_or(ContactError::NotFound)?;

    Ok(Json(ContactView::from(&contact)))
}

/// PUT /api/v1/contacts/{id}
pub async fn update_contact<R>(
    State(state): State<ContactsAppState<R>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ContactRequest>,
) -> ContactResult<Json<ContactView>>
where
    R: ContactRepository + Send + Sync + 'static,
{
    let mut contact = state
        .repo
        .find_by_id(&ContactId::from_uuid(id))
        .await?
        .ok_or(ContactError::NotFound)?;

    contact.apply(fields_from_request(req)?);
    state.repo.update(&contact).await?;

    Ok(Json(ContactView::from(&contact)))
}

/// DELETE /api/v1/contacts/{id}
pub async fn delete_contact<R>(
    State(state): State<ContactsAppState<R>>,
    Path(id): Path<Uuid>,
) -> ContactResult<StatusCode>
where
    R: ContactRepository + Send + Sync + 'static,
{
    if !state.repo.delete(&ContactId::from_uuid(id)).await? {
        return Err(ContactError::NotFound);
    }

    tracing::info!(contact_id = %id, "Contact deleted");

    Ok(StatusCode::NO_CONTENT)
}
