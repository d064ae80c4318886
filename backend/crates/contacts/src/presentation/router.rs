//! Contacts Router
//!
//! The router carries no auth gate itself; `apps/api` layers the bearer
//! token middleware over it so every contact route is private.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::ContactRepository;
use crate::infra::postgres::PgContactRepository;
use crate::presentation::handlers::{self, ContactsAppState};

/// Create the contacts router with the PostgreSQL repository
pub fn contacts_router(repo: PgContactRepository) -> Router {
    contacts_router_generic(Arc::new(repo))
}

/// Contacts router for any repository implementation
pub fn contacts_router_generic<R>(repo: Arc<R>) -> Router
where
    R: ContactRepository + Send + Sync + 'static,
{
    let state = ContactsAppState { repo };

    Router::new()
        .route(
            "/",
            post(handlers::create_contact::<R>).get(handlers::list_contacts::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_contact::<R>)
                .put(handlers::update_contact::<R>)
                .delete(handlers::delete_contact::<R>),
        )
        .with_state(state)
}
