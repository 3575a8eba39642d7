pub mod auth;
pub mod common;
pub mod import;
pub mod records;

use axum::Router;

use crate::auth::AuthRouterExt;
use crate::services::{Contacts, CreditNotes, Expenses, Invoices, SalesOrders};
use crate::AppState;

/// Every route that requires a bearer token
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .merge(records::resource_routes::<Contacts>())
        .merge(records::resource_routes::<SalesOrders>())
        .merge(records::resource_routes::<Invoices>())
        .merge(records::resource_routes::<CreditNotes>())
        .merge(records::resource_routes::<Expenses>())
        .merge(import::import_routes())
        .with_auth()
}
