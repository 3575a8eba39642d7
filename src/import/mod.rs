/*!
 * # Books Import
 *
 * One-shot import of the Books collections for a single local account:
 *
 * 1. `POST /import` resolves the owning account and binds the callback listener
 * 2. The consent page is opened through a [`ConsentLauncher`]
 * 3. The provider redirects to the listener with `code`
 * 4. The listener exchanges the code, fetches every configured collection in
 *    order and persists each record through its serializer
 * 5. The listener shuts down and the trigger request returns the report
 */

use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::ZohoConfig;
use crate::errors::ServiceError;
use crate::serializers::RecordRejection;

pub mod browser;
pub mod callback;
pub mod client;
pub mod orchestrator;

pub use browser::{ChannelLauncher, ConsentLauncher, LogOnlyLauncher, SystemBrowser};
pub use callback::CallbackListener;
pub use client::ZohoClient;
pub use orchestrator::{ImportPipeline, ImportService};

/// Books collections, in their default import order
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Contacts,
    SalesOrders,
    Invoices,
    CreditNotes,
    Expenses,
}

impl ResourceKind {
    pub const fn all() -> [ResourceKind; 5] {
        [
            ResourceKind::Contacts,
            ResourceKind::SalesOrders,
            ResourceKind::Invoices,
            ResourceKind::CreditNotes,
            ResourceKind::Expenses,
        ]
    }

    /// Path segment of the collection endpoint and key of the array in its response
    pub const fn collection(self) -> &'static str {
        match self {
            ResourceKind::Contacts => "contacts",
            ResourceKind::SalesOrders => "salesorders",
            ResourceKind::Invoices => "invoices",
            ResourceKind::CreditNotes => "creditnotes",
            ResourceKind::Expenses => "expenses",
        }
    }
}

/// Client credentials supplied with the trigger request
#[derive(Clone)]
pub struct ImportCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ImportCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Everything one import run needs, fixed before the consent page is opened
#[derive(Debug, Clone)]
pub struct ImportRunConfig {
    pub credentials: ImportCredentials,
    pub redirect_uri: String,
    pub authorize_url: String,
    pub token_url: String,
    pub api_base_url: String,
    pub scope: String,
    pub organization_id: String,
    pub resources: Vec<ResourceKind>,
    pub owner: Uuid,
    pub http_timeout: Duration,
}

impl ImportRunConfig {
    pub fn new(
        zoho: &ZohoConfig,
        credentials: ImportCredentials,
        owner: Uuid,
        redirect_uri: String,
    ) -> Self {
        Self {
            credentials,
            redirect_uri,
            authorize_url: zoho.authorize_url(),
            token_url: zoho.token_url(),
            api_base_url: zoho.api_base_url.trim_end_matches('/').to_string(),
            scope: zoho.scope.clone(),
            organization_id: zoho.organization_id.clone(),
            resources: zoho.resources.clone(),
            owner,
            http_timeout: zoho.http_timeout(),
        }
    }

    pub fn collection_url(&self, resource: ResourceKind) -> String {
        format!("{}/{}", self.api_base_url, resource.collection())
    }
}

/// Listener lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ImportState {
    Listening,
    TokenExchange,
    Importing,
    Succeeded,
    Failed,
}

/// Overall result of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ImportOutcome {
    Succeeded,
    /// Every collection was fetched but some records were rejected
    PartiallyFailed,
    /// Token exchange, a collection fetch, or the callback wait failed
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollectionReport {
    pub resource: ResourceKind,
    pub fetched: usize,
    pub persisted: usize,
    pub rejected: Vec<RecordRejection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
}

impl CollectionReport {
    pub fn new(resource: ResourceKind) -> Self {
        Self {
            resource,
            fetched: 0,
            persisted: 0,
            rejected: Vec::new(),
            fetch_error: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportReport {
    pub state: ImportState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    pub collections: Vec<CollectionReport>,
}

impl ImportReport {
    pub fn new() -> Self {
        Self {
            state: ImportState::Listening,
            failure: None,
            collections: Vec::new(),
        }
    }

    /// Terminal report for a run that stopped before or during import
    pub fn failed(mut self, reason: impl Into<String>) -> Self {
        self.state = ImportState::Failed;
        self.failure = Some(reason.into());
        self
    }

    pub fn finish(mut self) -> Self {
        self.state = if self.failure.is_none()
            && self
                .collections
                .iter()
                .all(|c| c.fetch_error.is_none() && c.rejected.is_empty())
        {
            ImportState::Succeeded
        } else {
            ImportState::Failed
        };
        self
    }

    pub fn outcome(&self) -> ImportOutcome {
        let fatal = self.failure.is_some()
            || self.collections.iter().any(|c| c.fetch_error.is_some());
        if fatal {
            ImportOutcome::Failed
        } else if self.collections.iter().any(|c| !c.rejected.is_empty()) {
            ImportOutcome::PartiallyFailed
        } else {
            ImportOutcome::Succeeded
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome() == ImportOutcome::Succeeded
    }

    pub fn persisted(&self) -> usize {
        self.collections.iter().map(|c| c.persisted).sum()
    }

    pub fn rejected(&self) -> usize {
        self.collections.iter().map(|c| c.rejected.len()).sum()
    }
}

impl Default for ImportReport {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Could not bind the callback listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid OAuth configuration: {0}")]
    Configuration(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Fetching {resource} failed: {message}")]
    Fetch {
        resource: ResourceKind,
        message: String,
    },

    #[error("No authorization callback received within {0:?}")]
    Timeout(Duration),

    #[error("User '{0}' does not exist")]
    UnknownUser(String),

    #[error("Import did not complete: {0}")]
    Incomplete(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl From<ImportError> for ServiceError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Bind { .. } => ServiceError::Conflict(
                "Another import is already waiting for authorization".to_string(),
            ),
            ImportError::UnknownUser(username) => {
                ServiceError::NotFound(format!("user {username} not found"))
            }
            ImportError::Configuration(msg) => ServiceError::InternalError(msg),
            ImportError::Database(db) => ServiceError::DatabaseError(db),
            ImportError::TokenExchange(_)
            | ImportError::Fetch { .. }
            | ImportError::Timeout(_)
            | ImportError::Incomplete(_) => ServiceError::ExternalServiceError(
                "Import failed. Check logs for details.".to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn collection(resource: ResourceKind) -> CollectionReport {
        CollectionReport {
            fetched: 1,
            persisted: 1,
            ..CollectionReport::new(resource)
        }
    }

    #[test]
    fn collection_names_match_api_keys() {
        let names: Vec<_> = ResourceKind::iter().map(ResourceKind::collection).collect();
        assert_eq!(
            names,
            ["contacts", "salesorders", "invoices", "creditnotes", "expenses"]
        );
        assert_eq!(
            ResourceKind::from_str("creditnotes").unwrap(),
            ResourceKind::CreditNotes
        );
        assert_eq!(ResourceKind::SalesOrders.to_string(), "salesorders");
    }

    #[test]
    fn outcome_distinguishes_rejections_from_fatal_failures() {
        let mut report = ImportReport::new();
        report.collections.push(collection(ResourceKind::Contacts));
        assert_eq!(report.clone().finish().state, ImportState::Succeeded);
        assert_eq!(report.outcome(), ImportOutcome::Succeeded);

        report.collections[0]
            .rejected
            .push(RecordRejection::new(Some("C9".into()), "bad email"));
        assert_eq!(report.outcome(), ImportOutcome::PartiallyFailed);
        assert_eq!(report.clone().finish().state, ImportState::Failed);

        let mut fetch_failed = ImportReport::new();
        let mut invoices = CollectionReport::new(ResourceKind::Invoices);
        invoices.fetch_error = Some("HTTP 500".into());
        fetch_failed.collections.push(invoices);
        assert_eq!(fetch_failed.outcome(), ImportOutcome::Failed);

        let token_failed = ImportReport::new().failed("invalid_code");
        assert_eq!(token_failed.state, ImportState::Failed);
        assert_eq!(token_failed.outcome(), ImportOutcome::Failed);
    }

    #[test]
    fn errors_map_to_http_statuses() {
        let bind = ImportError::Bind {
            addr: "127.0.0.1:8003".into(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        assert_eq!(ServiceError::from(bind).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ServiceError::from(ImportError::UnknownUser("ghost".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::from(ImportError::TokenExchange("denied".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let creds = ImportCredentials {
            client_id: "1000.ABC".into(),
            client_secret: "top-secret".into(),
        };
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("1000.ABC"));
        assert!(!rendered.contains("top-secret"));
    }

    #[test]
    fn run_config_derives_collection_urls() {
        let zoho = crate::config::ZohoConfig {
            api_base_url: "https://www.zohoapis.eu/books/v3/".into(),
            ..Default::default()
        };
        let run = ImportRunConfig::new(
            &zoho,
            ImportCredentials {
                client_id: "id".into(),
                client_secret: "secret".into(),
            },
            Uuid::new_v4(),
            "http://localhost:8003".into(),
        );
        assert_eq!(
            run.collection_url(ResourceKind::CreditNotes),
            "https://www.zohoapis.eu/books/v3/creditnotes"
        );
    }
}
