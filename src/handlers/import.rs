use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    auth::AuthUser,
    errors::ServiceError,
    import::{ImportCredentials, ImportError, ImportOutcome, ImportReport, ResourceKind},
    ApiResponse, ApiResult, AppState,
};

pub fn import_routes() -> Router<AppState> {
    Router::new().route("/import", post(trigger_import))
}

/// Trigger payload. `serect_code` is the client secret; the key is kept as
/// existing clients send it.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ImportRequest {
    #[validate(length(min = 1))]
    pub client_id: String,
    #[serde(alias = "secret_code")]
    #[validate(length(min = 1))]
    pub serect_code: String,
    #[validate(length(min = 1, max = 100))]
    pub user: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionSummary {
    pub resource: ResourceKind,
    pub fetched: usize,
    pub persisted: usize,
    pub rejected: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportSummary {
    pub status: ImportOutcome,
    pub collections: Vec<CollectionSummary>,
}

impl From<&ImportReport> for ImportSummary {
    fn from(report: &ImportReport) -> Self {
        Self {
            status: report.outcome(),
            collections: report
                .collections
                .iter()
                .map(|c| CollectionSummary {
                    resource: c.resource,
                    fetched: c.fetched,
                    persisted: c.persisted,
                    rejected: c.rejected.len(),
                })
                .collect(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/import",
    summary = "Import Books data",
    description = "Opens the provider consent page and blocks until the authorization \
                   callback has been handled or the callback deadline passes. Records are \
                   stored for `user`.",
    request_body = ImportRequest,
    responses(
        (status = 200, description = "All collections imported", body = ApiResponse<ImportSummary>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Target user does not exist", body = crate::errors::ErrorResponse),
        (status = 409, description = "Another import holds the callback port", body = crate::errors::ErrorResponse),
        (status = 502, description = "Import failed", body = crate::errors::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Import"
)]
pub async fn trigger_import(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(payload): Json<ImportRequest>,
) -> ApiResult<ImportSummary> {
    payload.validate()?;
    info!(caller = %caller.username, target = %payload.user, "import requested");

    let credentials = ImportCredentials {
        client_id: payload.client_id,
        client_secret: payload.serect_code,
    };
    let report = state.importer.run(credentials, &payload.user).await?;

    if !report.is_success() {
        warn!(
            outcome = %report.outcome(),
            failure = report.failure.as_deref().unwrap_or_default(),
            rejected = report.rejected(),
            "import did not complete cleanly"
        );
        let reason = report
            .failure
            .clone()
            .unwrap_or_else(|| report.outcome().to_string());
        return Err(ServiceError::from(ImportError::Incomplete(reason)));
    }

    Ok(Json(ApiResponse::success(ImportSummary::from(&report))))
}
