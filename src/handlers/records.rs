//! CRUD and export routes shared by every mirrored collection.

use axum::{
    extract::{Json, Path, Query, State},
    response::Response,
    routing::get,
    Router,
};
use serde_json::Value;

use crate::{
    auth::AuthUser,
    errors::ServiceError,
    export::xlsx_response,
    handlers::common::{created_response, no_content_response, PaginatedResponse, PaginationParams},
    services::{OwnedResource, RecordService},
    ApiResponse, ApiResult, AppState,
};

/// `/<path>`, `/<path>/export` and `/<path>/:id` for one resource
pub fn resource_routes<R: OwnedResource>() -> Router<AppState> {
    Router::new()
        .route(R::PATH, get(list_records::<R>).post(create_record::<R>))
        .route(&format!("{}/export", R::PATH), get(export_records::<R>))
        .route(
            &format!("{}/:id", R::PATH),
            get(get_record::<R>)
                .put(replace_record::<R>)
                .delete(delete_record::<R>),
        )
}

fn service<R: OwnedResource>(state: &AppState) -> RecordService<R> {
    RecordService::new(state.db.clone())
}

pub async fn list_records<R: OwnedResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<R::Model>> {
    let params = params.clamped(state.config.api_max_page_size);
    let page = service::<R>(&state)
        .list(user.user_id, params.page, params.per_page)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        page.items,
        params.page,
        params.per_page,
        page.total,
    ))))
}

pub async fn get_record<R: OwnedResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<R::Detail> {
    let detail = service::<R>(&state).get(user.user_id, &id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

pub async fn create_record<R: OwnedResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<Value>,
) -> Result<Response, ServiceError> {
    let detail = service::<R>(&state).create(user.user_id, &body).await?;
    Ok(created_response(ApiResponse::success(detail)))
}

pub async fn replace_record<R: OwnedResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<R::Detail> {
    let detail = service::<R>(&state)
        .replace(user.user_id, &id, body)
        .await?;
    Ok(Json(ApiResponse::success(detail)))
}

pub async fn delete_record<R: OwnedResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    service::<R>(&state).delete(user.user_id, &id).await?;
    Ok(no_content_response())
}

pub async fn export_records<R: OwnedResource>(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response, ServiceError> {
    let bytes = service::<R>(&state).export(user.user_id).await?;
    xlsx_response(&R::LAYOUT, bytes)
}
