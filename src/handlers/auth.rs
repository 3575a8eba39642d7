use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::post,
    Router,
};
use crate::{
    auth::{
        AuthError, LoginCredentials, LoginResponse, RefreshTokenRequest, RegisterRequest,
        UserProfile,
    },
    handlers::common::{created_response, success_response},
    AppState,
};

/// Account and token routes; these are the only unauthenticated API routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/login/refresh", post(refresh_token))
}

#[utoipa::path(
    post,
    path = "/register",
    summary = "Register account",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserProfile),
        (status = 400, description = "Invalid registration data"),
        (status = 409, description = "Username or email already in use"),
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthError> {
    let account = state.auth.register(payload).await?;
    Ok(created_response(UserProfile::from(account)))
}

#[utoipa::path(
    post,
    path = "/login",
    summary = "Log in",
    request_body = LoginCredentials,
    responses(
        (status = 200, description = "Token pair issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginCredentials>,
) -> Result<impl IntoResponse, AuthError> {
    let tokens = state.auth.login(&payload).await?;
    Ok(success_response(tokens))
}

#[utoipa::path(
    post,
    path = "/login/refresh",
    summary = "Rotate refresh token",
    description = "Issues a new token pair and revokes the presented refresh token",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair", body = LoginResponse),
        (status = 401, description = "Refresh token rejected"),
    ),
    tag = "Auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AuthError> {
    let tokens = state.auth.refresh_token(&payload.refresh).await?;
    Ok(success_response(tokens))
}
