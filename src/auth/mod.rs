/*!
 * # Authentication Module
 *
 * Local accounts own every imported record, so every CRUD, export and import
 * route runs behind a bearer token issued here.
 *
 * - Passwords are stored as argon2 PHC strings
 * - Access and refresh tokens are HS256 JWTs carrying a `token_type` claim
 * - Refresh tokens are persisted by `jti`, rotated on use and revoked in place
 */

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::AppConfig;

// Entity modules
pub mod refresh_token;
pub mod user;

/// Distinguishes the two halves of a token pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claim structure for JWT tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,            // Subject (user ID)
    pub username: String,       // Account username
    pub email: Option<String>,  // Only present on access tokens
    pub token_type: TokenKind,  // Access or refresh
    pub jti: String,            // JWT ID (unique identifier for this token)
    pub iat: i64,               // Issued at time
    pub exp: i64,               // Expiration time
    pub nbf: i64,               // Not valid before time
    pub iss: String,            // Issuer
    pub aud: String,            // Audience
}

/// Authenticated caller extracted from the access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub token_id: String,
}

/// Authentication configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub jwt_issuer: String,
    pub access_token_expiration: Duration,
    pub refresh_token_expiration: Duration,
}

impl AuthConfig {
    pub fn new(
        jwt_secret: String,
        jwt_audience: String,
        jwt_issuer: String,
        access_token_expiration: Duration,
        refresh_token_expiration: Duration,
    ) -> Self {
        Self {
            jwt_secret,
            jwt_audience,
            jwt_issuer,
            access_token_expiration,
            refresh_token_expiration,
        }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(
            config.jwt_secret.clone(),
            config.auth_audience.clone(),
            config.auth_issuer.clone(),
            Duration::from_secs(config.jwt_expiration as u64),
            Duration::from_secs(config.refresh_token_expiration as u64),
        )
    }
}

/// Account registration payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 10))]
    pub phone: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Public view of an account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<user::Model> for UserProfile {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            phone: model.phone,
        }
    }
}

/// Login credentials
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Token pair as returned by `/login` and `/login/refresh`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub username: String,
    pub refresh: String,
    pub access_token: String,
}

/// Refresh token request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshTokenRequest {
    pub refresh: String,
}

/// Token pair
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_expires_in: i64,
}

/// Authentication service that handles accounts, token issuance and validation
#[derive(Debug, Clone)]
pub struct AuthService {
    pub config: AuthConfig,
    pub db: Arc<DatabaseConnection>,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(config: AuthConfig, db: Arc<DatabaseConnection>) -> Self {
        Self { config, db }
    }

    /// Create an account; username and email must both be unused
    pub async fn register(&self, request: RegisterRequest) -> Result<user::Model, AuthError> {
        request
            .validate()
            .map_err(|e| AuthError::InvalidRequest(e.to_string()))?;

        let email = request.email.trim().to_lowercase();
        let username = request.username.trim().to_string();

        let existing = user::Entity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Email.eq(email.clone()))
                    .add(user::Column::Username.eq(username.clone())),
            )
            .one(&*self.db)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        if let Some(existing) = existing {
            let field = if existing.email == email {
                "email"
            } else {
                "username"
            };
            return Err(AuthError::AccountExists(field.to_string()));
        }

        let now = Utc::now();
        let account = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username),
            email: Set(email),
            phone: Set(request.phone.filter(|p| !p.trim().is_empty())),
            password_hash: Set(hash_password(&request.password)?),
            is_active: Set(true),
            is_staff: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        info!(user_id = %account.id, username = %account.username, "account registered");
        Ok(account)
    }

    /// Verify credentials and issue a token pair
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, AuthError> {
        let email = credentials.email.trim().to_lowercase();
        let account = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !account.is_active {
            warn!(user_id = %account.id, "login attempt on inactive account");
            return Err(AuthError::InvalidCredentials);
        }
        if !verify_password(&credentials.password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.generate_token(&account).await?;
        Ok(LoginResponse {
            username: account.username,
            refresh: pair.refresh_token,
            access_token: pair.access_token,
        })
    }

    /// Generate a JWT token pair for a user and persist the refresh half
    pub async fn generate_token(&self, account: &user::Model) -> Result<TokenPair, AuthError> {
        let now = Utc::now();
        let access_exp = now
            + ChronoDuration::from_std(self.config.access_token_expiration)
                .map_err(|_| AuthError::InternalError("Invalid token duration".to_string()))?;
        let refresh_exp = now
            + ChronoDuration::from_std(self.config.refresh_token_expiration)
                .map_err(|_| AuthError::InternalError("Invalid token duration".to_string()))?;

        let access_claims = Claims {
            sub: account.id.to_string(),
            username: account.username.clone(),
            email: Some(account.email.clone()),
            token_type: TokenKind::Access,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: access_exp.timestamp(),
            nbf: now.timestamp(),
            iss: self.config.jwt_issuer.clone(),
            aud: self.config.jwt_audience.clone(),
        };

        let refresh_jti = Uuid::new_v4().to_string();
        let refresh_claims = Claims {
            sub: account.id.to_string(),
            username: account.username.clone(),
            email: None,
            token_type: TokenKind::Refresh,
            jti: refresh_jti.clone(),
            iat: now.timestamp(),
            exp: refresh_exp.timestamp(),
            nbf: now.timestamp(),
            iss: self.config.jwt_issuer.clone(),
            aud: self.config.jwt_audience.clone(),
        };

        let access_token = self.sign(&access_claims)?;
        let refresh_token = self.sign(&refresh_claims)?;

        self.store_refresh_token(account.id, &refresh_jti, now, refresh_exp)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.access_token_expiration.as_secs() as i64,
            refresh_expires_in: self.config.refresh_token_expiration.as_secs() as i64,
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Validate a JWT token and extract the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.config.jwt_audience.as_str()]);
        validation.set_issuer(&[self.config.jwt_issuer.as_str()]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })
    }

    /// Rotate a refresh token: the presented one is revoked and a new pair issued
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<LoginResponse, AuthError> {
        let claims = self.validate_token(refresh_token)?;
        if claims.token_type != TokenKind::Refresh {
            return Err(AuthError::InvalidToken);
        }

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        let stored = refresh_token::Entity::find()
            .filter(refresh_token::Column::TokenId.eq(claims.jti.clone()))
            .filter(refresh_token::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::InvalidToken)?;
        if stored.revoked {
            warn!(user_id = %user_id, jti = %claims.jti, "revoked refresh token presented");
            return Err(AuthError::RevokedToken);
        }

        let account = self.get_user(user_id).await?;
        self.revoke_refresh_token(stored).await?;
        let pair = self.generate_token(&account).await?;

        Ok(LoginResponse {
            username: account.username,
            refresh: pair.refresh_token,
            access_token: pair.access_token,
        })
    }

    /// Get a user by ID
    async fn get_user(&self, user_id: Uuid) -> Result<user::Model, AuthError> {
        user::Entity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .filter(|account| account.is_active)
            .ok_or(AuthError::UserNotFound)
    }

    /// Store a refresh token
    async fn store_refresh_token(
        &self,
        user_id: Uuid,
        token_id: &str,
        issued_at: DateTime<Utc>,
        expiry: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        refresh_token::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            token_id: Set(token_id.to_string()),
            created_at: Set(issued_at),
            expires_at: Set(expiry),
            revoked: Set(false),
        }
        .insert(&*self.db)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        debug!("Stored refresh token: {} for user: {}", token_id, user_id);
        Ok(())
    }

    /// Revoke a refresh token
    async fn revoke_refresh_token(&self, stored: refresh_token::Model) -> Result<(), AuthError> {
        let token_id = stored.token_id.clone();
        let user_id = stored.user_id;
        let mut active: refresh_token::ActiveModel = stored.into();
        active.revoked = Set(true);
        active
            .update(&*self.db)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        debug!("Revoked refresh token: {} for user: {}", token_id, user_id);
        Ok(())
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::InternalError(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AuthError::InternalError(format!("stored hash unreadable: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing authentication")]
    MissingAuth,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token has been revoked")]
    RevokedToken,

    #[error("Token creation failed: {0}")]
    TokenCreation(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("An account with this {0} already exists")]
    AccountExists(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_code, error_message): (StatusCode, &str, String) = match &self {
            Self::MissingAuth => (
                StatusCode::UNAUTHORIZED,
                "AUTH_MISSING",
                "Authentication required".to_string(),
            ),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "AUTH_INVALID_CREDENTIALS",
                "Invalid credentials".to_string(),
            ),
            Self::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "AUTH_INVALID_TOKEN",
                "Invalid authentication token".to_string(),
            ),
            Self::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "AUTH_TOKEN_EXPIRED",
                "Token has expired".to_string(),
            ),
            Self::RevokedToken => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REVOKED_TOKEN",
                "Authentication token has been revoked".to_string(),
            ),
            Self::TokenCreation(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_TOKEN_CREATION_FAILED",
                "Could not issue tokens".to_string(),
            ),
            Self::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "AUTH_INVALID_REQUEST",
                msg.clone(),
            ),
            Self::AccountExists(_) => (
                StatusCode::CONFLICT,
                "AUTH_ACCOUNT_EXISTS",
                self.to_string(),
            ),
            Self::UserNotFound => (
                StatusCode::NOT_FOUND,
                "AUTH_USER_NOT_FOUND",
                "User not found".to_string(),
            ),
            Self::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_DATABASE_ERROR",
                "Database error".to_string(),
            ),
            Self::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
        };

        if status.is_server_error() {
            error!(error = %self, "authentication failure");
        }

        let body = Json(serde_json::json!({
            "error": {
                "code": error_code,
                "message": error_message,
            }
        }));

        (status, body).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::MissingAuth)
    }
}

/// Authentication middleware that extracts and validates bearer tokens
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let auth_service = match request.extensions().get::<Arc<AuthService>>() {
        Some(service) => service.clone(),
        None => {
            error!("auth middleware mounted without an AuthService extension");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication service not available",
            )
                .into_response();
        }
    };

    match extract_auth_from_headers(request.headers(), &auth_service) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Extract authentication info from request headers
fn extract_auth_from_headers(
    headers: &HeaderMap,
    auth_service: &AuthService,
) -> Result<AuthUser, AuthError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingAuth)?;

    let claims = auth_service.validate_token(token)?;
    if claims.token_type != TokenKind::Access {
        return Err(AuthError::InvalidToken);
    }

    Ok(AuthUser {
        user_id: Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?,
        username: claims.username,
        email: claims.email,
        token_id: claims.jti,
    })
}

/// Extension methods for Router to add auth middleware
pub trait AuthRouterExt {
    fn with_auth(self) -> Self;
}

impl<S> AuthRouterExt for axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_auth(self) -> Self {
        self.layer(axum::middleware::from_fn(auth_middleware))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::db::{establish_connection_with_config, DbConfig};

    const SECRET: &str = "kq7Zr2xN9vLw4Tb8Hs1Jd6Fm3Gp0Yc5Ue7Ia2Ko9Qn4Xr1Vz8Bt6Mh3Ls0Wd5Ej2Pg";

    async fn service() -> AuthService {
        let db = establish_connection_with_config(&DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        })
        .await
        .unwrap();
        crate::db::run_migrations(&db).await.unwrap();
        AuthService::new(
            AuthConfig::new(
                SECRET.into(),
                "books-sync-api".into(),
                "books-sync".into(),
                Duration::from_secs(900),
                Duration::from_secs(3600),
            ),
            Arc::new(db),
        )
    }

    fn alice() -> RegisterRequest {
        RegisterRequest {
            username: "alice".into(),
            email: "Alice@Example.com".into(),
            phone: Some("5550100".into()),
            password: "correct horse battery".into(),
        }
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("s3cret-pass").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret-pass", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[tokio::test]
    async fn register_normalises_email_and_rejects_duplicates() {
        let auth = service().await;
        let account = auth.register(alice()).await.unwrap();
        assert_eq!(account.email, "alice@example.com");

        let dup_email = RegisterRequest {
            username: "alice2".into(),
            ..alice()
        };
        assert!(matches!(
            auth.register(dup_email).await,
            Err(AuthError::AccountExists(field)) if field == "email"
        ));

        let dup_username = RegisterRequest {
            email: "other@example.com".into(),
            ..alice()
        };
        assert!(matches!(
            auth.register(dup_username).await,
            Err(AuthError::AccountExists(field)) if field == "username"
        ));
    }

    #[tokio::test]
    async fn login_issues_access_and_refresh_tokens() {
        let auth = service().await;
        auth.register(alice()).await.unwrap();

        let tokens = auth
            .login(&LoginCredentials {
                email: "alice@example.com".into(),
                password: "correct horse battery".into(),
            })
            .await
            .unwrap();
        assert_eq!(tokens.username, "alice");

        let access = auth.validate_token(&tokens.access_token).unwrap();
        assert_eq!(access.token_type, TokenKind::Access);
        let refresh = auth.validate_token(&tokens.refresh).unwrap();
        assert_eq!(refresh.token_type, TokenKind::Refresh);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let auth = service().await;
        auth.register(alice()).await.unwrap();
        let result = auth
            .login(&LoginCredentials {
                email: "alice@example.com".into(),
                password: "nope".into(),
            })
            .await;
        assert_matches!(result, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn refresh_rotates_and_revokes_previous_token() {
        let auth = service().await;
        auth.register(alice()).await.unwrap();
        let first = auth
            .login(&LoginCredentials {
                email: "alice@example.com".into(),
                password: "correct horse battery".into(),
            })
            .await
            .unwrap();

        let second = auth.refresh_token(&first.refresh).await.unwrap();
        assert_ne!(second.refresh, first.refresh);
        assert!(matches!(
            auth.refresh_token(&first.refresh).await,
            Err(AuthError::RevokedToken)
        ));
        assert!(matches!(
            auth.refresh_token(&second.access_token).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn tokens_from_another_issuer_are_invalid() {
        let auth = service().await;
        let mut other = auth.clone();
        other.config.jwt_issuer = "someone-else".into();
        let account = auth.register(alice()).await.unwrap();
        let pair = other.generate_token(&account).await.unwrap();
        assert!(matches!(
            auth.validate_token(&pair.access_token),
            Err(AuthError::InvalidToken)
        ));
    }
}
