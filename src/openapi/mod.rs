use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Books Sync API",
        version = "0.1.0",
        description = r#"
# Books Sync API

Imports Zoho Books data for a local account and serves it back per user.

## Authentication

Register with `POST /register`, then obtain a token pair with `POST /login`.
Every other endpoint except `/status` and `/health` requires:

```
Authorization: Bearer <access_token>
```

## Import

`POST /import` opens the Books consent page and blocks until the provider has
redirected to the local callback listener and every configured collection has
been fetched and stored, or until the callback deadline passes.

## Records

Each collection is served under its own prefix: `/contacts`, `/sales_order`,
`/invoice`, `/credit_note` and `/expenses`.

| Route | Behavior |
|---|---|
| `GET /<prefix>?page=&per_page=` | Caller's records ordered by id (default 1/20, max 100) |
| `POST /<prefix>` | Store a document in the Books JSON shape (201) |
| `GET /<prefix>/{id}` | Record with its addresses, people and line items |
| `PUT /<prefix>/{id}` | Full replace; the path id wins over the body |
| `DELETE /<prefix>/{id}` | Remove the record and its children (204) |
| `GET /<prefix>/export` | `.xlsx` attachment of the caller's records |

Records owned by another user answer 404.

## Error Handling

```json
{
  "error": "Not Found",
  "message": "contact C1 not found",
  "request_id": "2b0c…",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Auth", description = "Account registration and tokens"),
        (name = "Import", description = "Books OAuth import"),
    ),
    paths(
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::auth::refresh_token,
        crate::handlers::import::trigger_import,
    ),
    components(
        schemas(
            // Common types
            crate::ApiResponse<serde_json::Value>,
            crate::handlers::common::PaginationMeta,

            // Auth types
            crate::auth::RegisterRequest,
            crate::auth::UserProfile,
            crate::auth::LoginCredentials,
            crate::auth::LoginResponse,
            crate::auth::RefreshTokenRequest,

            // Import types
            crate::handlers::import::ImportRequest,
            crate::handlers::import::ImportSummary,
            crate::handlers::import::CollectionSummary,
            crate::import::ImportOutcome,
            crate::import::ResourceKind,

            // Error types
            crate::errors::ErrorResponse
        )
    ),
    modifiers(&BearerAuth)
)]
pub struct ApiDocV1;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_generation() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("Books Sync API"));
        assert!(json.contains("/import"));
        assert!(json.contains("/login/refresh"));
        assert!(json.contains("bearer_auth"));
    }
}
