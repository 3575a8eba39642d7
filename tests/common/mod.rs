#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use books_sync::{
    app_router,
    config::{AppConfig, ZohoConfig},
    db,
    import::{ChannelLauncher, ImportService, ResourceKind},
    AppState,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::sync::{mpsc, Mutex};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "kq7Zr2xN9vLw4Tb8Hs1Jd6Fm3Gp0Yc5Ue7Ia2Ko9Qn4Xr1Vz8Bt6Mh3Ls0Wd5Ej2Pg";
pub const PASSWORD: &str = "correct horse battery";

/// Application backed by a throwaway SQLite file, driven through the real router
pub struct TestApp {
    router: Router,
    pub state: AppState,
    consent_urls: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
    _db_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_zoho(ZohoConfig::default()).await
    }

    /// Point the importer at a stand-in Books server; the callback listener takes a free port
    pub async fn with_books_server(base_url: &str, resources: Vec<ResourceKind>) -> Self {
        Self::with_zoho(ZohoConfig {
            accounts_url: base_url.to_string(),
            api_base_url: base_url.to_string(),
            organization_id: "60030126546".to_string(),
            callback_host: "127.0.0.1".to_string(),
            callback_port: 0,
            callback_timeout_secs: Some(10),
            http_timeout_secs: 5,
            open_browser: false,
            resources,
            ..ZohoConfig::default()
        })
        .await
    }

    async fn with_zoho(zoho: ZohoConfig) -> Self {
        let db_dir = tempfile::tempdir().expect("temp dir for test database");
        let db_path = db_dir.path().join("books_sync_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            JWT_SECRET.to_string(),
            900,
            86_400,
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.cors_allow_any_origin = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.zoho = zoho.clone();

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");
        let db = Arc::new(pool);

        let (launcher, consent_urls) = ChannelLauncher::new();
        let state = AppState::new(db.clone(), cfg)
            .with_importer(ImportService::new(db, zoho, Arc::new(launcher)));
        let router = app_router(state.clone()).expect("router builds");

        Self {
            router,
            state,
            consent_urls: Arc::new(Mutex::new(consent_urls)),
            _db_dir: db_dir,
        }
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let request = build_request(method, uri, body, token);
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Fire a request in the background, for routes that block until a callback arrives
    pub fn spawn_request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> tokio::task::JoinHandle<Response> {
        let request = build_request(method, uri, body, token);
        let router = self.router.clone();
        tokio::spawn(async move {
            router
                .oneshot(request)
                .await
                .expect("router error during test request")
        })
    }

    /// Register `username` and return an access token for it
    pub async fn sign_up(&self, username: &str) -> String {
        let email = format!("{username}@example.com");
        let response = self
            .request(
                Method::POST,
                "/register",
                Some(json!({
                    "username": username,
                    "email": email,
                    "phone": "5550100",
                    "password": PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED, "register {username}");

        let response = self
            .request(
                Method::POST,
                "/login",
                Some(json!({"email": email, "password": PASSWORD})),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK, "login {username}");
        response_json(response).await["access_token"]
            .as_str()
            .expect("access token in login response")
            .to_string()
    }

    /// Wait for the consent page the importer would have opened
    pub async fn next_consent_url(&self) -> url::Url {
        let raw = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            self.consent_urls.lock().await.recv(),
        )
        .await
        .expect("consent URL within 5s")
        .expect("consent channel open");
        url::Url::parse(&raw).expect("consent URL parses")
    }

    /// Callback address the provider would redirect to
    pub async fn callback_url(&self) -> String {
        let consent = self.next_consent_url().await;
        consent
            .query_pairs()
            .find(|(key, _)| key == "redirect_uri")
            .map(|(_, value)| value.into_owned())
            .expect("redirect_uri on consent URL")
    }
}

fn build_request(method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(tok) = token {
        builder = builder.header("authorization", format!("Bearer {}", tok));
    }

    let body = if let Some(json) = body {
        builder = builder.header("content-type", "application/json");
        Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
    } else {
        Body::empty()
    };

    builder.body(body).expect("failed to build request")
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

pub async fn response_bytes(response: Response) -> Vec<u8> {
    body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes")
        .to_vec()
}
