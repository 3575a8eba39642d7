use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};
use tracing::{error, info, warn};

use super::{ImportError, ImportPipeline, ImportReport};
use crate::tracing::configure_http_tracing;

pub const MISSING_CODE_BODY: &str = "Error: No code provided or invalid request.";
pub const ALREADY_CLAIMED_BODY: &str = "An import is already in progress.";
pub const TOKEN_FAILED_BODY: &str = "Failed to fetch token";
pub const SUCCESS_BODY: &str = "Authorization and data import completed successfully.";
pub const FAILURE_BODY: &str = "Some operations failed. Check logs for details.";

#[derive(Debug, Deserialize)]
struct CallbackParams {
    code: Option<String>,
}

#[derive(Clone)]
struct CallbackState {
    pipeline: Arc<ImportPipeline>,
    claimed: Arc<AtomicBool>,
    done: Arc<Mutex<Option<oneshot::Sender<ImportReport>>>>,
}

/// Short-lived listener that receives the provider redirect for one import run
#[derive(Debug)]
pub struct CallbackListener {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl CallbackListener {
    /// Bind `host:port`; port 0 picks a free port
    pub async fn bind(host: &str, port: u16) -> Result<Self, ImportError> {
        let addr = format!("{host}:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ImportError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| ImportError::Bind {
            addr: addr.clone(),
            source,
        })?;
        info!(%local_addr, "callback listener bound");
        Ok(Self {
            listener,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Redirect URI registered with the provider for this listener. It names the
    /// bound address, so the browser reaches the same IP family; a wildcard
    /// bind is addressed as `localhost`.
    pub fn redirect_uri(&self) -> String {
        let ip = self.local_addr.ip();
        if ip.is_unspecified() {
            format!("http://localhost:{}", self.local_addr.port())
        } else {
            format!("http://{}", self.local_addr)
        }
    }

    /// Serve callbacks until one run reaches a terminal state or `timeout` elapses
    pub async fn serve(self, pipeline: Arc<ImportPipeline>, timeout: Option<Duration>) -> ImportReport {
        let (report_tx, mut report_rx) = oneshot::channel::<ImportReport>();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let claimed = Arc::new(AtomicBool::new(false));

        let state = CallbackState {
            pipeline,
            claimed: claimed.clone(),
            done: Arc::new(Mutex::new(Some(report_tx))),
        };
        let app = Router::new()
            .route("/", get(handle_callback))
            .layer(configure_http_tracing())
            .with_state(state);

        let local_addr = self.local_addr;
        let server = tokio::spawn(async move {
            let shutdown = async {
                let _ = stop_rx.await;
            };
            if let Err(e) = axum::serve(self.listener, app)
                .with_graceful_shutdown(shutdown)
                .await
            {
                error!(error = %e, "callback listener stopped with an error");
            }
        });

        let report = match timeout {
            Some(limit) => match tokio::time::timeout(limit, &mut report_rx).await {
                Ok(received) => received.ok(),
                // the deadline covers waiting for the redirect, not a run already underway
                Err(_) if claimed.load(Ordering::SeqCst) => report_rx.await.ok(),
                Err(_) => {
                    warn!(?limit, "no authorization callback before the deadline");
                    Some(ImportReport::new().failed(ImportError::Timeout(limit).to_string()))
                }
            },
            None => report_rx.await.ok(),
        };

        let _ = stop_tx.send(());
        if let Err(e) = server.await {
            error!(error = %e, "callback listener task failed");
        }
        info!(%local_addr, "callback listener closed");

        report.unwrap_or_else(|| ImportReport::new().failed("callback listener stopped unexpectedly"))
    }
}

async fn handle_callback(
    State(state): State<CallbackState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let Some(code) = params.code.filter(|code| !code.trim().is_empty()) else {
        warn!("callback without an authorization code");
        return (StatusCode::BAD_REQUEST, MISSING_CODE_BODY).into_response();
    };

    if state.claimed.swap(true, Ordering::SeqCst) {
        warn!("authorization code received while a run is already in progress");
        return (StatusCode::CONFLICT, ALREADY_CLAIMED_BODY).into_response();
    }

    // The run outlives the redirecting connection; a closed browser tab must
    // still end the listener with a report.
    let run = tokio::spawn(async move {
        let report = state.pipeline.run(&code).await;
        let reply = callback_reply(&report);
        if let Some(done) = state.done.lock().await.take() {
            let _ = done.send(report);
        }
        reply
    });

    match run.await {
        Ok((status, body)) => (status, body).into_response(),
        Err(e) => {
            error!(error = %e, "import run task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, FAILURE_BODY).into_response()
        }
    }
}

fn callback_reply(report: &ImportReport) -> (StatusCode, &'static str) {
    if report.is_success() {
        (StatusCode::OK, SUCCESS_BODY)
    } else if report.collections.is_empty() && report.failure.is_some() {
        (StatusCode::INTERNAL_SERVER_ERROR, TOKEN_FAILED_BODY)
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, FAILURE_BODY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZohoConfig;
    use crate::import::{ImportCredentials, ImportOutcome, ImportRunConfig, ResourceKind, ZohoClient};
    use crate::serializers::test_support;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn pipeline(server: &MockServer) -> Arc<ImportPipeline> {
        let db = test_support::migrated_db().await;
        let owner = test_support::account(&db, "alice").await;
        let zoho = ZohoConfig {
            accounts_url: server.uri(),
            api_base_url: server.uri(),
            organization_id: "org".into(),
            resources: vec![ResourceKind::Expenses],
            ..ZohoConfig::default()
        };
        let run = ImportRunConfig::new(
            &zoho,
            ImportCredentials {
                client_id: "id".into(),
                client_secret: "secret".into(),
            },
            owner,
            "http://localhost:8003".into(),
        );
        Arc::new(ImportPipeline::new(Arc::new(db), ZohoClient::new(run).unwrap()))
    }

    #[tokio::test]
    async fn port_zero_reports_the_real_port() {
        let listener = CallbackListener::bind("127.0.0.1", 0).await.unwrap();
        let port = listener.local_addr().port();
        assert_ne!(port, 0);
        assert_eq!(listener.redirect_uri(), format!("http://127.0.0.1:{port}"));
    }

    #[tokio::test]
    async fn redirect_uri_follows_the_bound_family() {
        let wildcard = CallbackListener::bind("0.0.0.0", 0).await.unwrap();
        let port = wildcard.local_addr().port();
        assert_eq!(wildcard.redirect_uri(), format!("http://localhost:{port}"));

        let v6 = match CallbackListener::bind("[::1]", 0).await {
            Ok(listener) => listener,
            // host without IPv6 loopback
            Err(_) => return,
        };
        let port = v6.local_addr().port();
        assert_eq!(v6.redirect_uri(), format!("http://[::1]:{port}"));
    }

    #[tokio::test]
    async fn busy_port_is_a_bind_error() {
        let first = CallbackListener::bind("127.0.0.1", 0).await.unwrap();
        let port = first.local_addr().port();
        let second = CallbackListener::bind("127.0.0.1", port).await;
        assert!(matches!(second, Err(ImportError::Bind { .. })));
    }

    #[tokio::test]
    async fn second_code_during_a_run_is_refused() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/v2/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "tok", "token_type": "Bearer"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/expenses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"expenses": []})))
            .mount(&server)
            .await;

        let listener = CallbackListener::bind("127.0.0.1", 0).await.unwrap();
        let base = format!("http://{}", listener.local_addr());
        let serving = tokio::spawn(listener.serve(pipeline(&server).await, None));

        let first = tokio::spawn(reqwest::get(format!("{base}/?code=first")));
        tokio::time::sleep(Duration::from_millis(150)).await;

        let second = reqwest::get(format!("{base}/?code=second")).await.unwrap();
        assert_eq!(second.status().as_u16(), 409);
        assert_eq!(second.text().await.unwrap(), ALREADY_CLAIMED_BODY);

        let first = first.await.unwrap().unwrap();
        assert_eq!(first.status().as_u16(), 200);
        assert_eq!(first.text().await.unwrap(), SUCCESS_BODY);

        let report = serving.await.unwrap();
        assert_eq!(report.outcome(), ImportOutcome::Succeeded);
    }

    #[tokio::test]
    async fn deadline_without_redirect_fails_the_run() {
        let server = MockServer::start().await;
        let listener = CallbackListener::bind("127.0.0.1", 0).await.unwrap();

        let report = listener
            .serve(pipeline(&server).await, Some(Duration::from_millis(100)))
            .await;
        assert_eq!(report.outcome(), ImportOutcome::Failed);
        assert!(report
            .failure
            .as_deref()
            .is_some_and(|reason| reason.starts_with("No authorization callback")));
    }

    #[tokio::test]
    async fn closed_redirect_connection_still_finishes_the_run() {
        use tokio::io::AsyncWriteExt;

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/v2/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "tok", "token_type": "Bearer"}))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/expenses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"expenses": []})))
            .mount(&server)
            .await;

        let listener = CallbackListener::bind("127.0.0.1", 0).await.unwrap();
        let addr = listener.local_addr();
        let serving = tokio::spawn(listener.serve(pipeline(&server).await, None));

        let mut browser = tokio::net::TcpStream::connect(addr).await.unwrap();
        browser
            .write_all(format!("GET /?code=x HTTP/1.1\r\nHost: {addr}\r\n\r\n").as_bytes())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(browser);

        let report = tokio::time::timeout(Duration::from_secs(5), serving)
            .await
            .expect("listener stops after the run")
            .unwrap();
        assert_eq!(report.outcome(), ImportOutcome::Succeeded);
        assert!(CallbackListener::bind("127.0.0.1", addr.port()).await.is_ok());
    }
}
