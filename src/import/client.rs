use oauth2::{
    basic::BasicClient, reqwest::async_http_client, AuthType, AuthUrl, AuthorizationCode,
    ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use super::{ImportError, ImportRunConfig, ResourceKind};

/// Token and collection calls against the Books accounts and API servers
#[derive(Debug, Clone)]
pub struct ZohoClient {
    oauth: BasicClient,
    http: reqwest::Client,
    run: ImportRunConfig,
}

impl ZohoClient {
    pub fn new(run: ImportRunConfig) -> Result<Self, ImportError> {
        let oauth = BasicClient::new(
            ClientId::new(run.credentials.client_id.clone()),
            Some(ClientSecret::new(run.credentials.client_secret.clone())),
            AuthUrl::new(run.authorize_url.clone())
                .map_err(|e| ImportError::Configuration(e.to_string()))?,
            Some(
                TokenUrl::new(run.token_url.clone())
                    .map_err(|e| ImportError::Configuration(e.to_string()))?,
            ),
        )
        .set_auth_type(AuthType::RequestBody)
        .set_redirect_uri(
            RedirectUrl::new(run.redirect_uri.clone())
                .map_err(|e| ImportError::Configuration(e.to_string()))?,
        );

        let http = reqwest::Client::builder()
            .timeout(run.http_timeout)
            .build()
            .map_err(|e| ImportError::Configuration(e.to_string()))?;

        Ok(Self { oauth, http, run })
    }

    pub fn run_config(&self) -> &ImportRunConfig {
        &self.run
    }

    /// Consent page asking for offline access to the configured scope
    pub fn consent_url(&self) -> String {
        let (url, _state) = self
            .oauth
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new(self.run.scope.clone()))
            .add_extra_param("prompt", "consent")
            .add_extra_param("access_type", "offline")
            .url();
        url.to_string()
    }

    /// Exchange an authorization code for an access token
    #[instrument(skip_all)]
    pub async fn exchange_code(&self, code: &str) -> Result<String, ImportError> {
        let request = self
            .oauth
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .add_extra_param("prompt", "consent")
            .add_extra_param("access_type", "offline")
            .request_async(async_http_client);

        let token = tokio::time::timeout(self.run.http_timeout, request)
            .await
            .map_err(|_| {
                ImportError::TokenExchange(format!(
                    "no response within {:?}",
                    self.run.http_timeout
                ))
            })?
            .map_err(|e| {
                error!(error = %e, "token exchange failed");
                ImportError::TokenExchange(e.to_string())
            })?;

        info!("authorization code exchanged for an access token");
        Ok(token.access_token().secret().clone())
    }

    /// Fetch one collection; a missing array means the collection is empty
    #[instrument(skip(self, access_token), fields(resource = %resource))]
    pub async fn fetch_collection(
        &self,
        resource: ResourceKind,
        access_token: &str,
    ) -> Result<Vec<Value>, ImportError> {
        let fetch_error = |message: String| ImportError::Fetch { resource, message };

        let response = self
            .http
            .get(self.run.collection_url(resource))
            .query(&[("organization_id", self.run.organization_id.as_str())])
            .header(AUTHORIZATION, format!("Zoho-oauthtoken {access_token}"))
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(fetch_error(format!("HTTP {status}: {body}")));
        }

        let mut body: Value = response
            .json()
            .await
            .map_err(|e| fetch_error(format!("undecodable body: {e}")))?;

        let records = match body
            .as_object_mut()
            .and_then(|map| map.remove(resource.collection()))
        {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(fetch_error(format!(
                    "expected an array under '{}', found {}",
                    resource.collection(),
                    other
                )))
            }
        };

        debug!(count = records.len(), "collection fetched");
        Ok(records)
    }
}
