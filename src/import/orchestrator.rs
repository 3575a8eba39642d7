use metrics::counter;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::{
    browser::{ConsentLauncher, LogOnlyLauncher, SystemBrowser},
    CallbackListener, CollectionReport, ImportCredentials, ImportError, ImportReport,
    ImportRunConfig, ImportState, ResourceKind, ZohoClient,
};
use crate::auth::user;
use crate::config::ZohoConfig;
use crate::serializers::{
    raw_record_id, save, ContactSerializer, CreditNoteSerializer, ExpenseSerializer,
    InvoiceSerializer, RecordRejection, RecordSerializer, SalesOrderSerializer, SerializerError,
};

async fn persist_record(
    db: &DatabaseConnection,
    resource: ResourceKind,
    owner: Uuid,
    record: &Value,
) -> Result<String, SerializerError> {
    match resource {
        ResourceKind::Contacts => save::<ContactSerializer>(db, owner, record).await,
        ResourceKind::SalesOrders => save::<SalesOrderSerializer>(db, owner, record).await,
        ResourceKind::Invoices => save::<InvoiceSerializer>(db, owner, record).await,
        ResourceKind::CreditNotes => save::<CreditNoteSerializer>(db, owner, record).await,
        ResourceKind::Expenses => save::<ExpenseSerializer>(db, owner, record).await,
    }
}

fn id_field(resource: ResourceKind) -> &'static str {
    match resource {
        ResourceKind::Contacts => ContactSerializer::ID_FIELD,
        ResourceKind::SalesOrders => SalesOrderSerializer::ID_FIELD,
        ResourceKind::Invoices => InvoiceSerializer::ID_FIELD,
        ResourceKind::CreditNotes => CreditNoteSerializer::ID_FIELD,
        ResourceKind::Expenses => ExpenseSerializer::ID_FIELD,
    }
}

/// Work done for the single callback that claims a run
pub struct ImportPipeline {
    db: Arc<DatabaseConnection>,
    client: ZohoClient,
}

impl ImportPipeline {
    pub fn new(db: Arc<DatabaseConnection>, client: ZohoClient) -> Self {
        Self { db, client }
    }

    /// Exchange the code, then fetch and persist each collection in order.
    /// A failed fetch stops the run; rejected records do not.
    #[instrument(skip_all, fields(owner = %self.client.run_config().owner))]
    pub async fn run(&self, code: &str) -> ImportReport {
        let run = self.client.run_config();
        let mut report = ImportReport::new();

        report.state = ImportState::TokenExchange;
        let token = match self.client.exchange_code(code).await {
            Ok(token) => token,
            Err(e) => {
                error!(error = %e, "import aborted before any collection was fetched");
                counter!("books_import.token_exchange.failed", 1);
                return report.failed(e.to_string());
            }
        };

        report.state = ImportState::Importing;
        for &resource in &run.resources {
            let mut collection = CollectionReport::new(resource);

            let records = match self.client.fetch_collection(resource, &token).await {
                Ok(records) => records,
                Err(e) => {
                    error!(resource = %resource, error = %e, "collection fetch failed; stopping import");
                    counter!("books_import.collections.failed", 1, "resource" => resource.collection());
                    collection.fetch_error = Some(e.to_string());
                    report.collections.push(collection);
                    break;
                }
            };

            collection.fetched = records.len();
            for record in &records {
                match persist_record(&self.db, resource, run.owner, record).await {
                    Ok(_) => {
                        collection.persisted += 1;
                        counter!("books_import.records.persisted", 1, "resource" => resource.collection());
                    }
                    Err(e) => {
                        let rejection = match e {
                            SerializerError::Invalid(rejection) => rejection,
                            other => RecordRejection::new(
                                raw_record_id(record, id_field(resource)),
                                other.to_string(),
                            ),
                        };
                        warn!(resource = %resource, %rejection, "record rejected");
                        counter!("books_import.records.rejected", 1, "resource" => resource.collection());
                        collection.rejected.push(rejection);
                    }
                }
            }

            info!(
                resource = %resource,
                fetched = collection.fetched,
                persisted = collection.persisted,
                rejected = collection.rejected.len(),
                "collection imported"
            );
            report.collections.push(collection);
        }

        report.finish()
    }
}

/// Starts import runs on behalf of the `/import` endpoint
pub struct ImportService {
    db: Arc<DatabaseConnection>,
    zoho: ZohoConfig,
    launcher: Arc<dyn ConsentLauncher>,
}

impl std::fmt::Debug for ImportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportService")
            .field("zoho", &self.zoho)
            .finish_non_exhaustive()
    }
}

impl ImportService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        zoho: ZohoConfig,
        launcher: Arc<dyn ConsentLauncher>,
    ) -> Self {
        Self { db, zoho, launcher }
    }

    /// Uses the system browser unless `open_browser` is off
    pub fn from_config(db: Arc<DatabaseConnection>, zoho: ZohoConfig) -> Self {
        let launcher: Arc<dyn ConsentLauncher> = if zoho.open_browser {
            Arc::new(SystemBrowser)
        } else {
            Arc::new(LogOnlyLauncher)
        };
        Self::new(db, zoho, launcher)
    }

    /// Run one import for `username`, returning once the listener has finished
    #[instrument(skip(self, credentials), fields(client_id = %credentials.client_id))]
    pub async fn run(
        &self,
        credentials: ImportCredentials,
        username: &str,
    ) -> Result<ImportReport, ImportError> {
        let owner = user::Entity::find()
            .filter(user::Column::Username.eq(username.trim()))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ImportError::UnknownUser(username.to_string()))?;

        let listener =
            CallbackListener::bind(&self.zoho.callback_host, self.zoho.callback_port).await?;
        let run = ImportRunConfig::new(&self.zoho, credentials, owner.id, listener.redirect_uri());
        let client = ZohoClient::new(run)?;

        info!(owner = %owner.id, redirect_uri = %listener.redirect_uri(), "waiting for authorization");
        self.launcher.launch(&client.consent_url());

        let pipeline = Arc::new(ImportPipeline::new(self.db.clone(), client));
        let report = listener
            .serve(pipeline, self.zoho.callback_timeout())
            .await;

        info!(
            outcome = %report.outcome(),
            persisted = report.persisted(),
            rejected = report.rejected(),
            "import finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{contact, invoice};
    use crate::import::{ImportOutcome, ImportRunConfig};
    use crate::serializers::test_support;
    use sea_orm::PaginatorTrait;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn pipeline(server: &MockServer, owner: Uuid, db: DatabaseConnection) -> ImportPipeline {
        let zoho = ZohoConfig {
            accounts_url: server.uri(),
            api_base_url: server.uri(),
            organization_id: "org".into(),
            resources: vec![ResourceKind::Contacts, ResourceKind::Invoices],
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
        ImportPipeline::new(Arc::new(db), ZohoClient::new(run).unwrap())
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/oauth/v2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok",
                "token_type": "Bearer"
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn invalid_records_are_reported_and_the_rest_persisted() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "contacts": [
                    {"contact_id": "C1", "contact_name": "Acme"},
                    {"contact_id": "C2"},
                    {"contact_id": "C3", "contact_name": "Initech"}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/invoices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        let report = pipeline(&server, alice, db.clone()).await.run("code").await;

        assert_eq!(report.outcome(), ImportOutcome::PartiallyFailed);
        assert_eq!(report.state, ImportState::Failed);
        assert_eq!(report.collections[0].fetched, 3);
        assert_eq!(report.collections[0].persisted, 2);
        assert_eq!(
            report.collections[0].rejected[0].record_id.as_deref(),
            Some("C2")
        );
        assert_eq!(report.collections[1].fetched, 0);
        assert_eq!(contact::Entity::find().count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_stops_later_collections() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/invoices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"invoices": []})))
            .expect(0)
            .mount(&server)
            .await;

        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        let report = pipeline(&server, alice, db.clone()).await.run("code").await;

        assert_eq!(report.outcome(), ImportOutcome::Failed);
        assert_eq!(report.collections.len(), 1);
        assert!(report.collections[0].fetch_error.is_some());
        assert_eq!(invoice::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn token_failure_fetches_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/v2/token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        let report = pipeline(&server, alice, db).await.run("code").await;

        assert_eq!(report.state, ImportState::Failed);
        assert!(report.collections.is_empty());
        assert!(report.failure.is_some());
    }

    #[tokio::test]
    async fn unknown_user_is_rejected_before_binding() {
        let db = test_support::migrated_db().await;
        let service = ImportService::new(
            Arc::new(db),
            ZohoConfig {
                callback_port: 0,
                ..ZohoConfig::default()
            },
            Arc::new(LogOnlyLauncher),
        );
        let result = service
            .run(
                ImportCredentials {
                    client_id: "id".into(),
                    client_secret: "secret".into(),
                },
                "ghost",
            )
            .await;
        assert!(matches!(result, Err(ImportError::UnknownUser(name)) if name == "ghost"));
    }
}
