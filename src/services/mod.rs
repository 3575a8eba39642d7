//! Ownership-scoped access to the mirrored collections.
//!
//! Every query filters on the caller's user id; a record that exists for
//! another user is indistinguishable from a missing one.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::address;
use crate::errors::ServiceError;
use crate::export::{build_workbook, ExportCell, ExportLayout};
use crate::serializers::{save, RecordSerializer};

pub mod contacts;
pub mod credit_notes;
pub mod expenses;
pub mod invoices;
pub mod sales_orders;

pub use contacts::Contacts;
pub use credit_notes::CreditNotes;
pub use expenses::Expenses;
pub use invoices::Invoices;
pub use sales_orders::SalesOrders;

/// A top-level collection that belongs to a user and is exposed over CRUD and export
#[async_trait]
pub trait OwnedResource: Send + Sync + 'static {
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + Serialize
        + Clone
        + Send
        + Sync;
    type Serializer: RecordSerializer;
    /// Response body for a single record, children included
    type Detail: Serialize + Send;

    /// Singular noun used in messages
    const NAME: &'static str;
    /// Route prefix
    const PATH: &'static str;
    const LAYOUT: ExportLayout;

    fn owner_column() -> <Self::Entity as EntityTrait>::Column;
    fn id_column() -> <Self::Entity as EntityTrait>::Column;
    fn export_row(model: &Self::Model) -> Vec<ExportCell>;
    async fn detail(db: &DatabaseConnection, model: Self::Model) -> Result<Self::Detail, DbErr>;
}

/// One page of owned records
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// CRUD and export for one resource, always on behalf of a single owner
pub struct RecordService<R: OwnedResource> {
    db: Arc<DatabaseConnection>,
    _resource: PhantomData<R>,
}

impl<R: OwnedResource> Clone for RecordService<R> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

impl<R: OwnedResource> RecordService<R> {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            _resource: PhantomData,
        }
    }

    fn not_found(id: &str) -> ServiceError {
        ServiceError::NotFound(format!("{} {} not found", R::NAME, id))
    }

    /// Owned records ordered by external id; `page` starts at 1
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn list(&self, owner: Uuid, page: u64, per_page: u64) -> Result<Page<R::Model>, ServiceError> {
        let query = R::Entity::find().filter(R::owner_column().eq(owner));
        let total = query.clone().count(&*self.db).await?;
        let items = query
            .order_by_asc(R::id_column())
            .offset(page.saturating_sub(1) * per_page)
            .limit(per_page)
            .all(&*self.db)
            .await?;
        Ok(Page { items, total })
    }

    async fn find_owned(&self, owner: Uuid, id: &str) -> Result<R::Model, ServiceError> {
        R::Entity::find()
            .filter(R::id_column().eq(id))
            .filter(R::owner_column().eq(owner))
            .one(&*self.db)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn get(&self, owner: Uuid, id: &str) -> Result<R::Detail, ServiceError> {
        let model = self.find_owned(owner, id).await?;
        Ok(R::detail(&self.db, model).await?)
    }

    /// Store a document in the external JSON shape for `owner`
    #[instrument(skip(self, body), fields(resource = R::NAME))]
    pub async fn create(&self, owner: Uuid, body: &Value) -> Result<R::Detail, ServiceError> {
        let id = save::<R::Serializer>(&self.db, owner, body).await?;
        info!(record_id = %id, "record stored");
        self.get(owner, &id).await
    }

    /// Full replace of an owned record. The path id overrides any id in the body.
    #[instrument(skip(self, body), fields(resource = R::NAME))]
    pub async fn replace(&self, owner: Uuid, id: &str, body: Value) -> Result<R::Detail, ServiceError> {
        self.find_owned(owner, id).await?;

        let mut body = body;
        let fields = body.as_object_mut().ok_or_else(|| {
            ServiceError::ValidationError("request body must be a JSON object".to_string())
        })?;
        fields.insert(
            <R::Serializer as RecordSerializer>::ID_FIELD.to_string(),
            Value::String(id.to_string()),
        );

        save::<R::Serializer>(&self.db, owner, &body).await?;
        info!(record_id = %id, "record replaced");
        self.get(owner, id).await
    }

    /// Children go with the parent through cascading foreign keys
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn delete(&self, owner: Uuid, id: &str) -> Result<(), ServiceError> {
        self.find_owned(owner, id).await?;
        R::Entity::delete_many()
            .filter(R::id_column().eq(id))
            .filter(R::owner_column().eq(owner))
            .exec(&*self.db)
            .await?;
        info!(record_id = %id, "record deleted");
        Ok(())
    }

    /// Every owned record as a workbook
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn export(&self, owner: Uuid) -> Result<Vec<u8>, ServiceError> {
        let rows: Vec<Vec<ExportCell>> = R::Entity::find()
            .filter(R::owner_column().eq(owner))
            .order_by_asc(R::id_column())
            .all(&*self.db)
            .await?
            .iter()
            .map(R::export_row)
            .collect();
        info!(rows = rows.len(), "exporting records");
        build_workbook(&R::LAYOUT, &rows)
    }
}

/// Billing and shipping addresses of a parent, as returned to clients
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddressPair {
    pub billing_address: Option<address::Model>,
    pub shipping_address: Option<address::Model>,
}

impl From<Vec<address::Model>> for AddressPair {
    fn from(rows: Vec<address::Model>) -> Self {
        let billing = address::AddressType::Billing.to_string();
        let mut pair = AddressPair::default();
        for row in rows {
            if row.address_type == billing {
                pair.billing_address = Some(row);
            } else {
                pair.shipping_address = Some(row);
            }
        }
        pair
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializers::test_support;
    use serde_json::json;

    async fn service() -> (RecordService<Contacts>, Uuid, Uuid) {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        let bob = test_support::account(&db, "bob").await;
        (RecordService::new(Arc::new(db)), alice, bob)
    }

    #[tokio::test]
    async fn list_is_scoped_ordered_and_paged() {
        let (contacts, alice, bob) = service().await;
        for id in ["C3", "C1", "C2"] {
            contacts
                .create(alice, &json!({"contact_id": id, "contact_name": id}))
                .await
                .unwrap();
        }
        contacts
            .create(bob, &json!({"contact_id": "B1", "contact_name": "Bob's"}))
            .await
            .unwrap();

        let first = contacts.list(alice, 1, 2).await.unwrap();
        assert_eq!(first.total, 3);
        let ids: Vec<_> = first.items.iter().map(|c| c.contact_id.as_str()).collect();
        assert_eq!(ids, ["C1", "C2"]);

        let second = contacts.list(alice, 2, 2).await.unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].contact_id, "C3");
    }

    #[tokio::test]
    async fn other_owners_records_are_not_found() {
        let (contacts, alice, bob) = service().await;
        contacts
            .create(alice, &json!({"contact_id": "C1", "contact_name": "Acme"}))
            .await
            .unwrap();

        assert!(matches!(
            contacts.get(bob, "C1").await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            contacts.delete(bob, "C1").await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            contacts
                .replace(bob, "C1", json!({"contact_name": "Mine now"}))
                .await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(contacts.get(alice, "C1").await.is_ok());
    }

    #[tokio::test]
    async fn replace_uses_the_path_id() {
        let (contacts, alice, _) = service().await;
        contacts
            .create(alice, &json!({"contact_id": "C1", "contact_name": "Acme"}))
            .await
            .unwrap();

        let detail = contacts
            .replace(alice, "C1", json!({"contact_id": "OTHER", "contact_name": "Acme Ltd"}))
            .await
            .unwrap();
        assert_eq!(detail.contact.contact_id, "C1");
        assert_eq!(detail.contact.contact_name, "Acme Ltd");
        assert_eq!(contacts.list(alice, 1, 20).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn invalid_body_is_a_validation_error() {
        let (contacts, alice, _) = service().await;
        assert!(matches!(
            contacts.create(alice, &json!({"contact_id": "C1"})).await,
            Err(ServiceError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (contacts, alice, _) = service().await;
        contacts
            .create(alice, &json!({"contact_id": "C1", "contact_name": "Acme"}))
            .await
            .unwrap();
        contacts.delete(alice, "C1").await.unwrap();
        assert!(matches!(
            contacts.get(alice, "C1").await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn export_renders_a_workbook() {
        let (contacts, alice, _) = service().await;
        contacts
            .create(alice, &json!({"contact_id": "C1", "contact_name": "Acme"}))
            .await
            .unwrap();
        let bytes = contacts.export(alice).await.unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
