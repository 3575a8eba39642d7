//! Record serializers turn one Books API document into typed rows and write
//! them, with their owned children, inside a single transaction.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, IntoActiveModel, QueryFilter, TransactionTrait,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::{debug, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::{address, contact_person};
use crate::errors::ServiceError;
use crate::import::ResourceKind;

pub mod contact;
pub mod credit_note;
pub mod expense;
pub mod fields;
pub mod invoice;
pub mod sales_order;

pub use contact::ContactSerializer;
pub use credit_note::CreditNoteSerializer;
pub use expense::ExpenseSerializer;
pub use invoice::InvoiceSerializer;
pub use sales_order::SalesOrderSerializer;

/// A record that failed validation or persistence. Collected, never raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecordRejection {
    pub record_id: Option<String>,
    pub message: String,
}

impl RecordRejection {
    pub fn new(record_id: Option<String>, message: impl Into<String>) -> Self {
        Self {
            record_id,
            message: message.into(),
        }
    }
}

impl fmt::Display for RecordRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.record_id {
            Some(id) => write!(f, "record {}: {}", id, self.message),
            None => write!(f, "record without id: {}", self.message),
        }
    }
}

#[derive(Debug, Error)]
pub enum SerializerError {
    #[error("{0}")]
    Invalid(RecordRejection),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SerializerError> for ServiceError {
    fn from(err: SerializerError) -> Self {
        match err {
            SerializerError::Invalid(rejection) => ServiceError::ValidationError(rejection.message),
            SerializerError::Conflict(msg) => ServiceError::Conflict(msg),
            SerializerError::Database(db) => ServiceError::DatabaseError(db),
        }
    }
}

/// One implementation per imported collection.
#[async_trait]
pub trait RecordSerializer: Send + Sync + 'static {
    /// Validated parent row plus its owned children
    type Record: Send + 'static;

    const RESOURCE: ResourceKind;

    /// JSON key carrying the external identifier
    const ID_FIELD: &'static str;

    /// Parse and validate `value`, binding the record and its children to `owner`
    fn deserialize(value: &Value, owner: Uuid) -> Result<Self::Record, RecordRejection>;

    fn record_id(record: &Self::Record) -> &str;

    /// Upsert the parent and replace its children. Runs inside the caller's transaction.
    async fn persist(txn: &DatabaseTransaction, record: Self::Record)
        -> Result<(), SerializerError>;
}

/// Validate then persist one document for `owner`, returning its external id
#[instrument(skip(db, value), fields(resource = %S::RESOURCE))]
pub async fn save<S: RecordSerializer>(
    db: &DatabaseConnection,
    owner: Uuid,
    value: &Value,
) -> Result<String, SerializerError> {
    let record = S::deserialize(value, owner).map_err(SerializerError::Invalid)?;
    let id = S::record_id(&record).to_string();

    let txn = db.begin().await?;
    S::persist(&txn, record).await?;
    txn.commit().await?;

    debug!(record_id = %id, "record persisted");
    Ok(id)
}

/// External id of a raw document, if it has a usable one
pub fn raw_record_id(value: &Value, id_field: &str) -> Option<String> {
    match value.get(id_field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Deserialize one typed part of a document and run its validators
pub(crate) fn parse_part<T>(value: &Value, record_id: &Option<String>) -> Result<T, RecordRejection>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = T::deserialize(value)
        .map_err(|e| RecordRejection::new(record_id.clone(), e.to_string()))?;
    parsed
        .validate()
        .map_err(|e| RecordRejection::new(record_id.clone(), e.to_string()))?;
    Ok(parsed)
}

/// Reject writes to a row stored for someone else. Returns whether the row exists.
pub(crate) fn check_owner(
    resource: &str,
    id: &str,
    stored_owner: Option<Uuid>,
    owner: Uuid,
) -> Result<bool, SerializerError> {
    match stored_owner {
        Some(existing) if existing != owner => Err(SerializerError::Conflict(format!(
            "{resource} {id} belongs to another user"
        ))),
        Some(_) => Ok(true),
        None => Ok(false),
    }
}

/// Insert a fresh row or overwrite every column of an existing one
pub(crate) async fn write_row<A>(
    txn: &DatabaseTransaction,
    active: A,
    exists: bool,
) -> Result<(), DbErr>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    if exists {
        active.reset_all().update(txn).await?;
    } else {
        A::Entity::insert(active).exec_without_returning(txn).await?;
    }
    Ok(())
}

/// Billing and shipping blocks as sent by the API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressBlocks {
    #[serde(default, deserialize_with = "fields::opt_object")]
    pub billing_address: Option<address::Model>,
    #[serde(default, deserialize_with = "fields::opt_object")]
    pub shipping_address: Option<address::Model>,
}

impl AddressBlocks {
    pub fn validate_all(&self, record_id: &Option<String>) -> Result<(), RecordRejection> {
        for block in [&self.billing_address, &self.shipping_address]
            .into_iter()
            .flatten()
        {
            block
                .validate()
                .map_err(|e| RecordRejection::new(record_id.clone(), e.to_string()))?;
        }
        Ok(())
    }
}

/// Parent an address row hangs off
#[derive(Debug, Clone, Copy)]
pub(crate) enum AddressParent<'a> {
    Contact(&'a str),
    SalesOrder(&'a str),
    CreditNote(&'a str),
}

/// Drop the parent's addresses and store the given blocks in their place
pub(crate) async fn replace_addresses(
    txn: &DatabaseTransaction,
    parent: AddressParent<'_>,
    blocks: AddressBlocks,
) -> Result<(), DbErr> {
    let column = match parent {
        AddressParent::Contact(_) => address::Column::ContactId,
        AddressParent::SalesOrder(_) => address::Column::SalesOrderId,
        AddressParent::CreditNote(_) => address::Column::CreditNoteId,
    };
    let parent_id = match parent {
        AddressParent::Contact(id) | AddressParent::SalesOrder(id) | AddressParent::CreditNote(id) => {
            id.to_string()
        }
    };

    address::Entity::delete_many()
        .filter(column.eq(parent_id.clone()))
        .exec(txn)
        .await?;

    let typed = [
        (address::AddressType::Billing, blocks.billing_address),
        (address::AddressType::Shipping, blocks.shipping_address),
    ];
    for (kind, block) in typed {
        let Some(mut row) = block else { continue };
        row.id = Uuid::new_v4();
        row.address_type = kind.to_string();
        row.contact_id = None;
        row.sales_order_id = None;
        row.credit_note_id = None;
        match parent {
            AddressParent::Contact(_) => row.contact_id = Some(parent_id.clone()),
            AddressParent::SalesOrder(_) => row.sales_order_id = Some(parent_id.clone()),
            AddressParent::CreditNote(_) => row.credit_note_id = Some(parent_id.clone()),
        }
        address::Entity::insert(row.into_active_model())
            .exec_without_returning(txn)
            .await?;
    }
    Ok(())
}

/// A contact person is either referenced by id or embedded in full
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PersonRef {
    Id(String),
    Person(Box<contact_person::Model>),
}

pub(crate) fn bind_people(
    refs: &mut [PersonRef],
    owner: Uuid,
    record_id: &Option<String>,
) -> Result<(), RecordRejection> {
    for reference in refs.iter_mut() {
        if let PersonRef::Person(person) = reference {
            person.user_id = owner;
            person
                .validate()
                .map_err(|e| RecordRejection::new(record_id.clone(), e.to_string()))?;
        }
    }
    Ok(())
}

/// Store embedded people and return the ids that may be linked for `owner`.
/// Bare ids are linked only when the person already exists for the same owner.
pub(crate) async fn resolve_people(
    txn: &DatabaseTransaction,
    owner: Uuid,
    refs: Vec<PersonRef>,
) -> Result<Vec<String>, SerializerError> {
    let mut linked: Vec<String> = Vec::with_capacity(refs.len());
    for reference in refs {
        let id = match reference {
            PersonRef::Id(id) => {
                let known = contact_person::Entity::find_by_id(id.clone())
                    .filter(contact_person::Column::UserId.eq(owner))
                    .one(txn)
                    .await?;
                if known.is_none() {
                    debug!(contact_person_id = %id, "skipping link to unknown contact person");
                    continue;
                }
                id
            }
            PersonRef::Person(person) => {
                let stored = contact_person::Entity::find_by_id(person.contact_person_id.clone())
                    .one(txn)
                    .await?;
                let exists = check_owner(
                    "contact person",
                    &person.contact_person_id,
                    stored.map(|p| p.user_id),
                    owner,
                )?;
                let id = person.contact_person_id.clone();
                write_row(txn, (*person).into_active_model(), exists).await?;
                id
            }
        };
        if !linked.contains(&id) {
            linked.push(id);
        }
    }
    Ok(linked)
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_record_id_accepts_strings_and_numbers() {
        assert_eq!(
            raw_record_id(&json!({"contact_id": "C1"}), "contact_id"),
            Some("C1".to_string())
        );
        assert_eq!(
            raw_record_id(&json!({"contact_id": 460000000026049u64}), "contact_id"),
            Some("460000000026049".to_string())
        );
        assert_eq!(raw_record_id(&json!({"contact_id": ""}), "contact_id"), None);
        assert_eq!(raw_record_id(&json!({}), "contact_id"), None);
    }

    #[test]
    fn owner_check_flags_foreign_rows() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        assert!(!check_owner("contact", "C1", None, alice).unwrap());
        assert!(check_owner("contact", "C1", Some(alice), alice).unwrap());
        assert!(matches!(
            check_owner("contact", "C1", Some(bob), alice),
            Err(SerializerError::Conflict(_))
        ));
    }

    #[test]
    fn blank_address_blocks_are_dropped() {
        let blocks: AddressBlocks = serde_json::from_value(json!({
            "billing_address": {"address": "", "city": "", "zip": ""},
            "shipping_address": {"address": "4900 Hopyard Rd", "city": "Pleasanton"}
        }))
        .unwrap();
        assert!(blocks.billing_address.is_none());
        assert_eq!(
            blocks.shipping_address.and_then(|a| a.city).as_deref(),
            Some("Pleasanton")
        );
    }

    #[test]
    fn people_are_ids_or_objects() {
        let refs: Vec<PersonRef> = serde_json::from_value(json!([
            "P1",
            {"contact_person_id": "P2", "first_name": "Will", "email": "will@example.com"}
        ]))
        .unwrap();
        assert!(matches!(&refs[0], PersonRef::Id(id) if id == "P1"));
        assert!(matches!(&refs[1], PersonRef::Person(p) if p.contact_person_id == "P2"));
    }
}
