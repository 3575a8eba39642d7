use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseTransaction, EntityTrait, IntoActiveModel, QueryFilter, Set,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use super::{
    bind_people, check_owner, fields, parse_part, raw_record_id, replace_addresses,
    resolve_people, write_row, AddressBlocks, AddressParent, PersonRef, RecordRejection,
    RecordSerializer, SerializerError,
};
use crate::entities::{credit_note, credit_note_contact_person};
use crate::import::ResourceKind;

pub struct CreditNoteSerializer;

#[derive(Debug, Clone)]
pub struct CreditNoteRecord {
    pub credit_note: credit_note::Model,
    pub addresses: AddressBlocks,
    pub contact_persons: Vec<PersonRef>,
}

#[derive(Debug, Default, Deserialize)]
struct CreditNoteChildren {
    #[serde(default, deserialize_with = "fields::list")]
    contact_persons: Vec<PersonRef>,
}

#[async_trait]
impl RecordSerializer for CreditNoteSerializer {
    type Record = CreditNoteRecord;

    const RESOURCE: ResourceKind = ResourceKind::CreditNotes;
    const ID_FIELD: &'static str = "creditnote_id";

    fn deserialize(value: &Value, owner: Uuid) -> Result<CreditNoteRecord, RecordRejection> {
        let record_id = raw_record_id(value, Self::ID_FIELD);

        let mut credit_note: credit_note::Model = parse_part(value, &record_id)?;
        credit_note.user_id = owner;

        let addresses = AddressBlocks::deserialize(value)
            .map_err(|e| RecordRejection::new(record_id.clone(), e.to_string()))?;
        addresses.validate_all(&record_id)?;

        let mut children = CreditNoteChildren::deserialize(value)
            .map_err(|e| RecordRejection::new(record_id.clone(), e.to_string()))?;
        bind_people(&mut children.contact_persons, owner, &record_id)?;

        Ok(CreditNoteRecord {
            credit_note,
            addresses,
            contact_persons: children.contact_persons,
        })
    }

    fn record_id(record: &CreditNoteRecord) -> &str {
        &record.credit_note.creditnote_id
    }

    async fn persist(
        txn: &DatabaseTransaction,
        record: CreditNoteRecord,
    ) -> Result<(), SerializerError> {
        let CreditNoteRecord {
            credit_note,
            addresses,
            contact_persons,
        } = record;
        let id = credit_note.creditnote_id.clone();
        let owner = credit_note.user_id;

        let stored = credit_note::Entity::find_by_id(id.clone()).one(txn).await?;
        let exists = check_owner("credit note", &id, stored.map(|c| c.user_id), owner)?;
        write_row(txn, credit_note.into_active_model(), exists).await?;

        replace_addresses(txn, AddressParent::CreditNote(&id), addresses).await?;

        let linked = resolve_people(txn, owner, contact_persons).await?;
        credit_note_contact_person::Entity::delete_many()
            .filter(credit_note_contact_person::Column::CreditNoteId.eq(id.clone()))
            .exec(txn)
            .await?;
        if !linked.is_empty() {
            credit_note_contact_person::Entity::insert_many(linked.into_iter().map(
                |person_id| credit_note_contact_person::ActiveModel {
                    credit_note_id: Set(id.clone()),
                    contact_person_id: Set(person_id),
                },
            ))
            .exec_without_returning(txn)
            .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{address, contact_person};
    use crate::serializers::{save, test_support};
    use rust_decimal_macros::dec;
    use sea_orm::ModelTrait;
    use serde_json::json;

    fn credit_note() -> Value {
        json!({
            "creditnote_id": "CN-1",
            "creditnote_number": "CN-00001",
            "date": "2024-05-10",
            "status": "open",
            "currency_code": "INR",
            "total": "150",
            "balance": 150,
            "customer_id": "C1",
            "invoice_id": "INV-DOES-NOT-EXIST",
            "billing_address": {"city": "Pune"},
            "shipping_address": {"city": "Mumbai"},
            "contact_persons": [{"contact_person_id": "P9", "first_name": "Ravi"}]
        })
    }

    #[tokio::test]
    async fn stores_credit_note_without_invoice_fk() {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        save::<CreditNoteSerializer>(&db, alice, &credit_note())
            .await
            .unwrap();

        let stored = credit_note::Entity::find_by_id("CN-1")
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.total, dec!(150));
        assert_eq!(stored.exchange_rate, dec!(1));
        assert!(!stored.is_viewed_by_client);
        assert_eq!(stored.invoice_id.as_deref(), Some("INV-DOES-NOT-EXIST"));

        let addresses = stored.find_related(address::Entity).all(&db).await.unwrap();
        assert_eq!(addresses.len(), 2);
        let people = stored
            .find_related(contact_person::Entity)
            .all(&db)
            .await
            .unwrap();
        assert_eq!(people[0].first_name.as_deref(), Some("Ravi"));
    }

    #[test]
    fn balance_and_total_are_required() {
        let owner = Uuid::new_v4();
        for field in ["total", "balance", "customer_id", "date"] {
            let mut value = credit_note();
            value.as_object_mut().unwrap().remove(field);
            assert!(
                CreditNoteSerializer::deserialize(&value, owner).is_err(),
                "{field} should be required"
            );
        }
    }
}
