use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseTransaction, EntityTrait, IntoActiveModel, QueryFilter, Set,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use super::{
    check_owner, fields, parse_part, raw_record_id, replace_addresses, resolve_people, write_row,
    bind_people, AddressBlocks, AddressParent, PersonRef, RecordRejection, RecordSerializer,
    SerializerError,
};
use crate::entities::{contact, contact_contact_person, default_templates};
use crate::import::ResourceKind;

pub struct ContactSerializer;

/// A contact with the blocks it owns
#[derive(Debug, Clone)]
pub struct ContactRecord {
    pub contact: contact::Model,
    pub addresses: AddressBlocks,
    pub contact_persons: Vec<PersonRef>,
    pub default_templates: Option<default_templates::Model>,
}

#[derive(Debug, Default, Deserialize)]
struct ContactChildren {
    #[serde(default, deserialize_with = "fields::list")]
    contact_persons: Vec<PersonRef>,
    #[serde(default, deserialize_with = "fields::opt_object")]
    default_templates: Option<default_templates::Model>,
}

#[async_trait]
impl RecordSerializer for ContactSerializer {
    type Record = ContactRecord;

    const RESOURCE: ResourceKind = ResourceKind::Contacts;
    const ID_FIELD: &'static str = "contact_id";

    fn deserialize(value: &Value, owner: Uuid) -> Result<ContactRecord, RecordRejection> {
        let record_id = raw_record_id(value, Self::ID_FIELD);

        let mut contact: contact::Model = parse_part(value, &record_id)?;
        contact.user_id = owner;

        let addresses = AddressBlocks::deserialize(value)
            .map_err(|e| RecordRejection::new(record_id.clone(), e.to_string()))?;
        addresses.validate_all(&record_id)?;

        let mut children = ContactChildren::deserialize(value)
            .map_err(|e| RecordRejection::new(record_id.clone(), e.to_string()))?;
        bind_people(&mut children.contact_persons, owner, &record_id)?;

        Ok(ContactRecord {
            contact,
            addresses,
            contact_persons: children.contact_persons,
            default_templates: children.default_templates,
        })
    }

    fn record_id(record: &ContactRecord) -> &str {
        &record.contact.contact_id
    }

    async fn persist(
        txn: &DatabaseTransaction,
        record: ContactRecord,
    ) -> Result<(), SerializerError> {
        let ContactRecord {
            contact,
            addresses,
            contact_persons,
            default_templates: templates,
        } = record;
        let id = contact.contact_id.clone();
        let owner = contact.user_id;

        let stored = contact::Entity::find_by_id(id.clone()).one(txn).await?;
        let exists = check_owner("contact", &id, stored.map(|c| c.user_id), owner)?;
        write_row(txn, contact.into_active_model(), exists).await?;

        replace_addresses(txn, AddressParent::Contact(&id), addresses).await?;

        default_templates::Entity::delete_by_id(id.clone())
            .exec(txn)
            .await?;
        if let Some(mut templates) = templates {
            templates.contact_id = id.clone();
            default_templates::Entity::insert(templates.into_active_model())
                .exec_without_returning(txn)
                .await?;
        }

        let linked = resolve_people(txn, owner, contact_persons).await?;
        contact_contact_person::Entity::delete_many()
            .filter(contact_contact_person::Column::ContactId.eq(id.clone()))
            .exec(txn)
            .await?;
        if !linked.is_empty() {
            contact_contact_person::Entity::insert_many(linked.into_iter().map(|person_id| {
                contact_contact_person::ActiveModel {
                    contact_id: Set(id.clone()),
                    contact_person_id: Set(person_id),
                }
            }))
            .exec_without_returning(txn)
            .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::entities::{address, contact_person};
    use crate::serializers::{save, test_support};
    use rust_decimal_macros::dec;
    use sea_orm::{ModelTrait, PaginatorTrait};
    use serde_json::json;

    fn acme() -> Value {
        json!({
            "contact_id": "C1",
            "contact_name": "Acme",
            "company_name": "Acme Corp",
            "email": "billing@acme.test",
            "outstanding_receivable_amount_bcy": "250.50",
            "payment_terms": "15",
            "created_time": "2024-01-31T10:15:00+0530",
            "billing_address": {"address": "4900 Hopyard Rd", "city": "Pleasanton", "zip": "94588"},
            "shipping_address": {"address": "", "city": ""},
            "contact_persons": [
                {"contact_person_id": "P1", "first_name": "Will", "email": "will@acme.test", "is_primary_contact": true}
            ],
            "default_templates": {"invoice_template_id": "T-INV"},
            "user_id": "00000000-0000-0000-0000-000000000000"
        })
    }

    #[tokio::test]
    async fn stores_contact_with_children_for_owner() {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;

        let id = save::<ContactSerializer>(&db, alice, &acme()).await.unwrap();
        assert_eq!(id, "C1");

        let stored = contact::Entity::find_by_id("C1").one(&db).await.unwrap().unwrap();
        assert_eq!(stored.user_id, alice);
        assert_eq!(stored.outstanding_receivable_amount_bcy, dec!(250.50));
        assert_eq!(stored.exchange_rate, dec!(1));
        assert_eq!(stored.payment_terms, Some(15));

        let addresses = stored.find_related(address::Entity).all(&db).await.unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].address_type, "billing");

        let people = stored
            .find_related(contact_person::Entity)
            .all(&db)
            .await
            .unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].user_id, alice);

        let templates = default_templates::Entity::find_by_id("C1")
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(templates.invoice_template_id.as_deref(), Some("T-INV"));
    }

    #[tokio::test]
    async fn reimport_overwrites_and_replaces_children() {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        save::<ContactSerializer>(&db, alice, &acme()).await.unwrap();

        let updated = json!({
            "contact_id": "C1",
            "contact_name": "Acme Renamed",
            "shipping_address": {"city": "Austin"}
        });
        save::<ContactSerializer>(&db, alice, &updated).await.unwrap();

        assert_eq!(contact::Entity::find().count(&db).await.unwrap(), 1);
        let stored = contact::Entity::find_by_id("C1").one(&db).await.unwrap().unwrap();
        assert_eq!(stored.contact_name, "Acme Renamed");
        assert_eq!(stored.company_name, None);

        let addresses = stored.find_related(address::Entity).all(&db).await.unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].address_type, "shipping");
        assert_eq!(
            contact_contact_person::Entity::find().count(&db).await.unwrap(),
            0
        );
        assert!(default_templates::Entity::find_by_id("C1")
            .one(&db)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn foreign_contact_is_a_conflict() {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        let bob = test_support::account(&db, "bob").await;
        save::<ContactSerializer>(&db, alice, &acme()).await.unwrap();

        let result = save::<ContactSerializer>(&db, bob, &acme()).await;
        assert_matches!(result, Err(SerializerError::Conflict(_)));

        let stored = contact::Entity::find_by_id("C1").one(&db).await.unwrap().unwrap();
        assert_eq!(stored.user_id, alice);
    }

    #[test]
    fn missing_name_and_bad_email_are_rejected() {
        let owner = Uuid::new_v4();
        let rejection =
            ContactSerializer::deserialize(&json!({"contact_id": "C2"}), owner).unwrap_err();
        assert_eq!(rejection.record_id.as_deref(), Some("C2"));

        let rejection = ContactSerializer::deserialize(
            &json!({"contact_id": "C3", "contact_name": "X", "email": "not-an-email"}),
            owner,
        )
        .unwrap_err();
        assert!(rejection.message.contains("email"));
    }

    #[tokio::test]
    async fn bare_person_ids_link_only_known_people() {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        save::<ContactSerializer>(&db, alice, &acme()).await.unwrap();

        let second = json!({
            "contact_id": "C2",
            "contact_name": "Globex",
            "contact_persons": ["P1", "P404"]
        });
        save::<ContactSerializer>(&db, alice, &second).await.unwrap();

        let links = contact_contact_person::Entity::find()
            .filter(contact_contact_person::Column::ContactId.eq("C2"))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].contact_person_id, "P1");
    }
}
