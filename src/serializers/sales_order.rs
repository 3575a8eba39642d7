use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseTransaction, EntityTrait, IntoActiveModel, QueryFilter, Set,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use super::{
    bind_people, check_owner, fields, parse_part, raw_record_id, replace_addresses,
    resolve_people, write_row, AddressBlocks, AddressParent, PersonRef, RecordRejection,
    RecordSerializer, SerializerError,
};
use crate::entities::{
    contact, sales_order, sales_order_contact_person, sales_order_custom_field,
    sales_order_line_item, sales_order_sub_status,
};
use crate::import::ResourceKind;

pub struct SalesOrderSerializer;

#[derive(Debug, Clone)]
pub struct SalesOrderRecord {
    pub order: sales_order::Model,
    pub line_items: Vec<sales_order_line_item::Model>,
    pub sub_statuses: Vec<sales_order_sub_status::Model>,
    pub custom_fields: Vec<sales_order_custom_field::Model>,
    pub addresses: AddressBlocks,
    pub contact_persons: Vec<PersonRef>,
}

#[derive(Debug, Default, Deserialize)]
struct SalesOrderChildren {
    #[serde(default, deserialize_with = "fields::list")]
    line_items: Vec<sales_order_line_item::Model>,
    #[serde(default, deserialize_with = "fields::list")]
    sub_statuses: Vec<sales_order_sub_status::Model>,
    #[serde(default, deserialize_with = "fields::list")]
    custom_fields: Vec<sales_order_custom_field::Model>,
    #[serde(default, deserialize_with = "fields::list")]
    contact_persons: Vec<PersonRef>,
}

fn validate_each<T: Validate>(
    rows: &[T],
    record_id: &Option<String>,
) -> Result<(), RecordRejection> {
    for row in rows {
        row.validate()
            .map_err(|e| RecordRejection::new(record_id.clone(), e.to_string()))?;
    }
    Ok(())
}

#[async_trait]
impl RecordSerializer for SalesOrderSerializer {
    type Record = SalesOrderRecord;

    const RESOURCE: ResourceKind = ResourceKind::SalesOrders;
    const ID_FIELD: &'static str = "salesorder_id";

    fn deserialize(value: &Value, owner: Uuid) -> Result<SalesOrderRecord, RecordRejection> {
        let record_id = raw_record_id(value, Self::ID_FIELD);

        let mut order: sales_order::Model = parse_part(value, &record_id)?;
        order.user_id = owner;
        order.contact_id = None;

        let addresses = AddressBlocks::deserialize(value)
            .map_err(|e| RecordRejection::new(record_id.clone(), e.to_string()))?;
        addresses.validate_all(&record_id)?;

        let mut children = SalesOrderChildren::deserialize(value)
            .map_err(|e| RecordRejection::new(record_id.clone(), e.to_string()))?;
        validate_each(&children.line_items, &record_id)?;
        validate_each(&children.sub_statuses, &record_id)?;
        validate_each(&children.custom_fields, &record_id)?;
        bind_people(&mut children.contact_persons, owner, &record_id)?;

        for (position, item) in children.line_items.iter_mut().enumerate() {
            item.position = position as i32;
        }

        Ok(SalesOrderRecord {
            order,
            line_items: children.line_items,
            sub_statuses: children.sub_statuses,
            custom_fields: children.custom_fields,
            addresses,
            contact_persons: children.contact_persons,
        })
    }

    fn record_id(record: &SalesOrderRecord) -> &str {
        &record.order.salesorder_id
    }

    async fn persist(
        txn: &DatabaseTransaction,
        record: SalesOrderRecord,
    ) -> Result<(), SerializerError> {
        let SalesOrderRecord {
            mut order,
            line_items,
            sub_statuses,
            custom_fields,
            addresses,
            contact_persons,
        } = record;
        let id = order.salesorder_id.clone();
        let owner = order.user_id;

        if let Some(customer_id) = order.customer_id.clone() {
            let customer = contact::Entity::find_by_id(customer_id)
                .filter(contact::Column::UserId.eq(owner))
                .one(txn)
                .await?;
            order.contact_id = customer.map(|c| c.contact_id);
        }

        let stored = sales_order::Entity::find_by_id(id.clone()).one(txn).await?;
        let exists = check_owner("sales order", &id, stored.map(|o| o.user_id), owner)?;
        write_row(txn, order.into_active_model(), exists).await?;

        sales_order_line_item::Entity::delete_many()
            .filter(sales_order_line_item::Column::SalesOrderId.eq(id.clone()))
            .exec(txn)
            .await?;
        if !line_items.is_empty() {
            sales_order_line_item::Entity::insert_many(line_items.into_iter().map(|mut item| {
                item.id = Uuid::new_v4();
                item.sales_order_id = id.clone();
                item.into_active_model()
            }))
            .exec_without_returning(txn)
            .await?;
        }

        sales_order_sub_status::Entity::delete_many()
            .filter(sales_order_sub_status::Column::SalesOrderId.eq(id.clone()))
            .exec(txn)
            .await?;
        if !sub_statuses.is_empty() {
            sales_order_sub_status::Entity::insert_many(sub_statuses.into_iter().map(
                |mut status| {
                    status.id = Uuid::new_v4();
                    status.sales_order_id = id.clone();
                    status.into_active_model()
                },
            ))
            .exec_without_returning(txn)
            .await?;
        }

        sales_order_custom_field::Entity::delete_many()
            .filter(sales_order_custom_field::Column::SalesOrderId.eq(id.clone()))
            .exec(txn)
            .await?;
        if !custom_fields.is_empty() {
            sales_order_custom_field::Entity::insert_many(custom_fields.into_iter().map(
                |mut field| {
                    field.id = Uuid::new_v4();
                    field.sales_order_id = id.clone();
                    field.into_active_model()
                },
            ))
            .exec_without_returning(txn)
            .await?;
        }

        replace_addresses(txn, AddressParent::SalesOrder(&id), addresses).await?;

        let linked = resolve_people(txn, owner, contact_persons).await?;
        sales_order_contact_person::Entity::delete_many()
            .filter(sales_order_contact_person::Column::SalesOrderId.eq(id.clone()))
            .exec(txn)
            .await?;
        if !linked.is_empty() {
            sales_order_contact_person::Entity::insert_many(linked.into_iter().map(
                |person_id| sales_order_contact_person::ActiveModel {
                    sales_order_id: Set(id.clone()),
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
    use assert_matches::assert_matches;
    use crate::serializers::{save, test_support, ContactSerializer};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use sea_orm::{ModelTrait, PaginatorTrait, QueryOrder};
    use serde_json::json;

    fn order() -> Value {
        json!({
            "salesorder_id": "SO-1",
            "salesorder_number": "SO-00001",
            "customer_id": "C1",
            "customer_name": "Acme",
            "date": "2024-02-01",
            "shipment_date": "",
            "status": "open",
            "shipping_charge": "",
            "total": 120.5,
            "line_items": [
                {"line_item_id": "L1", "name": "Widget", "quantity": 2, "rate": "50.25"},
                {"line_item_id": "L2", "name": "Gadget", "quantity": "1", "rate": 20}
            ],
            "sub_statuses": [{"status_id": "S1", "status_code": "cs_packed", "color_code": "#ff0000"}],
            "custom_fields": [{"customfield_id": "CF1", "index": 1, "label": "PO", "value": 4711}],
            "billing_address": {"city": "Chennai"}
        })
    }

    #[tokio::test]
    async fn stores_order_with_children_in_order() {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;

        save::<SalesOrderSerializer>(&db, alice, &order()).await.unwrap();

        let stored = sales_order::Entity::find_by_id("SO-1")
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(stored.shipment_date, None);
        assert_eq!(stored.shipping_charge, dec!(0));
        assert_eq!(stored.contact_id, None);

        let items = stored
            .find_related(sales_order_line_item::Entity)
            .order_by_asc(sales_order_line_item::Column::Position)
            .all(&db)
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name.as_deref(), Some("Widget"));
        assert_eq!(items[1].quantity, Some(dec!(1)));

        let fields = stored
            .find_related(sales_order_custom_field::Entity)
            .all(&db)
            .await
            .unwrap();
        assert_eq!(fields[0].value.as_deref(), Some("4711"));
    }

    #[tokio::test]
    async fn links_customer_only_when_owned() {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        let bob = test_support::account(&db, "bob").await;
        save::<ContactSerializer>(&db, bob, &json!({"contact_id": "C1", "contact_name": "Acme"}))
            .await
            .unwrap();

        save::<SalesOrderSerializer>(&db, alice, &order()).await.unwrap();
        let stored = sales_order::Entity::find_by_id("SO-1").one(&db).await.unwrap().unwrap();
        assert_eq!(stored.contact_id, None);

        save::<ContactSerializer>(&db, alice, &json!({"contact_id": "C2", "contact_name": "Own"}))
            .await
            .unwrap();
        let mut own = order();
        own["salesorder_id"] = json!("SO-2");
        own["customer_id"] = json!("C2");
        save::<SalesOrderSerializer>(&db, alice, &own).await.unwrap();
        let stored = sales_order::Entity::find_by_id("SO-2").one(&db).await.unwrap().unwrap();
        assert_eq!(stored.contact_id.as_deref(), Some("C2"));
    }

    #[tokio::test]
    async fn invalid_child_rolls_back_nothing_written() {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;

        let mut bad = order();
        bad["sub_statuses"] = json!([{"status_id": "S1", "color_code": "#ff00ff00"}]);
        let result = save::<SalesOrderSerializer>(&db, alice, &bad).await;
        assert_matches!(result, Err(SerializerError::Invalid(_)));
        assert_eq!(sales_order::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(
            sales_order_line_item::Entity::find().count(&db).await.unwrap(),
            0
        );
    }

    #[test]
    fn missing_date_is_rejected() {
        let mut value = order();
        value.as_object_mut().unwrap().remove("date");
        let rejection = SalesOrderSerializer::deserialize(&value, Uuid::new_v4()).unwrap_err();
        assert_eq!(rejection.record_id.as_deref(), Some("SO-1"));
    }
}
