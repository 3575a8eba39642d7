use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, EntityTrait, IntoActiveModel};
use serde_json::Value;
use uuid::Uuid;

use super::{
    check_owner, parse_part, raw_record_id, write_row, RecordRejection, RecordSerializer,
    SerializerError,
};
use crate::entities::invoice;
use crate::import::ResourceKind;

/// Invoices keep their line items as a JSON document, so there are no child rows.
pub struct InvoiceSerializer;

#[async_trait]
impl RecordSerializer for InvoiceSerializer {
    type Record = invoice::Model;

    const RESOURCE: ResourceKind = ResourceKind::Invoices;
    const ID_FIELD: &'static str = "invoice_id";

    fn deserialize(value: &Value, owner: Uuid) -> Result<invoice::Model, RecordRejection> {
        let record_id = raw_record_id(value, Self::ID_FIELD);
        let mut invoice: invoice::Model = parse_part(value, &record_id)?;
        invoice.user_id = owner;
        Ok(invoice)
    }

    fn record_id(record: &invoice::Model) -> &str {
        &record.invoice_id
    }

    async fn persist(
        txn: &DatabaseTransaction,
        record: invoice::Model,
    ) -> Result<(), SerializerError> {
        let stored = invoice::Entity::find_by_id(record.invoice_id.clone())
            .one(txn)
            .await?;
        let exists = check_owner(
            "invoice",
            &record.invoice_id,
            stored.map(|i| i.user_id),
            record.user_id,
        )?;
        write_row(txn, record.into_active_model(), exists).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializers::{save, test_support};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn invoice() -> Value {
        json!({
            "invoice_id": "INV-1",
            "invoice_number": "INV-00001",
            "customer_id": "C1",
            "customer_name": "Acme",
            "status": "sent",
            "date": "2024-03-01",
            "due_date": "",
            "currency_code": "INR",
            "exchange_rate": "",
            "total": "999.00",
            "line_items": [{"item_id": "I1", "quantity": 3}]
        })
    }

    #[tokio::test]
    async fn stores_invoice_items_as_json() {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        save::<InvoiceSerializer>(&db, alice, &invoice()).await.unwrap();

        let stored = invoice::Entity::find_by_id("INV-1")
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.exchange_rate, dec!(1));
        assert_eq!(stored.due_date, None);
        assert_eq!(stored.total, Some(dec!(999)));
        assert_eq!(
            stored.invoice_items,
            Some(json!([{"item_id": "I1", "quantity": 3}]))
        );
    }

    #[test]
    fn required_fields_are_enforced() {
        for field in ["invoice_number", "customer_id", "customer_name", "status", "currency_code"] {
            let mut value = invoice();
            value.as_object_mut().unwrap().remove(field);
            let rejection = InvoiceSerializer::deserialize(&value, Uuid::new_v4()).unwrap_err();
            assert!(rejection.message.contains(field), "{field}: {}", rejection.message);
        }
    }

    #[test]
    fn owner_overrides_supplied_user() {
        let owner = Uuid::new_v4();
        let mut value = invoice();
        value["user_id"] = json!(Uuid::new_v4().to_string());
        let parsed = InvoiceSerializer::deserialize(&value, owner).unwrap();
        assert_eq!(parsed.user_id, owner);
    }
}
