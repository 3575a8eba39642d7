use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, EntityTrait, IntoActiveModel};
use serde_json::Value;
use uuid::Uuid;

use super::{
    check_owner, parse_part, raw_record_id, write_row, RecordRejection, RecordSerializer,
    SerializerError,
};
use crate::entities::expense;
use crate::import::ResourceKind;

pub struct ExpenseSerializer;

#[async_trait]
impl RecordSerializer for ExpenseSerializer {
    type Record = expense::Model;

    const RESOURCE: ResourceKind = ResourceKind::Expenses;
    const ID_FIELD: &'static str = "expense_id";

    fn deserialize(value: &Value, owner: Uuid) -> Result<expense::Model, RecordRejection> {
        let record_id = raw_record_id(value, Self::ID_FIELD);
        let mut expense: expense::Model = parse_part(value, &record_id)?;
        expense.user_id = owner;
        Ok(expense)
    }

    fn record_id(record: &expense::Model) -> &str {
        &record.expense_id
    }

    async fn persist(
        txn: &DatabaseTransaction,
        record: expense::Model,
    ) -> Result<(), SerializerError> {
        let stored = expense::Entity::find_by_id(record.expense_id.clone())
            .one(txn)
            .await?;
        let exists = check_owner(
            "expense",
            &record.expense_id,
            stored.map(|e| e.user_id),
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

    #[tokio::test]
    async fn sparse_expense_is_accepted() {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        save::<ExpenseSerializer>(&db, alice, &json!({"expense_id": "E1"}))
            .await
            .unwrap();

        let full = json!({
            "expense_id": "E1",
            "date": "2024-04-02",
            "account_name": "Travel",
            "paid_through_account_name": "Petty Cash",
            "vendor_name": "Rail Co",
            "total": "42.10",
            "is_billable": "true",
            "mileage_rate": 0.5
        });
        save::<ExpenseSerializer>(&db, alice, &full).await.unwrap();

        let stored = expense::Entity::find_by_id("E1").one(&db).await.unwrap().unwrap();
        assert_eq!(stored.total, Some(dec!(42.10)));
        assert_eq!(stored.is_billable, Some(true));
        assert_eq!(stored.vendor_name.as_deref(), Some("Rail Co"));
    }

    #[test]
    fn expense_id_is_required() {
        let rejection =
            ExpenseSerializer::deserialize(&json!({"total": 10}), Uuid::new_v4()).unwrap_err();
        assert_eq!(rejection.record_id, None);
    }
}
