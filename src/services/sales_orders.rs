use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, ModelTrait, QueryOrder};
use serde::Serialize;

use super::{AddressPair, OwnedResource};
use crate::entities::{
    address, contact_person, sales_order, sales_order_custom_field, sales_order_line_item,
    sales_order_sub_status,
};
use crate::export::{ExportCell, ExportLayout};
use crate::serializers::SalesOrderSerializer;

pub struct SalesOrders;

#[derive(Debug, Clone, Serialize)]
pub struct SalesOrderDetail {
    #[serde(flatten)]
    pub order: sales_order::Model,
    #[serde(flatten)]
    pub addresses: AddressPair,
    pub line_items: Vec<sales_order_line_item::Model>,
    pub sub_statuses: Vec<sales_order_sub_status::Model>,
    pub custom_fields: Vec<sales_order_custom_field::Model>,
    pub contact_persons: Vec<contact_person::Model>,
}

#[async_trait]
impl OwnedResource for SalesOrders {
    type Entity = sales_order::Entity;
    type Model = sales_order::Model;
    type Serializer = SalesOrderSerializer;
    type Detail = SalesOrderDetail;

    const NAME: &'static str = "sales order";
    const PATH: &'static str = "/sales_order";
    /// "Date Created" is the order `date`, not `shipment_date`
    const LAYOUT: ExportLayout = ExportLayout {
        title: "Sales Orders",
        headers: &["ID", "Order Number", "Customer", "Date Created"],
    };

    fn owner_column() -> sales_order::Column {
        sales_order::Column::UserId
    }

    fn id_column() -> sales_order::Column {
        sales_order::Column::SalesorderId
    }

    fn export_row(model: &sales_order::Model) -> Vec<ExportCell> {
        vec![
            ExportCell::from(model.salesorder_id.as_str()),
            ExportCell::from(model.salesorder_number.as_str()),
            ExportCell::text(model.customer_name.as_deref()),
            ExportCell::date(Some(model.date)),
        ]
    }

    async fn detail(
        db: &DatabaseConnection,
        model: sales_order::Model,
    ) -> Result<SalesOrderDetail, DbErr> {
        let addresses = model.find_related(address::Entity).all(db).await?;
        let line_items = model
            .find_related(sales_order_line_item::Entity)
            .order_by_asc(sales_order_line_item::Column::Position)
            .all(db)
            .await?;
        let sub_statuses = model.find_related(sales_order_sub_status::Entity).all(db).await?;
        let custom_fields = model
            .find_related(sales_order_custom_field::Entity)
            .order_by_asc(sales_order_custom_field::Column::Index)
            .all(db)
            .await?;
        let contact_persons = model.find_related(contact_person::Entity).all(db).await?;

        Ok(SalesOrderDetail {
            order: model,
            addresses: addresses.into(),
            line_items,
            sub_statuses,
            custom_fields,
            contact_persons,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializers::test_support;
    use crate::services::RecordService;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn detail_keeps_line_item_order() {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        let orders = RecordService::<SalesOrders>::new(Arc::new(db));

        let detail = orders
            .create(
                alice,
                &json!({
                    "salesorder_id": "SO1",
                    "salesorder_number": "SO-00001",
                    "date": "2024-03-01",
                    "shipment_date": "2024-03-09",
                    "customer_name": "Acme",
                    "line_items": [
                        {"line_item_id": "L2", "name": "Bolt", "quantity": 3},
                        {"line_item_id": "L1", "name": "Nut", "quantity": 5}
                    ]
                }),
            )
            .await
            .unwrap();

        let names: Vec<_> = detail
            .line_items
            .iter()
            .map(|item| item.line_item_id.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(names, ["L2", "L1"]);

        let row = SalesOrders::export_row(&detail.order);
        assert_eq!(
            row,
            vec![
                ExportCell::Text("SO1".into()),
                ExportCell::Text("SO-00001".into()),
                ExportCell::Text("Acme".into()),
                ExportCell::Text("2024-03-01".into()),
            ]
        );
    }
}
