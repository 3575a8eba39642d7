use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};

use super::OwnedResource;
use crate::entities::invoice;
use crate::export::{ExportCell, ExportLayout};
use crate::serializers::InvoiceSerializer;

pub struct Invoices;

#[async_trait]
impl OwnedResource for Invoices {
    type Entity = invoice::Entity;
    type Model = invoice::Model;
    type Serializer = InvoiceSerializer;
    type Detail = invoice::Model;

    const NAME: &'static str = "invoice";
    const PATH: &'static str = "/invoice";
    /// The second column holds `invoice_number` and is headed "Invoice Number",
    /// not the "Order Number" label older exports used
    const LAYOUT: ExportLayout = ExportLayout {
        title: "Invoices",
        headers: &["ID", "Invoice Number", "Customer", "Date Created"],
    };

    fn owner_column() -> invoice::Column {
        invoice::Column::UserId
    }

    fn id_column() -> invoice::Column {
        invoice::Column::InvoiceId
    }

    fn export_row(model: &invoice::Model) -> Vec<ExportCell> {
        vec![
            ExportCell::from(model.invoice_id.as_str()),
            ExportCell::from(model.invoice_number.as_str()),
            ExportCell::from(model.customer_name.as_str()),
            ExportCell::date(model.date),
        ]
    }

    async fn detail(_db: &DatabaseConnection, model: invoice::Model) -> Result<invoice::Model, DbErr> {
        Ok(model)
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
    async fn export_row_carries_invoice_number() {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        let invoices = RecordService::<Invoices>::new(Arc::new(db));

        let stored = invoices
            .create(
                alice,
                &json!({
                    "invoice_id": "INV1",
                    "invoice_number": "INV-00001",
                    "customer_id": "C1",
                    "customer_name": "Acme",
                    "status": "sent",
                    "date": "2024-04-01",
                    "currency_code": "USD"
                }),
            )
            .await
            .unwrap();

        assert_eq!(Invoices::LAYOUT.headers[1], "Invoice Number");
        assert_eq!(
            Invoices::export_row(&stored),
            vec![
                ExportCell::Text("INV1".into()),
                ExportCell::Text("INV-00001".into()),
                ExportCell::Text("Acme".into()),
                ExportCell::Text("2024-04-01".into()),
            ]
        );
    }
}
