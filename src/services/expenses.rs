use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};

use super::OwnedResource;
use crate::entities::expense;
use crate::export::{ExportCell, ExportLayout};
use crate::serializers::ExpenseSerializer;

pub struct Expenses;

#[async_trait]
impl OwnedResource for Expenses {
    type Entity = expense::Entity;
    type Model = expense::Model;
    type Serializer = ExpenseSerializer;
    type Detail = expense::Model;

    const NAME: &'static str = "expense";
    const PATH: &'static str = "/expenses";
    const LAYOUT: ExportLayout = ExportLayout {
        title: "Expenses",
        headers: &[
            "DATE",
            "EXPENSE ACCOUNT",
            "REFERENCE NUMBER",
            "VENDOR NAME",
            "PAID THROUGH",
            "CUSTOMER NAME",
            "STATUS",
            "AMOUNT",
        ],
    };

    fn owner_column() -> expense::Column {
        expense::Column::UserId
    }

    fn id_column() -> expense::Column {
        expense::Column::ExpenseId
    }

    fn export_row(model: &expense::Model) -> Vec<ExportCell> {
        vec![
            ExportCell::date(model.date),
            ExportCell::text(model.account_name.as_deref()),
            ExportCell::text(model.reference_number.as_deref()),
            ExportCell::text(model.vendor_name.as_deref()),
            ExportCell::text(model.paid_through_account_name.as_deref()),
            ExportCell::text(model.customer_name.as_deref()),
            ExportCell::text(model.status.as_deref()),
            ExportCell::decimal(model.total),
        ]
    }

    async fn detail(_db: &DatabaseConnection, model: expense::Model) -> Result<expense::Model, DbErr> {
        Ok(model)
    }
}
