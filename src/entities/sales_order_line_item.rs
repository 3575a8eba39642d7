use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::serializers::fields;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "sales_order_line_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(skip_deserializing)]
    pub sales_order_id: String,
    /// Position of the line within the order
    #[serde(skip_deserializing)]
    pub position: i32,
    #[serde(default)]
    pub line_item_id: Option<String>,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub sku: Option<String>,
    #[serde(default)]
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 4)))", nullable)]
    pub quantity: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub rate: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub bcy_rate: Option<Decimal>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub tax_name: Option<String>,
    #[serde(default)]
    pub tax_type: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub tax_percentage: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub item_total: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub item_total_inclusive_of_tax: Option<Decimal>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub hsn_or_sac: Option<String>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_invoiced: bool,
    #[serde(default)]
    pub warehouse_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sales_order::Entity",
        from = "Column::SalesOrderId",
        to = "super::sales_order::Column::SalesorderId",
        on_delete = "Cascade"
    )]
    SalesOrder,
}

impl Related<super::sales_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
