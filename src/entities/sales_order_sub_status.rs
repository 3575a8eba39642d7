use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "sales_order_sub_statuses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(skip_deserializing)]
    pub sales_order_id: String,
    #[serde(default)]
    pub status_id: Option<String>,
    #[serde(default)]
    pub status_code: Option<String>,
    #[serde(default)]
    pub parent_status: Option<String>,
    #[serde(default)]
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub label_name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 7))]
    pub color_code: Option<String>,
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
