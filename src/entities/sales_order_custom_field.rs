use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::serializers::fields;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "sales_order_custom_fields")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(skip_deserializing)]
    pub sales_order_id: String,
    #[serde(default)]
    pub customfield_id: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_int")]
    pub index: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_text")]
    #[validate(length(max = 255))]
    pub value: Option<String>,
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
