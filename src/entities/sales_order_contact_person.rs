use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_order_contact_persons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub sales_order_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub contact_person_id: String,
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
    #[sea_orm(
        belongs_to = "super::contact_person::Entity",
        from = "Column::ContactPersonId",
        to = "super::contact_person::Column::ContactPersonId",
        on_delete = "Cascade"
    )]
    ContactPerson,
}

impl Related<super::sales_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrder.def()
    }
}

impl Related<super::contact_person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContactPerson.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
