use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AddressType {
    Billing,
    Shipping,
}

/// Billing or shipping address owned by exactly one contact, sales order or credit note
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub address_type: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub attention: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub street2: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub zip: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[serde(default)]
    pub fax: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(skip_deserializing)]
    pub contact_id: Option<String>,
    #[serde(skip_deserializing)]
    pub sales_order_id: Option<String>,
    #[serde(skip_deserializing)]
    pub credit_note_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contact::Entity",
        from = "Column::ContactId",
        to = "super::contact::Column::ContactId",
        on_delete = "Cascade"
    )]
    Contact,
    #[sea_orm(
        belongs_to = "super::sales_order::Entity",
        from = "Column::SalesOrderId",
        to = "super::sales_order::Column::SalesorderId",
        on_delete = "Cascade"
    )]
    SalesOrder,
    #[sea_orm(
        belongs_to = "super::credit_note::Entity",
        from = "Column::CreditNoteId",
        to = "super::credit_note::Column::CreditnoteId",
        on_delete = "Cascade"
    )]
    CreditNote,
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl Related<super::sales_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrder.def()
    }
}

impl Related<super::credit_note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditNote.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
