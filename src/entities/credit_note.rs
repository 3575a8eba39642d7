use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::serializers::fields;

/// Credit note keyed by the Books `creditnote_id`
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "credit_notes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[validate(length(min = 1, max = 100))]
    pub creditnote_id: String,
    #[serde(default)]
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub creditnote_number: String,
    #[serde(deserialize_with = "fields::date")]
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 50))]
    pub status: String,
    #[serde(default)]
    pub currency_id: Option<String>,
    #[validate(length(min = 1, max = 10))]
    pub currency_code: String,
    #[serde(default)]
    #[validate(length(max = 5))]
    pub currency_symbol: Option<String>,
    #[serde(default = "fields::one", deserialize_with = "fields::one_if_blank")]
    #[sea_orm(column_type = "Decimal(Some((12, 6)))")]
    pub exchange_rate: Decimal,
    #[serde(deserialize_with = "fields::decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total: Decimal,
    #[serde(deserialize_with = "fields::decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub balance: Decimal,
    #[validate(length(min = 1, max = 255))]
    pub customer_id: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_viewed_by_client: bool,
    /// Invoice the note was raised against; not enforced, collections import independently
    #[serde(default)]
    pub invoice_id: Option<String>,
    #[serde(default)]
    pub refund_mode: Option<String>,
    #[serde(default)]
    pub place_of_supply: Option<String>,
    #[serde(default)]
    pub gst_no: Option<String>,
    #[serde(default)]
    pub gst_treatment: Option<String>,
    #[serde(default)]
    pub vat_treatment: Option<String>,
    #[serde(default)]
    pub vat_reg_no: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_flag")]
    pub is_discount_before_tax: Option<bool>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub discount: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub sub_total: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub total_tax_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub refundable_amount: Option<Decimal>,
    #[serde(default)]
    pub total_in_words: Option<String>,
    #[serde(default)]
    pub custom_fields: Option<Json>,
    #[serde(default)]
    pub attachments: Option<Json>,
    #[serde(default)]
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    #[serde(default)]
    #[sea_orm(column_type = "Text", nullable)]
    pub terms: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_timestamp")]
    pub created_time: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "fields::opt_timestamp")]
    pub last_modified_time: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::auth::user::Entity",
        from = "Column::UserId",
        to = "crate::auth::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::address::Entity")]
    Addresses,
}

impl Related<crate::auth::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Addresses.def()
    }
}

impl Related<super::contact_person::Entity> for Entity {
    fn to() -> RelationDef {
        super::credit_note_contact_person::Relation::ContactPerson.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::credit_note_contact_person::Relation::CreditNote.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
