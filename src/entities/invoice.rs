use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::serializers::fields;

/// Invoice keyed by the Books `invoice_id`; line items are kept as raw JSON
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[validate(length(min = 1, max = 100))]
    pub invoice_id: String,
    #[serde(default)]
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub invoice_number: String,
    #[validate(length(min = 1, max = 100))]
    pub customer_id: String,
    #[validate(length(min = 1, max = 255))]
    pub customer_name: String,
    #[validate(length(min = 1, max = 50))]
    pub status: String,
    #[serde(default, deserialize_with = "fields::opt_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::opt_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub ach_payment_initiated: bool,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_pre_gst: bool,
    #[serde(default)]
    pub place_of_supply: Option<String>,
    #[serde(default)]
    #[validate(length(max = 15))]
    pub gst_no: Option<String>,
    #[serde(default)]
    pub gst_treatment: Option<String>,
    #[serde(default)]
    pub cfdi_usage: Option<String>,
    #[serde(default)]
    pub vat_treatment: Option<String>,
    #[serde(default)]
    pub tax_treatment: Option<String>,
    #[serde(default)]
    pub vat_reg_no: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub total: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub balance: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_int")]
    pub payment_terms: Option<i32>,
    #[serde(default)]
    pub payment_terms_label: Option<String>,
    #[serde(default)]
    pub currency_id: Option<String>,
    #[validate(length(min = 1, max = 10))]
    pub currency_code: String,
    #[serde(default = "fields::one", deserialize_with = "fields::one_if_blank")]
    #[sea_orm(column_type = "Decimal(Some((12, 6)))")]
    pub exchange_rate: Decimal,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub discount: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_discount_before_tax: bool,
    #[serde(default)]
    pub discount_type: Option<String>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_inclusive_tax: bool,
    #[serde(default)]
    pub recurring_invoice_id: Option<String>,
    #[serde(default)]
    pub custom_fields: Option<Json>,
    #[serde(default, alias = "line_items")]
    pub invoice_items: Option<Json>,
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
}

impl Related<crate::auth::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
