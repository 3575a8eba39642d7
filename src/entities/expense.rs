use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::serializers::fields;

/// Expense keyed by the Books `expense_id`; everything else is optional
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[validate(length(min = 1, max = 100))]
    pub expense_id: String,
    #[serde(default)]
    pub user_id: Uuid,
    #[serde(default, deserialize_with = "fields::opt_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub paid_through_account_name: Option<String>,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub expense_item_id: Option<String>,
    #[serde(default)]
    pub currency_id: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 6)))", nullable)]
    pub exchange_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub sub_total: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub total: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub bcy_total: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub tax_amount: Option<Decimal>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub tax_name: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub tax_percentage: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_flag")]
    pub is_inclusive_tax: Option<bool>,
    #[serde(default)]
    pub gst_no: Option<String>,
    #[serde(default)]
    pub gst_treatment: Option<String>,
    #[serde(default)]
    pub tax_treatment: Option<String>,
    #[serde(default)]
    pub destination_of_supply: Option<String>,
    #[serde(default)]
    pub destination_of_supply_state: Option<String>,
    #[serde(default)]
    pub place_of_supply: Option<String>,
    #[serde(default)]
    pub source_of_supply: Option<String>,
    #[serde(default)]
    pub hsn_or_sac: Option<String>,
    #[serde(default)]
    pub vat_reg_no: Option<String>,
    #[serde(default)]
    pub reverse_charge_tax_id: Option<String>,
    #[serde(default)]
    pub reverse_charge_tax_name: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub reverse_charge_tax_percentage: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub reverse_charge_tax_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub reverse_charge_vat_total: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub acquisition_vat_total: Option<Decimal>,
    #[serde(default)]
    pub trip_id: Option<String>,
    #[serde(default)]
    pub trip_number: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_text")]
    pub mileage_rate: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_text")]
    pub mileage_type: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_text")]
    pub expense_type: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_text")]
    pub start_reading: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_text")]
    pub end_reading: Option<String>,
    #[serde(default)]
    pub invoice_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub expense_receipt_name: Option<String>,
    #[serde(default)]
    pub expense_receipt_type: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_flag")]
    pub is_billable: Option<bool>,
    #[serde(default, deserialize_with = "fields::opt_flag")]
    pub is_personal: Option<bool>,
    #[serde(default, deserialize_with = "fields::opt_flag")]
    pub is_itemized_expense: Option<bool>,
    #[serde(default, deserialize_with = "fields::opt_flag")]
    pub is_pre_gst: Option<bool>,
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
