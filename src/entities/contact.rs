use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::serializers::fields;

/// Customer or vendor profile keyed by the Books `contact_id`
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[validate(length(min = 1, max = 100))]
    pub contact_id: String,
    #[serde(default)]
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub contact_name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub company_name: Option<String>,
    #[serde(default)]
    pub contact_type: Option<String>,
    #[serde(default)]
    pub customer_sub_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    #[validate(custom = "fields::blank_or_email")]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub has_transaction: bool,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_taxable: bool,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub tax_name: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub tax_percentage: Option<Decimal>,
    #[serde(default)]
    pub tax_authority_id: Option<String>,
    #[serde(default)]
    pub tax_exemption_id: Option<String>,
    #[serde(default)]
    pub tax_authority_name: Option<String>,
    #[serde(default)]
    pub tax_exemption_code: Option<String>,
    #[serde(default)]
    pub place_of_contact: Option<String>,
    #[serde(default)]
    pub gst_no: Option<String>,
    #[serde(default)]
    pub gst_treatment: Option<String>,
    #[serde(default)]
    pub tax_treatment: Option<String>,
    #[serde(default)]
    pub tax_regime: Option<String>,
    #[serde(default)]
    pub vat_treatment: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub legal_name: Option<String>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_tds_registered: bool,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_linked_with_zohocrm: bool,
    #[serde(default)]
    #[validate(custom = "fields::blank_or_url")]
    pub website: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub primary_id: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_int")]
    pub payment_terms: Option<i32>,
    #[serde(default)]
    pub payment_terms_label: Option<String>,
    #[serde(default)]
    pub currency_id: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub currency_symbol: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub credit_limit: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub opening_balance_amount: Option<Decimal>,
    #[serde(default = "fields::one", deserialize_with = "fields::one_if_blank")]
    #[sea_orm(column_type = "Decimal(Some((12, 6)))")]
    pub exchange_rate: Decimal,
    #[serde(default, deserialize_with = "fields::zero_if_blank")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub outstanding_receivable_amount: Decimal,
    #[serde(default, deserialize_with = "fields::zero_if_blank")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub outstanding_receivable_amount_bcy: Decimal,
    #[serde(default, deserialize_with = "fields::zero_if_blank")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub unused_credits_receivable_amount: Decimal,
    #[serde(default, deserialize_with = "fields::zero_if_blank")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub unused_credits_receivable_amount_bcy: Decimal,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub payment_reminder_enabled: bool,
    #[serde(default)]
    pub custom_fields: Option<Json>,
    #[serde(default)]
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
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
    #[sea_orm(has_one = "super::default_templates::Entity")]
    DefaultTemplates,
    #[sea_orm(has_many = "super::contact_contact_person::Entity")]
    ContactPersonLinks,
    #[sea_orm(has_many = "super::sales_order::Entity")]
    SalesOrders,
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

impl Related<super::default_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DefaultTemplates.def()
    }
}

impl Related<super::sales_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrders.def()
    }
}

impl Related<super::contact_person::Entity> for Entity {
    fn to() -> RelationDef {
        super::contact_contact_person::Relation::ContactPerson.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::contact_contact_person::Relation::Contact.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
