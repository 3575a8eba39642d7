use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::serializers::fields;

/// Sales order header keyed by the Books `salesorder_id`
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "sales_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[validate(length(min = 1, max = 100))]
    pub salesorder_id: String,
    #[serde(default)]
    pub user_id: Uuid,
    /// Set only when the customer is a contact already stored for the same owner
    #[serde(skip_deserializing)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub customer_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub salesorder_number: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(deserialize_with = "fields::date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "fields::opt_date")]
    pub shipment_date: Option<NaiveDate>,
    #[serde(default)]
    pub invoice_id: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_pre_gst: bool,
    #[serde(default)]
    #[validate(length(max = 15))]
    pub gst_no: Option<String>,
    #[serde(default)]
    pub gst_treatment: Option<String>,
    #[serde(default)]
    pub place_of_supply: Option<String>,
    #[serde(default)]
    pub vat_treatment: Option<String>,
    #[serde(default)]
    pub tax_treatment: Option<String>,
    #[serde(default)]
    pub crm_owner_id: Option<String>,
    #[serde(default)]
    pub crm_custom_reference_id: Option<String>,
    #[serde(default)]
    pub zcrm_potential_id: Option<String>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_update_customer: bool,
    #[serde(default = "fields::one", deserialize_with = "fields::one_if_blank")]
    #[sea_orm(column_type = "Decimal(Some((12, 6)))")]
    pub exchange_rate: Decimal,
    /// Flat amount or percentage string such as `10%`
    #[serde(default, deserialize_with = "fields::opt_text")]
    pub discount: Option<String>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_discount_before_tax: bool,
    #[serde(default)]
    pub discount_type: Option<String>,
    #[serde(default)]
    pub salesperson_id: Option<String>,
    #[serde(default)]
    pub salesperson_name: Option<String>,
    #[serde(default)]
    pub merchant_id: Option<String>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub estimate_id: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub tax_authority_id: Option<String>,
    #[serde(default)]
    pub tax_authority_name: Option<String>,
    #[serde(default)]
    pub tax_exemption_id: Option<String>,
    #[serde(default)]
    pub tax_exemption_code: Option<String>,
    #[serde(default)]
    pub avatax_exempt_no: Option<String>,
    #[serde(default)]
    pub avatax_use_code: Option<String>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_inclusive_tax: bool,
    #[serde(default, deserialize_with = "fields::zero_if_blank")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub shipping_charge: Decimal,
    #[serde(default, deserialize_with = "fields::zero_if_blank")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub adjustment: Decimal,
    #[serde(default)]
    pub adjustment_description: Option<String>,
    #[serde(default)]
    pub delivery_method: Option<String>,
    #[serde(default, deserialize_with = "fields::opt_decimal")]
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub total: Option<Decimal>,
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
    #[sea_orm(
        belongs_to = "super::contact::Entity",
        from = "Column::ContactId",
        to = "super::contact::Column::ContactId",
        on_delete = "SetNull"
    )]
    Contact,
    #[sea_orm(has_many = "super::sales_order_line_item::Entity")]
    LineItems,
    #[sea_orm(has_many = "super::sales_order_sub_status::Entity")]
    SubStatuses,
    #[sea_orm(has_many = "super::sales_order_custom_field::Entity")]
    CustomFields,
    #[sea_orm(has_many = "super::address::Entity")]
    Addresses,
}

impl Related<crate::auth::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl Related<super::sales_order_line_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineItems.def()
    }
}

impl Related<super::sales_order_sub_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubStatuses.def()
    }
}

impl Related<super::sales_order_custom_field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomFields.def()
    }
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Addresses.def()
    }
}

impl Related<super::contact_person::Entity> for Entity {
    fn to() -> RelationDef {
        super::sales_order_contact_person::Relation::ContactPerson.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::sales_order_contact_person::Relation::SalesOrder.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
