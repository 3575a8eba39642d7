use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document templates a contact defaults to, one row per contact
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "default_templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(default)]
    pub contact_id: String,
    #[serde(default)]
    pub invoice_template_id: Option<String>,
    #[serde(default)]
    pub estimate_template_id: Option<String>,
    #[serde(default)]
    pub creditnote_template_id: Option<String>,
    #[serde(default)]
    pub purchaseorder_template_id: Option<String>,
    #[serde(default)]
    pub salesorder_template_id: Option<String>,
    #[serde(default)]
    pub retainerinvoice_template_id: Option<String>,
    #[serde(default)]
    pub paymentthankyou_template_id: Option<String>,
    #[serde(default)]
    pub retainerinvoice_paymentthankyou_template_id: Option<String>,
    #[serde(default)]
    pub invoice_email_template_id: Option<String>,
    #[serde(default)]
    pub estimate_email_template_id: Option<String>,
    #[serde(default)]
    pub creditnote_email_template_id: Option<String>,
    #[serde(default)]
    pub purchaseorder_email_template_id: Option<String>,
    #[serde(default)]
    pub salesorder_email_template_id: Option<String>,
    #[serde(default)]
    pub retainerinvoice_email_template_id: Option<String>,
    #[serde(default)]
    pub paymentthankyou_email_template_id: Option<String>,
    #[serde(default)]
    pub retainerinvoice_paymentthankyou_email_template_id: Option<String>,
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
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
