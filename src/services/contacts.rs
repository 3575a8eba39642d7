use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, ModelTrait};
use serde::Serialize;

use super::{AddressPair, OwnedResource};
use crate::entities::{address, contact, contact_person, default_templates};
use crate::export::{ExportCell, ExportLayout};
use crate::serializers::ContactSerializer;

pub struct Contacts;

#[derive(Debug, Clone, Serialize)]
pub struct ContactDetail {
    #[serde(flatten)]
    pub contact: contact::Model,
    #[serde(flatten)]
    pub addresses: AddressPair,
    pub contact_persons: Vec<contact_person::Model>,
    pub default_templates: Option<default_templates::Model>,
}

#[async_trait]
impl OwnedResource for Contacts {
    type Entity = contact::Entity;
    type Model = contact::Model;
    type Serializer = ContactSerializer;
    type Detail = ContactDetail;

    const NAME: &'static str = "contact";
    const PATH: &'static str = "/contacts";
    const LAYOUT: ExportLayout = ExportLayout {
        title: "Contacts",
        headers: &[
            "NAME",
            "COMPANY NAME",
            "EMAIL",
            "WORK PHONE",
            "RECEIVABLES (BCY)",
            "UNUSED CREDITS (BCY)",
        ],
    };

    fn owner_column() -> contact::Column {
        contact::Column::UserId
    }

    fn id_column() -> contact::Column {
        contact::Column::ContactId
    }

    fn export_row(model: &contact::Model) -> Vec<ExportCell> {
        vec![
            ExportCell::from(model.contact_name.as_str()),
            ExportCell::text(model.company_name.as_deref()),
            ExportCell::text(model.email.as_deref()),
            ExportCell::text(model.phone.as_deref()),
            ExportCell::decimal(Some(model.outstanding_receivable_amount_bcy)),
            ExportCell::decimal(Some(model.unused_credits_receivable_amount_bcy)),
        ]
    }

    async fn detail(db: &DatabaseConnection, model: contact::Model) -> Result<ContactDetail, DbErr> {
        let addresses = model.find_related(address::Entity).all(db).await?;
        let contact_persons = model.find_related(contact_person::Entity).all(db).await?;
        let default_templates = model.find_related(default_templates::Entity).one(db).await?;
        Ok(ContactDetail {
            contact: model,
            addresses: addresses.into(),
            contact_persons,
            default_templates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RecordService;
    use crate::serializers::test_support;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn export_row_follows_the_header_order() {
        let contact: contact::Model = serde_json::from_value(json!({
            "contact_id": "C1",
            "contact_name": "Acme",
            "company_name": "Acme Inc",
            "email": "ap@acme.test",
            "phone": "+1 555 0100",
            "outstanding_receivable_amount_bcy": "120.50",
            "unused_credits_receivable_amount_bcy": 0
        }))
        .unwrap();
        let row = Contacts::export_row(&contact);
        assert_eq!(row.len(), Contacts::LAYOUT.headers.len());
        assert_eq!(row[0], ExportCell::Text("Acme".into()));
        assert_eq!(row[3], ExportCell::Text("+1 555 0100".into()));
        assert_eq!(row[4], ExportCell::decimal(Some(dec!(120.50))));
    }

    #[tokio::test]
    async fn detail_carries_addresses_people_and_templates() {
        let db = test_support::migrated_db().await;
        let alice = test_support::account(&db, "alice").await;
        let contacts = RecordService::<Contacts>::new(Arc::new(db));

        let detail = contacts
            .create(
                alice,
                &json!({
                    "contact_id": "C1",
                    "contact_name": "Acme",
                    "billing_address": {"address": "1 Main St", "city": "Springfield"},
                    "contact_persons": [{"contact_person_id": "P1", "first_name": "Ann"}],
                    "default_templates": {"invoice_template_id": "T1"}
                }),
            )
            .await
            .unwrap();

        assert_eq!(
            detail.addresses.billing_address.and_then(|a| a.city).as_deref(),
            Some("Springfield")
        );
        assert!(detail.addresses.shipping_address.is_none());
        assert_eq!(detail.contact_persons.len(), 1);
        assert_eq!(
            detail
                .default_templates
                .and_then(|t| t.invoice_template_id)
                .as_deref(),
            Some("T1")
        );
    }
}
