use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, ModelTrait};
use serde::Serialize;

use super::{AddressPair, OwnedResource};
use crate::entities::{address, contact_person, credit_note};
use crate::export::{ExportCell, ExportLayout};
use crate::serializers::CreditNoteSerializer;

pub struct CreditNotes;

#[derive(Debug, Clone, Serialize)]
pub struct CreditNoteDetail {
    #[serde(flatten)]
    pub credit_note: credit_note::Model,
    #[serde(flatten)]
    pub addresses: AddressPair,
    pub contact_persons: Vec<contact_person::Model>,
}

#[async_trait]
impl OwnedResource for CreditNotes {
    type Entity = credit_note::Entity;
    type Model = credit_note::Model;
    type Serializer = CreditNoteSerializer;
    type Detail = CreditNoteDetail;

    const NAME: &'static str = "credit note";
    const PATH: &'static str = "/credit_note";
    const LAYOUT: ExportLayout = ExportLayout {
        title: "Credit Notes",
        headers: &["ID", "Credit Note", "Status"],
    };

    fn owner_column() -> credit_note::Column {
        credit_note::Column::UserId
    }

    fn id_column() -> credit_note::Column {
        credit_note::Column::CreditnoteId
    }

    fn export_row(model: &credit_note::Model) -> Vec<ExportCell> {
        vec![
            ExportCell::from(model.creditnote_id.as_str()),
            ExportCell::from(model.creditnote_number.as_str()),
            ExportCell::from(model.status.as_str()),
        ]
    }

    async fn detail(
        db: &DatabaseConnection,
        model: credit_note::Model,
    ) -> Result<CreditNoteDetail, DbErr> {
        let addresses = model.find_related(address::Entity).all(db).await?;
        let contact_persons = model.find_related(contact_person::Entity).all(db).await?;
        Ok(CreditNoteDetail {
            credit_note: model,
            addresses: addresses.into(),
            contact_persons,
        })
    }
}
