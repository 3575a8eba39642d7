use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_contacts_tables::Migration),
            Box::new(m20240101_000003_create_sales_orders_tables::Migration),
            Box::new(m20240101_000004_create_invoices_table::Migration),
            Box::new(m20240101_000005_create_credit_notes_tables::Migration),
            Box::new(m20240101_000006_create_expenses_table::Migration),
            Box::new(m20240101_000007_create_addresses_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Local accounts and the refresh tokens issued to them
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                        .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                        .col(ColumnDef::new(Users::Phone).string().null())
                        .col(ColumnDef::new(Users::PasswordHash).text().not_null())
                        .col(ColumnDef::new(Users::IsActive).boolean().not_null().default(true))
                        .col(ColumnDef::new(Users::IsStaff).boolean().not_null().default(true))
                        .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                        .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RefreshTokens::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(RefreshTokens::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(RefreshTokens::UserId).uuid().not_null())
                        .col(
                            ColumnDef::new(RefreshTokens::TokenId)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(RefreshTokens::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RefreshTokens::ExpiresAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RefreshTokens::Revoked)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_refresh_tokens_user_id")
                                .from(RefreshTokens::Table, RefreshTokens::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_refresh_tokens_user_id")
                        .table(RefreshTokens::Table)
                        .col(RefreshTokens::UserId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(RefreshTokens::Table).if_exists().to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
                .await?;

            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
        Username,
        Email,
        Phone,
        PasswordHash,
        IsActive,
        IsStaff,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum RefreshTokens {
        Table,
        Id,
        UserId,
        TokenId,
        CreatedAt,
        ExpiresAt,
        Revoked,
    }
}

mod m20240101_000002_create_contacts_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_contacts_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Contacts with their people and default templates
            manager
                .create_table(
                    Table::create()
                        .table(Contacts::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Contacts::ContactId).string().primary_key().not_null())
                        .col(ColumnDef::new(Contacts::UserId).uuid().not_null())
                        .col(ColumnDef::new(Contacts::ContactName).string().not_null())
                        .col(ColumnDef::new(Contacts::CompanyName).string().null())
                        .col(ColumnDef::new(Contacts::ContactType).string().null())
                        .col(ColumnDef::new(Contacts::CustomerSubType).string().null())
                        .col(ColumnDef::new(Contacts::Status).string().null())
                        .col(ColumnDef::new(Contacts::Email).string().null())
                        .col(ColumnDef::new(Contacts::Phone).string().null())
                        .col(
                            ColumnDef::new(Contacts::HasTransaction)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Contacts::IsTaxable)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Contacts::TaxId).string().null())
                        .col(ColumnDef::new(Contacts::TaxName).string().null())
                        .col(ColumnDef::new(Contacts::TaxPercentage).decimal_len(5, 2).null())
                        .col(ColumnDef::new(Contacts::TaxAuthorityId).string().null())
                        .col(ColumnDef::new(Contacts::TaxExemptionId).string().null())
                        .col(ColumnDef::new(Contacts::TaxAuthorityName).string().null())
                        .col(ColumnDef::new(Contacts::TaxExemptionCode).string().null())
                        .col(ColumnDef::new(Contacts::PlaceOfContact).string().null())
                        .col(ColumnDef::new(Contacts::GstNo).string().null())
                        .col(ColumnDef::new(Contacts::GstTreatment).string().null())
                        .col(ColumnDef::new(Contacts::TaxTreatment).string().null())
                        .col(ColumnDef::new(Contacts::TaxRegime).string().null())
                        .col(ColumnDef::new(Contacts::VatTreatment).string().null())
                        .col(ColumnDef::new(Contacts::LegalName).string().null())
                        .col(
                            ColumnDef::new(Contacts::IsTdsRegistered)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Contacts::IsLinkedWithZohocrm)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Contacts::Website).string().null())
                        .col(ColumnDef::new(Contacts::OwnerId).string().null())
                        .col(ColumnDef::new(Contacts::PrimaryId).string().null())
                        .col(ColumnDef::new(Contacts::PaymentTerms).integer().null())
                        .col(ColumnDef::new(Contacts::PaymentTermsLabel).string().null())
                        .col(ColumnDef::new(Contacts::CurrencyId).string().null())
                        .col(ColumnDef::new(Contacts::CurrencyCode).string().null())
                        .col(ColumnDef::new(Contacts::CurrencySymbol).string().null())
                        .col(ColumnDef::new(Contacts::CreditLimit).decimal_len(12, 2).null())
                        .col(
                            ColumnDef::new(Contacts::OpeningBalanceAmount)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Contacts::ExchangeRate)
                                .decimal_len(12, 6)
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(Contacts::OutstandingReceivableAmount)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Contacts::OutstandingReceivableAmountBcy)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Contacts::UnusedCreditsReceivableAmount)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Contacts::UnusedCreditsReceivableAmountBcy)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Contacts::Facebook).string().null())
                        .col(ColumnDef::new(Contacts::Twitter).string().null())
                        .col(
                            ColumnDef::new(Contacts::PaymentReminderEnabled)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Contacts::CustomFields).json().null())
                        .col(ColumnDef::new(Contacts::Notes).text().null())
                        .col(
                            ColumnDef::new(Contacts::CreatedTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Contacts::LastModifiedTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_contacts_user_id")
                                .from(Contacts::Table, Contacts::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ContactPersons::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ContactPersons::ContactPersonId)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ContactPersons::UserId).uuid().not_null())
                        .col(ColumnDef::new(ContactPersons::Salutation).string().null())
                        .col(ColumnDef::new(ContactPersons::FirstName).string().null())
                        .col(ColumnDef::new(ContactPersons::LastName).string().null())
                        .col(ColumnDef::new(ContactPersons::Email).string().null())
                        .col(ColumnDef::new(ContactPersons::Phone).string().null())
                        .col(ColumnDef::new(ContactPersons::Mobile).string().null())
                        .col(ColumnDef::new(ContactPersons::Designation).string().null())
                        .col(ColumnDef::new(ContactPersons::Department).string().null())
                        .col(ColumnDef::new(ContactPersons::Skype).string().null())
                        .col(
                            ColumnDef::new(ContactPersons::IsPrimaryContact)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(ContactPersons::EnablePortal)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_contact_persons_user_id")
                                .from(ContactPersons::Table, ContactPersons::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ContactContactPersons::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(ContactContactPersons::ContactId).string().not_null())
                        .col(
                            ColumnDef::new(ContactContactPersons::ContactPersonId)
                                .string()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(ContactContactPersons::ContactId)
                                .col(ContactContactPersons::ContactPersonId)
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_contact_contact_persons_contact_id")
                                .from(ContactContactPersons::Table, ContactContactPersons::ContactId)
                                .to(Contacts::Table, Contacts::ContactId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_contact_contact_persons_contact_person_id")
                                .from(ContactContactPersons::Table, ContactContactPersons::ContactPersonId)
                                .to(ContactPersons::Table, ContactPersons::ContactPersonId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DefaultTemplates::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DefaultTemplates::ContactId)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(DefaultTemplates::InvoiceTemplateId).string().null())
                        .col(ColumnDef::new(DefaultTemplates::EstimateTemplateId).string().null())
                        .col(ColumnDef::new(DefaultTemplates::CreditnoteTemplateId).string().null())
                        .col(
                            ColumnDef::new(DefaultTemplates::PurchaseorderTemplateId)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(DefaultTemplates::SalesorderTemplateId).string().null())
                        .col(
                            ColumnDef::new(DefaultTemplates::RetainerinvoiceTemplateId)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DefaultTemplates::PaymentthankyouTemplateId)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DefaultTemplates::RetainerinvoicePaymentthankyouTemplateId)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DefaultTemplates::InvoiceEmailTemplateId)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DefaultTemplates::EstimateEmailTemplateId)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DefaultTemplates::CreditnoteEmailTemplateId)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DefaultTemplates::PurchaseorderEmailTemplateId)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DefaultTemplates::SalesorderEmailTemplateId)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DefaultTemplates::RetainerinvoiceEmailTemplateId)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DefaultTemplates::PaymentthankyouEmailTemplateId)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DefaultTemplates::RetainerinvoicePaymentthankyouEmailTemplateId)
                                .string()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_default_templates_contact_id")
                                .from(DefaultTemplates::Table, DefaultTemplates::ContactId)
                                .to(Contacts::Table, Contacts::ContactId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_contacts_user_id")
                        .table(Contacts::Table)
                        .col(Contacts::UserId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_contact_persons_user_id")
                        .table(ContactPersons::Table)
                        .col(ContactPersons::UserId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DefaultTemplates::Table).if_exists().to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ContactContactPersons::Table).if_exists().to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ContactPersons::Table).if_exists().to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Contacts::Table).if_exists().to_owned())
                .await?;

            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Contacts {
        Table,
        ContactId,
        UserId,
        ContactName,
        CompanyName,
        ContactType,
        CustomerSubType,
        Status,
        Email,
        Phone,
        HasTransaction,
        IsTaxable,
        TaxId,
        TaxName,
        TaxPercentage,
        TaxAuthorityId,
        TaxExemptionId,
        TaxAuthorityName,
        TaxExemptionCode,
        PlaceOfContact,
        GstNo,
        GstTreatment,
        TaxTreatment,
        TaxRegime,
        VatTreatment,
        LegalName,
        IsTdsRegistered,
        IsLinkedWithZohocrm,
        Website,
        OwnerId,
        PrimaryId,
        PaymentTerms,
        PaymentTermsLabel,
        CurrencyId,
        CurrencyCode,
        CurrencySymbol,
        CreditLimit,
        OpeningBalanceAmount,
        ExchangeRate,
        OutstandingReceivableAmount,
        OutstandingReceivableAmountBcy,
        UnusedCreditsReceivableAmount,
        UnusedCreditsReceivableAmountBcy,
        Facebook,
        Twitter,
        PaymentReminderEnabled,
        CustomFields,
        Notes,
        CreatedTime,
        LastModifiedTime,
    }

    #[derive(DeriveIden)]
    enum ContactPersons {
        Table,
        ContactPersonId,
        UserId,
        Salutation,
        FirstName,
        LastName,
        Email,
        Phone,
        Mobile,
        Designation,
        Department,
        Skype,
        IsPrimaryContact,
        EnablePortal,
    }

    #[derive(DeriveIden)]
    enum ContactContactPersons {
        Table,
        ContactId,
        ContactPersonId,
    }

    #[derive(DeriveIden)]
    enum DefaultTemplates {
        Table,
        ContactId,
        InvoiceTemplateId,
        EstimateTemplateId,
        CreditnoteTemplateId,
        PurchaseorderTemplateId,
        SalesorderTemplateId,
        RetainerinvoiceTemplateId,
        PaymentthankyouTemplateId,
        RetainerinvoicePaymentthankyouTemplateId,
        InvoiceEmailTemplateId,
        EstimateEmailTemplateId,
        CreditnoteEmailTemplateId,
        PurchaseorderEmailTemplateId,
        SalesorderEmailTemplateId,
        RetainerinvoiceEmailTemplateId,
        PaymentthankyouEmailTemplateId,
        RetainerinvoicePaymentthankyouEmailTemplateId,
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
    }
}

mod m20240101_000003_create_sales_orders_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_sales_orders_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Sales orders and their owned collections
            manager
                .create_table(
                    Table::create()
                        .table(SalesOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrders::SalesorderId)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrders::UserId).uuid().not_null())
                        .col(ColumnDef::new(SalesOrders::ContactId).string().null())
                        .col(ColumnDef::new(SalesOrders::CustomerId).string().null())
                        .col(ColumnDef::new(SalesOrders::CustomerName).string().null())
                        .col(ColumnDef::new(SalesOrders::SalesorderNumber).string().not_null())
                        .col(ColumnDef::new(SalesOrders::ReferenceNumber).string().null())
                        .col(ColumnDef::new(SalesOrders::Status).string().null())
                        .col(ColumnDef::new(SalesOrders::Date).date().not_null())
                        .col(ColumnDef::new(SalesOrders::ShipmentDate).date().null())
                        .col(ColumnDef::new(SalesOrders::InvoiceId).string().null())
                        .col(ColumnDef::new(SalesOrders::TemplateId).string().null())
                        .col(
                            ColumnDef::new(SalesOrders::IsPreGst)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(SalesOrders::GstNo).string().null())
                        .col(ColumnDef::new(SalesOrders::GstTreatment).string().null())
                        .col(ColumnDef::new(SalesOrders::PlaceOfSupply).string().null())
                        .col(ColumnDef::new(SalesOrders::VatTreatment).string().null())
                        .col(ColumnDef::new(SalesOrders::TaxTreatment).string().null())
                        .col(ColumnDef::new(SalesOrders::CrmOwnerId).string().null())
                        .col(ColumnDef::new(SalesOrders::CrmCustomReferenceId).string().null())
                        .col(ColumnDef::new(SalesOrders::ZcrmPotentialId).string().null())
                        .col(
                            ColumnDef::new(SalesOrders::IsUpdateCustomer)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::ExchangeRate)
                                .decimal_len(12, 6)
                                .not_null()
                                .default(1),
                        )
                        .col(ColumnDef::new(SalesOrders::Discount).string().null())
                        .col(
                            ColumnDef::new(SalesOrders::IsDiscountBeforeTax)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(SalesOrders::DiscountType).string().null())
                        .col(ColumnDef::new(SalesOrders::SalespersonId).string().null())
                        .col(ColumnDef::new(SalesOrders::SalespersonName).string().null())
                        .col(ColumnDef::new(SalesOrders::MerchantId).string().null())
                        .col(ColumnDef::new(SalesOrders::MerchantName).string().null())
                        .col(ColumnDef::new(SalesOrders::EstimateId).string().null())
                        .col(ColumnDef::new(SalesOrders::TaxId).string().null())
                        .col(ColumnDef::new(SalesOrders::TaxAuthorityId).string().null())
                        .col(ColumnDef::new(SalesOrders::TaxAuthorityName).string().null())
                        .col(ColumnDef::new(SalesOrders::TaxExemptionId).string().null())
                        .col(ColumnDef::new(SalesOrders::TaxExemptionCode).string().null())
                        .col(ColumnDef::new(SalesOrders::AvataxExemptNo).string().null())
                        .col(ColumnDef::new(SalesOrders::AvataxUseCode).string().null())
                        .col(
                            ColumnDef::new(SalesOrders::IsInclusiveTax)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::ShippingCharge)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::Adjustment)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(SalesOrders::AdjustmentDescription).string().null())
                        .col(ColumnDef::new(SalesOrders::DeliveryMethod).string().null())
                        .col(ColumnDef::new(SalesOrders::Total).decimal_len(12, 2).null())
                        .col(ColumnDef::new(SalesOrders::Notes).text().null())
                        .col(ColumnDef::new(SalesOrders::Terms).text().null())
                        .col(
                            ColumnDef::new(SalesOrders::CreatedTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::LastModifiedTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_orders_user_id")
                                .from(SalesOrders::Table, SalesOrders::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_orders_contact_id")
                                .from(SalesOrders::Table, SalesOrders::ContactId)
                                .to(Contacts::Table, Contacts::ContactId)
                                .on_delete(ForeignKeyAction::SetNull)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SalesOrderLineItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrderLineItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrderLineItems::SalesOrderId).string().not_null())
                        .col(ColumnDef::new(SalesOrderLineItems::Position).integer().not_null())
                        .col(ColumnDef::new(SalesOrderLineItems::LineItemId).string().null())
                        .col(ColumnDef::new(SalesOrderLineItems::ItemId).string().null())
                        .col(ColumnDef::new(SalesOrderLineItems::Name).string().null())
                        .col(ColumnDef::new(SalesOrderLineItems::Sku).string().null())
                        .col(ColumnDef::new(SalesOrderLineItems::Description).text().null())
                        .col(
                            ColumnDef::new(SalesOrderLineItems::Quantity)
                                .decimal_len(12, 4)
                                .null(),
                        )
                        .col(ColumnDef::new(SalesOrderLineItems::Rate).decimal_len(12, 2).null())
                        .col(ColumnDef::new(SalesOrderLineItems::BcyRate).decimal_len(12, 2).null())
                        .col(ColumnDef::new(SalesOrderLineItems::TaxId).string().null())
                        .col(ColumnDef::new(SalesOrderLineItems::TaxName).string().null())
                        .col(ColumnDef::new(SalesOrderLineItems::TaxType).string().null())
                        .col(
                            ColumnDef::new(SalesOrderLineItems::TaxPercentage)
                                .decimal_len(5, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLineItems::ItemTotal)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLineItems::ItemTotalInclusiveOfTax)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(ColumnDef::new(SalesOrderLineItems::ProductType).string().null())
                        .col(ColumnDef::new(SalesOrderLineItems::HsnOrSac).string().null())
                        .col(
                            ColumnDef::new(SalesOrderLineItems::IsInvoiced)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(SalesOrderLineItems::WarehouseId).string().null())
                        .col(ColumnDef::new(SalesOrderLineItems::ProjectId).string().null())
                        .col(ColumnDef::new(SalesOrderLineItems::ProjectName).string().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_order_line_items_sales_order_id")
                                .from(SalesOrderLineItems::Table, SalesOrderLineItems::SalesOrderId)
                                .to(SalesOrders::Table, SalesOrders::SalesorderId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SalesOrderSubStatuses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrderSubStatuses::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderSubStatuses::SalesOrderId)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrderSubStatuses::StatusId).string().null())
                        .col(ColumnDef::new(SalesOrderSubStatuses::StatusCode).string().null())
                        .col(ColumnDef::new(SalesOrderSubStatuses::ParentStatus).string().null())
                        .col(ColumnDef::new(SalesOrderSubStatuses::Description).text().null())
                        .col(ColumnDef::new(SalesOrderSubStatuses::DisplayName).string().null())
                        .col(ColumnDef::new(SalesOrderSubStatuses::LabelName).string().null())
                        .col(ColumnDef::new(SalesOrderSubStatuses::ColorCode).string().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_order_sub_statuses_sales_order_id")
                                .from(SalesOrderSubStatuses::Table, SalesOrderSubStatuses::SalesOrderId)
                                .to(SalesOrders::Table, SalesOrders::SalesorderId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SalesOrderCustomFields::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrderCustomFields::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderCustomFields::SalesOrderId)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrderCustomFields::CustomfieldId).string().null())
                        .col(ColumnDef::new(SalesOrderCustomFields::Index).integer().null())
                        .col(ColumnDef::new(SalesOrderCustomFields::Label).string().null())
                        .col(ColumnDef::new(SalesOrderCustomFields::Value).string().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_order_custom_fields_sales_order_id")
                                .from(SalesOrderCustomFields::Table, SalesOrderCustomFields::SalesOrderId)
                                .to(SalesOrders::Table, SalesOrders::SalesorderId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SalesOrderContactPersons::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrderContactPersons::SalesOrderId)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderContactPersons::ContactPersonId)
                                .string()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(SalesOrderContactPersons::SalesOrderId)
                                .col(SalesOrderContactPersons::ContactPersonId)
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_order_contact_persons_sales_order_id")
                                .from(SalesOrderContactPersons::Table, SalesOrderContactPersons::SalesOrderId)
                                .to(SalesOrders::Table, SalesOrders::SalesorderId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_order_contact_persons_contact_person_id")
                                .from(SalesOrderContactPersons::Table, SalesOrderContactPersons::ContactPersonId)
                                .to(ContactPersons::Table, ContactPersons::ContactPersonId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_orders_user_id")
                        .table(SalesOrders::Table)
                        .col(SalesOrders::UserId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_order_line_items_sales_order_id")
                        .table(SalesOrderLineItems::Table)
                        .col(SalesOrderLineItems::SalesOrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_order_sub_statuses_sales_order_id")
                        .table(SalesOrderSubStatuses::Table)
                        .col(SalesOrderSubStatuses::SalesOrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_order_custom_fields_sales_order_id")
                        .table(SalesOrderCustomFields::Table)
                        .col(SalesOrderCustomFields::SalesOrderId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SalesOrderContactPersons::Table).if_exists().to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SalesOrderCustomFields::Table).if_exists().to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SalesOrderSubStatuses::Table).if_exists().to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SalesOrderLineItems::Table).if_exists().to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SalesOrders::Table).if_exists().to_owned())
                .await?;

            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum SalesOrders {
        Table,
        SalesorderId,
        UserId,
        ContactId,
        CustomerId,
        CustomerName,
        SalesorderNumber,
        ReferenceNumber,
        Status,
        Date,
        ShipmentDate,
        InvoiceId,
        TemplateId,
        IsPreGst,
        GstNo,
        GstTreatment,
        PlaceOfSupply,
        VatTreatment,
        TaxTreatment,
        CrmOwnerId,
        CrmCustomReferenceId,
        ZcrmPotentialId,
        IsUpdateCustomer,
        ExchangeRate,
        Discount,
        IsDiscountBeforeTax,
        DiscountType,
        SalespersonId,
        SalespersonName,
        MerchantId,
        MerchantName,
        EstimateId,
        TaxId,
        TaxAuthorityId,
        TaxAuthorityName,
        TaxExemptionId,
        TaxExemptionCode,
        AvataxExemptNo,
        AvataxUseCode,
        IsInclusiveTax,
        ShippingCharge,
        Adjustment,
        AdjustmentDescription,
        DeliveryMethod,
        Total,
        Notes,
        Terms,
        CreatedTime,
        LastModifiedTime,
    }

    #[derive(DeriveIden)]
    enum SalesOrderLineItems {
        Table,
        Id,
        SalesOrderId,
        Position,
        LineItemId,
        ItemId,
        Name,
        Sku,
        Description,
        Quantity,
        Rate,
        BcyRate,
        TaxId,
        TaxName,
        TaxType,
        TaxPercentage,
        ItemTotal,
        ItemTotalInclusiveOfTax,
        ProductType,
        HsnOrSac,
        IsInvoiced,
        WarehouseId,
        ProjectId,
        ProjectName,
    }

    #[derive(DeriveIden)]
    enum SalesOrderSubStatuses {
        Table,
        Id,
        SalesOrderId,
        StatusId,
        StatusCode,
        ParentStatus,
        Description,
        DisplayName,
        LabelName,
        ColorCode,
    }

    #[derive(DeriveIden)]
    enum SalesOrderCustomFields {
        Table,
        Id,
        SalesOrderId,
        CustomfieldId,
        Index,
        Label,
        Value,
    }

    #[derive(DeriveIden)]
    enum SalesOrderContactPersons {
        Table,
        SalesOrderId,
        ContactPersonId,
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Contacts {
        Table,
        ContactId,
    }

    #[derive(DeriveIden)]
    enum ContactPersons {
        Table,
        ContactPersonId,
    }
}

mod m20240101_000004_create_invoices_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_invoices_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Invoices; line items stay as JSON
            manager
                .create_table(
                    Table::create()
                        .table(Invoices::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Invoices::InvoiceId).string().primary_key().not_null())
                        .col(ColumnDef::new(Invoices::UserId).uuid().not_null())
                        .col(ColumnDef::new(Invoices::InvoiceNumber).string().not_null())
                        .col(ColumnDef::new(Invoices::CustomerId).string().not_null())
                        .col(ColumnDef::new(Invoices::CustomerName).string().not_null())
                        .col(ColumnDef::new(Invoices::Status).string().not_null())
                        .col(ColumnDef::new(Invoices::Date).date().null())
                        .col(ColumnDef::new(Invoices::DueDate).date().null())
                        .col(
                            ColumnDef::new(Invoices::AchPaymentInitiated)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Invoices::IsPreGst).boolean().not_null().default(false))
                        .col(ColumnDef::new(Invoices::PlaceOfSupply).string().null())
                        .col(ColumnDef::new(Invoices::GstNo).string().null())
                        .col(ColumnDef::new(Invoices::GstTreatment).string().null())
                        .col(ColumnDef::new(Invoices::CfdiUsage).string().null())
                        .col(ColumnDef::new(Invoices::VatTreatment).string().null())
                        .col(ColumnDef::new(Invoices::TaxTreatment).string().null())
                        .col(ColumnDef::new(Invoices::VatRegNo).string().null())
                        .col(ColumnDef::new(Invoices::Total).decimal_len(12, 2).null())
                        .col(ColumnDef::new(Invoices::Balance).decimal_len(12, 2).null())
                        .col(ColumnDef::new(Invoices::PaymentTerms).integer().null())
                        .col(ColumnDef::new(Invoices::PaymentTermsLabel).string().null())
                        .col(ColumnDef::new(Invoices::CurrencyId).string().null())
                        .col(ColumnDef::new(Invoices::CurrencyCode).string().not_null())
                        .col(
                            ColumnDef::new(Invoices::ExchangeRate)
                                .decimal_len(12, 6)
                                .not_null()
                                .default(1),
                        )
                        .col(ColumnDef::new(Invoices::Discount).decimal_len(12, 2).null())
                        .col(
                            ColumnDef::new(Invoices::IsDiscountBeforeTax)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Invoices::DiscountType).string().null())
                        .col(
                            ColumnDef::new(Invoices::IsInclusiveTax)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Invoices::RecurringInvoiceId).string().null())
                        .col(ColumnDef::new(Invoices::CustomFields).json().null())
                        .col(ColumnDef::new(Invoices::InvoiceItems).json().null())
                        .col(
                            ColumnDef::new(Invoices::CreatedTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::LastModifiedTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_invoices_user_id")
                                .from(Invoices::Table, Invoices::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_invoices_user_id")
                        .table(Invoices::Table)
                        .col(Invoices::UserId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Invoices::Table).if_exists().to_owned())
                .await?;

            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Invoices {
        Table,
        InvoiceId,
        UserId,
        InvoiceNumber,
        CustomerId,
        CustomerName,
        Status,
        Date,
        DueDate,
        AchPaymentInitiated,
        IsPreGst,
        PlaceOfSupply,
        GstNo,
        GstTreatment,
        CfdiUsage,
        VatTreatment,
        TaxTreatment,
        VatRegNo,
        Total,
        Balance,
        PaymentTerms,
        PaymentTermsLabel,
        CurrencyId,
        CurrencyCode,
        ExchangeRate,
        Discount,
        IsDiscountBeforeTax,
        DiscountType,
        IsInclusiveTax,
        RecurringInvoiceId,
        CustomFields,
        InvoiceItems,
        CreatedTime,
        LastModifiedTime,
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
    }
}

mod m20240101_000005_create_credit_notes_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_credit_notes_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Credit notes and their contact-person links
            manager
                .create_table(
                    Table::create()
                        .table(CreditNotes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CreditNotes::CreditnoteId)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CreditNotes::UserId).uuid().not_null())
                        .col(ColumnDef::new(CreditNotes::CreditnoteNumber).string().not_null())
                        .col(ColumnDef::new(CreditNotes::Date).date().not_null())
                        .col(ColumnDef::new(CreditNotes::Status).string().not_null())
                        .col(ColumnDef::new(CreditNotes::CurrencyId).string().null())
                        .col(ColumnDef::new(CreditNotes::CurrencyCode).string().not_null())
                        .col(ColumnDef::new(CreditNotes::CurrencySymbol).string().null())
                        .col(
                            ColumnDef::new(CreditNotes::ExchangeRate)
                                .decimal_len(12, 6)
                                .not_null()
                                .default(1),
                        )
                        .col(ColumnDef::new(CreditNotes::Total).decimal_len(12, 2).not_null())
                        .col(ColumnDef::new(CreditNotes::Balance).decimal_len(12, 2).not_null())
                        .col(ColumnDef::new(CreditNotes::CustomerId).string().not_null())
                        .col(ColumnDef::new(CreditNotes::CustomerName).string().null())
                        .col(
                            ColumnDef::new(CreditNotes::IsViewedByClient)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(CreditNotes::InvoiceId).string().null())
                        .col(ColumnDef::new(CreditNotes::RefundMode).string().null())
                        .col(ColumnDef::new(CreditNotes::PlaceOfSupply).string().null())
                        .col(ColumnDef::new(CreditNotes::GstNo).string().null())
                        .col(ColumnDef::new(CreditNotes::GstTreatment).string().null())
                        .col(ColumnDef::new(CreditNotes::VatTreatment).string().null())
                        .col(ColumnDef::new(CreditNotes::VatRegNo).string().null())
                        .col(ColumnDef::new(CreditNotes::ReferenceNumber).string().null())
                        .col(ColumnDef::new(CreditNotes::IsDiscountBeforeTax).boolean().null())
                        .col(ColumnDef::new(CreditNotes::Discount).decimal_len(12, 2).null())
                        .col(ColumnDef::new(CreditNotes::SubTotal).decimal_len(12, 2).null())
                        .col(ColumnDef::new(CreditNotes::TotalTaxAmount).decimal_len(12, 2).null())
                        .col(
                            ColumnDef::new(CreditNotes::RefundableAmount)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(ColumnDef::new(CreditNotes::TotalInWords).string().null())
                        .col(ColumnDef::new(CreditNotes::CustomFields).json().null())
                        .col(ColumnDef::new(CreditNotes::Attachments).json().null())
                        .col(ColumnDef::new(CreditNotes::Notes).text().null())
                        .col(ColumnDef::new(CreditNotes::Terms).text().null())
                        .col(
                            ColumnDef::new(CreditNotes::CreatedTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(CreditNotes::LastModifiedTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_credit_notes_user_id")
                                .from(CreditNotes::Table, CreditNotes::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(CreditNoteContactPersons::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CreditNoteContactPersons::CreditNoteId)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CreditNoteContactPersons::ContactPersonId)
                                .string()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(CreditNoteContactPersons::CreditNoteId)
                                .col(CreditNoteContactPersons::ContactPersonId)
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_credit_note_contact_persons_credit_note_id")
                                .from(CreditNoteContactPersons::Table, CreditNoteContactPersons::CreditNoteId)
                                .to(CreditNotes::Table, CreditNotes::CreditnoteId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_credit_note_contact_persons_contact_person_id")
                                .from(CreditNoteContactPersons::Table, CreditNoteContactPersons::ContactPersonId)
                                .to(ContactPersons::Table, ContactPersons::ContactPersonId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_credit_notes_user_id")
                        .table(CreditNotes::Table)
                        .col(CreditNotes::UserId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CreditNoteContactPersons::Table).if_exists().to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(CreditNotes::Table).if_exists().to_owned())
                .await?;

            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum CreditNotes {
        Table,
        CreditnoteId,
        UserId,
        CreditnoteNumber,
        Date,
        Status,
        CurrencyId,
        CurrencyCode,
        CurrencySymbol,
        ExchangeRate,
        Total,
        Balance,
        CustomerId,
        CustomerName,
        IsViewedByClient,
        InvoiceId,
        RefundMode,
        PlaceOfSupply,
        GstNo,
        GstTreatment,
        VatTreatment,
        VatRegNo,
        ReferenceNumber,
        IsDiscountBeforeTax,
        Discount,
        SubTotal,
        TotalTaxAmount,
        RefundableAmount,
        TotalInWords,
        CustomFields,
        Attachments,
        Notes,
        Terms,
        CreatedTime,
        LastModifiedTime,
    }

    #[derive(DeriveIden)]
    enum CreditNoteContactPersons {
        Table,
        CreditNoteId,
        ContactPersonId,
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum ContactPersons {
        Table,
        ContactPersonId,
    }
}

mod m20240101_000006_create_expenses_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_expenses_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Expenses
            manager
                .create_table(
                    Table::create()
                        .table(Expenses::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Expenses::ExpenseId).string().primary_key().not_null())
                        .col(ColumnDef::new(Expenses::UserId).uuid().not_null())
                        .col(ColumnDef::new(Expenses::Date).date().null())
                        .col(ColumnDef::new(Expenses::AccountId).string().null())
                        .col(ColumnDef::new(Expenses::AccountName).string().null())
                        .col(ColumnDef::new(Expenses::PaidThroughAccountName).string().null())
                        .col(ColumnDef::new(Expenses::VendorId).string().null())
                        .col(ColumnDef::new(Expenses::VendorName).string().null())
                        .col(ColumnDef::new(Expenses::CustomerId).string().null())
                        .col(ColumnDef::new(Expenses::CustomerName).string().null())
                        .col(ColumnDef::new(Expenses::Status).string().null())
                        .col(ColumnDef::new(Expenses::ReferenceNumber).string().null())
                        .col(ColumnDef::new(Expenses::Description).text().null())
                        .col(ColumnDef::new(Expenses::TransactionId).string().null())
                        .col(ColumnDef::new(Expenses::TransactionType).string().null())
                        .col(ColumnDef::new(Expenses::ExpenseItemId).string().null())
                        .col(ColumnDef::new(Expenses::CurrencyId).string().null())
                        .col(ColumnDef::new(Expenses::CurrencyCode).string().null())
                        .col(ColumnDef::new(Expenses::ExchangeRate).decimal_len(12, 6).null())
                        .col(ColumnDef::new(Expenses::SubTotal).decimal_len(12, 2).null())
                        .col(ColumnDef::new(Expenses::Total).decimal_len(12, 2).null())
                        .col(ColumnDef::new(Expenses::BcyTotal).decimal_len(12, 2).null())
                        .col(ColumnDef::new(Expenses::Amount).decimal_len(12, 2).null())
                        .col(ColumnDef::new(Expenses::TaxAmount).decimal_len(12, 2).null())
                        .col(ColumnDef::new(Expenses::TaxId).string().null())
                        .col(ColumnDef::new(Expenses::TaxName).string().null())
                        .col(ColumnDef::new(Expenses::TaxPercentage).decimal_len(5, 2).null())
                        .col(ColumnDef::new(Expenses::IsInclusiveTax).boolean().null())
                        .col(ColumnDef::new(Expenses::GstNo).string().null())
                        .col(ColumnDef::new(Expenses::GstTreatment).string().null())
                        .col(ColumnDef::new(Expenses::TaxTreatment).string().null())
                        .col(ColumnDef::new(Expenses::DestinationOfSupply).string().null())
                        .col(ColumnDef::new(Expenses::DestinationOfSupplyState).string().null())
                        .col(ColumnDef::new(Expenses::PlaceOfSupply).string().null())
                        .col(ColumnDef::new(Expenses::SourceOfSupply).string().null())
                        .col(ColumnDef::new(Expenses::HsnOrSac).string().null())
                        .col(ColumnDef::new(Expenses::VatRegNo).string().null())
                        .col(ColumnDef::new(Expenses::ReverseChargeTaxId).string().null())
                        .col(ColumnDef::new(Expenses::ReverseChargeTaxName).string().null())
                        .col(
                            ColumnDef::new(Expenses::ReverseChargeTaxPercentage)
                                .decimal_len(5, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Expenses::ReverseChargeTaxAmount)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Expenses::ReverseChargeVatTotal)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Expenses::AcquisitionVatTotal)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(ColumnDef::new(Expenses::TripId).string().null())
                        .col(ColumnDef::new(Expenses::TripNumber).string().null())
                        .col(ColumnDef::new(Expenses::MileageRate).string().null())
                        .col(ColumnDef::new(Expenses::MileageType).string().null())
                        .col(ColumnDef::new(Expenses::ExpenseType).string().null())
                        .col(ColumnDef::new(Expenses::StartReading).string().null())
                        .col(ColumnDef::new(Expenses::EndReading).string().null())
                        .col(ColumnDef::new(Expenses::InvoiceId).string().null())
                        .col(ColumnDef::new(Expenses::ProjectId).string().null())
                        .col(ColumnDef::new(Expenses::ProjectName).string().null())
                        .col(ColumnDef::new(Expenses::ExpenseReceiptName).string().null())
                        .col(ColumnDef::new(Expenses::ExpenseReceiptType).string().null())
                        .col(ColumnDef::new(Expenses::IsBillable).boolean().null())
                        .col(ColumnDef::new(Expenses::IsPersonal).boolean().null())
                        .col(ColumnDef::new(Expenses::IsItemizedExpense).boolean().null())
                        .col(ColumnDef::new(Expenses::IsPreGst).boolean().null())
                        .col(
                            ColumnDef::new(Expenses::LastModifiedTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_expenses_user_id")
                                .from(Expenses::Table, Expenses::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_expenses_user_id")
                        .table(Expenses::Table)
                        .col(Expenses::UserId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Expenses::Table).if_exists().to_owned())
                .await?;

            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Expenses {
        Table,
        ExpenseId,
        UserId,
        Date,
        AccountId,
        AccountName,
        PaidThroughAccountName,
        VendorId,
        VendorName,
        CustomerId,
        CustomerName,
        Status,
        ReferenceNumber,
        Description,
        TransactionId,
        TransactionType,
        ExpenseItemId,
        CurrencyId,
        CurrencyCode,
        ExchangeRate,
        SubTotal,
        Total,
        BcyTotal,
        Amount,
        TaxAmount,
        TaxId,
        TaxName,
        TaxPercentage,
        IsInclusiveTax,
        GstNo,
        GstTreatment,
        TaxTreatment,
        DestinationOfSupply,
        DestinationOfSupplyState,
        PlaceOfSupply,
        SourceOfSupply,
        HsnOrSac,
        VatRegNo,
        ReverseChargeTaxId,
        ReverseChargeTaxName,
        ReverseChargeTaxPercentage,
        ReverseChargeTaxAmount,
        ReverseChargeVatTotal,
        AcquisitionVatTotal,
        TripId,
        TripNumber,
        MileageRate,
        MileageType,
        ExpenseType,
        StartReading,
        EndReading,
        InvoiceId,
        ProjectId,
        ProjectName,
        ExpenseReceiptName,
        ExpenseReceiptType,
        IsBillable,
        IsPersonal,
        IsItemizedExpense,
        IsPreGst,
        LastModifiedTime,
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
    }
}

mod m20240101_000007_create_addresses_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_addresses_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Addresses, each owned by exactly one contact, sales order or credit note
            manager
                .create_table(
                    Table::create()
                        .table(Addresses::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Addresses::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Addresses::AddressType).string().not_null())
                        .col(ColumnDef::new(Addresses::Attention).string().null())
                        .col(ColumnDef::new(Addresses::Address).string().null())
                        .col(ColumnDef::new(Addresses::Street2).string().null())
                        .col(ColumnDef::new(Addresses::City).string().null())
                        .col(ColumnDef::new(Addresses::State).string().null())
                        .col(ColumnDef::new(Addresses::Zip).string().null())
                        .col(ColumnDef::new(Addresses::Country).string().null())
                        .col(ColumnDef::new(Addresses::Fax).string().null())
                        .col(ColumnDef::new(Addresses::Phone).string().null())
                        .col(ColumnDef::new(Addresses::ContactId).string().null())
                        .col(ColumnDef::new(Addresses::SalesOrderId).string().null())
                        .col(ColumnDef::new(Addresses::CreditNoteId).string().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_addresses_contact_id")
                                .from(Addresses::Table, Addresses::ContactId)
                                .to(Contacts::Table, Contacts::ContactId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_addresses_sales_order_id")
                                .from(Addresses::Table, Addresses::SalesOrderId)
                                .to(SalesOrders::Table, SalesOrders::SalesorderId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_addresses_credit_note_id")
                                .from(Addresses::Table, Addresses::CreditNoteId)
                                .to(CreditNotes::Table, CreditNotes::CreditnoteId)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_addresses_contact_id")
                        .table(Addresses::Table)
                        .col(Addresses::ContactId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_addresses_sales_order_id")
                        .table(Addresses::Table)
                        .col(Addresses::SalesOrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_addresses_credit_note_id")
                        .table(Addresses::Table)
                        .col(Addresses::CreditNoteId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Addresses::Table).if_exists().to_owned())
                .await?;

            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Addresses {
        Table,
        Id,
        AddressType,
        Attention,
        Address,
        Street2,
        City,
        State,
        Zip,
        Country,
        Fax,
        Phone,
        ContactId,
        SalesOrderId,
        CreditNoteId,
    }

    #[derive(DeriveIden)]
    enum Contacts {
        Table,
        ContactId,
    }

    #[derive(DeriveIden)]
    enum SalesOrders {
        Table,
        SalesorderId,
    }

    #[derive(DeriveIden)]
    enum CreditNotes {
        Table,
        CreditnoteId,
    }
}
