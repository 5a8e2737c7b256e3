use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum InvoicePayments {
    Table,
    InvoiceId,
    RecordedBy,
    IdempotencyKey,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(InvoicePayments::Table)
                    .add_column(ColumnDef::new(InvoicePayments::IdempotencyKey).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uidx-invoice_payments-invoice_id-recorded_by-idempotency_key")
                    .table(InvoicePayments::Table)
                    .col(InvoicePayments::InvoiceId)
                    .col(InvoicePayments::RecordedBy)
                    .col(InvoicePayments::IdempotencyKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uidx-invoice_payments-invoice_id-recorded_by-idempotency_key")
                    .table(InvoicePayments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(InvoicePayments::Table)
                    .drop_column(InvoicePayments::IdempotencyKey)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
