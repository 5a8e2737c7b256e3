//! Initial schema migration - creates all tables from scratch.
//!
//! - `staff`: authentication and audit attribution
//! - `cases`: matters with optional authorized budget ceilings
//! - `finance_entries`: immutable time/expense consumption records
//! - `invoices`: amounts due, with the engine-maintained `status` field
//! - `invoice_payments`: append-only payment ledger per invoice
//! - `retainer_entries`: append-only signed retainer-fund ledger per case

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Staff {
    Table,
    Username,
    Password,
    OrgId,
}

#[derive(Iden)]
enum Cases {
    Table,
    Id,
    OrgId,
    Title,
    BudgetHoursCenti,
    BudgetCents,
    CreatedBy,
}

#[derive(Iden)]
enum FinanceEntries {
    Table,
    Id,
    CaseId,
    Kind,
    AmountCents,
    HoursCenti,
    OccurredOn,
    Note,
    CreatedBy,
    OrgId,
}

#[derive(Iden)]
enum Invoices {
    Table,
    Id,
    CaseId,
    TotalCents,
    IssuedOn,
    Status,
    CreatedBy,
    OrgId,
}

#[derive(Iden)]
enum InvoicePayments {
    Table,
    Id,
    InvoiceId,
    AmountCents,
    PaidOn,
    Note,
    RecordedBy,
    OrgId,
}

#[derive(Iden)]
enum RetainerEntries {
    Table,
    Id,
    CaseId,
    AmountCents,
    InvoiceId,
    Note,
    CreatedBy,
    OrgId,
    RecordedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Staff
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Staff::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Staff::Password).string().not_null())
                    .col(ColumnDef::new(Staff::OrgId).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Cases
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Cases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cases::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Cases::OrgId).string().not_null())
                    .col(ColumnDef::new(Cases::Title).string().not_null())
                    .col(ColumnDef::new(Cases::BudgetHoursCenti).big_integer())
                    .col(ColumnDef::new(Cases::BudgetCents).big_integer())
                    .col(ColumnDef::new(Cases::CreatedBy).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cases-org_id")
                    .table(Cases::Table)
                    .col(Cases::OrgId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Finance entries
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(FinanceEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FinanceEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FinanceEntries::CaseId).string().not_null())
                    .col(ColumnDef::new(FinanceEntries::Kind).string().not_null())
                    .col(
                        ColumnDef::new(FinanceEntries::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinanceEntries::HoursCenti).big_integer())
                    .col(ColumnDef::new(FinanceEntries::OccurredOn).date().not_null())
                    .col(ColumnDef::new(FinanceEntries::Note).string())
                    .col(ColumnDef::new(FinanceEntries::CreatedBy).string().not_null())
                    .col(ColumnDef::new(FinanceEntries::OrgId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-finance_entries-case_id")
                            .from(FinanceEntries::Table, FinanceEntries::CaseId)
                            .to(Cases::Table, Cases::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-finance_entries-case_id-occurred_on")
                    .table(FinanceEntries::Table)
                    .col(FinanceEntries::CaseId)
                    .col(FinanceEntries::OccurredOn)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Invoices
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invoices::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Invoices::CaseId).string().not_null())
                    .col(
                        ColumnDef::new(Invoices::TotalCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invoices::IssuedOn).date().not_null())
                    .col(
                        ColumnDef::new(Invoices::Status)
                            .string()
                            .not_null()
                            .default("unpaid"),
                    )
                    .col(ColumnDef::new(Invoices::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Invoices::OrgId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-invoices-case_id")
                            .from(Invoices::Table, Invoices::CaseId)
                            .to(Cases::Table, Cases::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-invoices-case_id")
                    .table(Invoices::Table)
                    .col(Invoices::CaseId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Invoice payments (append-only ledger)
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(InvoicePayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InvoicePayments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InvoicePayments::InvoiceId).string().not_null())
                    .col(
                        ColumnDef::new(InvoicePayments::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InvoicePayments::PaidOn).date().not_null())
                    .col(ColumnDef::new(InvoicePayments::Note).string())
                    .col(
                        ColumnDef::new(InvoicePayments::RecordedBy)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InvoicePayments::OrgId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-invoice_payments-invoice_id")
                            .from(InvoicePayments::Table, InvoicePayments::InvoiceId)
                            .to(Invoices::Table, Invoices::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-invoice_payments-invoice_id-paid_on")
                    .table(InvoicePayments::Table)
                    .col(InvoicePayments::InvoiceId)
                    .col(InvoicePayments::PaidOn)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Retainer entries (append-only signed ledger)
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(RetainerEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RetainerEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RetainerEntries::CaseId).string().not_null())
                    .col(
                        ColumnDef::new(RetainerEntries::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RetainerEntries::InvoiceId).string())
                    .col(ColumnDef::new(RetainerEntries::Note).string())
                    .col(
                        ColumnDef::new(RetainerEntries::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RetainerEntries::OrgId).string().not_null())
                    .col(
                        ColumnDef::new(RetainerEntries::RecordedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-retainer_entries-case_id")
                            .from(RetainerEntries::Table, RetainerEntries::CaseId)
                            .to(Cases::Table, Cases::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-retainer_entries-case_id-recorded_at")
                    .table(RetainerEntries::Table)
                    .col(RetainerEntries::CaseId)
                    .col(RetainerEntries::RecordedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RetainerEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InvoicePayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FinanceEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await?;
        Ok(())
    }
}
