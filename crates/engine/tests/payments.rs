use chrono::{NaiveDate, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    CreateCaseCmd, CreateInvoiceCmd, DepositRetainerCmd, Engine, EngineError, MoneyCents,
    PaymentStatus, RecordPaymentCmd,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO staff (username, password, org_id) VALUES (?, ?, ?)",
        vec!["alice".into(), "password".into(), "acme".into()],
    ))
    .await
    .unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn engine_with_file_db() -> (Engine, DatabaseConnection, String, std::path::PathBuf) {
    let root =
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("engine_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let db = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO staff (username, password, org_id) VALUES (?, ?, ?)",
        vec!["alice".into(), "password".into(), "acme".into()],
    ))
    .await
    .unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();

    (engine, db, url, path)
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
}

async fn case_with_invoice(engine: &Engine, total_cents: i64) -> (Uuid, Uuid) {
    let case_id = engine
        .create_case(CreateCaseCmd {
            title: "Estate of Doe".to_string(),
            budget_hours: None,
            budget_dollars: None,
            created_by: "alice".to_string(),
            org_id: "acme".to_string(),
        })
        .await
        .unwrap();
    let invoice_id = engine
        .create_invoice(CreateInvoiceCmd {
            case_id,
            total: MoneyCents::new(total_cents),
            issued_on: day(1),
            created_by: "alice".to_string(),
            org_id: "acme".to_string(),
        })
        .await
        .unwrap();
    (case_id, invoice_id)
}

async fn deposit(engine: &Engine, case_id: Uuid, cents: i64) {
    engine
        .deposit_retainer(DepositRetainerCmd::new(
            case_id,
            MoneyCents::new(cents),
            "alice",
            "acme",
            Utc::now(),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn mixed_payment_drains_retainer_and_leaves_invoice_partial() {
    let (engine, _db) = engine_with_db().await;
    let (case_id, invoice_id) = case_with_invoice(&engine, 100_000).await;
    deposit(&engine, case_id, 30_000).await;

    let outcome = engine
        .record_payment(
            RecordPaymentCmd::new(invoice_id, "alice", "acme", day(10))
                .retainer_amount(MoneyCents::new(30_000))
                .manual_amount(MoneyCents::new(20_000)),
        )
        .await
        .unwrap();

    assert_eq!(outcome.amount, MoneyCents::new(50_000));
    assert_eq!(outcome.invoice_status, PaymentStatus::Partial);
    assert_eq!(outcome.total_paid, MoneyCents::new(50_000));
    assert_eq!(outcome.balance_due, MoneyCents::new(50_000));
    assert!(!outcome.replayed);

    let balance = engine.retainer_balance(case_id, "acme").await.unwrap();
    assert_eq!(balance, MoneyCents::ZERO);

    let due = engine.invoice_balance_due(invoice_id, "acme").await.unwrap();
    assert_eq!(due, MoneyCents::new(50_000));

    // Payment row plus offsetting retainer application.
    let payments = engine
        .payments_for_invoice(invoice_id, "acme")
        .await
        .unwrap();
    assert_eq!(payments.len(), 1);
    let entries = engine
        .retainer_entries_for_case(case_id, "acme")
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries
        .iter()
        .any(|e| e.amount == -MoneyCents::new(30_000) && e.invoice_id == Some(invoice_id)));
}

#[tokio::test]
async fn settling_the_remainder_marks_the_invoice_paid() {
    let (engine, _db) = engine_with_db().await;
    let (case_id, invoice_id) = case_with_invoice(&engine, 100_000).await;
    deposit(&engine, case_id, 30_000).await;

    engine
        .record_payment(
            RecordPaymentCmd::new(invoice_id, "alice", "acme", day(10))
                .retainer_amount(MoneyCents::new(30_000))
                .manual_amount(MoneyCents::new(20_000)),
        )
        .await
        .unwrap();

    let outcome = engine
        .record_payment(
            RecordPaymentCmd::new(invoice_id, "alice", "acme", day(12))
                .manual_amount(MoneyCents::new(50_000)),
        )
        .await
        .unwrap();

    assert_eq!(outcome.invoice_status, PaymentStatus::Paid);
    assert_eq!(outcome.balance_due, MoneyCents::ZERO);

    let invoice = engine.invoice(invoice_id, "acme").await.unwrap();
    assert_eq!(invoice.status, PaymentStatus::Paid);
}

#[tokio::test]
async fn insufficient_retainer_rolls_back_everything() {
    let (engine, _db) = engine_with_db().await;
    let (case_id, invoice_id) = case_with_invoice(&engine, 100_000).await;

    let err = engine
        .record_payment(
            RecordPaymentCmd::new(invoice_id, "alice", "acme", day(10))
                .retainer_amount(MoneyCents::new(50)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientRetainerFunds(_)));

    // No ledger rows, invoice untouched.
    let payments = engine
        .payments_for_invoice(invoice_id, "acme")
        .await
        .unwrap();
    assert!(payments.is_empty());
    let entries = engine
        .retainer_entries_for_case(case_id, "acme")
        .await
        .unwrap();
    assert!(entries.is_empty());
    let invoice = engine.invoice(invoice_id, "acme").await.unwrap();
    assert_eq!(invoice.status, PaymentStatus::Unpaid);
}

#[tokio::test]
async fn overpayment_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let (_case_id, invoice_id) = case_with_invoice(&engine, 100_000).await;

    engine
        .record_payment(
            RecordPaymentCmd::new(invoice_id, "alice", "acme", day(10))
                .manual_amount(MoneyCents::new(60_000)),
        )
        .await
        .unwrap();

    let err = engine
        .record_payment(
            RecordPaymentCmd::new(invoice_id, "alice", "acme", day(11))
                .manual_amount(MoneyCents::new(60_000)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::PaymentExceedsBalance(_)));
}

#[tokio::test]
async fn zero_and_negative_amounts_are_invalid() {
    let (engine, _db) = engine_with_db().await;
    let (case_id, invoice_id) = case_with_invoice(&engine, 100_000).await;

    let err = engine
        .record_payment(RecordPaymentCmd::new(invoice_id, "alice", "acme", day(10)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .record_payment(
            RecordPaymentCmd::new(invoice_id, "alice", "acme", day(10))
                .manual_amount(MoneyCents::new(-5)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .deposit_retainer(DepositRetainerCmd::new(
            case_id,
            MoneyCents::ZERO,
            "alice",
            "acme",
            Utc::now(),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[tokio::test]
async fn idempotency_key_replays_the_committed_outcome() {
    let (engine, _db) = engine_with_db().await;
    let (_case_id, invoice_id) = case_with_invoice(&engine, 100_000).await;

    let cmd = RecordPaymentCmd::new(invoice_id, "alice", "acme", day(10))
        .manual_amount(MoneyCents::new(40_000))
        .idempotency_key("retry-1");

    let first = engine.record_payment(cmd.clone()).await.unwrap();
    assert!(!first.replayed);

    let second = engine.record_payment(cmd).await.unwrap();
    assert!(second.replayed);
    assert_eq!(second.payment_id, first.payment_id);
    assert_eq!(second.total_paid, MoneyCents::new(40_000));

    let payments = engine
        .payments_for_invoice(invoice_id, "acme")
        .await
        .unwrap();
    assert_eq!(payments.len(), 1);
}

#[tokio::test]
async fn apply_retainer_funds_is_a_pure_retainer_payment() {
    let (engine, _db) = engine_with_db().await;
    let (case_id, invoice_id) = case_with_invoice(&engine, 100_000).await;
    deposit(&engine, case_id, 80_000).await;

    let outcome = engine
        .apply_retainer_funds(
            invoice_id,
            MoneyCents::new(80_000),
            day(15),
            "alice",
            "acme",
        )
        .await
        .unwrap();

    assert_eq!(outcome.invoice_status, PaymentStatus::Partial);
    assert_eq!(outcome.total_paid, MoneyCents::new(80_000));
    let balance = engine.retainer_balance(case_id, "acme").await.unwrap();
    assert_eq!(balance, MoneyCents::ZERO);
}

#[tokio::test]
async fn rows_of_other_organizations_look_missing() {
    let (engine, _db) = engine_with_db().await;
    let (case_id, invoice_id) = case_with_invoice(&engine, 100_000).await;

    let err = engine.retainer_balance(case_id, "rival").await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let err = engine
        .record_payment(
            RecordPaymentCmd::new(invoice_id, "mallory", "rival", day(10))
                .manual_amount(MoneyCents::new(1_000)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn racing_payments_never_overpay_the_invoice() {
    let (engine, db, _url, path) = engine_with_file_db().await;
    let (_case_id, invoice_id) = case_with_invoice(&engine, 100_000).await;

    let first = engine.record_payment(
        RecordPaymentCmd::new(invoice_id, "alice", "acme", day(10))
            .manual_amount(MoneyCents::new(60_000)),
    );
    let second = engine.record_payment(
        RecordPaymentCmd::new(invoice_id, "alice", "acme", day(10))
            .manual_amount(MoneyCents::new(60_000)),
    );
    let (first, second) = tokio::join!(first, second);

    assert_eq!(
        first.is_ok() as u8 + second.is_ok() as u8,
        1,
        "exactly one racing payment may commit"
    );

    let due = engine.invoice_balance_due(invoice_id, "acme").await.unwrap();
    assert_eq!(due, MoneyCents::new(40_000));

    drop(engine);
    drop(db);
    let _ = std::fs::remove_file(path);
}
