//! HTTP surface tests over an in-memory database.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine as _;
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
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
    let engine = engine::Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    crate::server::test_router(engine, db)
}

fn basic_auth(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"))
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth("alice", "password"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth("alice", "password"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn rejects_bad_credentials() {
    let app = test_app().await;

    let request = Request::builder()
        .uri("/classify/budget?utilization_pct=50")
        .header(header::AUTHORIZATION, basic_auth("alice", "wrong"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn classify_endpoints_are_stateless() {
    let app = test_app().await;

    let (status, body) = get(&app, "/classify/budget?utilization_pct=85").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "warning");

    let (status, body) = get(&app, "/classify/budget").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "normal");

    let (status, body) = get(&app, "/classify/payment?total_cents=10000&paid_cents=4000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "partial");
}

#[tokio::test]
async fn payment_flow_over_http() {
    let app = test_app().await;

    let (status, body) = post_json(
        &app,
        "/cases",
        json!({ "title": "Estate of Doe", "budget_hours_centi": null, "budget_cents": 500_000 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let case_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = post_json(
        &app,
        &format!("/cases/{case_id}/retainer/deposits"),
        json!({ "amount_cents": 30_000, "note": "initial retainer" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(
        &app,
        "/invoices",
        json!({ "case_id": case_id, "total_cents": 100_000, "issued_on": "2026-08-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let invoice_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = post_json(
        &app,
        &format!("/invoices/{invoice_id}/payments"),
        json!({
            "retainer_cents": 30_000,
            "manual_cents": 20_000,
            "paid_on": "2026-08-10",
            "note": null,
            "idempotency_key": null
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invoice_status"], "partial");
    assert_eq!(body["total_paid_cents"], 50_000);
    assert_eq!(body["balance_due_cents"], 50_000);
    assert_eq!(body["replayed"], false);

    let (status, body) = get(&app, &format!("/invoices/{invoice_id}/balance")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cents"], 100_000);
    assert_eq!(body["total_paid_cents"], 50_000);
    assert_eq!(body["balance_due_cents"], 50_000);
    assert_eq!(body["status"], "partial");
    assert_eq!(body["payments"].as_array().unwrap().len(), 1);

    // Retainer fund is exhausted: one deposit, one application.
    let (status, body) = get(&app, &format!("/cases/{case_id}/retainer")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance_cents"], 0);
    assert_eq!(body["entries"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn budget_summary_over_http() {
    let app = test_app().await;

    let (_, body) = post_json(
        &app,
        "/cases",
        json!({ "title": "Acme v. Smith", "budget_hours_centi": 10_000, "budget_cents": null }),
    )
    .await;
    let case_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = post_json(
        &app,
        "/financeEntries",
        json!({
            "case_id": case_id,
            "kind": "time",
            "amount_cents": 85_000,
            "hours_centi": 8_500,
            "occurred_on": "2026-08-05",
            "note": "drafting"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, &format!("/cases/{case_id}/budget")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["consumed_hours_centi"], 8_500);
    assert_eq!(body["hours_utilization_pct"], 85.0);
    assert_eq!(body["status"], "warning");

    // A window before any work shows nothing consumed.
    let (status, body) = get(
        &app,
        &format!("/cases/{case_id}/budget?from=2026-01-01&to=2026-01-31"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["consumed_hours_centi"], 0);
    assert_eq!(body["status"], "normal");
}

#[tokio::test]
async fn validation_and_missing_rows_map_to_http_errors() {
    let app = test_app().await;

    let (_, body) = post_json(
        &app,
        "/cases",
        json!({ "title": "Misc", "budget_hours_centi": null, "budget_cents": null }),
    )
    .await;
    let case_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = post_json(
        &app,
        &format!("/cases/{case_id}/retainer/deposits"),
        json!({ "amount_cents": 0, "note": null }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let unknown = uuid::Uuid::new_v4();
    let (status, _) = get(&app, &format!("/invoices/{unknown}/balance")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
