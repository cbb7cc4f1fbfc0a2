use admin_client::ExportFile;
use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use shared_types::{ReleaseRequest, TransactionQuery};

use crate::common::{self, StubApi};

#[tokio::test]
async fn test_transaction_export_leaves_out_amount_bounds() {
    let stub = StubApi::start(|_| (StatusCode::OK, "id,amount\n".to_string())).await;
    let api = stub.client();

    let query = TransactionQuery {
        transaction_type: "refund".into(),
        date_from: NaiveDate::from_ymd_opt(2026, 2, 1),
        amount_min: Some(10.0),
        amount_max: Some(500.0),
        ..TransactionQuery::default()
    };
    let bytes = api.export_transactions(&query).await.unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
    let file = ExportFile::csv("transactions", day, bytes);
    assert_eq!(file.filename, "transactions-export-2026-02-28.csv");
    assert_eq!(file.bytes, b"id,amount\n".to_vec());

    let sent = &stub.requests()[0];
    assert_eq!(sent.path, "/admin/transactions/export");
    assert_eq!(
        sent.query,
        vec![
            ("type".to_string(), "refund".to_string()),
            ("date_from".to_string(), "2026-02-01".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_escrow_report_is_fetched_as_pdf() {
    let stub = StubApi::start(|_| (StatusCode::OK, "%PDF-1.7".to_string())).await;
    let api = stub.client();

    let bytes = api.escrow_report("esc-17").await.unwrap();
    let file = ExportFile::escrow_report("esc-17", bytes);
    assert_eq!(file.filename, "escrow-report-esc-17.pdf");
    assert_eq!(file.bytes, b"%PDF-1.7".to_vec());

    let sent = &stub.requests()[0];
    assert_eq!(sent.path, "/admin/escrow/esc-17/report");
    assert_eq!(sent.param("format"), Some("pdf"));
}

#[tokio::test]
async fn test_failed_export_carries_server_message() {
    let stub = StubApi::start(|_| {
        common::status(
            StatusCode::TOO_MANY_REQUESTS,
            serde_json::json!({ "error": "Export limit reached" }),
        )
    })
    .await;
    let api = stub.client();

    let err = api.export_users().await.unwrap_err();
    assert_eq!(err.message_or("Failed to export users"), "Export limit reached");
}

#[tokio::test]
async fn test_emergency_release_posts_flagged_body() {
    let stub = StubApi::start(|_| common::ok(serde_json::json!(null))).await;
    let api = stub.client();

    let request = ReleaseRequest::from_input("1200.50", "Contractor hardship").unwrap();
    api.release_escrow("esc-3", &request).await.unwrap();

    let sent = &stub.requests()[0];
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.path, "/admin/escrow/esc-3/release");
    assert_eq!(
        sent.body,
        Some(serde_json::json!({
            "amount": 1200.5,
            "reason": "Contractor hardship",
            "emergency": true,
        }))
    );
}
