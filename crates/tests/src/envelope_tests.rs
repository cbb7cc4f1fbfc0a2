use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, TemplateInput};

use crate::common::{self, StubApi};

#[tokio::test]
async fn test_unsuccessful_envelope_is_bad_request() {
    let stub = StubApi::start(|_| {
        common::status(
            StatusCode::OK,
            json!({ "success": false, "message": "Escrow account is frozen" }),
        )
    })
    .await;
    let api = stub.client();

    let err = api.list_escrow_accounts().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::BadRequest);
    assert_eq!(err.message, "Escrow account is frozen");
}

#[tokio::test]
async fn test_empty_body_means_no_data() {
    let stub = StubApi::start(|_| (StatusCode::OK, String::new())).await;
    let api = stub.client();

    assert_eq!(api.dashboard_stats().await.unwrap(), None);
    assert!(api.list_transactions(&Default::default()).await.unwrap().is_empty());
    api.regenerate_sitemap().await.unwrap();
}

#[tokio::test]
async fn test_lists_accept_keyed_object_or_bare_array() {
    let stub = StubApi::start(|req| match req.path.as_str() {
        "/admin/financial/escrow" => common::ok(json!({
            "accounts": [{ "id": "esc-1", "total_amount": 900.0, "status": "active" }],
        })),
        _ => common::ok(json!([
            { "id": "t1", "type": "payment", "status": "completed", "amount": 120.0 },
            { "id": "t2", "type": "refund", "status": "pending", "amount": 40.0 },
        ])),
    })
    .await;
    let api = stub.client();

    let accounts = api.list_escrow_accounts().await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].total_amount, 900.0);

    let transactions = api.list_transactions(&Default::default()).await.unwrap();
    let types: Vec<&str> = transactions.iter().map(|t| t.transaction_type.as_str()).collect();
    assert_eq!(types, vec!["payment", "refund"]);
}

#[tokio::test]
async fn test_dashboard_accepts_wrapped_or_bare_payload() {
    let stub = StubApi::start(|req| match req.path.as_str() {
        "/admin/dashboard/stats" => common::ok(json!({
            "dashboard": { "users": { "total": 10, "suspended": 2 }, "total_revenue": 5400.0 },
        })),
        _ => common::ok(json!({ "total_referrals": 31, "conversion_rate": 12.5 })),
    })
    .await;
    let api = stub.client();

    let stats = api.dashboard_stats().await.unwrap().unwrap();
    assert_eq!(stats.users.suspended, 2);
    assert_eq!(stats.total_revenue, 5400.0);

    let program = api.referral_program().await.unwrap().unwrap();
    assert_eq!(program.total_referrals, 31);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let stub = StubApi::start(|_| (StatusCode::OK, "<html>gateway</html>".to_string())).await;
    let api = stub.client();

    let err = api.support_dashboard().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Decode);
    assert_eq!(err.message_or("Failed to load support data"), "Failed to load support data");
}

#[tokio::test]
async fn test_validation_errors_keep_field_messages() {
    let stub = StubApi::start(|_| {
        common::status(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "message": "Invalid template", "errors": { "subject": "Subject is required" } }),
        )
    })
    .await;
    let api = stub.client();

    let input = TemplateInput {
        name: "Welcome".into(),
        template_type: "email".into(),
        subject: None,
        content: "Hi {{name}}".into(),
        variables: vec!["name".into()],
    };
    let err = api.create_template(&input).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert_eq!(err.field_errors.get("subject").map(String::as_str), Some("Subject is required"));
    assert_eq!(stub.requests_to("/admin/notifications/templates").len(), 1);
}
