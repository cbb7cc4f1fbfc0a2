use admin_client::bulk::{export_users, notify_users, suspend_users, SUSPEND_REASON_REQUIRED};
use admin_client::BulkAction;
use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{self, StubApi};

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_suspend_sends_one_batched_request() {
    let stub = StubApi::start(|_| common::ok(json!(null))).await;
    let api = stub.client();

    let count = suspend_users(&api, &ids(&["u1", "u2"]), "  chargeback fraud ")
        .await
        .unwrap();
    assert_eq!(count, 2);

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path, "/admin/users/bulk-action");
    assert_eq!(
        requests[0].body,
        Some(json!({
            "action": "suspend",
            "user_ids": ["u1", "u2"],
            "reason": "chargeback fraud",
        }))
    );
}

#[tokio::test]
async fn test_suspend_without_reason_never_reaches_server() {
    let stub = StubApi::start(|_| common::ok(json!(null))).await;
    let api = stub.client();

    let err = suspend_users(&api, &ids(&["u1"]), "").await.unwrap_err();
    assert_eq!(BulkAction::Suspend.failure_message(&err), SUSPEND_REASON_REQUIRED);
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_notify_sends_one_request_per_user() {
    let stub = StubApi::start(|_| common::ok(json!(null))).await;
    let api = stub.client();

    let count = notify_users(&api, &ids(&["u1", "u2", "u3"]), "Maintenance tonight")
        .await
        .unwrap();
    assert_eq!(count, 3);

    let mut paths: Vec<String> = stub.requests().into_iter().map(|r| r.path).collect();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            "/admin/users/u1/notify",
            "/admin/users/u2/notify",
            "/admin/users/u3/notify",
        ]
    );
    for request in stub.requests() {
        assert_eq!(request.body, Some(json!({ "message": "Maintenance tonight" })));
    }
}

#[tokio::test]
async fn test_notify_fails_whole_batch_on_one_error() {
    let stub = StubApi::start(|req| {
        if req.path == "/admin/users/u2/notify" {
            common::status(StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": "mailer down" }))
        } else {
            common::ok(json!(null))
        }
    })
    .await;
    let api = stub.client();

    let err = notify_users(&api, &ids(&["u1", "u2", "u3"]), "Hello")
        .await
        .unwrap_err();
    assert_eq!(err.message, "mailer down");
    assert_eq!(BulkAction::Notify.failure_message(&err), "Failed to send notifications");
    // the other recipients were still attempted
    assert_eq!(stub.requests().len(), 3);
}

#[tokio::test]
async fn test_export_downloads_csv_for_today() {
    let stub = StubApi::start(|_| (StatusCode::OK, "id,email\nu1,a@example.com\n".to_string())).await;
    let api = stub.client();

    let day = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
    let file = export_users(&api, day).await.unwrap();
    assert_eq!(file.filename, "users-export-2026-10-15.csv");
    assert_eq!(file.bytes, b"id,email\nu1,a@example.com\n".to_vec());

    let sent = &stub.requests()[0];
    assert_eq!(sent.path, "/admin/users/export");
    assert_eq!(sent.param("format"), Some("csv"));
}
