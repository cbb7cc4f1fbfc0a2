use admin_client::disputes::load_disputes;
use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, DisputeQuery, DisputeSort};

use crate::common::{self, StubApi};

#[tokio::test]
async fn test_default_query_sends_no_filters() {
    let stub = StubApi::start(|_| common::ok(json!({ "disputes": [] }))).await;
    let api = stub.client();

    let disputes = api.list_disputes(&DisputeQuery::default()).await.unwrap();
    assert!(disputes.is_empty());

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/admin/disputes");
    assert!(requests[0].query.is_empty());
}

#[tokio::test]
async fn test_selected_filters_travel_with_request() {
    let stub = StubApi::start(|_| common::ok(json!([]))).await;
    let api = stub.client();

    let query = DisputeQuery {
        status: "under_review".into(),
        dispute_type: "all".into(),
        filed_date_from: NaiveDate::from_ymd_opt(2026, 1, 5),
        amount_min: Some(250.0),
        ..DisputeQuery::default()
    };
    api.list_disputes(&query).await.unwrap();

    let sent = &stub.requests()[0];
    assert_eq!(sent.param("status"), Some("under_review"));
    assert_eq!(sent.param("type"), None);
    assert_eq!(sent.param("filed_date_from"), Some("2026-01-05T00:00:00.000Z"));
    assert_eq!(sent.param("amount_min"), Some("250"));
}

#[tokio::test]
async fn test_load_orders_queue_by_priority() {
    let stub = StubApi::start(|_| {
        common::ok(json!({
            "disputes": [
                { "id": "d1", "type": "quality", "status": "filed", "priority": "low" },
                { "id": "d2", "type": "payment", "status": "filed", "priority": "urgent" },
                { "id": "d3", "type": "delay", "status": "mediation", "priority": "high" },
            ]
        }))
    })
    .await;
    let api = stub.client();

    let disputes = load_disputes(&api, &DisputeQuery::default(), DisputeSort::Priority)
        .await
        .unwrap();
    let order: Vec<&str> = disputes.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(order, vec!["d2", "d3", "d1"]);
    assert_eq!(disputes[0].dispute_type, "payment");
}

#[tokio::test]
async fn test_failed_load_reports_server_error() {
    let stub = StubApi::start(|_| {
        common::status(StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": "db timeout" }))
    })
    .await;
    let api = stub.client();

    let err = load_disputes(&api, &DisputeQuery::default(), DisputeSort::Date)
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::InternalError);
    assert_eq!(err.message, "db timeout");
    assert_eq!(stub.requests().len(), 1);
}
