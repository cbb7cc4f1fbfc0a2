use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use admin_client::bulk::notify_users;
use admin_client::SessionListener;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, Session};

use crate::common::{self, StubApi};

fn session(access: &str, refresh: &str) -> Session {
    Session {
        access_token: access.into(),
        refresh_token: Some(refresh.into()),
    }
}

/// Accepts only `fresh-token`; the refresh endpoint hands it out without
/// rotating the refresh token.
fn rotating_stub(req: &common::Recorded) -> (StatusCode, String) {
    match req.path.as_str() {
        "/auth/refresh-token" => common::ok(json!({ "access_token": "fresh-token" })),
        _ if req.bearer.as_deref() == Some("fresh-token") => {
            common::ok(json!({ "dashboard": { "users": { "total": 42, "active": 40 } } }))
        }
        _ => common::status(StatusCode::UNAUTHORIZED, json!({ "message": "jwt expired" })),
    }
}

#[tokio::test]
async fn test_login_stores_session() {
    let stub = StubApi::start(|_| {
        common::ok(json!({
            "access_token": "a1",
            "refresh_token": "r1",
            "user": { "id": "admin-1", "full_name": "Ada Admin", "role_code": "admin" },
        }))
    })
    .await;
    let api = stub.client();

    let response = api.login(" ada@example.com ", "hunter2").await.unwrap();
    assert_eq!(response.user.id, "admin-1");
    assert_eq!(api.session(), Some(session("a1", "r1")));

    let sent = &stub.requests()[0];
    assert_eq!(sent.path, "/auth/login");
    assert_eq!(
        sent.body,
        Some(json!({ "email": "ada@example.com", "password": "hunter2" }))
    );
}

#[tokio::test]
async fn test_rejected_login_is_not_refreshed() {
    let stub = StubApi::start(|_| {
        common::status(StatusCode::UNAUTHORIZED, json!({ "message": "Invalid credentials" }))
    })
    .await;
    let api = stub.client();

    let err = api.login("ada@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(err.message, "Invalid credentials");
    assert_eq!(stub.requests().len(), 1);
    assert!(!api.is_authenticated());
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_retried() {
    let stub = StubApi::start(rotating_stub).await;
    let api = stub.client();
    api.set_session(Some(session("stale-token", "r1")));

    let stats = api.dashboard_stats().await.unwrap().unwrap();
    assert_eq!(stats.users.total, 42);

    let requests = stub.requests();
    let trail: Vec<(&str, Option<&str>)> = requests
        .iter()
        .map(|r| (r.path.as_str(), r.bearer.as_deref()))
        .collect();
    assert_eq!(
        trail,
        vec![
            ("/admin/dashboard/stats", Some("stale-token")),
            ("/auth/refresh-token", None),
            ("/admin/dashboard/stats", Some("fresh-token")),
        ]
    );
    assert_eq!(requests[1].body, Some(json!({ "refresh_token": "r1" })));
    // the server did not rotate the refresh token, so the old one is kept
    assert_eq!(api.session(), Some(session("fresh-token", "r1")));
}

#[tokio::test]
async fn test_failed_refresh_signs_out() {
    let stub = StubApi::start(|_| {
        common::status(StatusCode::UNAUTHORIZED, json!({ "message": "revoked" }))
    })
    .await;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let listener: SessionListener = {
        let seen = seen.clone();
        Arc::new(move |s: Option<&Session>| seen.lock().unwrap().push(s.cloned()))
    };
    let api = stub.client().with_session_listener(listener);
    api.set_session(Some(session("stale-token", "r1")));

    let err = api.list_escrow_accounts().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.message, "Your session has expired. Please sign in again.");
    assert!(!api.is_authenticated());
    assert_eq!(seen.lock().unwrap().last(), Some(&None));
    // original call plus the refresh attempt, no retry
    assert_eq!(stub.requests().len(), 2);
}

#[tokio::test]
async fn test_no_refresh_token_signs_out_without_calling_refresh() {
    let stub = StubApi::start(|_| {
        common::status(StatusCode::UNAUTHORIZED, json!({ "message": "jwt expired" }))
    })
    .await;
    let api = stub.client();
    api.set_session(Some(Session {
        access_token: "stale-token".into(),
        refresh_token: None,
    }));

    let err = api.security_dashboard().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(stub.requests_to("/auth/refresh-token").len(), 0);
    assert_eq!(api.session(), None);
}

#[tokio::test]
async fn test_clones_share_refreshed_session() {
    let stub = StubApi::start(rotating_stub).await;
    let api = stub.client();
    let other = api.clone();
    api.set_session(Some(session("stale-token", "r1")));

    api.dashboard_stats().await.unwrap();
    assert_eq!(other.session().map(|s| s.access_token), Some("fresh-token".to_string()));

    api.logout();
    assert!(!other.is_authenticated());
}

#[tokio::test]
async fn test_parallel_rejections_share_one_refresh() {
    // The refresh token is single use, like the real API's rotation.
    let redeemed = Arc::new(AtomicBool::new(false));
    let stub = StubApi::start({
        let redeemed = redeemed.clone();
        move |req: &common::Recorded| match req.path.as_str() {
            "/auth/refresh-token" if !redeemed.swap(true, Ordering::SeqCst) => {
                common::ok(json!({ "access_token": "fresh-token", "refresh_token": "r2" }))
            }
            "/auth/refresh-token" => {
                common::status(StatusCode::UNAUTHORIZED, json!({ "message": "refresh token reused" }))
            }
            _ if req.bearer.as_deref() == Some("fresh-token") => common::ok(json!(null)),
            _ => common::status(StatusCode::UNAUTHORIZED, json!({ "message": "jwt expired" })),
        }
    })
    .await;
    let api = stub.client();
    api.set_session(Some(session("stale-token", "r1")));

    let ids: Vec<String> = ["u1", "u2", "u3"].iter().map(|s| s.to_string()).collect();
    let count = notify_users(&api, &ids, "Maintenance tonight").await.unwrap();

    assert_eq!(count, 3);
    assert_eq!(stub.requests_to("/auth/refresh-token").len(), 1);
    assert_eq!(api.session(), Some(session("fresh-token", "r2")));
    let retried = stub
        .requests()
        .iter()
        .filter(|r| r.path.ends_with("/notify") && r.bearer.as_deref() == Some("fresh-token"))
        .count();
    assert_eq!(retried, 3);
}
