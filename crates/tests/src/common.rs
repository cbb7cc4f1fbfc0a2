use std::sync::{Arc, Mutex};

use admin_client::AdminService;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// One request as the stub API saw it. `path` has the `/api/v1` prefix
/// stripped.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

type Responder = Arc<dyn Fn(&Recorded) -> (StatusCode, String) + Send + Sync>;

#[derive(Clone)]
struct StubState {
    log: Arc<Mutex<Vec<Recorded>>>,
    respond: Responder,
}

/// A local admin API that records every request and answers with
/// whatever the test's responder returns.
pub struct StubApi {
    base_url: String,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl StubApi {
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(&Recorded) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let log = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            log: log.clone(),
            respond: Arc::new(respond),
        };
        let router = Router::new().fallback(record).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub API");
        let addr = listener.local_addr().expect("Stub API has no address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Stub API stopped");
        });

        Self {
            base_url: format!("http://{addr}/api/v1"),
            log,
        }
    }

    /// A client pointed at this stub with no session.
    pub fn client(&self) -> AdminService {
        AdminService::new(self.base_url.clone())
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().expect("request log poisoned").clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }
}

async fn record(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: String,
) -> (StatusCode, String) {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    let request = Recorded {
        method,
        path: uri.path().trim_start_matches("/api/v1").to_string(),
        query,
        bearer,
        body: serde_json::from_str(&body).ok(),
    };
    let reply = (state.respond)(&request);
    state.log.lock().expect("request log poisoned").push(request);
    reply
}

/// `{"success": true, "data": ...}`
pub fn ok(data: Value) -> (StatusCode, String) {
    (StatusCode::OK, json!({ "success": true, "data": data }).to_string())
}

pub fn status(code: StatusCode, body: Value) -> (StatusCode, String) {
    (code, body.to_string())
}
