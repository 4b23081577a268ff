#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::routing::get;
use axum::Router;

use kakaomap_common::config::{KakaoApiConfig, ToolsConfig};
use kakaomap_server::kakao::KakaoClient;
use kakaomap_server::tools::{register_tools, ToolHandlerContext, ToolRegistry};

pub const TEST_API_KEY: &str = "test-key";

/// One request as seen by the mock API.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
}

struct MockState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockKakao {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockKakao {
    /// Start a mock answering every search with `status` and `body`.
    pub async fn start(status: u16, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: u16, body: &str, delay: Duration) -> Self {
        let state = Arc::new(MockState {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.to_string(),
            delay,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/search/keyword.json", get(record))
            .route("/search/category.json", get(record))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("mock addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        Self { addr, state }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        query,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (state.status, state.body.clone())
}

pub fn api_config(endpoint: &str, timeout_seconds: u64) -> KakaoApiConfig {
    KakaoApiConfig {
        endpoint: endpoint.to_string(),
        timeout_seconds,
        ..KakaoApiConfig::default()
    }
}

/// Registry with the shipped tools, pointed at `endpoint`.
pub fn registry_for(endpoint: &str, tools: &ToolsConfig) -> ToolRegistry {
    registry_with_timeout(endpoint, 5, tools)
}

pub fn registry_with_timeout(endpoint: &str, timeout_seconds: u64, tools: &ToolsConfig) -> ToolRegistry {
    let kakao = KakaoClient::new(&api_config(endpoint, timeout_seconds), TEST_API_KEY)
        .expect("client");
    let mut registry = ToolRegistry::new(ToolHandlerContext { kakao });
    register_tools(&mut registry, tools).expect("register tools");
    registry
}
