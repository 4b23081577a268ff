mod common;

use std::time::Duration;

use serde_json::json;

use common::{registry_for, registry_with_timeout, MockKakao};
use kakaomap_common::config::ToolsConfig;
use kakaomap_common::{ExternalApiError, KakaoMapError};

#[tokio::test]
async fn test_category_search_request_shape() {
    let mock = MockKakao::start(200, r#"{"documents":[]}"#).await;
    let registry = registry_for(&mock.endpoint(), &ToolsConfig::default());

    let body = registry
        .invoke(
            "search_keyword",
            json!({"category_name": "편의점", "x": 127.0, "y": 37.5}),
        )
        .await
        .unwrap();
    assert_eq!(body, r#"{"documents":[]}"#);

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.path, "/search/category.json");
    assert_eq!(req.query["category_group_code"], "CS2");
    assert_eq!(req.query["radius"], "10");
    assert_eq!(req.query["page"], "1");
    assert_eq!(req.query["size"], "15");
    assert_eq!(req.query["sort"], "accuracy");
    assert_eq!(req.query["x"].parse::<f64>().unwrap(), 127.0);
    assert_eq!(req.query["y"].parse::<f64>().unwrap(), 37.5);
    assert_eq!(req.authorization.as_deref(), Some("KakaoAK test-key"));
}

#[tokio::test]
async fn test_keyword_search_returns_body_verbatim() {
    let payload = r#"{"meta":{"total_count":1},"documents":[{"place_name":"스타벅스 강남역점"}]}"#;
    let mock = MockKakao::start(200, payload).await;
    let registry = registry_for(&mock.endpoint(), &ToolsConfig::default());

    let body = registry
        .invoke(
            "search_location",
            json!({"query": "스타벅스", "x": 127.027, "y": 37.497, "sort": "distance", "size": 5}),
        )
        .await
        .unwrap();
    assert_eq!(body, payload);

    let req = &mock.requests()[0];
    assert_eq!(req.path, "/search/keyword.json");
    assert_eq!(req.query["query"], "스타벅스");
    assert_eq!(req.query["sort"], "distance");
    assert_eq!(req.query["size"], "5");
    assert_eq!(req.query["x"], "127.027");
    assert!(!req.query.contains_key("radius"));
}

#[tokio::test]
async fn test_basic_search_sends_no_coordinates() {
    let mock = MockKakao::start(200, r#"{"documents":[]}"#).await;
    let registry = registry_for(
        &mock.endpoint(),
        &ToolsConfig {
            enable_basic_search: true,
        },
    );

    registry
        .invoke("search_location_basic", json!({"query": "판교"}))
        .await
        .unwrap();

    let req = &mock.requests()[0];
    assert_eq!(req.path, "/search/keyword.json");
    assert_eq!(req.query["query"], "판교");
    assert!(!req.query.contains_key("x"));
    assert!(!req.query.contains_key("y"));
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let mock = MockKakao::start(401, r#"{"errorType":"AccessDeniedError"}"#).await;
    let registry = registry_for(&mock.endpoint(), &ToolsConfig::default());

    let err = registry
        .invoke("search_location", json!({"query": "카페", "x": 127, "y": 37}))
        .await
        .unwrap_err();

    match err {
        KakaoMapError::ExternalApi(ExternalApiError::Status { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("AccessDeniedError"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_unknown_tool_makes_no_request() {
    let mock = MockKakao::start(200, "{}").await;
    let registry = registry_for(&mock.endpoint(), &ToolsConfig::default());

    let err = registry
        .invoke("search_location_basic", json!({"query": "판교"}))
        .await
        .unwrap_err();

    assert!(matches!(err, KakaoMapError::UnknownTool(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_invalid_arguments_make_no_request() {
    let mock = MockKakao::start(200, "{}").await;
    let registry = registry_for(&mock.endpoint(), &ToolsConfig::default());

    let err = registry
        .invoke(
            "search_keyword",
            json!({"category_name": "병원", "x": 127, "y": 37, "page": 0}),
        )
        .await
        .unwrap_err();

    match err {
        KakaoMapError::InvalidArgument { parameter, .. } => assert_eq!(parameter, "page"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_timeout_is_external_api_error() {
    let mock = MockKakao::start_with_delay(200, "{}", Duration::from_secs(3)).await;
    let registry = registry_with_timeout(&mock.endpoint(), 1, &ToolsConfig::default());

    let err = registry
        .invoke("search_location", json!({"query": "카페", "x": 127, "y": 37}))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        KakaoMapError::ExternalApi(ExternalApiError::Timeout { timeout_secs: 1 })
    ));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let registry = registry_for(&endpoint, &ToolsConfig::default());
    let err = registry
        .invoke("search_location", json!({"query": "카페", "x": 127, "y": 37}))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        KakaoMapError::ExternalApi(ExternalApiError::Transport(_))
    ));
}
