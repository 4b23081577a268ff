use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, AUTHORIZATION};

use kakaomap_common::api::kakao::{CategorySearch, KeywordSearch, SearchRequest};
use kakaomap_common::config::KakaoApiConfig;
use kakaomap_common::{ExternalApiError, KakaoMapError};

/// Client for the mapping API's local search endpoints.
///
/// Issues exactly one GET per call and hands back the response body
/// untouched. Non-success statuses become [`ExternalApiError::Status`];
/// nothing is retried.
#[derive(Clone)]
pub struct KakaoClient {
    http: reqwest::Client,
    endpoint: String,
    authorization: HeaderValue,
    timeout: Duration,
}

impl std::fmt::Debug for KakaoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KakaoClient")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl KakaoClient {
    /// Build a client from the API settings and the REST key.
    pub fn new(config: &KakaoApiConfig, api_key: &str) -> Result<Self, KakaoMapError> {
        let timeout = Duration::from_secs(config.timeout_seconds);

        let http = reqwest::Client::builder()
            .user_agent(concat!("kakaomap-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| KakaoMapError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let mut authorization =
            HeaderValue::from_str(&format!("{} {}", config.auth_scheme, api_key)).map_err(
                |_| KakaoMapError::Internal("API key is not a valid header value".into()),
            )?;
        authorization.set_sensitive(true);

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            authorization,
            timeout,
        })
    }

    /// Base endpoint, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET /search/keyword.json
    pub async fn keyword_search(&self, params: KeywordSearch) -> Result<String, ExternalApiError> {
        self.send(&SearchRequest::Keyword(params)).await
    }

    /// GET /search/category.json
    pub async fn category_search(
        &self,
        params: CategorySearch,
    ) -> Result<String, ExternalApiError> {
        self.send(&SearchRequest::Category(params)).await
    }

    /// Issue a search request and return the raw body text.
    pub async fn send(&self, request: &SearchRequest) -> Result<String, ExternalApiError> {
        let start = Instant::now();
        let path = request.path();
        let url = format!("{}{}", self.endpoint, path);

        tracing::debug!(path, "Mapping API request");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.authorization.clone())
            .query(&request.query_pairs())
            .send()
            .await
            .map_err(|e| self.transport_error(path, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(path, e))?;

        let latency = start.elapsed().as_secs_f64();
        metrics::histogram!("kakao.request.latency", "path" => path).record(latency);

        if !status.is_success() {
            metrics::counter!("kakao.request.errors", "path" => path).increment(1);
            tracing::warn!(
                path,
                status = status.as_u16(),
                latency_s = latency,
                "Mapping API returned an error status"
            );
            return Err(ExternalApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(
            path,
            status = status.as_u16(),
            latency_s = latency,
            body_len = body.len(),
            "Mapping API request succeeded"
        );

        Ok(body)
    }

    fn transport_error(&self, path: &'static str, e: reqwest::Error) -> ExternalApiError {
        metrics::counter!("kakao.request.errors", "path" => path).increment(1);
        if e.is_timeout() {
            tracing::warn!(path, timeout_s = self.timeout.as_secs(), "Mapping API request timed out");
            ExternalApiError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            tracing::warn!(path, error = %e, "Mapping API request failed");
            ExternalApiError::Transport(e.to_string())
        }
    }
}
