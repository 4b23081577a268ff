use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://dapi.kakao.com/v2/local";
pub const DEFAULT_AUTH_SCHEME: &str = "KakaoAK";
pub const DEFAULT_API_KEY_ENV: &str = "KAKAO_REST_API_KEY";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Top-level server configuration, deserialized from server.toml.
/// Every section is optional; missing values take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerIdentity,
    pub kakao: KakaoApiConfig,
    pub tools: ToolsConfig,
    pub telemetry: TelemetryConfig,
}

impl ServerConfig {
    /// Parse a server.toml document.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Name and version reported to MCP clients during `initialize`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
}

impl Default for ServerIdentity {
    fn default() -> Self {
        Self {
            name: "kakao-map".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Mapping API connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KakaoApiConfig {
    /// Base endpoint; search sub-paths are appended to it.
    pub endpoint: String,
    /// Authorization scheme placed before the key.
    pub auth_scheme: String,
    /// Whole-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Name of the environment variable holding the REST API key.
    pub api_key_env: String,
}

impl Default for KakaoApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            auth_scheme: DEFAULT_AUTH_SCHEME.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            api_key_env: DEFAULT_API_KEY_ENV.into(),
        }
    }
}

/// Which tools get registered at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Also register the legacy keyword-only `search_location_basic` tool.
    pub enable_basic_search: bool,
}

/// Optional Prometheus side endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Port for `/health` and `/metrics`. Disabled when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_port: Option<u16>,
}
