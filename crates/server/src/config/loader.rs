use std::path::{Path, PathBuf};

use kakaomap_common::config::ServerConfig;

use super::validation;

pub const CONFIG_FILE_NAME: &str = "server.toml";
pub const ENDPOINT_ENV: &str = "KAKAO_API_ENDPOINT";
pub const TIMEOUT_ENV: &str = "KAKAO_TIMEOUT_SECONDS";

/// Complete runtime configuration: parsed settings plus the API secret.
#[derive(Clone)]
pub struct RuntimeConfig {
    pub settings: ServerConfig,
    /// REST API key. Never logged.
    pub api_key: String,
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("settings", &self.settings)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Load configuration from the given directory and the process environment.
///
/// Fails loudly on misconfiguration; the server refuses to start on any error.
pub fn load_config(config_dir: &Path) -> Result<RuntimeConfig, ConfigError> {
    load_config_with_env(config_dir, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] but with an injectable environment lookup.
pub fn load_config_with_env<F>(config_dir: &Path, env: F) -> Result<RuntimeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    tracing::info!(config_dir = %config_dir.display(), "Loading configuration");

    // 1. server.toml, if present
    let mut settings = load_server_config(&config_dir.join(CONFIG_FILE_NAME))?;

    // 2. Environment overrides
    apply_env_overrides(&mut settings, &env)?;

    // 3. API key
    let key_env = settings.kakao.api_key_env.clone();
    let api_key = match env(&key_env) {
        Some(key) if !key.trim().is_empty() => key.trim().to_string(),
        _ => return Err(ConfigError::MissingApiKey { env_var: key_env }),
    };

    let config = RuntimeConfig {
        settings,
        api_key,
    };

    // 4. Validate everything
    validation::validate(&config)?;

    tracing::info!(
        endpoint = %config.settings.kakao.endpoint,
        timeout_seconds = config.settings.kakao.timeout_seconds,
        basic_search = config.settings.tools.enable_basic_search,
        "Configuration loaded successfully"
    );

    Ok(config)
}

fn load_server_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "Config file does not exist, using defaults"
        );
        return Ok(ServerConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    ServerConfig::from_toml_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

fn apply_env_overrides<F>(settings: &mut ServerConfig, env: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = env(ENDPOINT_ENV) {
        tracing::debug!(endpoint = %endpoint, "Endpoint overridden from environment");
        settings.kakao.endpoint = endpoint;
    }

    if let Some(raw) = env(TIMEOUT_ENV) {
        settings.kakao.timeout_seconds = raw.trim().parse().map_err(|_| {
            ConfigError::Validation(format!("{} must be a whole number of seconds", TIMEOUT_ENV))
        })?;
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("API key missing: set the {env_var} environment variable")]
    MissingApiKey { env_var: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            load_config_with_env(dir.path(), env_from(&[("KAKAO_REST_API_KEY", "secret")]))
                .unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.settings, ServerConfig::default());
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_with_env(dir.path(), env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey { ref env_var } if env_var == "KAKAO_REST_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_with_env(dir.path(), env_from(&[("KAKAO_REST_API_KEY", "  ")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
    }

    #[test]
    fn test_custom_key_env_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[kakao]\napi_key_env = \"REST_API_KEY\"\n",
        )
        .unwrap();

        let config = load_config_with_env(
            dir.path(),
            env_from(&[
                ("REST_API_KEY", "abc"),
                (ENDPOINT_ENV, "http://127.0.0.1:9999"),
                (TIMEOUT_ENV, "3"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.settings.kakao.endpoint, "http://127.0.0.1:9999");
        assert_eq!(config.settings.kakao.timeout_seconds, 3);
    }

    #[test]
    fn test_bad_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[kakao\n").unwrap();

        let err = load_config_with_env(dir.path(), env_from(&[("KAKAO_REST_API_KEY", "k")]))
            .unwrap_err();
        match err {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_timeout_override() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_with_env(
            dir.path(),
            env_from(&[("KAKAO_REST_API_KEY", "k"), (TIMEOUT_ENV, "soon")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            load_config_with_env(dir.path(), env_from(&[("KAKAO_REST_API_KEY", "top-secret")]))
                .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("top-secret"));
    }

    #[test]
    fn test_sample_config_loads() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config");
        let config = load_config_with_env(&dir, env_from(&[("KAKAO_REST_API_KEY", "k")])).unwrap();
        assert_eq!(config.settings.server.name, "kakao-map");
        assert_eq!(config.settings.kakao.endpoint, "https://dapi.kakao.com/v2/local");
        assert_eq!(config.settings.telemetry.metrics_port, None);
    }
}
