use super::loader::{ConfigError, RuntimeConfig};

/// Validate the complete runtime configuration.
///
/// Collects every problem before failing so a misconfigured deployment
/// is fixed in one pass.
pub fn validate(config: &RuntimeConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_identity(config, &mut errors);
    validate_kakao(config, &mut errors);
    validate_telemetry(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.join("; ")))
    }
}

fn validate_identity(config: &RuntimeConfig, errors: &mut Vec<String>) {
    let s = &config.settings.server;

    if s.name.trim().is_empty() {
        errors.push("server.name must not be empty".into());
    }
    if s.version.trim().is_empty() {
        errors.push("server.version must not be empty".into());
    }
}

fn validate_kakao(config: &RuntimeConfig, errors: &mut Vec<String>) {
    let k = &config.settings.kakao;

    if !(k.endpoint.starts_with("http://") || k.endpoint.starts_with("https://")) {
        errors.push(format!(
            "kakao.endpoint must be an http(s) URL, got '{}'",
            k.endpoint
        ));
    }
    if k.auth_scheme.trim().is_empty() || k.auth_scheme.contains(char::is_whitespace) {
        errors.push("kakao.auth_scheme must be a single non-empty token".into());
    }
    if k.timeout_seconds == 0 {
        errors.push("kakao.timeout_seconds must be > 0".into());
    }
    if k.api_key_env.trim().is_empty() {
        errors.push("kakao.api_key_env must not be empty".into());
    }
    if config.api_key.chars().any(|c| c.is_control()) {
        errors.push("API key must not contain control characters".into());
    }
}

fn validate_telemetry(config: &RuntimeConfig, errors: &mut Vec<String>) {
    if config.settings.telemetry.metrics_port == Some(0) {
        errors.push("telemetry.metrics_port must be > 0 when set".into());
    }
}
