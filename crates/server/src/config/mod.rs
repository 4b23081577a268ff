mod loader;
mod validation;

pub use loader::{
    load_config, load_config_with_env, ConfigError, RuntimeConfig, CONFIG_FILE_NAME, ENDPOINT_ENV,
    TIMEOUT_ENV,
};
