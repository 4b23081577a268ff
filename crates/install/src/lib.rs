pub mod error;
pub mod host_config;

pub use error::{InstallError, Result};
pub use host_config::{install, merge_server, parse_env_assignments, HostConfigFile, LaunchEntry};
