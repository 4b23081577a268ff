use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error(
        "Host config directory not found: {}. Is the desktop host installed and has it run at least once?",
        .dir.display()
    )]
    HostNotFound { dir: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid host config: {0}")]
    InvalidConfig(String),

    #[error("Invalid environment assignment '{0}', expected KEY=VALUE")]
    InvalidEnv(String),
}

pub type Result<T> = std::result::Result<T, InstallError>;
