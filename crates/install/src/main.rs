use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kakaomap_install::host_config::{default_config_path, install, parse_env_assignments, LaunchEntry};
use kakaomap_install::InstallError;

const SERVER_BINARY: &str = "kakaomap-mcp";

/// Register the Kakao Map MCP server with the desktop host.
#[derive(Parser, Debug)]
#[command(name = "kakaomap-install", version, about)]
struct Cli {
    /// Entry name under `mcpServers`
    #[arg(long, default_value = "kakao-map")]
    name: String,

    /// Environment variable for the server, as KEY=VALUE (repeatable)
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE")]
    env: Vec<String>,

    /// Server executable [default: kakaomap-mcp next to this installer]
    #[arg(long)]
    command: Option<String>,

    /// Argument passed to the server (repeatable)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    args: Vec<String>,

    /// Host config file [default: platform config dir/Claude/claude_desktop_config.json]
    #[arg(long)]
    config_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Install failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), InstallError> {
    let config_file = match cli.config_file.or_else(default_config_path) {
        Some(path) => path,
        None => {
            return Err(InstallError::InvalidConfig(
                "no platform config directory; pass --config-file".into(),
            ))
        }
    };

    let command = match cli.command {
        Some(command) => command,
        None => sibling_server_binary()?,
    };

    let entry = LaunchEntry {
        command,
        args: cli.args,
        env: parse_env_assignments(cli.env.as_slice())?,
    };

    install(&config_file, &cli.name, &entry)
}

fn sibling_server_binary() -> Result<String, InstallError> {
    let exe = std::env::current_exe().map_err(|source| InstallError::Io {
        path: PathBuf::from("<current executable>"),
        source,
    })?;
    let binary = exe.with_file_name(format!("{}{}", SERVER_BINARY, std::env::consts::EXE_SUFFIX));
    Ok(binary.to_string_lossy().into_owned())
}
