use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::error::{InstallError, Result};

pub const HOST_CONFIG_FILE_NAME: &str = "claude_desktop_config.json";
const SERVERS_KEY: &str = "mcpServers";

/// `<platform config dir>/Claude/claude_desktop_config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("Claude").join(HOST_CONFIG_FILE_NAME))
}

/// How the host should launch the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchEntry {
    pub command: String,
    pub args: Vec<String>,
    /// Assignments in the order given. Later duplicates win.
    pub env: Vec<(String, String)>,
}

/// The host config file, held in memory between open and save.
///
/// Output is always pretty-printed with 2-space indentation and a
/// trailing newline. Key order is preserved.
#[derive(Debug)]
pub struct HostConfigFile {
    path: PathBuf,
    value: Value,
}

impl HostConfigFile {
    /// Open the config, creating it as `{}` if the file is missing.
    ///
    /// The parent directory must already exist.
    pub fn open(path: &Path) -> Result<Self> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        if !dir.as_os_str().is_empty() && !dir.is_dir() {
            return Err(InstallError::HostNotFound {
                dir: dir.to_path_buf(),
            });
        }

        if !path.exists() {
            tracing::info!(path = %path.display(), "Creating empty host config");
            fs::write(path, "{}").map_err(|source| InstallError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let content = fs::read_to_string(path).map_err(|source| InstallError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value = if content.trim().is_empty() {
            json!({})
        } else {
            serde_json::from_str(&content).map_err(|source| InstallError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        };

        Ok(Self {
            path: path.to_path_buf(),
            value,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn upsert_server(&mut self, name: &str, entry: &LaunchEntry) -> Result<()> {
        merge_server(&mut self.value, name, entry)
    }

    pub fn save(&self) -> Result<()> {
        let mut content = serde_json::to_string_pretty(&self.value)
            .map_err(|e| InstallError::InvalidConfig(e.to_string()))?;
        content.push('\n');

        fs::write(&self.path, content).map_err(|source| InstallError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Upsert `mcpServers[name]` in a parsed host config.
///
/// An existing `env` on the same entry is kept and merged with the new
/// assignments, new values taking precedence. Everything else in the
/// document is left alone.
pub fn merge_server(config: &mut Value, name: &str, entry: &LaunchEntry) -> Result<()> {
    let root = config
        .as_object_mut()
        .ok_or_else(|| InstallError::InvalidConfig("root is not a JSON object".into()))?;

    let servers = root
        .entry(SERVERS_KEY)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| InstallError::InvalidConfig(format!("'{}' is not an object", SERVERS_KEY)))?;

    let mut env = match servers.get(name).and_then(|s| s.get("env")) {
        Some(Value::Object(existing)) => existing.clone(),
        Some(_) => {
            tracing::warn!(server = name, "Replacing non-object env");
            Map::new()
        }
        None => Map::new(),
    };
    for (key, value) in &entry.env {
        env.insert(key.clone(), Value::String(value.clone()));
    }

    let mut server = json!({
        "command": entry.command,
        "args": entry.args,
    });
    if !env.is_empty() {
        server["env"] = Value::Object(env);
    }

    servers.insert(name.to_string(), server);
    Ok(())
}

/// Parse `KEY=VALUE` strings. Key and value are trimmed; the value may
/// itself contain `=`.
pub fn parse_env_assignments<S: AsRef<str>>(items: &[S]) -> Result<Vec<(String, String)>> {
    items
        .iter()
        .map(|item| {
            let item = item.as_ref();
            match item.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    Ok((key.trim().to_string(), value.trim().to_string()))
                }
                _ => Err(InstallError::InvalidEnv(item.to_string())),
            }
        })
        .collect()
}

/// Open, merge and save in one step.
pub fn install(path: &Path, name: &str, entry: &LaunchEntry) -> Result<()> {
    let mut file = HostConfigFile::open(path)?;
    file.upsert_server(name, entry)?;
    file.save()?;

    tracing::info!(server = name, path = %path.display(), "Registered server in host config");
    Ok(())
}
