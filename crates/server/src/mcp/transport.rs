use rmcp::model::ErrorCode;
use rmcp::ServiceExt;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use super::handler::KakaoMapServer;

/// In-process pipe between the screening relay and the rmcp session.
const BRIDGE_BUFFER: usize = 64 * 1024;

/// Requests the rmcp session answers. Anything else gets `-32601` here.
const SERVED_REQUESTS: &[&str] = &[
    "initialize",
    "ping",
    "tools/list",
    "tools/call",
    "resources/list",
    "resources/templates/list",
    "resources/read",
    "resources/subscribe",
    "resources/unsubscribe",
    "prompts/list",
    "prompts/get",
    "completion/complete",
    "logging/setLevel",
];

const FORWARDED_NOTIFICATIONS: &[&str] = &[
    "notifications/initialized",
    "notifications/cancelled",
    "notifications/progress",
    "notifications/roots/list_changed",
];

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("MCP session failed to initialize: {0}")]
    Initialize(String),

    #[error("MCP session task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// What the relay does with one input line.
#[derive(Debug, PartialEq)]
enum Screened {
    Forward,
    Ignore,
    /// Answer directly with this JSON-RPC error line.
    Reject(Vec<u8>),
}

/// Serve on the process's stdin/stdout.
pub async fn run_stdio(server: KakaoMapServer) -> Result<(), TransportError> {
    serve(server, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serve one MCP session over newline-delimited JSON-RPC.
///
/// Input lines are screened before they reach the rmcp session: lines it
/// could not decode are answered here so one bad line never ends the
/// session. Relay answers and session output share a single writer task.
pub async fn serve<R, W>(server: KakaoMapServer, input: R, output: W) -> Result<(), TransportError>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (session_io, relay_io) = tokio::io::duplex(BRIDGE_BUFFER);
    let (from_session, to_session) = tokio::io::split(relay_io);
    let (tx, rx) = mpsc::unbounded_channel::<Vec<u8>>();

    let writer = tokio::spawn(write_lines(rx, output));
    let relay_out = tokio::spawn(relay_responses(from_session, tx.clone()));
    let relay_in = tokio::spawn(screen_requests(input, to_session, tx));

    let result = match server.serve(tokio::io::split(session_io)).await {
        Ok(running) => {
            tracing::info!("MCP session initialized");
            let reason = running.waiting().await?;
            tracing::info!(reason = ?reason, "MCP session ended");
            Ok(())
        }
        Err(e) => Err(TransportError::Initialize(e.to_string())),
    };

    // Input may still be open (stdin) after the session is gone.
    relay_in.abort();

    if let Ok(Err(e)) = relay_out.await {
        tracing::warn!(error = %e, "Relay from session failed");
    }
    if let Ok(Err(e)) = writer.await {
        tracing::warn!(error = %e, "Output closed early");
    }

    result
}

async fn screen_requests<R, W>(
    input: R,
    mut to_session: W,
    out: mpsc::UnboundedSender<Vec<u8>>,
) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(input);
    let mut raw = Vec::new();

    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw).await? == 0 {
            break;
        }
        let line = raw.trim_ascii();
        if line.is_empty() {
            continue;
        }

        match screen(line) {
            Screened::Forward => {
                to_session.write_all(line).await?;
                to_session.write_all(b"\n").await?;
                to_session.flush().await?;
            }
            Screened::Ignore => {}
            Screened::Reject(response) => {
                if out.send(response).is_err() {
                    break;
                }
            }
        }
    }

    tracing::info!("Input closed");
    to_session.shutdown().await
}

async fn relay_responses<R>(from_session: R, out: mpsc::UnboundedSender<Vec<u8>>) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(from_session);
    loop {
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(());
        }
        if !line.ends_with(b"\n") {
            line.push(b'\n');
        }
        if out.send(line).is_err() {
            return Ok(());
        }
    }
}

async fn write_lines<W>(mut rx: mpsc::UnboundedReceiver<Vec<u8>>, mut output: W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = rx.recv().await {
        output.write_all(&line).await?;
        output.flush().await?;
    }
    output.shutdown().await
}

fn screen(line: &[u8]) -> Screened {
    let parsed = std::str::from_utf8(line)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str::<Value>(text).map_err(|e| e.to_string()));
    let message = match parsed {
        Ok(message) => message,
        Err(reason) => {
            tracing::warn!(error = %reason, "Unparseable JSON-RPC message");
            return Screened::Reject(error_line(
                Value::Null,
                ErrorCode::PARSE_ERROR,
                format!("Parse error: {}", reason),
            ));
        }
    };

    let is_jsonrpc = message.get("jsonrpc").and_then(Value::as_str) == Some("2.0");
    let id = message
        .get("id")
        .filter(|id| id.is_string() || id.is_number())
        .cloned();
    let method = message.get("method").and_then(Value::as_str);

    match (is_jsonrpc, method, id) {
        (true, Some(method), Some(id)) => {
            if !SERVED_REQUESTS.contains(&method) {
                tracing::debug!(method, "Unsupported method");
                return Screened::Reject(error_line(
                    id,
                    ErrorCode::METHOD_NOT_FOUND,
                    format!("Method not found: {}", method),
                ));
            }
            if method == "tools/call" {
                if let Err(reason) = check_tool_call(message.get("params")) {
                    return Screened::Reject(error_line(id, ErrorCode::INVALID_PARAMS, reason));
                }
            }
            Screened::Forward
        }
        (true, Some(method), None) => {
            if FORWARDED_NOTIFICATIONS.contains(&method) {
                Screened::Forward
            } else {
                tracing::debug!(method, "Dropping notification");
                Screened::Ignore
            }
        }
        // Client replies to server-initiated requests.
        (true, None, Some(_)) if message.get("result").is_some() || message.get("error").is_some() => {
            Screened::Forward
        }
        (_, _, id) => Screened::Reject(error_line(
            id.unwrap_or(Value::Null),
            ErrorCode::INVALID_REQUEST,
            "Invalid request: not a JSON-RPC 2.0 message",
        )),
    }
}

fn check_tool_call(params: Option<&Value>) -> Result<(), &'static str> {
    let params = params.ok_or("Missing params")?;
    if !params.get("name").is_some_and(Value::is_string) {
        return Err("Missing tool name");
    }
    match params.get("arguments") {
        None | Some(Value::Null) | Some(Value::Object(_)) => Ok(()),
        Some(_) => Err("Tool arguments must be an object"),
    }
}

fn error_line(id: Value, code: ErrorCode, message: impl Into<String>) -> Vec<u8> {
    let mut line = json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code.0, "message": message.into() },
    })
    .to_string()
    .into_bytes();
    line.push(b'\n');
    line
}
