use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ListToolsResult, PaginatedRequestParam,
    ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::{json, Value};

use kakaomap_common::config::ServerIdentity;
use kakaomap_common::KakaoMapError;

use crate::tools::ToolRegistry;

const INSTRUCTIONS: &str = "Kakao Map place search. Use search_location to find places by \
     keyword around a longitude (x) / latitude (y), and search_keyword to list places of a \
     category (e.g. 편의점, 약국, 카페) within a radius of a coordinate. Results are the raw \
     Kakao Local API JSON.";

/// MCP server bound to a populated tool registry.
pub struct KakaoMapServer {
    identity: ServerIdentity,
    registry: ToolRegistry,
}

impl KakaoMapServer {
    pub fn new(identity: ServerIdentity, registry: ToolRegistry) -> Self {
        Self { identity, registry }
    }

    /// Registered tools in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.registry
            .definitions()
            .map(|definition| definition.to_mcp_tool())
            .collect()
    }

    /// Run a tool and shape the outcome for `tools/call`.
    ///
    /// Caller mistakes become `-32602` errors carrying the error kind and
    /// the offending parameter. Mapping API failures are tool results with
    /// `isError` set so the model can read the API's message.
    pub async fn dispatch(&self, name: &str, arguments: Value) -> Result<CallToolResult, McpError> {
        match self.registry.invoke(name, arguments).await {
            Ok(body) => Ok(CallToolResult::success(vec![Content::text(body)])),
            Err(e) if e.is_caller_error() => {
                let mut data = json!({ "kind": e.kind() });
                if let KakaoMapError::InvalidArgument { parameter, .. } = &e {
                    data["parameter"] = Value::String(parameter.clone());
                }
                Err(McpError::invalid_params(e.to_string(), Some(data)))
            }
            Err(KakaoMapError::ExternalApi(api)) => {
                let mut detail = json!({
                    "error": "external_api",
                    "detail": api.to_string(),
                });
                if let Some(status) = api.status() {
                    detail["status"] = json!(status);
                }
                Ok(CallToolResult::error(vec![Content::text(detail.to_string())]))
            }
            Err(e) => Err(McpError::internal_error(
                e.to_string(),
                Some(json!({ "kind": e.kind() })),
            )),
        }
    }
}

impl ServerHandler for KakaoMapServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        };
        info.server_info.name = self.identity.name.clone();
        info.server_info.version = self.identity.version.clone();
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Null);
        self.dispatch(&request.name, arguments).await
    }
}
