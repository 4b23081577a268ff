use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{Map, Value};

use kakaomap_common::{KakaoMapError, Result};

use super::definition::ToolDefinition;
use crate::kakao::KakaoClient;

/// Shared context available to all tool handlers.
pub struct ToolHandlerContext {
    pub kakao: KakaoClient,
}

/// Handler function signature: takes validated args and context, returns the
/// raw response text.
pub type ToolHandler = Arc<
    dyn Fn(
            Map<String, Value>,
            Arc<ToolHandlerContext>,
        ) -> Pin<Box<dyn Future<Output = Result<String>> + Send>>
        + Send
        + Sync,
>;

struct RegisteredTool {
    definition: ToolDefinition,
    handler: ToolHandler,
}

/// Registry of tool handlers with their definitions.
///
/// Populated at startup, read-only afterwards.
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
    /// Registration order, for stable `tools/list` output.
    order: Vec<String>,
    context: Arc<ToolHandlerContext>,
}

impl ToolRegistry {
    pub fn new(context: ToolHandlerContext) -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
            context: Arc::new(context),
        }
    }

    /// Register a tool. Fails without touching the registry if the name is taken.
    pub fn register(&mut self, definition: ToolDefinition, handler: ToolHandler) -> Result<()> {
        if self.tools.contains_key(&definition.name) {
            return Err(KakaoMapError::DuplicateTool(definition.name));
        }

        tracing::debug!(tool = %definition.name, "Registered tool");
        self.order.push(definition.name.clone());
        self.tools.insert(
            definition.name.clone(),
            RegisteredTool {
                definition,
                handler,
            },
        );
        Ok(())
    }

    /// Tool definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| &tool.definition)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Validate the arguments and run the named tool.
    pub async fn invoke(&self, tool_name: &str, args: Value) -> Result<String> {
        let start = std::time::Instant::now();

        let tool = match self.tools.get(tool_name) {
            Some(t) => t,
            None => {
                tracing::warn!(tool = %tool_name, "Unknown tool called");
                metrics::counter!("tools.execution.errors", "tool" => tool_name.to_string())
                    .increment(1);
                return Err(KakaoMapError::UnknownTool(tool_name.to_string()));
            }
        };

        tracing::info!(tool = %tool_name, "Tool call started");

        let result = match tool.definition.validate(args) {
            Ok(validated) => (tool.handler)(validated, Arc::clone(&self.context)).await,
            Err(e) => Err(e),
        };

        let latency = start.elapsed().as_secs_f64();
        metrics::histogram!("tools.execution.latency", "tool" => tool_name.to_string())
            .record(latency);
        metrics::counter!("tools.execution.count", "tool" => tool_name.to_string()).increment(1);

        match &result {
            Ok(body) => {
                tracing::info!(
                    tool = %tool_name,
                    latency_s = latency,
                    result_len = body.len(),
                    "Tool call succeeded"
                );
            }
            Err(e) => {
                tracing::warn!(
                    tool = %tool_name,
                    latency_s = latency,
                    kind = e.kind(),
                    error = %e,
                    "Tool call failed"
                );
                metrics::counter!("tools.execution.errors", "tool" => tool_name.to_string())
                    .increment(1);
            }
        }

        result
    }
}
