use std::sync::Arc;

use rmcp::model::Tool;
use serde_json::{json, Map, Value};

use kakaomap_common::{KakaoMapError, Result};

/// JSON shape a parameter must have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
    Integer,
}

impl ParamKind {
    fn schema_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
        }
    }
}

/// One declared parameter. `default == None` means required.
#[derive(Clone, Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            default: None,
        }
    }

    pub fn optional(
        name: &'static str,
        kind: ParamKind,
        description: &'static str,
        default: impl Into<Value>,
    ) -> Self {
        Self {
            name,
            kind,
            description,
            default: Some(default.into()),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A named tool with its declared parameter list.
#[derive(Clone, Debug)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// JSON Schema for the tool's arguments object.
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for p in &self.params {
            let mut prop = json!({
                "type": p.kind.schema_type(),
                "description": p.description,
            });
            match &p.default {
                Some(default) => {
                    prop["default"] = default.clone();
                }
                None => required.push(Value::String(p.name.to_string())),
            }
            properties.insert(p.name.to_string(), prop);
        }

        let mut schema = Map::new();
        schema.insert("type".into(), Value::String("object".into()));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), Value::Array(required));
        schema
    }

    /// Entry for an MCP `tools/list` response.
    pub fn to_mcp_tool(&self) -> Tool {
        Tool::new(
            self.name.clone(),
            self.description.clone(),
            Arc::new(self.input_schema()),
        )
    }

    /// Check shapes and fill defaults.
    ///
    /// `null` or a missing arguments object counts as `{}`. A `null` value
    /// for an optional parameter takes the default. Undeclared arguments are
    /// dropped.
    pub fn validate(&self, args: Value) -> Result<Map<String, Value>> {
        let mut supplied = match args {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(KakaoMapError::invalid_argument(
                    "arguments",
                    format!("expected an object, got {}", json_type(&other)),
                ))
            }
        };

        let mut validated = Map::new();
        for p in &self.params {
            let value = match supplied.remove(p.name) {
                Some(Value::Null) | None => match &p.default {
                    Some(default) => default.clone(),
                    None => {
                        return Err(KakaoMapError::invalid_argument(
                            p.name,
                            "missing required parameter",
                        ))
                    }
                },
                Some(v) => v,
            };

            if !p.kind.accepts(&value) {
                return Err(KakaoMapError::invalid_argument(
                    p.name,
                    format!(
                        "expected {}, got {}",
                        p.kind.schema_type(),
                        json_type(&value)
                    ),
                ));
            }

            validated.insert(p.name.to_string(), value);
        }

        if !supplied.is_empty() {
            tracing::debug!(
                tool = %self.name,
                ignored = ?supplied.keys().collect::<Vec<_>>(),
                "Ignoring undeclared arguments"
            );
        }

        Ok(validated)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
