mod search_keyword;
mod search_location;
mod search_location_basic;

use std::sync::Arc;

use serde_json::{Map, Value};

use kakaomap_common::api::kakao::{Coordinate, Paging, SearchRequest, SortOrder};
use kakaomap_common::config::ToolsConfig;
use kakaomap_common::{KakaoMapError, Result};

use super::definition::{ParamKind, ParamSpec};
use super::registry::{ToolHandler, ToolHandlerContext, ToolRegistry};

pub use search_keyword::NAME as SEARCH_KEYWORD;
pub use search_location::NAME as SEARCH_LOCATION;
pub use search_location_basic::NAME as SEARCH_LOCATION_BASIC;

/// Register the shipped tool set with the registry.
pub fn register_tools(registry: &mut ToolRegistry, config: &ToolsConfig) -> Result<()> {
    registry.register(search_location::definition(), search_location::handler())?;
    registry.register(search_keyword::definition(), search_keyword::handler())?;

    // Legacy keyword-only search, opt-in.
    if config.enable_basic_search {
        registry.register(
            search_location_basic::definition(),
            search_location_basic::handler(),
        )?;
    }

    tracing::info!(tools = registry.len(), "Registered tools");
    Ok(())
}

/// Wrap a request builder into a handler that sends the request.
fn search_handler(build: fn(&Map<String, Value>) -> Result<SearchRequest>) -> ToolHandler {
    Arc::new(move |args: Map<String, Value>, ctx: Arc<ToolHandlerContext>| {
        Box::pin(async move {
            let body = match build(&args)? {
                SearchRequest::Keyword(params) => ctx.kakao.keyword_search(params).await?,
                SearchRequest::Category(params) => ctx.kakao.category_search(params).await?,
            };
            Ok(body)
        })
    })
}

// --- Parameter declarations shared by the search tools ---

fn x_param() -> ParamSpec {
    ParamSpec::required(
        "x",
        ParamKind::Number,
        "Longitude of the center point (WGS84), e.g. 127.027",
    )
}

fn y_param() -> ParamSpec {
    ParamSpec::required(
        "y",
        ParamKind::Number,
        "Latitude of the center point (WGS84), e.g. 37.497",
    )
}

fn paging_params() -> [ParamSpec; 3] {
    [
        ParamSpec::optional("page", ParamKind::Integer, "Result page number", 1),
        ParamSpec::optional("size", ParamKind::Integer, "Results per page", 15),
        ParamSpec::optional(
            "sort",
            ParamKind::String,
            "Result order: 'accuracy' or 'distance'",
            "accuracy",
        ),
    ]
}

// --- Typed readers over validated arguments ---

fn string_arg(args: &Map<String, Value>, name: &str) -> Result<String> {
    let value = args
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| KakaoMapError::invalid_argument(name, "expected string"))?;
    if value.trim().is_empty() {
        return Err(KakaoMapError::invalid_argument(name, "must not be empty"));
    }
    Ok(value.to_string())
}

fn number_arg(args: &Map<String, Value>, name: &str) -> Result<f64> {
    let value = args
        .get(name)
        .and_then(Value::as_f64)
        .ok_or_else(|| KakaoMapError::invalid_argument(name, "expected number"))?;
    if !value.is_finite() {
        return Err(KakaoMapError::invalid_argument(name, "must be finite"));
    }
    Ok(value)
}

fn count_arg(args: &Map<String, Value>, name: &str, min: u32) -> Result<u32> {
    let value = args
        .get(name)
        .and_then(Value::as_i64)
        .ok_or_else(|| KakaoMapError::invalid_argument(name, "expected integer"))?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= min)
        .ok_or_else(|| KakaoMapError::invalid_argument(name, format!("must be >= {}", min)))
}

fn coordinate_args(args: &Map<String, Value>) -> Result<Coordinate> {
    Ok(Coordinate {
        x: number_arg(args, "x")?,
        y: number_arg(args, "y")?,
    })
}

fn paging_args(args: &Map<String, Value>) -> Result<Paging> {
    let sort: SortOrder = string_arg(args, "sort")?
        .parse()
        .map_err(|reason: String| KakaoMapError::invalid_argument("sort", reason))?;
    Ok(Paging {
        page: count_arg(args, "page", 1)?,
        size: count_arg(args, "size", 1)?,
        sort,
    })
}
