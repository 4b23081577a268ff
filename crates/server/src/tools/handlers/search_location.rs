use serde_json::{Map, Value};

use kakaomap_common::api::kakao::{KeywordSearch, SearchRequest};
use kakaomap_common::Result;

use super::{coordinate_args, paging_args, paging_params, string_arg, x_param, y_param};
use crate::tools::definition::{ParamKind, ParamSpec, ToolDefinition};
use crate::tools::registry::ToolHandler;

pub const NAME: &str = "search_location";

pub fn definition() -> ToolDefinition {
    let mut definition = ToolDefinition::new(
        NAME,
        "Search places by keyword around a coordinate. Returns the raw Kakao Local \
         keyword search response (documents + meta) as JSON text.",
    )
    .param(ParamSpec::required(
        "query",
        ParamKind::String,
        "Search keyword, e.g. a place name or address",
    ))
    .param(x_param())
    .param(y_param());
    definition.params.extend(paging_params());
    definition
}

pub fn handler() -> ToolHandler {
    super::search_handler(build_request)
}

fn build_request(args: &Map<String, Value>) -> Result<SearchRequest> {
    Ok(SearchRequest::Keyword(KeywordSearch {
        query: string_arg(args, "query")?,
        coordinate: Some(coordinate_args(args)?),
        paging: paging_args(args)?,
    }))
}
