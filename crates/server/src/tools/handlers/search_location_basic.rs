use serde_json::{Map, Value};

use kakaomap_common::api::kakao::{KeywordSearch, SearchRequest};
use kakaomap_common::Result;

use super::{paging_args, paging_params, string_arg};
use crate::tools::definition::{ParamKind, ParamSpec, ToolDefinition};
use crate::tools::registry::ToolHandler;

pub const NAME: &str = "search_location_basic";

pub fn definition() -> ToolDefinition {
    let mut definition = ToolDefinition::new(
        NAME,
        "Search places by keyword without a center point. Returns the raw Kakao Local \
         keyword search response as JSON text.",
    )
    .param(ParamSpec::required(
        "query",
        ParamKind::String,
        "Search keyword, e.g. a place name or address",
    ));
    definition.params.extend(paging_params());
    definition
}

pub fn handler() -> ToolHandler {
    super::search_handler(build_request)
}

fn build_request(args: &Map<String, Value>) -> Result<SearchRequest> {
    Ok(SearchRequest::Keyword(KeywordSearch {
        query: string_arg(args, "query")?,
        coordinate: None,
        paging: paging_args(args)?,
    }))
}
