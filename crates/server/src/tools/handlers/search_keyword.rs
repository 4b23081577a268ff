use serde_json::{Map, Value};

use kakaomap_common::api::kakao::{CategorySearch, SearchRequest, DEFAULT_RADIUS};
use kakaomap_common::{category, Result};

use super::{coordinate_args, count_arg, paging_args, paging_params, string_arg, x_param, y_param};
use crate::tools::definition::{ParamKind, ParamSpec, ToolDefinition};
use crate::tools::registry::ToolHandler;

pub const NAME: &str = "search_keyword";

pub fn definition() -> ToolDefinition {
    let labels = category::all()
        .map(|c| format!("{} ({})", c.label, c.code))
        .collect::<Vec<_>>()
        .join(", ");

    let mut definition = ToolDefinition::new(
        NAME,
        format!(
            "Search places of a category within a radius of a coordinate. Returns the raw \
             Kakao Local category search response as JSON text. Categories: {}",
            labels
        ),
    )
    .param(ParamSpec::required(
        "category_name",
        ParamKind::String,
        "Category label such as '편의점' or '병원'; a category code like 'CS2' is also accepted",
    ))
    .param(x_param())
    .param(y_param())
    .param(ParamSpec::optional(
        "radius",
        ParamKind::Integer,
        "Search radius in meters",
        DEFAULT_RADIUS,
    ));
    definition.params.extend(paging_params());
    definition
}

pub fn handler() -> ToolHandler {
    super::search_handler(build_request)
}

fn build_request(args: &Map<String, Value>) -> Result<SearchRequest> {
    let category_name = string_arg(args, "category_name")?;
    let code = category::resolve(&category_name);

    if code == category_name {
        tracing::debug!(category = %category_name, "No label match, sending as category code");
    }

    Ok(SearchRequest::Category(CategorySearch {
        category_group_code: code.to_string(),
        coordinate: coordinate_args(args)?,
        radius: count_arg(args, "radius", 0)?,
        paging: paging_args(args)?,
    }))
}
