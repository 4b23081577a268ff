use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const KEYWORD_SEARCH_PATH: &str = "/search/keyword.json";
pub const CATEGORY_SEARCH_PATH: &str = "/search/category.json";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_SIZE: u32 = 15;
/// Default category search radius, in meters.
pub const DEFAULT_RADIUS: u32 = 10;

/// Result ordering accepted by both search endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Accuracy,
    Distance,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accuracy => "accuracy",
            Self::Distance => "distance",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accuracy" => Ok(Self::Accuracy),
            "distance" => Ok(Self::Distance),
            other => Err(format!(
                "unknown sort order '{}', expected 'accuracy' or 'distance'",
                other
            )),
        }
    }
}

/// Longitude (`x`) / latitude (`y`) pair in WGS84.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

/// Page selection shared by both endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub page: u32,
    pub size: u32,
    pub sort: SortOrder,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
            sort: SortOrder::Accuracy,
        }
    }
}

/// GET /search/keyword.json request.
#[derive(Clone, Debug, PartialEq)]
pub struct KeywordSearch {
    pub query: String,
    /// Anchor point; omitted by the keyword-only tool.
    pub coordinate: Option<Coordinate>,
    pub paging: Paging,
}

/// GET /search/category.json request.
#[derive(Clone, Debug, PartialEq)]
pub struct CategorySearch {
    /// Category group code, e.g. "CS2".
    pub category_group_code: String,
    pub coordinate: Coordinate,
    /// Search radius in meters.
    pub radius: u32,
    pub paging: Paging,
}

/// One outbound search call, built per tool invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchRequest {
    Keyword(KeywordSearch),
    Category(CategorySearch),
}

impl SearchRequest {
    /// Endpoint sub-path, appended to the configured base endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Keyword(_) => KEYWORD_SEARCH_PATH,
            Self::Category(_) => CATEGORY_SEARCH_PATH,
        }
    }

    /// Query string parameters, in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(7);
        let paging = match self {
            Self::Keyword(k) => {
                pairs.push(("query", k.query.clone()));
                if let Some(c) = k.coordinate {
                    pairs.push(("x", c.x.to_string()));
                    pairs.push(("y", c.y.to_string()));
                }
                k.paging
            }
            Self::Category(c) => {
                pairs.push(("category_group_code", c.category_group_code.clone()));
                pairs.push(("x", c.coordinate.x.to_string()));
                pairs.push(("y", c.coordinate.y.to_string()));
                pairs.push(("radius", c.radius.to_string()));
                c.paging
            }
        };
        pairs.push(("page", paging.page.to_string()));
        pairs.push(("size", paging.size.to_string()));
        pairs.push(("sort", paging.sort.as_str().to_string()));
        pairs
    }
}
