pub mod api;
pub mod category;
pub mod config;
pub mod error;

pub use error::{ExternalApiError, KakaoMapError, Result};
