pub mod definition;
pub mod handlers;
pub mod registry;

pub use definition::{ParamKind, ParamSpec, ToolDefinition};
pub use handlers::register_tools;
pub use registry::{ToolHandler, ToolHandlerContext, ToolRegistry};
