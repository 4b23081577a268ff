pub mod config;
pub mod kakao;
pub mod mcp;
pub mod telemetry;
pub mod tools;
