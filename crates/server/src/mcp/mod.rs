mod handler;
mod transport;

pub use handler::KakaoMapServer;
pub use transport::{run_stdio, serve, TransportError};
