pub mod chain;
pub mod config;
pub mod error;
pub mod header_block;
pub mod manager;
pub mod response;
pub mod traits;

use bytes::Bytes;
use http_body_util::Full;

pub use chain::MiddlewareChain;
pub use config::{MiddlewareConfig, MiddlewareType};
pub use error::MiddlewareError;
pub use manager::MiddlewareManager;
pub use response::handle_middleware_error;
pub use traits::Middleware;

/// 미들웨어가 다루는 요청 타입. 본문은 미리 버퍼링되어 있습니다.
pub type Request = hyper::Request<Full<Bytes>>;

/// 미들웨어가 다루는 응답 타입
pub type Response = hyper::Response<Full<Bytes>>;
