use hyper::{Response, StatusCode};
use http_body_util::Full;
use bytes::Bytes;
use tracing::error;
use super::MiddlewareError;

/// 미들웨어 에러를 HTTP 응답으로 변환합니다.
pub fn handle_middleware_error(err: MiddlewareError) -> Response<Full<Bytes>> {
    let status = match &err {
        MiddlewareError::Config { .. }
        | MiddlewareError::InvalidPattern { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    Response::builder()
        .status(status)
        .body(Full::new(Bytes::from(err.to_string())))
        .unwrap_or_else(|e| {
            error!(error = %e, "에러 응답 생성 실패");
            Response::new(Full::new(Bytes::from("Internal Server Error")))
        })
}
