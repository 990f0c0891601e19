use hyper::{Request, Response, StatusCode, Uri};
use hyper::body::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::{debug, instrument};

/// 업스트림 전달 중 발생하는 에러
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("업스트림 URI 생성 실패: {0}")]
    InvalidUri(#[from] hyper::http::uri::InvalidUri),

    #[error("Backend request failed: {0}")]
    Backend(#[from] legacy::Error),

    #[error("Failed to collect response body: {0}")]
    Body(#[from] hyper::Error),
}

// 프록시 요청을 위한 불변 설정 구조체
#[derive(Clone)]
pub struct ProxyConfig {
    client: legacy::Client<HttpConnector, Full<Bytes>>,
    upstream: String,
}

impl ProxyConfig {
    pub fn new(upstream: impl Into<String>) -> Self {
        let connector = HttpConnector::new();
        let client = legacy::Client::builder(TokioExecutor::new())
            .build::<_, Full<Bytes>>(connector);
        
        Self {
            client,
            upstream: upstream.into(),
        }
    }

    pub fn upstream(&self) -> &str {
        &self.upstream
    }
}

/// 요청을 업스트림으로 전달하고 응답 본문을 버퍼링해 반환합니다.
/// 
/// 메서드, 헤더, 본문은 그대로 유지하고 URI 만 업스트림 주소로 바꿉니다.
#[instrument(skip(config, req), fields(upstream = %config.upstream))]
pub async fn proxy_request(
    config: &ProxyConfig,
    req: Request<Full<Bytes>>,
) -> Result<Response<Full<Bytes>>, ProxyError> {
    let proxied_req = build_proxied_request(&config.upstream, req)?;
    debug!(uri = %proxied_req.uri(), "Proxying request to upstream");

    let res = config.client.request(proxied_req).await?;
    let (parts, body) = res.into_parts();
    let bytes = body.collect().await?.to_bytes();
    debug!(status = %parts.status, bytes_size = bytes.len(), "Response body collected");

    Ok(Response::from_parts(parts, Full::new(bytes)))
}

fn build_proxied_request(
    upstream: &str,
    req: Request<Full<Bytes>>,
) -> Result<Request<Full<Bytes>>, ProxyError> {
    let path_and_query = req.uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let uri: Uri = format!("http://{}{}", upstream, path_and_query).parse()?;

    let (mut parts, body) = req.into_parts();
    parts.uri = uri;
    Ok(Request::from_parts(parts, body))
}

/// 프록시 에러를 502 응답으로 변환합니다. 업스트림 URI 생성 실패도 502 입니다.
pub fn error_response(err: &ProxyError) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(err.to_string())));
    *response.status_mut() = StatusCode::BAD_GATEWAY;
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_proxied_request_keeps_path_query_and_headers() {
        let req = Request::builder()
            .method("PUT")
            .uri("/admin/health?verbose=1")
            .header("x-trace", "All fine")
            .body(Full::new(Bytes::from("payload")))
            .unwrap();

        let proxied = build_proxied_request("127.0.0.1:9000", req).unwrap();

        assert_eq!(proxied.method(), "PUT");
        assert_eq!(proxied.uri().to_string(), "http://127.0.0.1:9000/admin/health?verbose=1");
        assert_eq!(proxied.headers().get("x-trace").unwrap(), "All fine");
    }

    #[test]
    fn test_invalid_upstream_maps_to_bad_gateway() {
        let req = Request::new(Full::new(Bytes::new()));
        let err = build_proxied_request("bad host", req).unwrap_err();

        assert!(matches!(err, ProxyError::InvalidUri(_)));
        assert_eq!(error_response(&err).status(), StatusCode::BAD_GATEWAY);
    }
}
