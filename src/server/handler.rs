use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;
use hyper::{Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use crate::{
    logging::{RequestLog, log_request},
    middleware::{MiddlewareManager, handle_middleware_error},
    proxy::{self, ProxyConfig},
};
use tracing::{debug, error};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use uuid::Uuid;

/// 요청 미들웨어 → 업스트림 프록시 → 응답 미들웨어 순서로 요청을 처리합니다.
pub struct RequestHandler {
    middleware_manager: MiddlewareManager,
    proxy_config: ProxyConfig,
}

impl RequestHandler {
    pub fn new(
        middleware_manager: MiddlewareManager,
        proxy_config: ProxyConfig,
    ) -> Self {
        Self {
            middleware_manager,
            proxy_config,
        }
    }

    pub async fn handle_request<B>(
        &self,
        req: Request<B>,
    ) -> Result<Response<Full<Bytes>>, std::convert::Infallible>
    where
        B: Body<Data = Bytes>,
        B::Error: Display,
    {
        let start_time = Instant::now();
        let mut log = RequestLog::new(Uuid::new_v4().to_string());
        log.with_request(&req);
        log.with_upstream(self.proxy_config.upstream());

        let response = self.process(req, &mut log).await;

        log.with_response(response.status());
        log.duration_ms = start_time.elapsed().as_millis() as u64;
        log_request(&log);

        Ok(response)
    }

    async fn process<B>(&self, req: Request<B>, log: &mut RequestLog) -> Response<Full<Bytes>>
    where
        B: Body<Data = Bytes>,
        B::Error: Display,
    {
        // 1. 요청 본문 버퍼링
        let (parts, body) = req.into_parts();
        let bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                log.with_error(&e);
                return error_response(StatusCode::BAD_REQUEST, format!("Failed to read request body: {}", e));
            }
        };
        let req = Request::from_parts(parts, Full::new(bytes));

        // 2. 요청 미들웨어 처리
        let req = match self.middleware_manager.handle_request(req).await {
            Ok(req) => req,
            Err(e) => {
                log.with_error(&e);
                return handle_middleware_error(e);
            }
        };

        // 3. 프록시 요청
        let response = match proxy::proxy_request(&self.proxy_config, req).await {
            Ok(response) => response,
            Err(e) => {
                log.with_error(&e);
                return proxy::error_response(&e);
            }
        };

        // 4. 응답 미들웨어 처리
        match self.middleware_manager.handle_response(response).await {
            Ok(response) => {
                debug!("응답 미들웨어 처리 완료 - 최종 헤더: {:?}", response.headers());
                response
            }
            Err(e) => {
                log.with_error(&e);
                handle_middleware_error(e)
            }
        }
    }

    pub async fn handle_connection<I>(self: Arc<Self>, io: I) -> std::result::Result<(), hyper::Error>
    where
        I: hyper::rt::Read + hyper::rt::Write + Send + Unpin + 'static,
    {
        http1::Builder::new()
            .serve_connection(
                io,
                service_fn(move |req| {
                    let handler = Arc::clone(&self);
                    async move { handler.handle_request(req).await }
                }),
            )
            .await
    }
}

fn error_response(status: StatusCode, message: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::from(message)))
        .unwrap_or_else(|e| {
            error!(error = %e, "에러 응답 생성 실패");
            Response::new(Full::new(Bytes::from("Internal Server Error")))
        })
}
