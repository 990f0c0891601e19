use std::sync::Arc;
use tracing::trace;
use super::{Middleware, MiddlewareError, Request, Response};

/// 순서가 있는 미들웨어 목록
/// 
/// 요청은 등록 순서대로, 응답은 역순으로 처리합니다.
#[derive(Default, Clone)]
pub struct MiddlewareChain {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new()
        }
    }

    pub fn add<M: Middleware + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Arc::new(middleware));
    }

    pub fn add_boxed(&mut self, middleware: Box<dyn Middleware>) {
        self.middlewares.push(Arc::from(middleware));
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// 체인에 등록된 미들웨어 이름을 실행 순서대로 반환합니다.
    pub fn names(&self) -> Vec<&str> {
        self.middlewares.iter().map(|m| m.name()).collect()
    }

    pub async fn handle_request(&self, mut request: Request) -> Result<Request, MiddlewareError> {
        for middleware in &self.middlewares {
            trace!(middleware = middleware.name(), "요청 미들웨어 실행");
            request = middleware.handle_request(request).await?;
        }
        Ok(request)
    }

    pub async fn handle_response(&self, mut response: Response) -> Result<Response, MiddlewareError> {
        // 응답은 역순으로 처리
        for middleware in self.middlewares.iter().rev() {
            trace!(middleware = middleware.name(), "응답 미들웨어 실행");
            response = middleware.handle_response(response).await?;
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use http_body_util::Full;
    use hyper::header::HeaderValue;

    /// 자신의 이름을 `x-trail` 헤더에 덧붙이는 테스트용 미들웨어
    struct Trail(&'static str);

    #[async_trait]
    impl Middleware for Trail {
        fn name(&self) -> &str {
            self.0
        }

        async fn handle_request(&self, mut req: Request) -> Result<Request, MiddlewareError> {
            req.headers_mut().append("x-trail", HeaderValue::from_static(self.0));
            Ok(req)
        }

        async fn handle_response(&self, mut res: Response) -> Result<Response, MiddlewareError> {
            res.headers_mut().append("x-trail", HeaderValue::from_static(self.0));
            Ok(res)
        }
    }

    fn trail(headers: &hyper::HeaderMap) -> Vec<String> {
        headers.get_all("x-trail")
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_request_in_order_response_reversed() {
        let mut chain = MiddlewareChain::new();
        chain.add(Trail("first"));
        chain.add(Trail("second"));
        assert_eq!(chain.names(), vec!["first", "second"]);

        let req = hyper::Request::new(Full::new(Bytes::new()));
        let req = chain.handle_request(req).await.unwrap();
        assert_eq!(trail(req.headers()), vec!["first", "second"]);

        let res = hyper::Response::new(Full::new(Bytes::new()));
        let res = chain.handle_response(res).await.unwrap();
        assert_eq!(trail(res.headers()), vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_empty_chain_passes_through() {
        let chain = MiddlewareChain::default();
        assert!(chain.is_empty());

        let mut req = hyper::Request::new(Full::new(Bytes::new()));
        req.headers_mut().insert("x-keep", HeaderValue::from_static("yes"));
        let req = chain.handle_request(req).await.unwrap();
        assert_eq!(req.headers().get("x-keep").unwrap(), "yes");
    }
}
