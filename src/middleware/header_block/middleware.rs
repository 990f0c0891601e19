use crate::middleware::{Middleware, MiddlewareError, Request, Response};
use super::config::HeaderBlockConfig;
use super::rule::RuleSet;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// 정규식 규칙으로 요청/응답 헤더를 제거하는 미들웨어
#[derive(Debug)]
pub struct HeaderBlockMiddleware {
    name: String,
    request_rules: RuleSet,
    response_rules: RuleSet,
}

impl HeaderBlockMiddleware {
    /// 설정을 컴파일해 미들웨어를 만듭니다. 패턴 오류는 즉시 반환됩니다.
    pub fn new(name: impl Into<String>, config: &HeaderBlockConfig) -> Result<Self, MiddlewareError> {
        let name = name.into();
        let request_rules = RuleSet::compile(&config.request_headers)?;
        let response_rules = RuleSet::compile(&config.response_headers)?;

        debug!(
            middleware = %name,
            request_rules = request_rules.len(),
            response_rules = response_rules.len(),
            "header-block 미들웨어 생성"
        );

        Ok(Self {
            name,
            request_rules,
            response_rules,
        })
    }

    pub fn request_rules(&self) -> &RuleSet {
        &self.request_rules
    }

    pub fn response_rules(&self) -> &RuleSet {
        &self.response_rules
    }
}

#[async_trait]
impl Middleware for HeaderBlockMiddleware {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip_all)]
    async fn handle_request(&self, mut req: Request) -> Result<Request, MiddlewareError> {
        let report = self.request_rules.filter(req.headers_mut());
        if !report.is_empty() {
            debug!(
                middleware = %self.name,
                removed_headers = report.removed_headers,
                removed_values = report.removed_values,
                "요청 헤더 필터링"
            );
        }
        Ok(req)
    }

    #[instrument(skip_all)]
    async fn handle_response(&self, mut res: Response) -> Result<Response, MiddlewareError> {
        let report = self.response_rules.filter(res.headers_mut());
        if !report.is_empty() {
            debug!(
                middleware = %self.name,
                removed_headers = report.removed_headers,
                removed_values = report.removed_values,
                "응답 헤더 필터링"
            );
        }
        Ok(res)
    }
}
