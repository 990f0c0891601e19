use tracing::{debug, info};
use crate::middleware::header_block::{HeaderBlockConfig, HeaderBlockMiddleware};
use super::{Middleware, MiddlewareChain, MiddlewareConfig, MiddlewareError, Request, Response};
use super::config::MiddlewareType;
use std::collections::HashMap;

/// 미들웨어 설정으로부터 미들웨어 인스턴스를 생성합니다.
fn create_middleware(name: &str, config: &MiddlewareConfig) -> Result<Box<dyn Middleware>, MiddlewareError> {
    debug!("미들웨어 생성 시작: name={}, type={:?}, settings={:?}", name, config.middleware_type, config.settings);
    
    match config.middleware_type {
        MiddlewareType::HeaderBlock => {
            let block_config: HeaderBlockConfig = serde_json::from_value(config.settings_value())
                .map_err(|e| MiddlewareError::Config {
                    middleware: name.to_string(),
                    message: e.to_string(),
                })?;
            Ok(Box::new(HeaderBlockMiddleware::new(name, &block_config)?))
        }
    }
}

/// 설정된 미들웨어 체인을 소유하고 요청/응답 단계를 실행합니다.
#[derive(Default, Clone)]
pub struct MiddlewareManager {
    chain: MiddlewareChain,
}

impl MiddlewareManager {
    /// 활성화된 미들웨어를 `order`, 이름 순으로 정렬해 체인을 구성합니다.
    /// 
    /// 하나라도 생성에 실패하면 전체가 실패합니다. 일부 규칙만으로
    /// 동작하는 체인은 만들지 않습니다.
    pub fn new(middleware_configs: &HashMap<String, MiddlewareConfig>) -> Result<Self, MiddlewareError> {
        let mut chain = MiddlewareChain::new();
        
        // 정렬을 위해 Vec으로 변환
        let mut ordered_configs: Vec<_> = middleware_configs.iter()
            .filter(|(_, config)| config.enabled)
            .collect();
        ordered_configs.sort_by(|(a_name, a), (b_name, b)| {
            a.order.cmp(&b.order).then_with(|| a_name.cmp(b_name))
        });

        for (name, config) in ordered_configs {
            chain.add_boxed(create_middleware(name, config)?);
        }

        info!(middlewares = ?chain.names(), "미들웨어 체인 구성 완료");
        Ok(Self { chain })
    }

    pub fn chain(&self) -> &MiddlewareChain {
        &self.chain
    }

    pub async fn handle_request(&self, req: Request) -> Result<Request, MiddlewareError> {
        self.chain.handle_request(req).await
    }

    pub async fn handle_response(&self, res: Response) -> Result<Response, MiddlewareError> {
        self.chain.handle_response(res).await
    }
}
