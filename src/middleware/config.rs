use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 미들웨어 설정을 위한 공통 인터페이스
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum MiddlewareType {
    HeaderBlock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// 미들웨어 타입
    pub middleware_type: MiddlewareType,
    
    /// 미들웨어 활성화 여부
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    
    /// 실행 순서 (낮은 숫자가 먼저 실행)
    #[serde(default)]
    pub order: i32,
    
    /// 미들웨어별 설정
    #[serde(default)]
    pub settings: HashMap<String, serde_json::Value>,
}

fn default_enabled() -> bool {
    true
}

impl MiddlewareConfig {
    /// 미들웨어별 설정을 JSON 객체로 반환합니다.
    pub fn settings_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.settings.iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        )
    }
}
