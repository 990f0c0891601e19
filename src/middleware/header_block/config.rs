use serde::{Deserialize, Serialize};

/// 헤더 차단 규칙 한 개의 설정
/// 
/// 필드 이름은 호스트 설정 스키마를 따라 `header` / `env` 로 직렬화되며,
/// `name` / `value` 별칭도 허용합니다. 빈 문자열은 설정되지 않은 것으로 취급합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HeaderRuleConfig {
    /// 헤더 이름에 대한 정규식
    #[serde(rename = "header", alias = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// 개별 헤더 값에 대한 정규식
    #[serde(rename = "env", alias = "value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl HeaderRuleConfig {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    /// 이름이 일치하는 헤더 전체를 삭제하는 규칙
    pub fn name_only(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: None,
        }
    }

    /// 모든 헤더에서 일치하는 값만 삭제하는 규칙
    pub fn value_only(value: impl Into<String>) -> Self {
        Self {
            name: None,
            value: Some(value.into()),
        }
    }
}

/// 헤더 차단 미들웨어 설정
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBlockConfig {
    /// 요청 헤더 규칙
    #[serde(default)]
    pub request_headers: Vec<HeaderRuleConfig>,

    /// 응답 헤더 규칙
    #[serde(default)]
    pub response_headers: Vec<HeaderRuleConfig>,
}
