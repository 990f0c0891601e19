use regex_lite as regex;
use tracing::debug;
use hyper::HeaderMap;
use crate::middleware::MiddlewareError;
use super::config::HeaderRuleConfig;
use super::filter::{filter_headers, FilterReport};

/// 컴파일된 정규식과 원본 패턴
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: String,
    regex: regex::Regex,
}

impl PatternMatcher {
    fn compile(pattern: &str, case_insensitive: bool) -> Result<Self, MiddlewareError> {
        let regex = regex::RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| MiddlewareError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// 이름 매처와 값 매처로 이루어진 단일 규칙
/// 
/// 이름 매처는 대소문자를 구분하지 않습니다. 전송 계층이 헤더 이름을
/// 소문자로 정규화하기 때문에 `^X-` 같은 패턴도 `x-permission` 과 일치합니다.
/// 값 매처는 대소문자를 구분합니다.
#[derive(Debug, Clone)]
pub struct HeaderRule {
    name: Option<PatternMatcher>,
    value: Option<PatternMatcher>,
}

impl HeaderRule {
    /// 설정 한 개를 컴파일합니다. 빈 패턴은 매처를 만들지 않습니다.
    pub fn compile(config: &HeaderRuleConfig) -> Result<Self, MiddlewareError> {
        let name = non_empty(&config.name)
            .map(|p| PatternMatcher::compile(p, true))
            .transpose()?;
        let value = non_empty(&config.value)
            .map(|p| PatternMatcher::compile(p, false))
            .transpose()?;

        Ok(Self { name, value })
    }

    pub fn name_matcher(&self) -> Option<&PatternMatcher> {
        self.name.as_ref()
    }

    pub fn value_matcher(&self) -> Option<&PatternMatcher> {
        self.value.as_ref()
    }

    /// 어떤 헤더에도 영향을 주지 않는 규칙인지 여부
    pub fn is_noop(&self) -> bool {
        self.name.is_none() && self.value.is_none()
    }
}

fn non_empty(pattern: &Option<String>) -> Option<&str> {
    pattern.as_deref().filter(|p| !p.is_empty())
}

/// 한 단계(요청 또는 응답)에 적용되는 순서 있는 규칙 목록
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<HeaderRule>,
}

impl RuleSet {
    /// 설정 목록을 순서대로 컴파일합니다. 하나라도 실패하면 전체가 실패합니다.
    pub fn compile(configs: &[HeaderRuleConfig]) -> Result<Self, MiddlewareError> {
        let rules = configs.iter()
            .map(HeaderRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let noops = rules.iter().filter(|r| r.is_noop()).count();
        if noops > 0 {
            debug!(count = noops, "이름과 값 패턴이 모두 없는 규칙은 무시됩니다");
        }

        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderRule> {
        self.rules.iter()
    }

    /// 헤더 컬렉션에 규칙을 적용합니다.
    pub fn filter(&self, headers: &mut HeaderMap) -> FilterReport {
        filter_headers(headers, self)
    }
}
