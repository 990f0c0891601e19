//! 헤더 차단 미들웨어
//! 
//! 이름 및 값 정규식 규칙에 따라 요청과 응답에서 헤더 전체 또는
//! 개별 헤더 값을 제거합니다.

mod config;
mod filter;
mod middleware;
mod rule;

pub use config::{HeaderBlockConfig, HeaderRuleConfig};
pub use filter::{filter_headers, FilterReport};
pub use middleware::HeaderBlockMiddleware;
pub use rule::{HeaderRule, PatternMatcher, RuleSet};
