//! header-block은 리버스 프록시 미들웨어 단계에서 동작하는 헤더 필터입니다.
//! 
//! # 주요 기능
//! 
//! - 헤더 이름 정규식과 일치하는 헤더 전체 삭제
//! - 헤더 값 정규식과 일치하는 개별 값만 삭제 (나머지 값은 순서 유지)
//! - 요청/응답 단계별 규칙
//! 
//! # 예제
//! 
//! ```
//! use header_block::middleware::header_block::{HeaderRuleConfig, RuleSet};
//! use hyper::header::{HeaderMap, HeaderValue};
//! 
//! let rules = RuleSet::compile(&[
//!     HeaderRuleConfig::new("^X-", "Evil"),
//!     HeaderRuleConfig::name_only("^Irrelevant"),
//! ]).unwrap();
//! 
//! let mut headers = HeaderMap::new();
//! headers.append("x-permission", HeaderValue::from_static("Something Evil in here"));
//! headers.append("x-permission", HeaderValue::from_static("Something Okay in here"));
//! headers.append("irrelevant-header", HeaderValue::from_static("whatever"));
//! 
//! rules.filter(&mut headers);
//! 
//! assert_eq!(headers.get_all("x-permission").iter().count(), 1);
//! assert!(!headers.contains_key("irrelevant-header"));
//! ```
//! 
//! # 미들웨어 설정
//! 
//! ```
//! use header_block::settings::Settings;
//! use header_block::middleware::MiddlewareManager;
//! 
//! let settings = Settings::from_toml_str(r#"
//!     [middleware.block-internal]
//!     middleware_type = "header-block"
//! 
//!     [middleware.block-internal.settings]
//!     responseHeaders = [{ header = "^Internal-" }, { env = "leaking secret$" }]
//! "#).unwrap();
//! 
//! let manager = MiddlewareManager::new(&settings.middleware).unwrap();
//! assert_eq!(manager.chain().names(), vec!["block-internal"]);
//! ```

pub mod logging;
pub mod middleware;
pub mod proxy;
pub mod server;
pub mod settings;
