//! 헤더 필터 엔진
//! 
//! 단계가 시작될 때 헤더 이름 목록을 한 번 스냅샷으로 잡고, 각 이름에 대해
//! 규칙을 순서대로 적용합니다. 규칙은 매번 현재 컬렉션의 값을 다시 읽으므로
//! 같은 헤더에 대해 뒤쪽 규칙은 앞쪽 규칙이 남긴 결과를 봅니다.
//! 값이 모두 삭제된 헤더는 컬렉션에서 제거됩니다.

use std::borrow::Cow;
use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::trace;
use super::rule::{HeaderRule, PatternMatcher, RuleSet};

/// 한 번의 필터링으로 삭제된 항목 수
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FilterReport {
    /// 컬렉션에서 완전히 사라진 헤더 수
    pub removed_headers: usize,
    /// 값 패턴으로 삭제된 개별 값 수
    pub removed_values: usize,
}

impl FilterReport {
    pub fn is_empty(&self) -> bool {
        self.removed_headers == 0 && self.removed_values == 0
    }
}

enum RuleEffect {
    Unchanged,
    Pruned(usize),
    Removed { pruned: usize },
}

/// 규칙 목록을 헤더 컬렉션에 적용합니다. 요청 처리 중에는 실패하지 않습니다.
pub fn filter_headers(headers: &mut HeaderMap, rules: &RuleSet) -> FilterReport {
    let mut report = FilterReport::default();
    if rules.is_empty() || headers.is_empty() {
        return report;
    }

    let names: Vec<HeaderName> = headers.keys().cloned().collect();

    for name in &names {
        for rule in rules.iter() {
            match apply_rule(headers, rule, name) {
                RuleEffect::Unchanged => {}
                RuleEffect::Pruned(count) => report.removed_values += count,
                RuleEffect::Removed { pruned } => {
                    report.removed_values += pruned;
                    report.removed_headers += 1;
                    break;
                }
            }
        }
    }

    report
}

fn apply_rule(headers: &mut HeaderMap, rule: &HeaderRule, name: &HeaderName) -> RuleEffect {
    let name_match = rule.name_matcher()
        .is_some_and(|matcher| matcher.is_match(name.as_str()));

    match (rule.name_matcher(), rule.value_matcher()) {
        (Some(matcher), None) if name_match => {
            trace!(header = %name, pattern = matcher.pattern(), "헤더 삭제");
            headers.remove(name);
            RuleEffect::Removed { pruned: 0 }
        }
        (name_matcher, Some(value_matcher)) if name_match || name_matcher.is_none() => {
            prune_values(headers, name, value_matcher)
        }
        _ => RuleEffect::Unchanged,
    }
}

/// 값 패턴과 일치하는 값만 삭제하고 나머지는 원래 순서대로 다시 기록합니다.
fn prune_values(headers: &mut HeaderMap, name: &HeaderName, matcher: &PatternMatcher) -> RuleEffect {
    let (kept, pruned): (Vec<HeaderValue>, Vec<HeaderValue>) = headers.get_all(name)
        .iter()
        .cloned()
        .partition(|value| !matcher.is_match(&value_text(value)));

    if pruned.is_empty() {
        return RuleEffect::Unchanged;
    }

    trace!(header = %name, pattern = matcher.pattern(), count = pruned.len(), "헤더 값 삭제");
    headers.remove(name);

    if kept.is_empty() {
        return RuleEffect::Removed { pruned: pruned.len() };
    }

    for value in kept {
        headers.append(name.clone(), value);
    }
    RuleEffect::Pruned(pruned.len())
}

// UTF-8 이 아닌 값도 매칭할 수 있도록 손실 변환
fn value_text(value: &HeaderValue) -> Cow<'_, str> {
    String::from_utf8_lossy(value.as_bytes())
}
