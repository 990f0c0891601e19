use header_block::middleware::{MiddlewareError, MiddlewareManager};
use header_block::settings::Settings;
use bytes::Bytes;
use http_body_util::Full;
use hyper::HeaderMap;

const SCENARIO: &str = r#"
    [middleware.block]
    middleware_type = "header-block"

    [middleware.block.settings]
    requestHeaders = [
        { header = "^X-", env = "Evil" },
        { header = "^Irrelevant" },
        { env = "ignored$" },
    ]
    responseHeaders = [
        { header = "Confusing-For-Client", env = "Weird-Value" },
        { header = "^Internal-" },
        { env = "leaking secret$" },
    ]
"#;

fn manager(toml: &str) -> MiddlewareManager {
    let settings = Settings::from_toml_str(toml).unwrap();
    MiddlewareManager::new(&settings.middleware).unwrap()
}

fn values(headers: &HeaderMap, name: &str) -> Vec<String> {
    headers.get_all(name)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

fn assert_does_not_contain(headers: &HeaderMap, name: &str, value: &str) {
    assert!(
        !values(headers, name).iter().any(|v| v == value),
        "header `{}` shouldn't contain value `{}` but did", name, value
    );
}

fn assert_does_contain(headers: &HeaderMap, name: &str, value: &str) {
    assert!(
        values(headers, name).iter().any(|v| v == value),
        "header `{}` should contain value `{}` but didn't", name, value
    );
}

#[tokio::test]
async fn test_should_block_configured_request_headers() {
    let manager = manager(SCENARIO);

    let req = hyper::Request::builder()
        .uri("http://localhost/admin/health")
        .header("X-Permission", "Something Evil in here")
        .header("X-Permission", "Something Okay in here")
        .header("X-Trace", "All fine")
        .header("Irrelevant-Header", "whatever")
        .header("Irrelevant-Header", "not relevant")
        .header("User-Setting", "things, but ignored")
        .body(Full::new(Bytes::new()))
        .unwrap();

    let req = manager.handle_request(req).await.unwrap();
    let headers = req.headers();

    assert_does_not_contain(headers, "X-Permission", "Something Evil in here");
    assert_does_contain(headers, "X-Permission", "Something Okay in here");
    assert_does_contain(headers, "X-Trace", "All fine");
    assert!(!headers.contains_key("Irrelevant-Header"));
    assert!(!headers.contains_key("User-Setting"));
}

#[tokio::test]
async fn test_should_block_configured_response_headers() {
    let manager = manager(SCENARIO);

    let res = hyper::Response::builder()
        .header("Confusing-For-Client", "Weird-Value")
        .header("Confusing-For-Client", "Normal-Value")
        .header("Internal-Source", "Database")
        .header("Internal-Source", "Cache")
        .header("Internal-State", "Ready")
        .header("Secret-Thingy", "provided: leaking secret")
        .body(Full::new(Bytes::new()))
        .unwrap();

    let res = manager.handle_response(res).await.unwrap();
    let headers = res.headers();

    assert_eq!(values(headers, "Confusing-For-Client"), vec!["Normal-Value"]);
    assert!(!headers.contains_key("Internal-Source"));
    assert!(!headers.contains_key("Internal-State"));
    assert!(!headers.contains_key("Secret-Thingy"));
}

#[tokio::test]
async fn test_request_rules_do_not_touch_response() {
    let manager = manager(SCENARIO);

    // 요청 규칙의 `^Irrelevant` 는 응답에 적용되지 않는다
    let res = hyper::Response::builder()
        .header("Irrelevant-Header", "whatever")
        .body(Full::new(Bytes::new()))
        .unwrap();

    let res = manager.handle_response(res).await.unwrap();
    assert_eq!(values(res.headers(), "Irrelevant-Header"), vec!["whatever"]);
}

#[tokio::test]
async fn test_ordered_middlewares_compose() {
    let manager = manager(r#"
        [middleware.second]
        middleware_type = "header-block"
        order = 2

        [middleware.second.settings]
        requestHeaders = [{ header = "^x-stage$", env = "^two$" }]

        [middleware.first]
        middleware_type = "header-block"
        order = 1

        [middleware.first.settings]
        requestHeaders = [{ header = "^x-stage$", env = "^one$" }]

        [middleware.off]
        middleware_type = "header-block"
        enabled = false

        [middleware.off.settings]
        requestHeaders = [{ header = "^x-stage$" }]
    "#);
    assert_eq!(manager.chain().names(), vec!["first", "second"]);

    let req = hyper::Request::builder()
        .header("x-stage", "one")
        .header("x-stage", "two")
        .header("x-stage", "three")
        .body(Full::new(Bytes::new()))
        .unwrap();

    let req = manager.handle_request(req).await.unwrap();
    assert_eq!(values(req.headers(), "x-stage"), vec!["three"]);
}

#[test]
fn test_invalid_pattern_prevents_startup() {
    let settings = Settings::from_toml_str(r#"
        [middleware.broken]
        middleware_type = "header-block"

        [middleware.broken.settings]
        requestHeaders = [{ header = "^X-(" }]
    "#).unwrap();

    match MiddlewareManager::new(&settings.middleware) {
        Err(MiddlewareError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "^X-("),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("broken pattern must not produce a manager"),
    }
}
