use std::sync::Arc;
use header_block::{
    logging,
    middleware::MiddlewareManager,
    proxy::ProxyConfig,
    server::{self, RequestHandler, ServerListener},
    settings::Settings,
};
use tracing::{error, info};

async fn run() -> server::Result<()> {
    let settings = Settings::load().await?;
    let _log_guard = logging::init_logging(&settings.logging);

    // 잘못된 규칙이 하나라도 있으면 트래픽을 받지 않는다
    let middleware_manager = MiddlewareManager::new(&settings.middleware).map_err(|e| {
        error!(error = %e, "미들웨어 초기화 실패");
        e
    })?;

    let proxy_config = ProxyConfig::new(settings.server.upstream.clone());
    let handler = Arc::new(RequestHandler::new(middleware_manager, proxy_config));
    let listener = ServerListener::new(&settings.server).await?;

    info!(upstream = %settings.server.upstream, "Header block proxy started");
    listener.run(handler).await
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("header_block 실행 실패: {}", e);
        std::process::exit(1);
    }
}
