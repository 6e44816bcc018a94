use std::sync::Arc;
use tracing::{error, info};

use geo_router::logging::init_logging;
use geo_router::server::{AppContext, RequestHandler, ServerListener};
use geo_router::settings::Settings;

#[tokio::main]
async fn main() {
    // 설정 로드 실패는 로깅 초기화 전이므로 stderr로 출력
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load config file: {}", e);
            std::process::exit(1);
        }
    };

    let _log_guard = init_logging(&settings.logging);

    let context = match AppContext::from_settings(&settings) {
        Ok(context) => context,
        Err(e) => {
            error!(error = %e, "서버 구성 요소 초기화 실패");
            std::process::exit(1);
        }
    };

    let addr = match settings.main.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "리스닝 주소 해석 실패");
            std::process::exit(1);
        }
    };

    let listener = match ServerListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, "Failed to start server");
            std::process::exit(1);
        }
    };

    info!(mode = %settings.main.mode, addr = %addr, "Geo Router 서버 실행");
    let handler = Arc::new(RequestHandler::new(Arc::new(context)));
    if let Err(e) = listener.run(handler).await {
        error!(error = %e, "서버 실행 중 에러 발생");
        std::process::exit(1);
    }
}
