use std::path::Path;
use tracing::{info, warn, error, Level, span};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use crate::settings::{LogFormat, LogOutput, LogSettings};

/// 로깅을 초기화합니다. 파일 출력일 때 반환되는 guard는 프로세스가 끝날 때까지 유지해야 합니다.
pub fn init_logging(settings: &LogSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str().to_lowercase()));

    let (writer, guard) = match &settings.output {
        LogOutput::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::File(path) => {
            let path = Path::new(path);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let file = path.file_name().map(|f| f.to_os_string()).unwrap_or_else(|| "geo_router.log".into());
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file))
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(true);

    let result = match settings.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.with_file(true).with_line_number(true).try_init(),
    };

    match result {
        Ok(()) => Some(guard),
        Err(e) => {
            eprintln!("로깅 초기화 실패: {}", e);
            None
        }
    }
}

#[derive(Debug)]
pub struct RequestLog {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub client_ip: String,
    pub country_code: Option<String>,
    pub target: Option<String>,
    pub status_code: u16,
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl RequestLog {
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            method: String::new(),
            path: String::new(),
            client_ip: String::new(),
            country_code: None,
            target: None,
            status_code: 0,
            duration_ms: 0,
            error: None,
        }
    }

    pub fn with_request<B>(&mut self, req: &hyper::Request<B>, client_ip: &str) {
        self.method = req.method().to_string();
        self.path = req.uri().path().to_string();
        self.client_ip = client_ip.to_string();
    }

    pub fn with_country(&mut self, country_code: &str) {
        self.country_code = Some(country_code.to_string());
    }

    pub fn with_target(&mut self, target: &url::Url) {
        self.target = Some(target.to_string());
    }

    pub fn with_response(&mut self, status: hyper::StatusCode) {
        self.status_code = status.as_u16();
    }

    pub fn with_error(&mut self, error: impl std::fmt::Display) {
        self.error = Some(error.to_string());
    }
}

pub fn log_request(log: &RequestLog) {
    let level = if log.error.is_some() && log.status_code >= 500 {
        Level::ERROR
    } else if log.error.is_some() || log.status_code >= 400 {
        Level::WARN
    } else {
        Level::INFO
    };

    let span = span!(
        Level::INFO,
        "request",
        request_id = %log.request_id,
        method = %log.method,
        path = %log.path,
        client_ip = %log.client_ip,
        status = %log.status_code,
        duration_ms = %log.duration_ms
    );
    let _enter = span.enter();

    match level {
        Level::ERROR => error!(
            country = ?log.country_code,
            target = ?log.target,
            error = ?log.error,
            "Request failed"
        ),
        Level::WARN => warn!(
            country = ?log.country_code,
            target = ?log.target,
            error = ?log.error,
            "Request completed with warning"
        ),
        _ => info!(
            country = ?log.country_code,
            target = ?log.target,
            "Request completed successfully"
        ),
    }
}
