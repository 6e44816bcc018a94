use std::fmt;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

#[derive(Debug)]
pub enum ForwardError {
    /// 클라이언트 요청 본문을 읽지 못함
    RequestBody(String),
    InvalidHeader {
        name: &'static str,
        reason: String,
    },
    /// 대상 서버 요청 실패
    Upstream(reqwest::Error),
    ClientInit(reqwest::Error),
}

impl ForwardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ForwardError::RequestBody(_) => StatusCode::BAD_REQUEST,
            ForwardError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ForwardError::InvalidHeader { .. } | ForwardError::ClientInit(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for ForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardError::RequestBody(e) => write!(f, "요청 본문 읽기 실패: {}", e),
            ForwardError::InvalidHeader { name, reason } =>
                write!(f, "{} 헤더 생성 실패: {}", name, reason),
            ForwardError::Upstream(e) => write!(f, "Backend request failed: {}", e),
            ForwardError::ClientInit(e) => write!(f, "프록시 클라이언트 생성 실패: {}", e),
        }
    }
}

impl std::error::Error for ForwardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ForwardError::Upstream(e) | ForwardError::ClientInit(e) => Some(e),
            _ => None,
        }
    }
}

pub fn error_response(error: &ForwardError) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(error.to_string())));
    *response.status_mut() = error.status_code();
    response
}
