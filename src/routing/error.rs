use std::fmt;

/// 라우팅 관련 에러를 표현하는 열거형입니다.
#[derive(Debug, PartialEq)]
pub enum RoutingError {
    /// 라우팅 테이블에 `default` 항목이 없음
    MissingDefault,
    /// 설정된 대상 URL을 해석할 수 없음
    InvalidTarget {
        url: String,
        reason: String,
    },
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::MissingDefault =>
                write!(f, "라우팅 테이블에 default 항목이 없음"),
            RoutingError::InvalidTarget { url, reason } =>
                write!(f, "failed to parse target URL '{}': {}", url, reason),
        }
    }
}

impl std::error::Error for RoutingError {}
