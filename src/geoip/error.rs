use std::fmt;

#[derive(Debug, PartialEq)]
pub enum GeoIpError {
    /// 빈 IP 문자열
    InvalidInput,
    /// 외부 조회 실패 (네트워크, 응답 파싱, 빈 국가 코드)
    Upstream {
        ip: String,
        reason: String,
    },
    /// 캐시 용량이 유효하지 않음
    CacheInit {
        capacity: usize,
    },
    /// HTTP 클라이언트 생성 실패
    ClientInit {
        reason: String,
    },
}

impl GeoIpError {
    pub fn upstream(ip: &str, reason: impl fmt::Display) -> Self {
        GeoIpError::Upstream {
            ip: ip.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for GeoIpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoIpError::InvalidInput => write!(f, "invalid IP address"),
            GeoIpError::Upstream { ip, reason } =>
                write!(f, "IP {} 지리 정보 조회 실패: {}", ip, reason),
            GeoIpError::CacheInit { capacity } =>
                write!(f, "캐시 생성 실패: 유효하지 않은 용량 {}", capacity),
            GeoIpError::ClientInit { reason } =>
                write!(f, "GeoIP 클라이언트 생성 실패: {}", reason),
        }
    }
}

impl std::error::Error for GeoIpError {}
