use std::net::SocketAddr;
use hyper::Request;

/// 요청의 클라이언트 IP를 추출합니다.
///
/// `X-Forwarded-For`의 첫 번째 값, `X-Real-IP`, 연결 주소 순으로 사용하며
/// 아무것도 없으면 빈 문자열을 반환합니다.
pub fn client_ip<B>(req: &Request<B>, remote: Option<SocketAddr>) -> String {
    if let Some(xff) = header_value(req, "x-forwarded-for") {
        return xff.split(',').next().unwrap_or_default().trim().to_string();
    }
    if let Some(xri) = header_value(req, "x-real-ip") {
        return xri.trim().to_string();
    }
    remote.map(|addr| addr.ip().to_string()).unwrap_or_default()
}

fn header_value<'a, B>(req: &'a Request<B>, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}
