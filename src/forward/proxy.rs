use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, HeaderName, HeaderValue, CONNECTION, CONTENT_LENGTH, HOST};
use hyper::{Request, Response};
use tracing::{debug, info};

use super::{ForwardDescriptor, ForwardError};

const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// 대상 서버로 요청을 전달하는 HTTP 클라이언트입니다.
///
/// 대상의 리다이렉트는 따라가지 않고 그대로 클라이언트에게 돌려줍니다.
#[derive(Clone, Debug)]
pub struct ProxyClient {
    client: reqwest::Client,
}

impl ProxyClient {
    pub fn new(timeout: Duration) -> Result<Self, ForwardError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .build()
            .map_err(ForwardError::ClientInit)?;

        Ok(Self { client })
    }

    pub async fn forward<B>(
        &self,
        descriptor: ForwardDescriptor,
        req: Request<B>,
        peer: Option<SocketAddr>,
    ) -> Result<Response<Full<Bytes>>, ForwardError>
    where
        B: Body,
        B::Error: fmt::Display,
    {
        let (parts, body) = req.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| ForwardError::RequestBody(e.to_string()))?
            .to_bytes();

        let headers = outbound_headers(parts.headers, &descriptor, peer)?;
        let url = descriptor.url();
        info!(method = %parts.method, url = %url, "대상 서버로 프록시");

        let mut request = self.client
            .request(parts.method, &url)
            .headers(headers);
        if !body.is_empty() {
            request = request.body(body);
        }

        let upstream = request.send().await.map_err(ForwardError::Upstream)?;
        let status = upstream.status();
        let mut headers = upstream.headers().clone();
        strip_hop_by_hop(&mut headers);

        let bytes = upstream.bytes().await.map_err(ForwardError::Upstream)?;
        debug!(status = %status, bytes_size = bytes.len(), "대상 서버 응답 수신");

        let mut response = Response::new(Full::new(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

fn outbound_headers(
    mut headers: HeaderMap,
    descriptor: &ForwardDescriptor,
    peer: Option<SocketAddr>,
) -> Result<HeaderMap, ForwardError> {
    strip_hop_by_hop(&mut headers);
    headers.remove(CONTENT_LENGTH);

    let host = HeaderValue::from_str(&descriptor.host).map_err(|e| ForwardError::InvalidHeader {
        name: "Host",
        reason: e.to_string(),
    })?;
    headers.insert(HOST, host);

    if let Some(peer) = peer {
        let ip = peer.ip().to_string();
        let forwarded = match headers.get(&X_FORWARDED_FOR).and_then(|v| v.to_str().ok()) {
            Some(prior) => format!("{}, {}", prior, ip),
            None => ip,
        };
        if let Ok(value) = HeaderValue::from_str(&forwarded) {
            headers.insert(X_FORWARDED_FOR, value);
        }
    }

    Ok(headers)
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<String> = headers
        .get_all(CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    for name in &listed {
        headers.remove(name.as_str());
    }
    for name in HOP_BY_HOP {
        headers.remove(*name);
    }
}
