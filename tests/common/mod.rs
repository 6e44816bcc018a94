#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use geo_router::geoip::{GeoIpError, GeoLookup, GeoRecord};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

// 호출 횟수를 세는 테스트용 GeoIP 조회기
pub struct MockLookup {
    calls: AtomicUsize,
    countries: HashMap<String, String>,
    delay: Option<Duration>,
}

impl MockLookup {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            countries: entries
                .iter()
                .map(|(ip, cc)| (ip.to_string(), cc.to_string()))
                .collect(),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoLookup for MockLookup {
    async fn lookup(&self, ip: &str) -> Result<GeoRecord, GeoIpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.countries.get(ip) {
            Some(cc) => Ok(GeoRecord {
                ip: ip.to_string(),
                country: format!("Country {}", cc),
                country_code: cc.clone(),
                ..Default::default()
            }),
            None => Err(GeoIpError::upstream(ip, "lookup service unavailable")),
        }
    }
}

// 테스트용 HTTP 서버를 127.0.0.1의 임의 포트에 띄웁니다
pub async fn spawn_server<F, Fut>(handler: F) -> SocketAddr
where
    F: Fn(Request<Incoming>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Response<Full<Bytes>>> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let handler = handler.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req| {
                    let handler = handler.clone();
                    async move { Ok::<_, Infallible>(handler(req).await) }
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    addr
}

pub fn json_response(status: u16, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

// 받은 요청 정보를 본문에 담아 돌려주는 대상 서버
pub async fn spawn_echo_upstream() -> SocketAddr {
    use http_body_util::BodyExt;

    spawn_server(|req: Request<Incoming>| async move {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-")
                .to_string()
        };
        let summary = format!(
            "{} {} host={} xff={}",
            req.method(),
            req.uri(),
            header("host"),
            header("x-forwarded-for"),
        );

        let body = req.into_body().collect().await.unwrap().to_bytes();
        Response::builder()
            .status(201)
            .header("x-upstream", "echo")
            .header("location", "/elsewhere")
            .body(Full::new(Bytes::from(format!(
                "{} body={}",
                summary,
                String::from_utf8_lossy(&body)
            ))))
            .unwrap()
    })
    .await
}
