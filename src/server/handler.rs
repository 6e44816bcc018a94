use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use hyper::{Request, Response, StatusCode};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::client_ip::client_ip;
use crate::forward::error_response;
use crate::logging::{log_request, RequestLog};
use super::AppContext;

/// 요청 하나를 IP 추출 -> GeoIP 조회 -> 대상 결정 -> 전달 순서로 처리합니다.
pub struct RequestHandler {
    context: Arc<AppContext>,
}

impl RequestHandler {
    pub fn new(context: Arc<AppContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    #[instrument(skip_all, fields(request_id = tracing::field::Empty))]
    pub async fn handle_request<B>(
        &self,
        req: Request<B>,
        remote: Option<SocketAddr>,
    ) -> Result<Response<Full<Bytes>>, std::convert::Infallible>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());
        let start_time = Instant::now();
        let mut log = RequestLog::new(request_id);

        // 1. 클라이언트 IP
        let ip = client_ip(&req, remote);
        log.with_request(&req, &ip);

        // 2. GeoIP 조회, 실패하면 default 라우트 사용
        let record = match self.context.resolver.resolve(&ip).await {
            Ok(record) => {
                log.with_country(&record.country_code);
                Some(record)
            }
            Err(e) => {
                warn!(ip = %ip, error = %e, "Error getting GeoIP data");
                None
            }
        };

        // 3. 대상 URL 결정
        let path = req.uri().path().to_string();
        let query = req.uri().query().unwrap_or_default().to_string();
        let target = match self.context.policy.resolve(record.as_deref(), &path, &query) {
            Ok(target) => target,
            Err(e) => {
                log.with_error(&e);
                let response = text_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
                return Ok(finish(log, start_time, response));
            }
        };
        log.with_target(&target);

        // 4. redirect 또는 proxy
        debug!(mode = %self.context.forwarder.mode(), target = %target, "요청 전달 시작");
        let response = match self.context.forwarder.dispatch(&target, req, remote).await {
            Ok(response) => response,
            Err(e) => {
                log.with_error(&e);
                error_response(&e)
            }
        };

        Ok(finish(log, start_time, response))
    }

    pub async fn handle_connection<I>(
        self: Arc<Self>,
        io: I,
        remote: SocketAddr,
    ) -> std::result::Result<(), hyper::Error>
    where
        I: hyper::rt::Read + hyper::rt::Write + Send + Unpin + 'static,
    {
        http1::Builder::new()
            .serve_connection(
                io,
                service_fn(move |req| {
                    let handler = self.clone();
                    async move { handler.handle_request(req, Some(remote)).await }
                }),
            )
            .await
    }
}

fn finish(mut log: RequestLog, start_time: Instant, response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    log.with_response(response.status());
    log.duration_ms = start_time.elapsed().as_millis() as u64;
    log_request(&log);
    response
}

fn text_response(status: StatusCode, message: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(message)));
    *response.status_mut() = status;
    response
}
