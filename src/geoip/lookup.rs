use std::net::IpAddr;
use std::time::Duration;
use async_trait::async_trait;
use tracing::debug;

use crate::geoip::{GeoIpError, GeoRecord};
use crate::settings::IP_PLACEHOLDER;

/// 외부 지리 정보 조회 서비스
#[async_trait]
pub trait GeoLookup: Send + Sync {
    async fn lookup(&self, ip: &str) -> Result<GeoRecord, GeoIpError>;
}

/// `{ip}` 템플릿 URL로 GET 요청을 보내 JSON 응답을 해석하는 조회기입니다.
#[derive(Clone, Debug)]
pub struct HttpGeoLookup {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGeoLookup {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GeoIpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| GeoIpError::ClientInit { reason: e.to_string() })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// 파싱된 주소만 받으므로 템플릿에는 항상 정규화된 IP 문자열이 들어갑니다.
    pub fn url_for(&self, ip: IpAddr) -> String {
        self.endpoint.replace(IP_PLACEHOLDER, &ip.to_string())
    }
}

#[async_trait]
impl GeoLookup for HttpGeoLookup {
    async fn lookup(&self, ip: &str) -> Result<GeoRecord, GeoIpError> {
        let addr = ip.parse::<IpAddr>().map_err(|_| {
            debug!(ip = %ip, "IP 주소 형식이 아니므로 외부 조회 생략");
            GeoIpError::InvalidInput
        })?;

        let url = self.url_for(addr);
        debug!(ip = %ip, url = %url, "외부 GeoIP 조회");

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeoIpError::upstream(ip, e))?;

        // HTTP 상태와 관계없이 본문의 국가 코드로 성공 여부를 판단
        response
            .json::<GeoRecord>()
            .await
            .map_err(|e| GeoIpError::upstream(ip, e))
    }
}
