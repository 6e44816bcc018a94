//! 결정된 대상 URL로 요청을 보내는 모듈입니다.
//!
//! 모드는 시작 시 한 번 정해지며 요청마다 바뀌지 않습니다.

mod descriptor;
mod error;
mod proxy;
mod redirect;

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use serde::Deserialize;
use url::Url;

pub use descriptor::ForwardDescriptor;
pub use error::{error_response, ForwardError};
pub use proxy::ProxyClient;
pub use redirect::redirect_response;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Redirect,
    Proxy,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redirect" => Ok(Mode::Redirect),
            "proxy" => Ok(Mode::Proxy),
            _ => Err(format!("Invalid mode: {}", s)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Redirect => write!(f, "redirect"),
            Mode::Proxy => write!(f, "proxy"),
        }
    }
}

/// 모드별 전달 방식
#[derive(Clone, Debug)]
pub enum Forwarder {
    Redirect,
    Proxy(ProxyClient),
}

impl Forwarder {
    pub fn new(mode: Mode, proxy_timeout: Duration) -> Result<Self, ForwardError> {
        match mode {
            Mode::Redirect => Ok(Forwarder::Redirect),
            Mode::Proxy => Ok(Forwarder::Proxy(ProxyClient::new(proxy_timeout)?)),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Forwarder::Redirect => Mode::Redirect,
            Forwarder::Proxy(_) => Mode::Proxy,
        }
    }

    /// redirect 모드는 302 응답을 만들고, proxy 모드는 요청마다 새
    /// `ForwardDescriptor`를 만들어 원본 요청을 대상에 전달합니다.
    pub async fn dispatch<B>(
        &self,
        target: &Url,
        req: Request<B>,
        peer: Option<SocketAddr>,
    ) -> Result<Response<Full<Bytes>>, ForwardError>
    where
        B: Body,
        B::Error: fmt::Display,
    {
        match self {
            Forwarder::Redirect => redirect_response(target, req.method()),
            Forwarder::Proxy(client) => {
                let descriptor = ForwardDescriptor::from_target(target);
                client.forward(descriptor, req, peer).await
            }
        }
    }
}
