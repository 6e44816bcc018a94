use url::Url;

/// 프록시 요청 하나를 위한 대상 정보입니다. 요청마다 새로 만들어지며 공유되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardDescriptor {
    pub scheme: String,
    /// `host[:port]`, 아웃바운드 Host 헤더 값으로도 사용
    pub host: String,
    pub path: String,
    pub query: Option<String>,
}

impl ForwardDescriptor {
    pub fn from_target(target: &Url) -> Self {
        let host = target.host_str().unwrap_or_default();
        let host = match target.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Self {
            scheme: target.scheme().to_string(),
            host,
            path: target.path().to_string(),
            query: target.query().map(str::to_string),
        }
    }

    pub fn url(&self) -> String {
        match &self.query {
            Some(query) => format!("{}://{}{}?{}", self.scheme, self.host, self.path, query),
            None => format!("{}://{}{}", self.scheme, self.host, self.path),
        }
    }
}
