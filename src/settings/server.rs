use serde::Deserialize;
use std::env;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;
use crate::forward::Mode;
use super::SettingsError;

#[derive(Clone, Debug, Deserialize)]
pub struct ServerSettings {
    /// 동작 모드 (기본값: redirect)
    #[serde(rename = "use", default)]
    pub mode: Mode,

    /// 리스닝 주소 (기본값: ":8302")
    #[serde(default = "default_addr")]
    pub addr: String,

    /// GeoIP 캐시 용량
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,

    /// 외부 조회 URL 템플릿, `{ip}` 자리에 클라이언트 IP가 들어갑니다
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,

    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_secs: u64,

    #[serde(default = "default_proxy_timeout")]
    pub proxy_timeout_secs: u64,
}

pub const IP_PLACEHOLDER: &str = "{ip}";

fn default_addr() -> String { ":8302".to_string() }
fn default_cache_size() -> usize { 10000 }
fn default_lookup_url() -> String { "https://get.geojs.io/v1/ip/geo/{ip}.json".to_string() }
fn default_lookup_timeout() -> u64 { 5 }
fn default_proxy_timeout() -> u64 { 30 }

pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(name: &str, default: F) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}

impl ServerSettings {
    /// 환경 변수로 모드와 주소를 덮어씁니다.
    pub fn apply_env(&mut self) -> Result<(), SettingsError> {
        let mode = self.mode;
        self.mode = parse_env_var("GEO_ROUTER_MODE", || mode)?;
        if let Ok(addr) = env::var("GEO_ROUTER_ADDR") {
            self.addr = addr;
        }
        Ok(())
    }

    /// `":8302"` 형태는 모든 인터페이스(0.0.0.0)로 해석합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        let addr = if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr)
        } else {
            self.addr.clone()
        };

        addr.to_socket_addrs()
            .map_err(|e| self.invalid("addr", &self.addr, e.to_string()))?
            .next()
            .ok_or_else(|| self.invalid("addr", &self.addr, "주소를 해석할 수 없습니다".to_string()))
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn proxy_timeout(&self) -> Duration {
        Duration::from_secs(self.proxy_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.cache_size == 0 {
            return Err(self.invalid("cache_size", "0", "캐시 크기는 0보다 커야 합니다".to_string()));
        }

        // 0초 타임아웃은 모든 외부 요청을 즉시 실패시킴
        for (key, secs) in [
            ("lookup_timeout_secs", self.lookup_timeout_secs),
            ("proxy_timeout_secs", self.proxy_timeout_secs),
        ] {
            if secs == 0 {
                return Err(self.invalid(key, "0", "타임아웃은 0초보다 커야 합니다".to_string()));
            }
        }

        if !self.lookup_url.contains(IP_PLACEHOLDER) {
            return Err(self.invalid(
                "lookup_url",
                &self.lookup_url,
                format!("URL 템플릿에 {}가 포함되어야 합니다", IP_PLACEHOLDER),
            ));
        }

        self.socket_addr()?;
        Ok(())
    }

    fn invalid(&self, key: &str, value: &str, reason: String) -> SettingsError {
        SettingsError::InvalidValue {
            key: format!("main.{}", key),
            value: value.to_string(),
            reason,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            addr: default_addr(),
            cache_size: default_cache_size(),
            lookup_url: default_lookup_url(),
            lookup_timeout_secs: default_lookup_timeout(),
            proxy_timeout_secs: default_proxy_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_only_addr_binds_all_interfaces() {
        let settings = ServerSettings::default();
        assert_eq!(settings.socket_addr().unwrap(), "0.0.0.0:8302".parse().unwrap());
    }

    #[test]
    fn test_explicit_addr() {
        let settings = ServerSettings {
            addr: "127.0.0.1:9000".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.socket_addr().unwrap(), "127.0.0.1:9000".parse().unwrap());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_cache = ServerSettings { cache_size: 0, ..Default::default() };
        assert!(matches!(
            zero_cache.validate(),
            Err(SettingsError::InvalidValue { key, .. }) if key == "main.cache_size"
        ));

        let no_placeholder = ServerSettings {
            lookup_url: "https://geo.example.com/lookup".to_string(),
            ..Default::default()
        };
        assert!(no_placeholder.validate().is_err());

        let bad_addr = ServerSettings { addr: "not an address".to_string(), ..Default::default() };
        assert!(bad_addr.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeouts() {
        let zero_lookup = ServerSettings { lookup_timeout_secs: 0, ..Default::default() };
        assert!(matches!(
            zero_lookup.validate(),
            Err(SettingsError::InvalidValue { key, .. }) if key == "main.lookup_timeout_secs"
        ));

        let zero_proxy = ServerSettings { proxy_timeout_secs: 0, ..Default::default() };
        assert!(matches!(
            zero_proxy.validate(),
            Err(SettingsError::InvalidValue { key, .. }) if key == "main.proxy_timeout_secs"
        ));

        let minimal = ServerSettings {
            lookup_timeout_secs: 1,
            proxy_timeout_secs: 1,
            ..Default::default()
        };
        assert!(minimal.validate().is_ok());
    }
}
