use std::{collections::HashMap, env, fs, path::{Path, PathBuf}};
use serde::Deserialize;
use tracing::info;
use crate::routing::RoutingTable;

mod server;
pub mod logging;
mod error;

pub use server::{ServerSettings, IP_PLACEHOLDER};
pub use logging::{LogFormat, LogOutput, LogSettings};
pub use error::SettingsError;

pub type Result<T> = std::result::Result<T, SettingsError>;
pub use server::parse_env_var;

/// 설정 파일 경로를 지정하는 환경 변수
pub const CONFIG_PATH_ENV: &str = "GEO_ROUTER_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    // 서버 설정
    #[serde(default)]
    pub main: ServerSettings,

    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    /// 국가 코드 -> 대상 URL
    pub redirects: Option<HashMap<String, String>>,
}

impl Settings {
    /// `GEO_ROUTER_CONFIG`가 없으면 실행 파일 옆의 `config.toml`을 읽습니다.
    pub fn load() -> Result<Self> {
        let path = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => PathBuf::from(path),
            Err(_) => Self::default_path()?,
        };
        Self::from_toml_file(path)
    }

    fn default_path() -> Result<PathBuf> {
        let exe = env::current_exe().map_err(|e| SettingsError::FileError {
            path: "<executable>".to_string(),
            error: e,
        })?;
        let dir = exe.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(dir.join("config.toml"))
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!(path = %path.as_ref().display(), "설정 파일 읽는 중");
        let content = fs::read_to_string(&path).map_err(|e| SettingsError::FileError {
            path: path.as_ref().to_string_lossy().to_string(),
            error: e,
        })?;

        Self::from_toml_str(&content)
    }

    /// TOML 문자열을 파싱하고 환경 변수 적용 후 검증합니다.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut settings: Self = toml::from_str(content)
            .map_err(|e| SettingsError::ParseError { source: e })?;

        settings.main.apply_env()?;
        settings.logging.apply_env()?;

        // 설정 생성 시점에 바로 검증
        settings.validate()?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> Result<()> {
        let redirects = self.redirects.as_ref().ok_or(SettingsError::MissingRedirects)?;
        match redirects.get(RoutingTable::DEFAULT_KEY) {
            Some(url) if !url.is_empty() => {}
            _ => return Err(SettingsError::MissingDefault),
        }

        self.main.validate()
    }

    /// 검증된 `[redirects]`로 라우팅 테이블을 만듭니다.
    pub fn routing_table(&self) -> Result<RoutingTable> {
        let redirects = self.redirects.clone().ok_or(SettingsError::MissingRedirects)?;
        RoutingTable::new(redirects).map_err(|_| SettingsError::MissingDefault)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections() {
        let result = toml::from_str::<Settings>("[main]\nuse = \"proxy\"\n")
            .map_err(|e| SettingsError::ParseError { source: e })
            .and_then(|s| s.validate().map(|_| s));
        assert!(matches!(result, Err(SettingsError::MissingRedirects)));

        let settings: Settings = toml::from_str("[redirects]\nDE = \"https://de.example.com\"\n").unwrap();
        assert!(matches!(settings.validate(), Err(SettingsError::MissingDefault)));

        let settings: Settings = toml::from_str("[redirects]\ndefault = \"\"\n").unwrap();
        assert!(matches!(settings.validate(), Err(SettingsError::MissingDefault)));
    }

    #[test]
    fn test_routing_table_from_settings() {
        let settings: Settings = toml::from_str(
            "[redirects]\ndefault = \"https://us.example.com\"\nDE = \"https://de.example.com\"\n",
        ).unwrap();

        let table = settings.routing_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.select("DE"), ("DE", "https://de.example.com"));
    }
}
