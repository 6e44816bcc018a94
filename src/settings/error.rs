use std::fmt;

#[derive(Debug)]
pub enum SettingsError {
    EnvVarInvalid {
        var_name: String,
        value: String,
        reason: String,
    },
    FileError {
        path: String,
        error: std::io::Error,
    },
    ParseError {
        source: toml::de::Error,
    },
    /// `[redirects]` 섹션 누락
    MissingRedirects,
    /// `[redirects]`에 `default` 항목이 없거나 비어 있음
    MissingDefault,
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvVarInvalid { var_name, value, reason } =>
                write!(f, "환경 변수 {} 값 {} 오류: {}", var_name, value, reason),
            Self::FileError { path, error } =>
                write!(f, "설정 파일 {} 오류: {}", path, error),
            Self::ParseError { source } =>
                write!(f, "설정 파싱 오류: {}", source),
            Self::MissingRedirects =>
                write!(f, "[redirects] 섹션이 누락됨"),
            Self::MissingDefault =>
                write!(f, "[redirects]에 default URL이 누락됨"),
            Self::InvalidValue { key, value, reason } =>
                write!(f, "설정 값 {} = {:?} 오류: {}", key, value, reason),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ParseError { source } => Some(source),
            Self::FileError { error, .. } => Some(error),
            _ => None,
        }
    }
}
