use crate::forward::ForwardError;
use crate::geoip::GeoIpError;
use crate::settings::SettingsError;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    ConfigError(SettingsError),
    IoError(std::io::Error),
    GeoIpError(GeoIpError),
    ForwardError(ForwardError),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<SettingsError> for Error {
    fn from(err: SettingsError) -> Self {
        Error::ConfigError(err)
    }
}

impl From<GeoIpError> for Error {
    fn from(err: GeoIpError) -> Self {
        Error::GeoIpError(err)
    }
}

impl From<ForwardError> for Error {
    fn from(err: ForwardError) -> Self {
        Error::ForwardError(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigError(e) => write!(f, "Config Error: {}", e),
            Error::IoError(e) => write!(f, "IO Error: {}", e),
            Error::GeoIpError(e) => write!(f, "GeoIP Error: {}", e),
            Error::ForwardError(e) => write!(f, "Forward Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}
