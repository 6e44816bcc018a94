//! 클라이언트 IP를 지리 정보로 변환하는 모듈입니다.
//!
//! 외부 조회 서비스 앞에 LRU 캐시를 두어 같은 IP에 대한 반복 조회를 막습니다.

mod error;
mod lookup;
mod record;
mod resolver;

pub use error::GeoIpError;
pub use lookup::{GeoLookup, HttpGeoLookup};
pub use record::GeoRecord;
pub use resolver::GeoResolver;
