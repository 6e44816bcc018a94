//! Geo Router는 클라이언트의 국가에 따라 요청을 다른 대상으로 보내는 HTTP 서버입니다.
//!
//! # 주요 기능
//!
//! - 외부 서비스 + LRU 캐시 기반 GeoIP 조회
//! - 국가 코드별 대상 URL 선택 (`default` 대체)
//! - 302 리다이렉트 또는 리버스 프록시 모드
//!
//! # 예제
//!
//! ```
//! use geo_router::routing::{PolicyEngine, RoutingTable};
//! use std::collections::HashMap;
//!
//! let table = RoutingTable::new(HashMap::from([
//!     ("default".to_string(), "https://us.example.com".to_string()),
//!     ("DE".to_string(), "https://de.example.com".to_string()),
//! ])).unwrap();
//! let engine = PolicyEngine::new(table);
//!
//! // GeoIP 정보가 없으면 default 대상으로
//! let url = engine.resolve(None, "/p", "a=1").unwrap();
//! assert_eq!(url.as_str(), "https://us.example.com/p?a=1");
//! ```

pub mod client_ip;
pub mod forward;
pub mod geoip;
pub mod logging;
pub mod routing;
pub mod server;
pub mod settings;
