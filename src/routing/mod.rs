//! 국가 코드를 대상 URL로 바꾸는 라우팅 정책 모듈입니다.

mod error;
mod policy;
mod table;

pub use error::RoutingError;
pub use policy::PolicyEngine;
pub use table::RoutingTable;
