use std::collections::HashMap;

use crate::routing::RoutingError;

/// 국가 코드 -> 기본 대상 URL 매핑입니다. 생성 후에는 변경되지 않습니다.
#[derive(Clone, Debug)]
pub struct RoutingTable {
    routes: HashMap<String, String>,
}

impl RoutingTable {
    pub const DEFAULT_KEY: &'static str = "default";

    /// `default` 항목이 없으면 테이블을 만들 수 없습니다.
    pub fn new(routes: HashMap<String, String>) -> Result<Self, RoutingError> {
        if !routes.contains_key(Self::DEFAULT_KEY) {
            return Err(RoutingError::MissingDefault);
        }
        Ok(Self { routes })
    }

    /// 키에 해당하는 URL을 찾고, 없으면 `default`로 대체합니다.
    ///
    /// 실제로 사용된 키와 URL을 함께 반환합니다.
    pub fn select<'a>(&'a self, key: &'a str) -> (&'a str, &'a str) {
        match self.routes.get(key) {
            Some(url) => (key, url.as_str()),
            None => (Self::DEFAULT_KEY, self.default_target()),
        }
    }

    pub fn default_target(&self) -> &str {
        self.routes
            .get(Self::DEFAULT_KEY)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
