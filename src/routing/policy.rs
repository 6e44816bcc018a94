use tracing::info;
use url::Url;

use crate::geoip::GeoRecord;
use crate::routing::{RoutingError, RoutingTable};

/// 국가 코드와 원본 요청 경로로 최종 대상 URL을 조합합니다.
#[derive(Clone, Debug)]
pub struct PolicyEngine {
    table: RoutingTable,
}

impl PolicyEngine {
    pub fn new(table: RoutingTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    /// 대상 URL을 만듭니다.
    ///
    /// 기본 URL의 경로는 항상 `path`로 덮어쓰고, 쿼리는 `query`가
    /// 비어 있지 않을 때만 덮어씁니다.
    pub fn resolve(
        &self,
        record: Option<&GeoRecord>,
        path: &str,
        query: &str,
    ) -> Result<Url, RoutingError> {
        let key = record
            .map(|r| r.country_code.as_str())
            .unwrap_or(RoutingTable::DEFAULT_KEY);
        let (selected, base) = self.table.select(key);

        let mut target = Url::parse(base).map_err(|e| RoutingError::InvalidTarget {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        if target.cannot_be_a_base() || target.host_str().is_none() {
            return Err(RoutingError::InvalidTarget {
                url: base.to_string(),
                reason: "scheme과 host가 있는 절대 URL이어야 합니다".to_string(),
            });
        }

        target.set_path(path);
        if !query.is_empty() {
            target.set_query(Some(query));
        }

        info!(
            country = %key,
            route = %selected,
            from = %format_original(path, query),
            to = %target,
            "라우팅 대상 결정"
        );
        Ok(target)
    }
}

fn format_original(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn engine(routes: &[(&str, &str)]) -> PolicyEngine {
        let routes = routes
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        PolicyEngine::new(RoutingTable::new(routes).unwrap())
    }

    fn record(country_code: &str) -> GeoRecord {
        GeoRecord {
            ip: "203.0.113.7".to_string(),
            country_code: country_code.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_country_route_and_default_fallback() {
        let engine = engine(&[
            ("default", "https://us.example.com"),
            ("DE", "https://de.example.com"),
        ]);

        let url = engine.resolve(Some(&record("DE")), "/p", "a=1").unwrap();
        assert_eq!(url.as_str(), "https://de.example.com/p?a=1");

        let url = engine.resolve(None, "/p", "a=1").unwrap();
        assert_eq!(url.as_str(), "https://us.example.com/p?a=1");
    }

    #[test]
    fn test_unknown_country_matches_default() {
        let engine = engine(&[
            ("default", "https://us.example.com"),
            ("DE", "https://de.example.com"),
        ]);

        let unknown = engine.resolve(Some(&record("JP")), "/shop", "id=3").unwrap();
        let default = engine.resolve(Some(&record("default")), "/shop", "id=3").unwrap();
        assert_eq!(unknown, default);
    }

    #[test]
    fn test_base_path_discarded_and_query_kept_when_empty() {
        let engine = engine(&[("default", "https://x.example.com/ignored?keep=yes")]);

        let url = engine.resolve(None, "/p", "").unwrap();
        assert_eq!(url.as_str(), "https://x.example.com/p?keep=yes");

        let url = engine.resolve(None, "/p", "a=1").unwrap();
        assert_eq!(url.as_str(), "https://x.example.com/p?a=1");
    }

    #[test]
    fn test_invalid_target_is_reported_per_request() {
        let engine = engine(&[
            ("default", "https://us.example.com"),
            ("BR", "not a url"),
        ]);

        let err = engine.resolve(Some(&record("BR")), "/", "").unwrap_err();
        assert!(matches!(err, RoutingError::InvalidTarget { url, .. } if url == "not a url"));

        // 다른 국가는 영향을 받지 않음
        assert!(engine.resolve(Some(&record("US")), "/", "").is_ok());
    }

    #[test]
    fn test_encoded_path_preserved() {
        let engine = engine(&[("default", "http://origin.example.com:8080")]);
        let url = engine.resolve(None, "/a%20b/c", "q=%C3%A9").unwrap();
        assert_eq!(url.as_str(), "http://origin.example.com:8080/a%20b/c?q=%C3%A9");
    }
}
