use serde::Deserialize;

/// 외부 조회 서비스가 돌려주는 지리 정보입니다.
///
/// 국가 코드가 비어 있는 응답은 조회 실패로 취급되므로 캐시에 들어가는
/// 레코드는 항상 국가 코드를 가집니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeoRecord {
    pub ip: String,
    pub country: String,
    pub country_code: String,
    pub region: String,
    pub city: String,
    pub postal_code: String,
    pub timezone: String,
    pub organization: String,
    pub organization_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_response() {
        let body = r#"{
            "ip": "8.8.8.8",
            "country": "United States",
            "country_code": "US",
            "timezone": "America/Chicago",
            "organization": "AS15169",
            "organization_name": "Google LLC",
            "accuracy": 1000
        }"#;

        let record: GeoRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.country_code, "US");
        assert_eq!(record.organization_name, "Google LLC");
        assert!(record.city.is_empty());
        assert!(record.postal_code.is_empty());
    }
}
