use std::num::NonZeroUsize;
use std::sync::Arc;
use lru::LruCache;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::geoip::{GeoIpError, GeoLookup, GeoRecord};

/// LRU 캐시 앞단을 둔 GeoIP 조회기입니다.
///
/// 캐시 조회는 읽기 잠금, 삽입은 쓰기 잠금으로 처리하며 외부 조회 중에는
/// 어떤 잠금도 잡고 있지 않습니다.
pub struct GeoResolver {
    cache: RwLock<LruCache<String, Arc<GeoRecord>>>,
    capacity: NonZeroUsize,
    lookup: Arc<dyn GeoLookup>,
}

impl GeoResolver {
    pub fn new(capacity: usize, lookup: Arc<dyn GeoLookup>) -> Result<Self, GeoIpError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(GeoIpError::CacheInit { capacity })?;
        info!(capacity = capacity.get(), "GeoIP 캐시 생성");

        Ok(Self {
            cache: RwLock::new(LruCache::new(capacity)),
            capacity,
            lookup,
        })
    }

    /// IP에 대한 지리 정보를 반환합니다. 캐시에 없으면 외부 서비스를 한 번 조회합니다.
    pub async fn resolve(&self, ip: &str) -> Result<Arc<GeoRecord>, GeoIpError> {
        if ip.is_empty() {
            return Err(GeoIpError::InvalidInput);
        }

        if let Some(record) = self.cached(ip).await {
            debug!(ip = %ip, country_code = %record.country_code, "GeoIP 캐시 히트");
            return Ok(record);
        }

        let record = self.lookup.lookup(ip).await?;
        if record.country_code.is_empty() {
            return Err(GeoIpError::upstream(ip, "received empty country code"));
        }

        let record = Arc::new(record);
        {
            let mut cache = self.cache.write().await;
            if let Some((evicted, _)) = cache.push(ip.to_string(), record.clone()) {
                if evicted != ip {
                    debug!(evicted = %evicted, "GeoIP 캐시 항목 제거");
                }
            }
        }

        debug!(ip = %ip, country_code = %record.country_code, "GeoIP 조회 결과 캐시");
        Ok(record)
    }

    async fn cached(&self, ip: &str) -> Option<Arc<GeoRecord>> {
        let hit = {
            let cache = self.cache.read().await;
            cache.peek(ip).cloned()
        };

        // 읽기 잠금을 놓은 뒤 쓰기 잠금으로 최근 사용 순서 갱신
        if hit.is_some() {
            self.cache.write().await.promote(ip);
        }
        hit
    }

    pub async fn contains(&self, ip: &str) -> bool {
        self.cache.read().await.contains(ip)
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
}
