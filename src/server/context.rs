use std::sync::Arc;
use tracing::info;

use crate::forward::Forwarder;
use crate::geoip::{GeoLookup, GeoResolver, HttpGeoLookup};
use crate::routing::PolicyEngine;
use crate::settings::Settings;
use super::Result;

/// 시작 시 한 번 만들어져 모든 요청이 공유하는 구성 요소 묶음입니다.
pub struct AppContext {
    pub resolver: GeoResolver,
    pub policy: PolicyEngine,
    pub forwarder: Forwarder,
}

impl AppContext {
    pub fn new(resolver: GeoResolver, policy: PolicyEngine, forwarder: Forwarder) -> Self {
        Self { resolver, policy, forwarder }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let lookup = HttpGeoLookup::new(&settings.main.lookup_url, settings.main.lookup_timeout())?;
        Self::with_lookup(settings, Arc::new(lookup))
    }

    /// 외부 조회기를 직접 지정합니다.
    pub fn with_lookup(settings: &Settings, lookup: Arc<dyn GeoLookup>) -> Result<Self> {
        let table = settings.routing_table()?;
        info!("Loaded redirects from the config:");
        for (country_code, url) in table.iter() {
            info!("{:<8} -> {}", country_code, url);
        }

        let resolver = GeoResolver::new(settings.main.cache_size, lookup)?;
        let forwarder = Forwarder::new(settings.main.mode, settings.main.proxy_timeout())?;

        Ok(Self::new(resolver, PolicyEngine::new(table), forwarder))
    }
}
