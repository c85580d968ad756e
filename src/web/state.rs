use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::upstream::{build_http_client, N2yoClient, OpenCageClient, UpstreamError};

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<ResponseCache>,
    pub n2yo: N2yoClient,
    pub opencage: OpenCageClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, UpstreamError> {
        let http = build_http_client(config.upstream_timeout)?;
        let cache = ResponseCache::new(config.cache.ttl, config.cache.max_entries);
        let n2yo = N2yoClient::new(http.clone(), config.n2yo_base_url());
        let opencage = OpenCageClient::new(http, config.opencage_base_url());

        Ok(AppState {
            config: Arc::new(config),
            cache: Arc::new(cache),
            n2yo,
            opencage,
        })
    }
}
