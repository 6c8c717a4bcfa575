use std::sync::Arc;

use crate::config::Config;
use crate::directory::Directory;
use crate::error::Result;
use crate::filters::NetworkListFilter;
use crate::upstream::UpstreamClient;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
    pub upstream: UpstreamClient,
    pub network_list: Arc<NetworkListFilter>,
    pub mount_prefix: String,
    pub multi_tenant: bool,
}

impl AppState {
    pub fn from_config(config: &Config, directory: Directory) -> Result<Self> {
        Ok(Self {
            directory: Arc::new(directory),
            upstream: UpstreamClient::new(&config.upstream)?,
            network_list: Arc::new(NetworkListFilter::new(config.network_fallback.clone())),
            mount_prefix: config.mount_prefix.clone(),
            multi_tenant: config.multi_tenant,
        })
    }
}
