use std::env;

/// Settings for reaching the network controller. Built once at startup.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the controller API, e.g. `https://controller.example.com`
    pub api_host: String,
    pub https_proxy: Option<String>,
    /// Controllers commonly run with self-signed certificates
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub upstream: UpstreamConfig,
    /// Path the gateway is mounted under; stripped before forwarding.
    pub mount_prefix: String,
    pub directory_path: String,
    /// When false no organization is resolved and scoping is bypassed
    pub multi_tenant: bool,
    /// Networks served when the controller rejects the gateway's credentials
    pub network_fallback: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let multi_tenant = env::var("MULTI_TENANT")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let accept_invalid_certs = env::var("UPSTREAM_ACCEPT_INVALID_CERTS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let network_fallback = env::var("NETWORK_FALLBACK")
            .map(|v| parse_network_list(&v))
            .unwrap_or_default();

        Self {
            host,
            port,
            upstream: UpstreamConfig {
                api_host: env::var("API_HOST").unwrap_or_default(),
                https_proxy: env::var("HTTPS_PROXY").ok().filter(|v| !v.is_empty()),
                accept_invalid_certs,
            },
            mount_prefix: env::var("MOUNT_PREFIX")
                .unwrap_or_else(|_| "/nms/apicontroller".to_string()),
            directory_path: env::var("DIRECTORY_PATH")
                .unwrap_or_else(|_| "directory.json".to_string()),
            multi_tenant,
            network_fallback,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Split a comma-separated list of network IDs, dropping blanks.
pub fn parse_network_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}
