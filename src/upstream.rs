use axum::{
    body::Bytes,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
};
use reqwest::Client;

use crate::config::UpstreamConfig;
use crate::error::{AppError, Result};

/// Buffered response from the network controller.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    api_host: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        if config.api_host.is_empty() {
            return Err(AppError::Config("API_HOST is not set".into()));
        }

        let mut builder = Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(proxy) = &config.https_proxy {
            let proxy = reqwest::Proxy::https(proxy)
                .map_err(|e| AppError::Config(format!("invalid HTTPS_PROXY: {}", e)))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Config(format!("building upstream client: {}", e)))?;

        Ok(Self {
            client,
            api_host: config.api_host.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.api_host, path_and_query)
    }

    /// Send a request to the controller and buffer its response.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<UpstreamResponse> {
        let mut request = self.client.request(method, self.url(path_and_query));
        for name in [header::CONTENT_TYPE, header::ACCEPT] {
            if let Some(value) = headers.get(&name) {
                request = request.header(name, value.clone());
            }
        }

        let response = request.body(body).send().await?;
        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
