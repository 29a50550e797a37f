use crate::config::TwitterConfig;
use crate::oauth;
use anyhow::{Context, Result};
use async_trait::async_trait;
use core_logic::config::ProxyConfig;
use core_logic::{ApiClient, ApiReply, Credential, NetworkError};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use url::Url;

/// OAuth 1.0a signed client for one app credential.
pub struct TwitterClient {
    label: String,
    credential: Credential,
    base: Url,
    http: Client,
}

impl TwitterClient {
    pub fn new(label: String, credential: Credential, config: &TwitterConfig) -> Result<Self> {
        let mut base = Url::parse(&config.api_base)
            .with_context(|| format!("Invalid api_base '{}'", config.api_base))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut client_builder = Client::builder().timeout(config.request_timeout());
        if let Some(proxy_conf) = &config.proxy {
            client_builder = client_builder.proxy(build_proxy(proxy_conf)?);
        }
        let http = client_builder.build()?;

        Ok(Self {
            label,
            credential,
            base,
            http,
        })
    }

    fn url_for(&self, path: &str) -> Result<Url, NetworkError> {
        self.base
            .join(path)
            .map_err(|e| NetworkError::InvalidResponse {
                endpoint: path.to_string(),
                reason: format!("cannot build URL: {}", e),
            })
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<ApiReply, NetworkError> {
        let response = request.send().await.map_err(|e| map_reqwest(path, e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| map_reqwest(path, e))?;
        Ok(ApiReply::new(status, body))
    }
}

fn build_proxy(proxy_conf: &ProxyConfig) -> Result<reqwest::Proxy> {
    let mut proxy = reqwest::Proxy::all(&proxy_conf.url)?;
    if let (Some(u), Some(p)) = (&proxy_conf.username, &proxy_conf.password) {
        proxy = proxy.basic_auth(u, p);
    }
    Ok(proxy)
}

fn map_reqwest(endpoint: &str, e: reqwest::Error) -> NetworkError {
    if e.is_timeout() {
        NetworkError::Timeout {
            endpoint: endpoint.to_string(),
        }
    } else {
        NetworkError::Transport {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl ApiClient for TwitterClient {
    fn label(&self) -> &str {
        &self.label
    }

    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<ApiReply, NetworkError> {
        let url = self.url_for(path)?;
        let auth = oauth::authorization_header(&self.credential, "GET", url.as_str(), query);

        let request = self
            .http
            .get(url)
            .query(query)
            .header(AUTHORIZATION, auth);
        self.send(path, request).await
    }

    async fn post_form(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<ApiReply, NetworkError> {
        let url = self.url_for(path)?;
        let auth = oauth::authorization_header(&self.credential, "POST", url.as_str(), form);

        let request = self.http.post(url).form(form).header(AUTHORIZATION, auth);
        self.send(path, request).await
    }
}
