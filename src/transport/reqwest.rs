use crate::context::Context;
use crate::error::BoxError;
use crate::model::{RawResponse, Request};
use crate::transport::{ProxyConfig, Transport};
use crate::Body;
use ::reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;
use tracing::trace;
use url::Url;

/// Settings used to build the underlying `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    pub proxy: Option<Url>,
    /// Applied to every request unless the call's context has a shorter
    /// deadline.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn proxy(mut self, proxy: Url) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// [`Transport`] backed by a blocking `reqwest` client.
pub struct ReqwestTransport {
    client: Client,
    config: TransportConfig,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        ReqwestTransport {
            client: Client::new(),
            config: TransportConfig::default(),
        }
    }
}

impl ReqwestTransport {
    pub fn create(config: TransportConfig) -> Result<ReqwestTransport, BoxError> {
        let client = build_client(&config, false)?;
        Ok(ReqwestTransport { client, config })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

// Once a proxy has been set or removed explicitly, the proxies found in the
// environment are no longer consulted.
fn build_client(config: &TransportConfig, ignore_env_proxy: bool) -> Result<Client, BoxError> {
    let mut builder: ClientBuilder = Client::builder();
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent.as_str());
    }
    builder = match &config.proxy {
        Some(proxy) => builder.proxy(::reqwest::Proxy::all(proxy.as_str())?),
        None if ignore_env_proxy => builder.no_proxy(),
        None => builder,
    };
    Ok(builder.build()?)
}

impl Transport for ReqwestTransport {
    fn send(&self, ctx: &Context, request: Request) -> Result<RawResponse, BoxError> {
        ctx.err()?;

        let (parts, body) = request.into_parts();
        let mut request_builder = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers);
        if let Some(body) = body.into_reqwest() {
            request_builder = request_builder.body(body);
        }
        if let Some(remaining) = ctx.remaining() {
            let timeout = match self.config.timeout {
                Some(timeout) if timeout < remaining => timeout,
                _ => remaining,
            };
            request_builder = request_builder.timeout(timeout);
        }

        let response = request_builder.send()?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();

        let mut raw = http::Response::new(Body::from_reader(response));
        *raw.status_mut() = status;
        *raw.version_mut() = version;
        *raw.headers_mut() = headers;
        Ok(raw)
    }

    fn proxy_config(&mut self) -> Option<&mut dyn ProxyConfig> {
        Some(self)
    }
}

impl ProxyConfig for ReqwestTransport {
    fn set_proxy(&mut self, proxy: Option<Url>) -> Result<(), BoxError> {
        let mut config = self.config.clone();
        config.proxy = proxy;
        self.client = build_client(&config, true)?;
        self.config = config;
        trace!(proxy = ?self.config.proxy, "proxy updated");
        Ok(())
    }

    fn proxy(&self) -> Option<&Url> {
        self.config.proxy.as_ref()
    }
}
