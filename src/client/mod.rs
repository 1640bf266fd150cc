use crate::body::Body;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::hooks::{self, RequestHook, ResponseHook};
use crate::metrics::Metrics;
use crate::model::Method;
use crate::query::Query;
use crate::response::Response;
use crate::transport::reqwest::ReqwestTransport;
use crate::transport::Transport;
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};
use url::Url;

mod request;


/// Configuration shared by every call a [`Client`] makes.
///
/// Setters return the configuration so they can be chained. Configure the
/// client before sharing it; a shared `Client` cannot be reconfigured.
pub struct ClientConfig {
    base_url: String,
    headers: HeaderMap,
    request_hooks: Vec<Arc<dyn RequestHook>>,
    response_hooks: Vec<Arc<dyn ResponseHook>>,
    transport: Box<dyn Transport>,
    metrics: Option<Arc<dyn Metrics>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(ReqwestTransport::default())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("request_hooks", &self.request_hooks.len())
            .field("response_hooks", &self.response_hooks.len())
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl ClientConfig {
    pub fn new(transport: impl Transport + 'static) -> Self {
        ClientConfig {
            base_url: String::new(),
            headers: HeaderMap::new(),
            request_hooks: Vec::new(),
            response_hooks: Vec::new(),
            transport: Box::new(transport),
            metrics: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sets the url prepended to every call's target. An empty string
    /// disables prefixing; anything else has to parse as a url.
    pub fn set_base_url(&mut self, url: impl Into<String>) -> Result<&mut Self> {
        let url = url.into();
        if !url.is_empty() {
            Url::parse(&url).map_err(|source| Error::UrlParse {
                url: url.clone(),
                source,
            })?;
        }
        trace!(url = %url, "base url set");
        self.base_url = url;
        Ok(self)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Appends a header value sent with every request.
    pub fn add_header(&mut self, key: &str, value: &str) -> Result<&mut Self> {
        let (name, value) = header(key, value)?;
        trace!(key = %name, "header added");
        self.headers.append(name, value);
        Ok(self)
    }

    /// Sets a header sent with every request, replacing existing values.
    pub fn set_header(&mut self, key: &str, value: &str) -> Result<&mut Self> {
        let (name, value) = header(key, value)?;
        trace!(key = %name, "header set");
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn add_request_hook(&mut self, hook: impl RequestHook + 'static) -> &mut Self {
        self.request_hooks.push(Arc::new(hook));
        self
    }

    pub fn add_request_hooks(
        &mut self,
        hooks: impl IntoIterator<Item = Arc<dyn RequestHook>>,
    ) -> &mut Self {
        self.request_hooks.extend(hooks);
        self
    }

    /// Replaces every configured request hook.
    pub fn set_request_hooks(&mut self, hooks: Vec<Arc<dyn RequestHook>>) -> &mut Self {
        self.request_hooks = hooks;
        self
    }

    pub fn add_response_hook(&mut self, hook: impl ResponseHook + 'static) -> &mut Self {
        self.response_hooks.push(Arc::new(hook));
        self
    }

    pub fn set_transport(&mut self, transport: impl Transport + 'static) -> &mut Self {
        self.transport = Box::new(transport);
        trace!("transport set");
        self
    }

    pub fn set_metrics(&mut self, metrics: impl Metrics + 'static) -> &mut Self {
        self.metrics = Some(Arc::new(metrics));
        self
    }

    pub fn clear_metrics(&mut self) -> &mut Self {
        self.metrics = None;
        self
    }

    /// Routes requests through the proxy at `url`.
    pub fn set_proxy(&mut self, url: &str) -> Result<&mut Self> {
        let proxy = self
            .transport
            .proxy_config()
            .ok_or(Error::IncapableTransport)?;
        let parsed = Url::parse(url).map_err(|source| Error::UrlParse {
            url: url.to_string(),
            source,
        })?;
        proxy.set_proxy(Some(parsed)).map_err(Error::Proxy)?;
        trace!(url = %url, "proxy url set");
        Ok(self)
    }

    pub fn remove_proxy(&mut self) -> Result<&mut Self> {
        self.transport
            .proxy_config()
            .ok_or(Error::IncapableTransport)?
            .set_proxy(None)
            .map_err(Error::Proxy)?;
        trace!("proxy removed");
        Ok(self)
    }
}

fn header(key: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let invalid = |source: Box<dyn std::error::Error + Send + Sync>| Error::InvalidHeader {
        name: key.to_string(),
        source,
    };
    let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| invalid(e.into()))?;
    let value = HeaderValue::from_str(value).map_err(|e| invalid(e.into()))?;
    Ok((name, value))
}

/// A wrapper around an HTTP transport that makes it easier to call RESTful
/// APIs.
#[derive(Debug, Default)]
pub struct Client {
    config: ClientConfig,
}

impl From<ClientConfig> for Client {
    fn from(config: ClientConfig) -> Self {
        Client::new(config)
    }
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Client { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    pub fn get(
        &self,
        ctx: &Context,
        target: &str,
        query: Option<&Query>,
        hooks: &[&dyn RequestHook],
    ) -> Result<Response> {
        self.call(ctx, Method::Get, target, query, None, hooks)
    }

    pub fn head(
        &self,
        ctx: &Context,
        target: &str,
        query: Option<&Query>,
        hooks: &[&dyn RequestHook],
    ) -> Result<Response> {
        self.call(ctx, Method::Head, target, query, None, hooks)
    }

    pub fn options(
        &self,
        ctx: &Context,
        target: &str,
        query: Option<&Query>,
        hooks: &[&dyn RequestHook],
    ) -> Result<Response> {
        self.call(ctx, Method::Options, target, query, None, hooks)
    }

    pub fn post(
        &self,
        ctx: &Context,
        target: &str,
        query: Option<&Query>,
        body: impl Into<Body>,
        hooks: &[&dyn RequestHook],
    ) -> Result<Response> {
        self.call(ctx, Method::Post, target, query, Some(body.into()), hooks)
    }

    pub fn put(
        &self,
        ctx: &Context,
        target: &str,
        query: Option<&Query>,
        body: impl Into<Body>,
        hooks: &[&dyn RequestHook],
    ) -> Result<Response> {
        self.call(ctx, Method::Put, target, query, Some(body.into()), hooks)
    }

    pub fn delete(
        &self,
        ctx: &Context,
        target: &str,
        query: Option<&Query>,
        body: impl Into<Body>,
        hooks: &[&dyn RequestHook],
    ) -> Result<Response> {
        self.call(ctx, Method::Delete, target, query, Some(body.into()), hooks)
    }

    /// Builds, hooks and sends a request.
    ///
    /// The client's hooks run before `hooks`, so call hooks win when both
    /// touch the same part of the request.
    pub fn call(
        &self,
        ctx: &Context,
        method: Method,
        target: &str,
        query: Option<&Query>,
        body: Option<Body>,
        hooks: &[&dyn RequestHook],
    ) -> Result<Response> {
        let config = &self.config;
        let url = request::build_url(&config.base_url, target, query)?;
        let mut req = request::build_request(method, &url, &config.headers, body)?;

        hooks::apply_request_hooks(&mut req, &config.request_hooks, hooks)?;

        let method = req.method().clone();
        let path = req.uri().path().to_string();
        trace!(url = %req.uri(), "performing request");

        let start = Instant::now();
        let mut raw = config
            .transport
            .send(ctx, req)
            .map_err(Error::Transport)?;
        let elapsed = start.elapsed();

        debug!(
            method = %method,
            latency = elapsed.as_secs_f64(),
            status_code = raw.status().as_u16(),
            url = %url,
            "request complete"
        );

        if let Some(metrics) = &config.metrics {
            metrics.observe_latency(&method, raw.status(), &path, elapsed);
        }

        hooks::apply_response_hooks(&mut raw, &config.response_hooks);

        Ok(Response::from(raw))
    }
}
