use crate::context::Context;
use crate::error::BoxError;
use crate::model::{RawResponse, Request};
use url::Url;

#[cfg(test)]
mod tests;

pub mod reqwest;

/// Sends a fully built request and returns the raw response.
///
/// Implementations should honour the [`Context`]: refuse to send once it is
/// cancelled or past its deadline, and bound the send by the time remaining.
pub trait Transport: Send + Sync {
    fn send(&self, ctx: &Context, request: Request) -> Result<RawResponse, BoxError>;

    /// Proxy configuration, for transports that support one.
    fn proxy_config(&mut self) -> Option<&mut dyn ProxyConfig> {
        None
    }
}

impl<F> Transport for F
where
    F: Fn(&Context, Request) -> Result<RawResponse, BoxError> + Send + Sync,
{
    fn send(&self, ctx: &Context, request: Request) -> Result<RawResponse, BoxError> {
        self(ctx, request)
    }
}

pub trait ProxyConfig {
    /// Routes every request through `proxy`, or through no proxy at all when
    /// `None`.
    fn set_proxy(&mut self, proxy: Option<Url>) -> Result<(), BoxError>;

    fn proxy(&self) -> Option<&Url>;
}
