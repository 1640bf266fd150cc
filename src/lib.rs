//! # snorlax
//!
//! snorlax is a small synchronous HTTP client for RESTful APIs. It prefixes a
//! base URL to every call, runs request hooks before sending and wraps the
//! response with helpers to check and decode it.
//!
//! ```no_run
//! use serde::Deserialize;
//! use snorlax::{hooks, Client, ClientConfig, Context, Query};
//!
//! #[derive(Deserialize)]
//! struct Pokemon {
//!     name: String,
//! }
//!
//! # fn main() -> snorlax::Result<()> {
//! let mut config = ClientConfig::default();
//! config
//!     .set_base_url("https://pokeapi.co/api/v2")?
//!     .set_header("accept", "application/json")?
//!     .add_request_hook(hooks::with_basic_auth("snorlax", "s3cr3t"));
//! let client = Client::new(config);
//!
//! let mut query = Query::new();
//! query.set("limit", "1");
//!
//! let mut res = client.get(
//!     &Context::background(),
//!     "/pokemon/snorlax",
//!     Some(&query),
//!     &[&hooks::with_header("x-trainer", "red")],
//! )?;
//! if res.is_success() {
//!     let pokemon: Pokemon = res.json()?;
//!     println!("{}", pokemon.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Hooks
//!
//! Request hooks configured on the client run first, in the order they were
//! added, followed by the hooks passed to the call. A hook that fails stops
//! the call before anything is sent.
//!
//! ## Transports
//!
//! Requests are sent by a [`Transport`]. The default one is
//! [`ReqwestTransport`], which also supports proxies. Any
//! `Fn(&Context, Request) -> Result<RawResponse, BoxError>` is a transport
//! too, which is handy in tests.

use once_cell::sync::Lazy;

mod body;
mod client;
mod context;
mod error;
pub mod hooks;
pub mod metrics;
mod model;
mod query;
mod response;
pub mod settings;
pub mod transport;

pub use crate::body::Body;
pub use crate::client::{Client, ClientConfig};
pub use crate::context::Context;
pub use crate::error::{BoxError, ContextError, Error, Result};
pub use crate::hooks::{RequestHook, ResponseHook};
pub use crate::metrics::Metrics;
pub use crate::model::{Method, RawResponse, Request, UnknownMethod};
pub use crate::query::Query;
pub use crate::response::Response;
pub use crate::settings::Settings;
pub use crate::transport::reqwest::{ReqwestTransport, TransportConfig};
pub use crate::transport::{ProxyConfig, Transport};

static DEFAULT_CLIENT: Lazy<Client> = Lazy::new(Client::default);

/// A client with the default configuration.
///
/// It is created on first use and never reconfigured afterwards, so it can
/// be used from any number of threads. Build a [`Client`] when you need a
/// base URL, hooks or a different transport.
pub fn default_client() -> &'static Client {
    &DEFAULT_CLIENT
}

/// Performs a get request using the [`default_client`].
pub fn get(
    ctx: &Context,
    target: &str,
    query: Option<&Query>,
    hooks: &[&dyn RequestHook],
) -> Result<Response> {
    default_client().get(ctx, target, query, hooks)
}

/// Performs a head request using the [`default_client`].
pub fn head(
    ctx: &Context,
    target: &str,
    query: Option<&Query>,
    hooks: &[&dyn RequestHook],
) -> Result<Response> {
    default_client().head(ctx, target, query, hooks)
}

/// Performs an options request using the [`default_client`].
pub fn options(
    ctx: &Context,
    target: &str,
    query: Option<&Query>,
    hooks: &[&dyn RequestHook],
) -> Result<Response> {
    default_client().options(ctx, target, query, hooks)
}

/// Performs a post request using the [`default_client`].
pub fn post(
    ctx: &Context,
    target: &str,
    query: Option<&Query>,
    body: impl Into<Body>,
    hooks: &[&dyn RequestHook],
) -> Result<Response> {
    default_client().post(ctx, target, query, body, hooks)
}

/// Performs a put request using the [`default_client`].
pub fn put(
    ctx: &Context,
    target: &str,
    query: Option<&Query>,
    body: impl Into<Body>,
    hooks: &[&dyn RequestHook],
) -> Result<Response> {
    default_client().put(ctx, target, query, body, hooks)
}

/// Performs a delete request using the [`default_client`].
pub fn delete(
    ctx: &Context,
    target: &str,
    query: Option<&Query>,
    body: impl Into<Body>,
    hooks: &[&dyn RequestHook],
) -> Result<Response> {
    default_client().delete(ctx, target, query, body, hooks)
}
