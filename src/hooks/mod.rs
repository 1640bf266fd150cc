use crate::error::{BoxError, Error, Result};
use crate::model::{RawResponse, Request};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::{HeaderName, HeaderValue, AUTHORIZATION};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};


/// Middleware run on a request just before it is sent.
pub trait RequestHook: Send + Sync {
    fn apply(&self, request: &mut Request) -> std::result::Result<(), BoxError>;
}

impl<F> RequestHook for F
where
    F: Fn(&mut Request) -> std::result::Result<(), BoxError> + Send + Sync,
{
    fn apply(&self, request: &mut Request) -> std::result::Result<(), BoxError> {
        self(request)
    }
}

/// Observer run on a raw response before it is handed to the caller.
pub trait ResponseHook: Send + Sync {
    fn observe(&self, response: &mut RawResponse);
}

impl<F> ResponseHook for F
where
    F: Fn(&mut RawResponse) + Send + Sync,
{
    fn observe(&self, response: &mut RawResponse) {
        self(response)
    }
}

/// Request hook that sets basic authentication credentials.
#[derive(Clone)]
pub struct BasicAuth {
    credentials: String,
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("credentials", &"<redacted>")
            .finish()
    }
}

impl RequestHook for BasicAuth {
    fn apply(&self, request: &mut Request) -> std::result::Result<(), BoxError> {
        let mut value = HeaderValue::from_str(&format!("Basic {}", self.credentials))?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// Sets basic authentication on the request.
pub fn with_basic_auth(username: impl Into<String>, password: impl Into<String>) -> BasicAuth {
    BasicAuth {
        credentials: STANDARD.encode(format!("{}:{}", username.into(), password.into())),
    }
}

/// Request hook that sets a header, replacing any existing values.
#[derive(Clone, Debug)]
pub struct SetHeader {
    key: String,
    value: String,
}

impl RequestHook for SetHeader {
    fn apply(&self, request: &mut Request) -> std::result::Result<(), BoxError> {
        let name = HeaderName::from_bytes(self.key.as_bytes())?;
        let value = HeaderValue::from_str(&self.value)?;
        request.headers_mut().insert(name, value);
        Ok(())
    }
}

/// Sets a header on the request, replacing any existing values.
pub fn with_header(key: impl Into<String>, value: impl Into<String>) -> SetHeader {
    SetHeader {
        key: key.into(),
        value: value.into(),
    }
}

/// Logs the status of every response, and its headers at trace level.
pub fn trace_response() -> impl ResponseHook {
    |response: &mut RawResponse| {
        debug!(status = %response.status(), "received http response");
        for (name, value) in response.headers() {
            trace!(header = %name, value = ?value, "response header");
        }
    }
}

/// Runs the client's hooks followed by the call's hooks.
///
/// Stops at the first failing hook. Changes made by the hooks that ran
/// before it are left on the request.
pub(crate) fn apply_request_hooks(
    request: &mut Request,
    configured: &[Arc<dyn RequestHook>],
    call: &[&dyn RequestHook],
) -> Result<()> {
    trace!("running pre-request hooks");
    let mut position = 0;
    for hook in configured {
        run(hook.as_ref(), request, position)?;
        position += 1;
    }
    for hook in call {
        run(*hook, request, position)?;
        position += 1;
    }
    trace!(count = position, "pre-request hooks complete");
    Ok(())
}

fn run(hook: &dyn RequestHook, request: &mut Request, position: usize) -> Result<()> {
    hook.apply(request)
        .map_err(|source| Error::Hook { position, source })
}

pub(crate) fn apply_response_hooks(response: &mut RawResponse, hooks: &[Arc<dyn ResponseHook>]) {
    for hook in hooks {
        hook.observe(response);
    }
}
