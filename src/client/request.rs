use crate::body::Body;
use crate::error::{Error, Result};
use crate::model::{Method, Request};
use crate::query::Query;
use http::HeaderMap;
use tracing::trace;
use url::Url;

/// Joins `base` and `target` as plain strings and applies `query`.
///
/// No slash normalisation takes place. A target that already carries a
/// query string is rejected rather than overwritten.
pub(crate) fn build_url(base: &str, target: &str, query: Option<&Query>) -> Result<Url> {
    let joined = [base, target].concat();
    let mut url = Url::parse(&joined).map_err(|source| Error::UrlParse {
        url: joined.clone(),
        source,
    })?;

    if let Some(existing) = url.query().filter(|existing| !existing.is_empty()) {
        return Err(Error::QueryConflict {
            url: joined.clone(),
            query: existing.to_string(),
        });
    }

    match query.filter(|query| !query.is_empty()) {
        Some(query) => url.set_query(Some(&query.encode())),
        None => url.set_query(None),
    }

    trace!(url = %url, "url parsed");
    Ok(url)
}

/// Builds the request sent for a call, with the client's default headers.
pub(crate) fn build_request(
    method: Method,
    url: &Url,
    headers: &HeaderMap,
    body: Option<Body>,
) -> Result<Request> {
    let mut request = http::Request::builder()
        .method(http::Method::from(method))
        .uri(url.as_str())
        .body(body.unwrap_or_default())?;
    request.headers_mut().extend(headers.clone());
    Ok(request)
}
