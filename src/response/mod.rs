use crate::body::Body;
use crate::error::{Error, Result};
use crate::model::RawResponse;
use http::{HeaderMap, StatusCode, Version};
use serde::de::DeserializeOwned;
use std::io::Read;

#[cfg(test)]
mod tests;

/// Response returned by a [`Client`](crate::Client) call.
///
/// The body can be consumed once, through either [`Response::json`] or
/// [`Response::raw_body`]. Both read it to the end and drop the underlying
/// stream; every later attempt fails with [`Error::BodyConsumed`].
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: Option<Body>,
}

impl Response {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Whether the status code is within the 2XX range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status.as_u16())
    }

    pub fn is_consumed(&self) -> bool {
        self.body.is_none()
    }

    /// Reads and unmarshals the response body.
    pub fn json<T: DeserializeOwned>(&mut self) -> Result<T> {
        let body = self.read_body()?;
        serde_json::from_slice(&body).map_err(Error::Decode)
    }

    /// Reads the response body into a buffer owned by the caller.
    pub fn raw_body(&mut self) -> Result<Vec<u8>> {
        self.read_body()
    }

    fn read_body(&mut self) -> Result<Vec<u8>> {
        let mut body = self.body.take().ok_or(Error::BodyConsumed)?;
        let mut data = Vec::new();
        body.read_to_end(&mut data).map_err(Error::Read)?;
        Ok(data)
    }
}

impl From<RawResponse> for Response {
    fn from(response: RawResponse) -> Self {
        let (parts, body) = response.into_parts();
        Response {
            status: parts.status,
            version: parts.version,
            headers: parts.headers,
            body: Some(body),
        }
    }
}
