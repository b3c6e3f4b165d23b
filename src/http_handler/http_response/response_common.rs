use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Url};
use std::borrow::Cow;
use strum_macros::Display;

/// A fully read HTTP response, passed through to the caller untouched.
///
/// The reporting endpoints answer in whatever format was requested (json, xml, csv, ...),
/// so no attempt is made to interpret the body here.
#[derive(Debug, Clone)]
pub struct RawResponse {
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl RawResponse {
    pub fn new(url: Url, status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self { url, status, headers, body }
    }

    /// Drains `response` into memory, releasing the connection.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, ResponseError> {
        let url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(Self { url, status, headers, body })
    }

    pub fn url(&self) -> &Url { &self.url }
    pub fn status(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &Bytes { &self.body }
    pub fn is_success(&self) -> bool { self.status.is_success() }

    /// Body decoded as UTF-8, invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> { String::from_utf8_lossy(&self.body) }

    /// Deserializes the body as JSON. Only meaningful for `format=json` requests.
    pub fn json<T>(&self) -> Result<T, serde_json::Error>
    where T: for<'de> serde::Deserialize<'de> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Debug, Display)]
pub enum ResponseError {
    NoConnection(reqwest::Error),
    Timeout(reqwest::Error),
    Body(reqwest::Error),
    Unknown(reqwest::Error),
}

impl ResponseError {
    pub fn inner(&self) -> &reqwest::Error {
        match self {
            ResponseError::NoConnection(err)
            | ResponseError::Timeout(err)
            | ResponseError::Body(err)
            | ResponseError::Unknown(err) => err,
        }
    }
}

impl std::error::Error for ResponseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { Some(self.inner()) }
}

impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            ResponseError::Timeout(value)
        } else if value.is_connect() {
            ResponseError::NoConnection(value)
        } else if value.is_body() || value.is_decode() {
            ResponseError::Body(value)
        } else {
            ResponseError::Unknown(value)
        }
    }
}
