use super::super::http_client::HTTPTransport;
use super::super::http_handler_common::HTTPError;
use super::super::http_response::response_common::RawResponse;
use crate::config::Credential;
use crate::{event, warn};
use reqwest::{StatusCode, Url};
use strum_macros::Display;

/// A GET endpoint of the reporting API.
///
/// Implementors only describe where the request goes; [`send_request`] takes care
/// of encoding, authentication and the retry on 401.
pub trait HTTPRequestType {
    /// Path segments below the base URL. A trailing `""` yields a trailing slash.
    fn path_segments(&self) -> Vec<&str>;

    /// Query parameters in the order they are sent.
    fn query_params(&self) -> Result<Vec<(&'static str, &str)>, RequestError> { Ok(Vec::new()) }

    /// Resolves the full, percent-encoded URL of this request against `base`.
    fn url(&self, base: &Url) -> Result<Url, RequestError> {
        let params = self.query_params()?;
        let mut url = base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| RequestError::InvalidBaseUrl)?
            .pop_if_empty()
            .extend(self.path_segments());
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }
}

/// Sends `request` with `credential`.
///
/// If the server answers exactly `401 Unauthorized`, the identical request is sent
/// once more and its response is returned, whatever its status. No other status is
/// retried.
pub async fn send_request<T, R>(
    transport: &T,
    request: &R,
    credential: &Credential,
) -> Result<RawResponse, HTTPError>
where
    T: HTTPTransport,
    R: HTTPRequestType + ?Sized,
{
    let url = request.url(transport.base_url())?;
    event!("GET {url}");
    let response = transport.get(url.clone(), credential).await?;
    if response.status() != StatusCode::UNAUTHORIZED {
        return Ok(response);
    }
    warn!("GET {} answered 401, retrying once", url.path());
    Ok(transport.get(url, credential).await?)
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum RequestError {
    /// A parameter the endpoint can't do without was left unset.
    MissingParameter(&'static str),
    /// The base URL can't carry path segments.
    InvalidBaseUrl,
}

impl std::error::Error for RequestError {}
