use super::http_response::response_common::{RawResponse, ResponseError};
use crate::config::{Config, ConfigError, Credential, TlsVerify};
use crate::warn;
use reqwest::Url;
use std::future::Future;

/// Anything able to issue an authenticated GET against the reporting API.
///
/// [`HTTPClient`] is the production implementation. The seam exists so the retry
/// and URL logic of [`crate::ReportClient`] can be driven without a network.
pub trait HTTPTransport {
    /// Root URL every endpoint path is appended to. Must end with a `/`.
    fn base_url(&self) -> &Url;

    /// Sends a single GET request and reads the whole response.
    fn get(
        &self,
        url: Url,
        credential: &Credential,
    ) -> impl Future<Output = Result<RawResponse, ResponseError>> + Send;
}

/// A simple wrapper around `reqwest::Client` used to manage HTTP requests
/// with a preconfigured base URL, proxies and TLS settings.
///
/// This client is used for making REST API calls to the Webtrends Reporting API.
#[derive(Debug)]
pub struct HTTPClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
    /// Base URL for the API, prepended to all endpoint paths.
    base_url: Url,
}

impl HTTPClient {
    /// Constructs a new `HTTPClient` for `base_url` using the proxy, TLS and
    /// timeout settings of `config`.
    ///
    /// Proxies are taken from the configuration only. Environment proxy variables
    /// are ignored when the configuration lists none.
    ///
    /// # Errors
    /// Any [`ConfigError`] describing a setting reqwest refuses.
    pub fn new(base_url: &str, config: &Config) -> Result<HTTPClient, ConfigError> {
        let mut url =
            Url::parse(base_url).map_err(|_| ConfigError::InvalidBaseUrl(base_url.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if config.proxies().is_empty() {
            builder = builder.no_proxy();
        }
        // reqwest picks the first matching proxy, so `all` has to come after the
        // scheme specific entries.
        let mut proxies = config.proxies().iter().collect::<Vec<_>>();
        proxies.sort_by_key(|(scheme, _)| scheme.as_str() == "all");
        for (scheme, proxy_url) in proxies {
            let proxy = match scheme.as_str() {
                "http" => reqwest::Proxy::http(proxy_url),
                "https" => reqwest::Proxy::https(proxy_url),
                "all" => reqwest::Proxy::all(proxy_url),
                other => return Err(ConfigError::UnsupportedProxyScheme(other.to_string())),
            }
            .map_err(ConfigError::InvalidProxy)?;
            builder = builder.proxy(proxy);
        }

        match config.verify() {
            TlsVerify::Enabled(true) => {}
            TlsVerify::Enabled(false) => {
                warn!("TLS certificate verification is disabled");
                builder = builder.danger_accept_invalid_certs(true);
            }
            TlsVerify::CaBundle(path) => {
                let pem = std::fs::read(path)
                    .map_err(|_| ConfigError::InvalidCertificate(path.clone()))?;
                let certs = reqwest::Certificate::from_pem_bundle(&pem)
                    .map_err(|_| ConfigError::InvalidCertificate(path.clone()))?;
                if certs.is_empty() {
                    return Err(ConfigError::InvalidCertificate(path.clone()));
                }
                builder = builder.tls_built_in_root_certs(false);
                for cert in certs {
                    builder = builder.add_root_certificate(cert);
                }
            }
        }

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(HTTPClient { client: builder.build().map_err(ConfigError::ClientBuild)?, base_url: url })
    }
}

impl HTTPTransport for HTTPClient {
    fn base_url(&self) -> &Url { &self.base_url }

    async fn get(&self, url: Url, credential: &Credential) -> Result<RawResponse, ResponseError> {
        let response = self
            .client
            .get(url)
            .basic_auth(credential.username(), Some(credential.password()))
            .send()
            .await?;
        RawResponse::read(response).await
    }
}
