use super::report_query::{KEY_METRICS_REPORT, ReportQuery};
use crate::config::{AnalyticsConfig, Config, ConfigError, Credential, TlsVerify};
use crate::http_handler::http_client::{HTTPClient, HTTPTransport};
use crate::http_handler::http_handler_common::HTTPError;
use crate::http_handler::http_request::{
    key_metrics_get::KeyMetricsRequest,
    profile_list_get::ProfileListRequest,
    report_get::ReportRequest,
    report_list_get::ReportListRequest,
    request_common::{RequestError, send_request},
};
use crate::http_handler::http_response::response_common::RawResponse;
use crate::{info, log};
use std::fmt::{Display, Formatter};
use std::path::Path;
use tokio::sync::RwLock;

/// Root of the Webtrends Reporting API v3.
pub const ANALYTICS_URL: &str = "https://ws.webtrends.com/v3/Reporting/";

/// Client for the Webtrends Reporting API.
///
/// Holds the configured defaults and the last fetched profile and report lists.
/// Those cached lists are a convenience for inspection only, they are never consulted
/// when building requests and may be stale.
pub struct ReportClient<T = HTTPClient> {
    transport: T,
    analytics: AnalyticsConfig,
    verify: TlsVerify,
    profiles: RwLock<Option<RawResponse>>,
    reports: RwLock<Option<RawResponse>>,
}

impl ReportClient<HTTPClient> {
    /// Builds a client against [`ANALYTICS_URL`] from an already loaded `config`.
    ///
    /// # Errors
    /// A [`ConfigError`] if the proxy or TLS settings are unusable.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_base_url(config, ANALYTICS_URL)
    }

    /// Like [`ReportClient::new`] but against a different API root.
    pub fn with_base_url(config: &Config, base_url: &str) -> Result<Self, ConfigError> {
        let transport = HTTPClient::new(base_url, config)?;
        info!("Reporting client for profile {} at {base_url}", config.analytics().profile());
        Ok(Self::from_parts(transport, config.analytics().clone(), config.verify().clone()))
    }

    /// Loads the configuration at `path` and builds a client from it.
    ///
    /// # Errors
    /// [`ConfigError::Missing`] if there is no file at `path`, or any other
    /// [`ConfigError`] raised while loading or applying it.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::new(&Config::load(path)?)
    }
}

impl<T: HTTPTransport> ReportClient<T> {
    /// Builds a client on top of an arbitrary transport.
    pub fn with_transport(transport: T, analytics: AnalyticsConfig) -> Self {
        Self::from_parts(transport, analytics, TlsVerify::default())
    }

    fn from_parts(transport: T, analytics: AnalyticsConfig, verify: TlsVerify) -> Self {
        Self {
            transport,
            analytics,
            verify,
            profiles: RwLock::new(None),
            reports: RwLock::new(None),
        }
    }

    pub fn transport(&self) -> &T { &self.transport }
    pub fn profile(&self) -> &str { self.analytics.profile() }
    pub fn format(&self) -> &str { self.analytics.format() }
    pub fn language(&self) -> &str { self.analytics.language() }
    pub fn credential(&self) -> &Credential { self.analytics.auth() }

    /// Lists all profiles available to the configured credential.
    ///
    /// Requests `profiles/?format=..&language=..` with the client's defaults and
    /// caches the response, see [`ReportClient::last_profiles`].
    pub async fn get_profiles(&self) -> Result<RawResponse, HTTPError> {
        let request = ProfileListRequest { format: self.format(), language: self.language() };
        let response = send_request(&self.transport, &request, self.credential()).await?;
        log!("Fetched profile list: {}", response.status());
        *self.profiles.write().await = Some(response.clone());
        Ok(response)
    }

    /// Lists the reports of `profile`, or of the default profile if `None` or empty.
    ///
    /// The response is cached, see [`ReportClient::last_reports`].
    pub async fn get_reports(&self, profile: Option<&str>) -> Result<RawResponse, HTTPError> {
        let request = ReportListRequest { profile: or_default(profile, self.profile()) };
        let response = send_request(&self.transport, &request, self.credential()).await?;
        log!("Fetched report list of {}: {}", request.profile, response.status());
        *self.reports.write().await = Some(response.clone());
        Ok(response)
    }

    /// Fetches a report.
    ///
    /// With the report id [`KEY_METRICS_REPORT`] (the default) this hits
    /// `profiles/{profile}/KeyMetrics/` and every other parameter is ignored.
    /// Any other id requests `profiles/{profile}/reports/{id}/` with the full query.
    ///
    /// # Errors
    /// - [`HTTPError::HTTPRequestError`] if the report id is explicitly empty, or a named
    ///   report is requested without a start period. Nothing is sent in either case.
    /// - [`HTTPError::HTTPResponseError`] on transport failures.
    pub async fn fetch_report(&self, query: ReportQuery) -> Result<RawResponse, HTTPError> {
        let profile = or_default(query.profile.as_deref(), self.profile());
        let credential = query.credential.as_ref().unwrap_or(self.credential());
        let report = match query.report.as_deref() {
            None => KEY_METRICS_REPORT,
            Some("") => return Err(RequestError::MissingParameter("report").into()),
            Some(report) => report,
        };

        if report == KEY_METRICS_REPORT {
            let request = KeyMetricsRequest { profile };
            return send_request(&self.transport, &request, credential).await;
        }

        let request = ReportRequest {
            profile,
            report,
            format: or_default(query.format.as_deref(), self.format()),
            start_period: non_empty(query.start.as_deref()),
            end_period: query.end.as_deref(),
            sort_by: query.sort_by.as_deref().or(query.sort.as_deref()),
            period_type: query.period_type.as_deref(),
            measures: query.measures.as_deref(),
            language: or_default(query.language.as_deref(), self.language()),
            range: query.range.as_deref(),
            search: query.search.as_deref(),
            totals: query.totals.as_deref(),
        };
        send_request(&self.transport, &request, credential).await
    }

    /// The response of the last successful [`ReportClient::get_profiles`] call.
    pub async fn last_profiles(&self) -> Option<RawResponse> { self.profiles.read().await.clone() }

    /// The response of the last successful [`ReportClient::get_reports`] call.
    pub async fn last_reports(&self) -> Option<RawResponse> { self.reports.read().await.clone() }

    pub async fn clear_cache(&self) {
        *self.profiles.write().await = None;
        *self.reports.write().await = None;
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> { value.filter(|v| !v.is_empty()) }

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    non_empty(value).unwrap_or(default)
}

fn describe(slot: &RwLock<Option<RawResponse>>) -> String {
    match slot.try_read() {
        Ok(guard) => match guard.as_ref() {
            Some(resp) => format!("<{} {}>", resp.status(), resp.url()),
            None => String::from("None"),
        },
        Err(_) => String::from("<updating>"),
    }
}

impl<T> Display for ReportClient<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "profile = {}", self.analytics.profile())?;
        writeln!(f, "format = {}", self.analytics.format())?;
        writeln!(f, "language = {}", self.analytics.language())?;
        writeln!(f, "verify = {}", self.verify)?;
        writeln!(f, "auth = {}", self.analytics.auth())?;
        writeln!(f, "profiles = {}", describe(&self.profiles))?;
        write!(f, "reports = {}", describe(&self.reports))
    }
}
