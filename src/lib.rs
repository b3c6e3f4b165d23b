//! Client for the Webtrends Reporting API v3.
//!
//! ```no_run
//! use webtrends_reporting::{ReportClient, ReportQuery};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ReportClient::from_config_file("secrets/config.json")?;
//! let profiles = client.get_profiles().await?;
//! println!("{}", profiles.text());
//! let key_metrics = client.fetch_report(ReportQuery::key_metrics()).await?;
//! println!("{}", key_metrics.status());
//! # Ok(())
//! # }
//! ```
#![allow(clippy::similar_names, clippy::module_name_repetitions)]

pub use chrono;
pub use reqwest;

mod logger;

pub mod config;
pub mod http_handler;
pub mod report_client;

pub use config::{AnalyticsConfig, Config, ConfigError, Credential, DEFAULT_CONFIG_PATH, TlsVerify};
pub use http_handler::{HTTPClient, HTTPError, HTTPTransport, RawResponse, ResponseError};
pub use http_handler::http_request::request_common::RequestError;
pub use report_client::{
    ANALYTICS_URL, KEY_METRICS_REPORT, PeriodType, ReportClient, ReportFormat, ReportQuery, Totals,
};
