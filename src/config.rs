use crate::error;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use strum_macros::Display;

/// Location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "secrets/config.json";

/// Process-wide settings for the reporting client.
///
/// Loaded once at startup and handed to [`crate::ReportClient::new`] by reference.
/// The file layout mirrors the one the Webtrends connector has always used:
///
/// ```json
/// {
///     "proxies": { "https": "http://proxy.local:3128" },
///     "verify": true,
///     "analytics": {
///         "format_": "json",
///         "profile": "12345",
///         "language": "en-GB",
///         "auth": ["account\\user", "secret"]
///     }
/// }
/// ```
#[derive(serde::Deserialize, Debug, Clone)]
pub struct Config {
    /// Outbound proxies keyed by scheme (`http`, `https` or `all`). May be empty.
    proxies: BTreeMap<String, String>,
    /// Whether TLS certificates are verified, or a CA bundle to verify against.
    verify: TlsVerify,
    /// Optional request timeout. No timeout is applied when absent.
    #[serde(default)]
    timeout_secs: Option<u64>,
    /// Defaults for the reporting endpoints.
    analytics: AnalyticsConfig,
}

impl Config {
    /// Reads the configuration from [`DEFAULT_CONFIG_PATH`].
    pub fn load_default() -> Result<Self, ConfigError> { Self::load(DEFAULT_CONFIG_PATH) }

    /// Reads and parses the JSON configuration at `path`.
    ///
    /// # Errors
    /// - [`ConfigError::Missing`] if no file exists at `path`.
    /// - [`ConfigError::Unreadable`] if the file exists but can't be read.
    /// - [`ConfigError::Malformed`] if the content is not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                error!(
                    "Config file not found, make sure there is a file called \"{}\"",
                    path.display()
                );
                return Err(ConfigError::Missing(path.to_path_buf()));
            }
            Err(err) => return Err(ConfigError::Unreadable(err)),
        };
        Self::from_json(&raw)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Malformed)
    }

    pub fn proxies(&self) -> &BTreeMap<String, String> { &self.proxies }
    pub fn verify(&self) -> &TlsVerify { &self.verify }
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_secs.map(std::time::Duration::from_secs)
    }
    pub fn analytics(&self) -> &AnalyticsConfig { &self.analytics }
}

/// Defaults applied to every request unless the caller overrides them.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct AnalyticsConfig {
    /// Default output format, e.g. `json` or `csv`.
    #[serde(rename = "format_", alias = "format", default = "default_format")]
    format: String,
    /// Default profile id.
    profile: String,
    /// Default language or locale id.
    #[serde(default = "default_language")]
    language: String,
    /// Credential sent with every request.
    auth: Credential,
}

fn default_format() -> String { String::from("json") }
fn default_language() -> String { String::from("en-GB") }

impl AnalyticsConfig {
    pub fn new(
        format: impl Into<String>,
        profile: impl Into<String>,
        language: impl Into<String>,
        auth: Credential,
    ) -> Self {
        Self { format: format.into(), profile: profile.into(), language: language.into(), auth }
    }

    pub fn format(&self) -> &str { &self.format }
    pub fn profile(&self) -> &str { &self.profile }
    pub fn language(&self) -> &str { &self.language }
    pub fn auth(&self) -> &Credential { &self.auth }
}

/// TLS verification setting, either a flag or a path to a PEM CA bundle.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TlsVerify {
    Enabled(bool),
    CaBundle(PathBuf),
}

impl Default for TlsVerify {
    fn default() -> Self { TlsVerify::Enabled(true) }
}

impl Display for TlsVerify {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TlsVerify::Enabled(flag) => write!(f, "{flag}"),
            TlsVerify::CaBundle(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Basic-auth credential.
///
/// Deserializes from `["user", "pass"]` as well as `{"username": .., "password": ..}`.
/// `Debug` and `Display` never print the password.
#[derive(serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "CredentialRepr")]
pub struct Credential {
    username: String,
    password: String,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum CredentialRepr {
    Pair(String, String),
    Named { username: String, password: String },
}

impl From<CredentialRepr> for Credential {
    fn from(value: CredentialRepr) -> Self {
        match value {
            CredentialRepr::Pair(username, password)
            | CredentialRepr::Named { username, password } => Self { username, password },
        }
    }
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    pub fn username(&self) -> &str { &self.username }
    pub fn password(&self) -> &str { &self.password }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Display for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, ***)", self.username)
    }
}

/// Failures while loading the configuration or building a client from it.
#[derive(Debug, Display)]
pub enum ConfigError {
    Missing(PathBuf),
    Unreadable(std::io::Error),
    Malformed(serde_json::Error),
    InvalidBaseUrl(String),
    UnsupportedProxyScheme(String),
    InvalidProxy(reqwest::Error),
    InvalidCertificate(PathBuf),
    ClientBuild(reqwest::Error),
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Unreadable(err) => Some(err),
            ConfigError::Malformed(err) => Some(err),
            ConfigError::InvalidProxy(err) | ConfigError::ClientBuild(err) => Some(err),
            _ => None,
        }
    }
}
