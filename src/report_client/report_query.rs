use crate::config::Credential;
use strum_macros::{Display, EnumIter};

/// Report id that selects the key metrics endpoint instead of a named report.
pub const KEY_METRICS_REPORT: &str = "key";

/// Output formats the reporting API understands.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Xml,
    /// `XPath` friendly XML.
    Xml2,
    Html,
    Csv,
}

/// Periodisation of the returned data.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq)]
pub enum PeriodType {
    /// Every period in the range individually.
    #[strum(serialize = "indv")]
    Individual,
    /// Trended over the range, first dimension only.
    #[strum(serialize = "trend")]
    Trend,
    /// All values aggregated.
    #[strum(serialize = "agg")]
    Aggregate,
}

/// Whether, or how, totals for measures are returned.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Totals {
    All,
    Only,
    None,
}

impl From<ReportFormat> for String {
    fn from(value: ReportFormat) -> Self { value.to_string() }
}

impl From<PeriodType> for String {
    fn from(value: PeriodType) -> Self { value.to_string() }
}

impl From<Totals> for String {
    fn from(value: Totals) -> Self { value.to_string() }
}

/// Parameters of [`crate::ReportClient::fetch_report`].
///
/// Every field is optional. `profile`, `format`, `language` and `credential` fall back
/// to the client's defaults, `report` falls back to [`KEY_METRICS_REPORT`]. Values are
/// passed to the API as given; only the presence of `start` is checked, and only for
/// named reports.
///
/// ```
/// use webtrends_reporting::{PeriodType, ReportQuery, Totals};
///
/// let query = ReportQuery::report("aJPy1XRZNo6")
///     .start("CURRENT_MONTH-1")
///     .end("CURRENT_MONTH")
///     .period_type(PeriodType::Aggregate)
///     .measures("1*2")
///     .range("100")
///     .totals(Totals::Only);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
    pub(crate) profile: Option<String>,
    pub(crate) report: Option<String>,
    pub(crate) start: Option<String>,
    pub(crate) end: Option<String>,
    pub(crate) sort: Option<String>,
    pub(crate) format: Option<String>,
    pub(crate) period_type: Option<String>,
    pub(crate) measures: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) range: Option<String>,
    pub(crate) search: Option<String>,
    pub(crate) sort_by: Option<String>,
    pub(crate) totals: Option<String>,
    pub(crate) credential: Option<Credential>,
}

impl ReportQuery {
    /// Query for the key metrics of the default profile.
    pub fn key_metrics() -> Self { Self::default() }

    /// Query for the report with the given id.
    pub fn report(id: impl Into<String>) -> Self {
        Self { report: Some(id.into()), ..Self::default() }
    }

    #[must_use]
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Start of the period, e.g. `2018m04d11h23`, `2018w05` or `CURRENT_MONTH-1`.
    #[must_use]
    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// End of the period. Only `start` is used when absent.
    #[must_use]
    pub fn end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Measure to sort by. Superseded by [`ReportQuery::sort_by`] when both are set.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    #[must_use]
    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn period_type(mut self, period_type: impl Into<String>) -> Self {
        self.period_type = Some(period_type.into());
        self
    }

    /// Measure ids to return, e.g. `1*2` for the first two.
    #[must_use]
    pub fn measures(mut self, measures: impl Into<String>) -> Self {
        self.measures = Some(measures.into());
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Rows to return, `100` for the first hundred or `101*200` for the next.
    #[must_use]
    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn totals(mut self, totals: impl Into<String>) -> Self {
        self.totals = Some(totals.into());
        self
    }

    /// Sends this query with `credential` instead of the client's configured one.
    #[must_use]
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }
}
