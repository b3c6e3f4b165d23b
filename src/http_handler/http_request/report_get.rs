use super::request_common::{HTTPRequestType, RequestError};

/// `GET profiles/{profile}/reports/{report}/?..`, the data of a single report.
///
/// `format` and `language` are always sent. `start_period` is required, everything
/// else is left out of the query when unset. The parameter order on the wire never
/// changes: format, start_period, end_period, sort_by, period_type, measures,
/// language, range, search, totals.
#[derive(Debug, Default)]
pub struct ReportRequest<'a> {
    pub profile: &'a str,
    pub report: &'a str,
    pub format: &'a str,
    pub start_period: Option<&'a str>,
    pub end_period: Option<&'a str>,
    pub sort_by: Option<&'a str>,
    pub period_type: Option<&'a str>,
    pub measures: Option<&'a str>,
    pub language: &'a str,
    pub range: Option<&'a str>,
    pub search: Option<&'a str>,
    pub totals: Option<&'a str>,
}

impl HTTPRequestType for ReportRequest<'_> {
    fn path_segments(&self) -> Vec<&str> {
        vec!["profiles", self.profile, "reports", self.report, ""]
    }

    fn query_params(&self) -> Result<Vec<(&'static str, &str)>, RequestError> {
        let start_period = self.start_period.ok_or(RequestError::MissingParameter("start_period"))?;
        let optional = [
            ("end_period", self.end_period),
            ("sort_by", self.sort_by),
            ("period_type", self.period_type),
            ("measures", self.measures),
            ("language", Some(self.language)),
            ("range", self.range),
            ("search", self.search),
            ("totals", self.totals),
        ];
        let mut params = vec![("format", self.format), ("start_period", start_period)];
        params.extend(optional.into_iter().filter_map(|(name, value)| Some((name, value?))));
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    fn base() -> Url { Url::parse("https://ws.webtrends.com/v3/Reporting/").unwrap() }

    fn full_request() -> ReportRequest<'static> {
        ReportRequest {
            profile: "p1",
            report: "r9",
            format: "json",
            start_period: Some("2018m04d01"),
            end_period: Some("CURRENT_DAY-1"),
            sort_by: Some("Visits"),
            period_type: Some("agg"),
            measures: Some("1*2"),
            language: "en-GB",
            range: Some("101*200"),
            search: Some("front page"),
            totals: Some("all"),
        }
    }

    #[test]
    fn test_query_order_is_fixed() {
        let url = full_request().url(&base()).unwrap();
        assert_eq!(url.path(), "/v3/Reporting/profiles/p1/reports/r9/");
        let names = url.query_pairs().map(|(k, _)| k.into_owned()).collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "format",
                "start_period",
                "end_period",
                "sort_by",
                "period_type",
                "measures",
                "language",
                "range",
                "search",
                "totals"
            ]
        );
        assert_eq!(url, full_request().url(&base()).unwrap());
    }

    #[test]
    fn test_values_are_encoded() {
        let url = full_request().url(&base()).unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("search=front+page"));
        assert!(query.contains("range=101*200"));
        let search = url.query_pairs().find(|(k, _)| k == "search").map(|(_, v)| v.into_owned());
        assert_eq!(search.as_deref(), Some("front page"));
    }

    #[test]
    fn test_unset_optionals_are_omitted() {
        let request = ReportRequest {
            profile: "p1",
            report: "r9",
            format: "csv",
            start_period: Some("CURRENT_MONTH"),
            language: "nb",
            ..Default::default()
        };
        let url = request.url(&base()).unwrap();
        assert_eq!(url.query(), Some("format=csv&start_period=CURRENT_MONTH&language=nb"));
    }

    #[test]
    fn test_missing_start_period() {
        let request = ReportRequest { start_period: None, ..full_request() };
        assert_eq!(request.url(&base()), Err(RequestError::MissingParameter("start_period")));
    }

    #[test]
    fn test_path_segments_are_escaped() {
        let request = ReportRequest { profile: "a/b", report: "x y", ..full_request() };
        let url = request.url(&base()).unwrap();
        assert_eq!(url.path(), "/v3/Reporting/profiles/a%2Fb/reports/x%20y/");
    }
}
