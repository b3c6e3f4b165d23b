use super::request_common::HTTPRequestType;

/// `GET profiles/{profile}/KeyMetrics/`, headline metrics without any parameters.
#[derive(Debug)]
pub struct KeyMetricsRequest<'a> {
    pub profile: &'a str,
}

impl HTTPRequestType for KeyMetricsRequest<'_> {
    fn path_segments(&self) -> Vec<&str> { vec!["profiles", self.profile, "KeyMetrics", ""] }
}
