use super::request_common::HTTPRequestType;

/// `GET profiles/{profile}/reports`, lists the reports of a profile.
#[derive(Debug)]
pub struct ReportListRequest<'a> {
    pub profile: &'a str,
}

impl HTTPRequestType for ReportListRequest<'_> {
    fn path_segments(&self) -> Vec<&str> { vec!["profiles", self.profile, "reports"] }
}
