use super::request_common::{HTTPRequestType, RequestError};

/// `GET profiles/?format=..&language=..`, lists the profiles the credential can see.
#[derive(Debug)]
pub struct ProfileListRequest<'a> {
    pub format: &'a str,
    pub language: &'a str,
}

impl HTTPRequestType for ProfileListRequest<'_> {
    fn path_segments(&self) -> Vec<&str> { vec!["profiles", ""] }

    fn query_params(&self) -> Result<Vec<(&'static str, &str)>, RequestError> {
        Ok(vec![("format", self.format), ("language", self.language)])
    }
}
