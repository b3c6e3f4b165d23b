use super::http_request::request_common::RequestError;
use super::http_response::response_common::ResponseError;
use strum_macros::Display;

/// Error returned by every reporting operation.
///
/// A 401 that survives the retry is not an error, it is returned as a normal response.
#[derive(Debug, Display)]
pub enum HTTPError {
    HTTPRequestError(RequestError),
    HTTPResponseError(ResponseError),
}

impl std::error::Error for HTTPError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HTTPError::HTTPRequestError(err) => Some(err),
            HTTPError::HTTPResponseError(err) => Some(err),
        }
    }
}

impl From<RequestError> for HTTPError {
    fn from(value: RequestError) -> Self { HTTPError::HTTPRequestError(value) }
}

impl From<ResponseError> for HTTPError {
    fn from(value: ResponseError) -> Self { HTTPError::HTTPResponseError(value) }
}
