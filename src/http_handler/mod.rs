pub mod http_client;
pub mod http_handler_common;
pub mod http_request;
pub mod http_response;

pub use http_client::{HTTPClient, HTTPTransport};
pub use http_handler_common::HTTPError;
pub use http_response::response_common::{RawResponse, ResponseError};
