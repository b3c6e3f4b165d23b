pub mod response_common;
