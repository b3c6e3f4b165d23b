pub mod key_metrics_get;
pub mod profile_list_get;
pub mod report_get;
pub mod report_list_get;
pub mod request_common;
