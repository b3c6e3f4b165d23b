mod client;
mod report_query;

pub use client::{ANALYTICS_URL, ReportClient};
pub use report_query::{KEY_METRICS_REPORT, PeriodType, ReportFormat, ReportQuery, Totals};
