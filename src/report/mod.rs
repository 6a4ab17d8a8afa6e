pub mod csv_report;
pub mod summary;

pub use csv_report::{read_report, ReportWriter, REPORT_COLUMNS};
pub use summary::RunSummary;
