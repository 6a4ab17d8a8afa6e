pub mod aggregator;
pub mod endpoint_extractor;
mod patterns;
pub mod record;

pub use aggregator::{run, scan_sources, FileObserver, ScanOutcome};
pub use endpoint_extractor::extract;
pub use record::{ExtractionRecord, NO_BODY_FOUND, NO_HEADERS_FOUND};
