use serde::{Deserialize, Serialize};

pub const NO_HEADERS_FOUND: &str = "No headers found";
pub const NO_BODY_FOUND: &str = "No body data found";

/// One `(file, url, headers, body)` finding. Equality is structural over all
/// four fields, which is what collapses duplicates in a run's record set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExtractionRecord {
    #[serde(rename = "File Path")]
    pub source_path: String,
    #[serde(rename = "API URL")]
    pub url: String,
    #[serde(rename = "Request Headers")]
    pub headers: String,
    #[serde(rename = "Request Body")]
    pub body: String,
}

impl ExtractionRecord {
    pub fn new(
        source_path: impl Into<String>,
        url: impl Into<String>,
        headers: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            url: url.into(),
            headers: headers.into(),
            body: body.into(),
        }
    }
}
