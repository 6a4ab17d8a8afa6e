use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiAuditError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Permission denied: {path}")]
    Permission { path: String },

    #[error("Failed to write report to {path}")]
    ReportWrite {
        path: String,
        #[source]
        source: csv::Error,
    },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ApiAuditError {
    fn user_message(&self) -> String {
        match self {
            ApiAuditError::ReadFailed { path, source } => {
                format!("Could not read {}: {}", path, source)
            }
            ApiAuditError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            ApiAuditError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            ApiAuditError::Permission { path } => {
                format!("Permission denied accessing: {}", path)
            }
            ApiAuditError::ReportWrite { path, source } => {
                format!("Error saving report to {}: {}", path, source)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ApiAuditError::InvalidPath { .. } => Some(
                "Check that the directory exists and is spelled correctly.".to_string(),
            ),
            ApiAuditError::ReadFailed { .. } => Some(
                "Ensure the file is readable, or exclude its directory with --exclude.".to_string(),
            ),
            ApiAuditError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            ApiAuditError::Permission { .. } => Some(
                "Ensure you have the necessary read/write permissions for the target directory.".to_string()
            ),
            ApiAuditError::ReportWrite { .. } => Some(
                "Choose a writable location with --output or --reports-dir.".to_string(),
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ApiAuditError {
    fn from(error: toml::de::Error) -> Self {
        ApiAuditError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiAuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = ApiAuditError::InvalidPath {
            path: "/no/such/dir".to_string(),
        };
        assert!(error.user_message().contains("Invalid path"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_report_write_message_names_destination() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let error = ApiAuditError::ReportWrite {
            path: "reports/out.csv".to_string(),
            source: csv::Error::from(io),
        };

        let message = error.user_message();
        assert!(message.contains("reports/out.csv"));
        assert!(message.contains("read-only"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let error = ApiAuditError::from(toml_error);
        assert!(matches!(error, ApiAuditError::Config { .. }));
    }
}
