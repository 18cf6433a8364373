use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("{format}: Unsupported profile type (profile '{profile}')")]
    UnsupportedProfile { profile: String, format: String },

    #[error("{format}: Not implemented yet")]
    UnimplementedFormat { format: String },

    #[error("Cannot open source '{path}': {source}")]
    SourceUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed row{}: {message}", line_suffix(.line))]
    MalformedRow { line: Option<u64>, message: String },

    #[error("Malformed document: {message}")]
    MalformedDocument { message: String },

    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    #[error("Required field '{field}' is empty")]
    EmptyField { field: String },

    #[error("Could not save customer '{email}': {message}")]
    Persistence { email: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Record,
    Persistence,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ImportError {
    /// Record-level errors skip the offending record; everything else aborts the run.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            ImportError::MalformedRow { .. }
                | ImportError::MissingField { .. }
                | ImportError::EmptyField { .. }
                | ImportError::Persistence { .. }
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::UnsupportedProfile { .. }
            | ImportError::ConfigError { .. }
            | ImportError::ConfigValidationError { .. }
            | ImportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ImportError::UnimplementedFormat { .. }
            | ImportError::SourceUnreadable { .. }
            | ImportError::MalformedDocument { .. } => ErrorCategory::Input,
            ImportError::MalformedRow { .. }
            | ImportError::MissingField { .. }
            | ImportError::EmptyField { .. } => ErrorCategory::Record,
            ImportError::Persistence { .. } | ImportError::SerializationError(_) => {
                ErrorCategory::Persistence
            }
            ImportError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        if self.is_record_level() {
            return ErrorSeverity::Medium;
        }
        match self.category() {
            ErrorCategory::System => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::UnsupportedProfile { format, .. } => {
                format!("{}: Unsupported profile type", format)
            }
            ImportError::UnimplementedFormat { format } => {
                format!("{}: Not implemented yet", format)
            }
            ImportError::SourceUnreadable { path, .. } => {
                format!("Source file '{}' could not be opened", path)
            }
            ImportError::MalformedDocument { message } => {
                format!("The source document could not be parsed: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImportError::UnsupportedProfile { .. } => {
                "Use a profile ending in -csv or -json, e.g. 'weekly-csv'"
            }
            ImportError::UnimplementedFormat { .. } => {
                "Convert the file to CSV or JSON and use a matching profile"
            }
            ImportError::SourceUnreadable { .. } => {
                "Check that the file exists in the import directory and is readable"
            }
            ImportError::MalformedDocument { .. } => {
                "JSON sources must be a single array of objects; CSV sources need a header row"
            }
            ImportError::MalformedRow { .. } => "Fix the quoting or encoding of the reported row",
            ImportError::MissingField { .. } => {
                "Every record needs emailaddress, fname and lname columns"
            }
            ImportError::EmptyField { .. } => "Fill in the email address of the reported record",
            ImportError::Persistence { .. } => {
                "Check the reported customer data against the store's validation rules"
            }
            ImportError::ConfigError { .. }
            | ImportError::ConfigValidationError { .. }
            | ImportError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line options"
            }
            ImportError::SerializationError(_) => "Check that the customer store is valid JSON",
            ImportError::IoError(_) => "Check file permissions and available disk space",
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_level_classification() {
        let missing = ImportError::MissingField {
            field: "fname".to_string(),
        };
        assert!(missing.is_record_level());
        assert_eq!(missing.severity(), ErrorSeverity::Medium);

        let profile = ImportError::UnsupportedProfile {
            profile: "weekly-txt".to_string(),
            format: "txt".to_string(),
        };
        assert!(!profile.is_record_level());
        assert_eq!(profile.category(), ErrorCategory::Configuration);
        assert_eq!(profile.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_user_friendly_messages() {
        let err = ImportError::UnsupportedProfile {
            profile: "weekly-txt".to_string(),
            format: "txt".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "txt: Unsupported profile type");

        let err = ImportError::UnimplementedFormat {
            format: "xml".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "xml: Not implemented yet");
    }

    #[test]
    fn test_malformed_row_display_includes_line() {
        let err = ImportError::MalformedRow {
            line: Some(4),
            message: "invalid utf-8".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed row at line 4: invalid utf-8");

        let err = ImportError::MalformedRow {
            line: None,
            message: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed row: bad");
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = ImportError::IoError(std::io::Error::other("disk full"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().exit_code(), 3);
    }

    #[test]
    fn test_severity_exit_codes() {
        assert_eq!(ErrorSeverity::Medium.exit_code(), 2);
        assert_eq!(ErrorSeverity::High.exit_code(), 1);
        assert_eq!(ErrorSeverity::Critical.exit_code(), 3);
    }
}
