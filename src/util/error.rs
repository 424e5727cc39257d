// FwReport - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every variant keeps its causal error so the top level can log the chain.

use crate::util::constants;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all FwReport operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum FwReportError {
    /// Reading the input log failed.
    Read(ReadError),

    /// Pattern compilation or filter emission failed.
    Filter(FilterError),

    /// Writing a report failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for FwReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "Read error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl FwReportError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Read(e) => e.exit_code(),
            _ => constants::EXIT_FAILURE,
        }
    }
}

impl std::error::Error for FwReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Read errors
// ---------------------------------------------------------------------------

/// Errors related to loading the input log.
#[derive(Debug)]
pub enum ReadError {
    /// The input path does not exist.
    NotFound { path: PathBuf },

    /// The input path exists but is not a regular file.
    NotAFile { path: PathBuf },

    /// I/O error while reading the log.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Log file '{}' does not exist", path.display())
            }
            Self::NotAFile { path } => {
                write!(f, "'{}' is not a regular file", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Cannot read log file '{}': {source}", path.display())
            }
        }
    }
}

impl ReadError {
    /// The log path itself was rejected, as opposed to a failed read.
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotAFile { .. })
    }

    /// Message shown to the user on the console.
    pub fn user_message(&self) -> String {
        if self.is_invalid_path() {
            constants::INVALID_PATH_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_invalid_path() {
            constants::EXIT_INVALID_PATH
        } else {
            constants::EXIT_FAILURE
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ReadError> for FwReportError {
    fn from(e: ReadError) -> Self {
        Self::Read(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to pattern matching and filtering.
#[derive(Debug)]
pub enum FilterError {
    /// The pattern does not compile.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// Writing a matched line or the summary to the observation sink failed.
    Emit { source: io::Error },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid pattern '{pattern}': {source}")
            }
            Self::Emit { source } => {
                write!(f, "Failed to write filter output: {source}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Emit { source } => Some(source),
        }
    }
}

impl From<FilterError> for FwReportError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing reports.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error creating, opening, or writing the report file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error (includes rows whose width differs from the
    /// header).
    Csv { path: PathBuf, source: csv::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Report I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV report error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for FwReportError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for FwReportError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for FwReport results.
pub type Result<T> = std::result::Result<T, FwReportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_filter_error_keeps_regex_source() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err: FwReportError = FilterError::InvalidPattern {
            pattern: "(unclosed".to_string(),
            source,
        }
        .into();
        assert!(err.to_string().contains("(unclosed"));
        let filter = err.source().unwrap();
        assert!(filter.source().is_some());
    }

    #[test]
    fn test_read_not_found_display() {
        let err = ReadError::NotFound {
            path: PathBuf::from("missing.log"),
        };
        assert_eq!(err.to_string(), "Log file 'missing.log' does not exist");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_rejected_path_message_and_exit_code() {
        for err in [
            ReadError::NotFound {
                path: PathBuf::from("missing.log"),
            },
            ReadError::NotAFile {
                path: PathBuf::from("/var/log"),
            },
        ] {
            assert!(err.is_invalid_path());
            assert_eq!(err.user_message(), "Please provide a valid path.");
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_read_io_error_is_a_runtime_failure() {
        let err = ReadError::Io {
            path: PathBuf::from("auth.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_invalid_path());
        assert!(err.user_message().starts_with("Cannot read log file 'auth.log'"));
        assert_eq!(err.exit_code(), 1);
        assert!(err.source().is_some());

        let top: FwReportError = err.into();
        assert_eq!(top.exit_code(), 1);
        let top: FwReportError = ReadError::NotFound {
            path: PathBuf::from("x"),
        }
        .into();
        assert_eq!(top.exit_code(), 2);
    }
}
