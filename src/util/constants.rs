// FwReport - util/constants.rs
//
// Single source of truth for named constants, extraction patterns, and
// defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "FwReport";

/// Application identifier used for the config directory.
pub const APP_ID: &str = "fwreport";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Process exit
// =============================================================================

/// Printed when the log path is missing or is not a regular file.
pub const INVALID_PATH_MESSAGE: &str = "Please provide a valid path.";

/// Exit status for a rejected log path.
pub const EXIT_INVALID_PATH: u8 = 2;

/// Exit status for any other failure.
pub const EXIT_FAILURE: u8 = 1;

// =============================================================================
// Extraction patterns
// =============================================================================

/// Captures the destination-port token of a firewall line. Lazy up to the
/// first following space, so `DPT=22 ` yields `22`.
pub const DEST_PORT_PATTERN: &str = r"DPT=(.*?) ";

/// Port-traffic report template. `{port}` is replaced by the destination
/// port before compilation.
///
/// Groups: date, time, source IP, destination IP, source port, destination port.
pub const PORT_TRAFFIC_TEMPLATE: &str =
    r"^([a-zA-Z]{3} +\d+) ([0-9:]{8}).*SRC=(.*?) DST=(.*?) .* SPT=(.*?) DPT=({port}) ";

/// Invalid-user report pattern.
///
/// Groups: date, time, username, IP address.
pub const INVALID_USER_PATTERN: &str =
    r"^([a-zA-Z]{3} +\d+) ([0-9:]{8}).*Invalid user ([a-zA-Z0-9]+) from ([0-9\.]+)";

/// Source-IP log template. `{ip}` is replaced by the source address.
pub const SOURCE_IP_TEMPLATE: &str = r"SRC=({ip})";

/// Placeholder spliced by the port-traffic template.
pub const PORT_PLACEHOLDER: &str = "{port}";

/// Placeholder spliced by the source-IP template.
pub const IP_PLACEHOLDER: &str = "{ip}";

// =============================================================================
// Report schemas and file names
// =============================================================================

/// Column header of the per-port report.
pub const PORT_TRAFFIC_COLUMNS: &[&str] = &[
    "Date",
    "Time",
    "Source IP Address",
    "Destination IP Address",
    "Source Port",
    "Destination Port",
];

/// Column header of the invalid-user report.
pub const INVALID_USER_COLUMNS: &[&str] = &["Date", "Time", "Username", "IP Address"];

/// File name of the invalid-user report (overwritten every run).
pub const INVALID_USER_FILE_NAME: &str = "invalid_users.csv";

// =============================================================================
// Orchestration defaults
// =============================================================================

/// Minimum number of lines a destination port needs before it gets a report.
pub const DEFAULT_PORT_THRESHOLD: u64 = 100;

/// Smallest accepted threshold (a zero threshold would report every port
/// ever seen, including ones with no lines).
pub const MIN_PORT_THRESHOLD: u64 = 1;

/// Source address whose lines are collected into the per-IP log.
pub const DEFAULT_SOURCE_IP: &str = "220.195.35.40";

/// Maximum accepted length of a source-IP parameter from config or CLI.
pub const MAX_SOURCE_IP_LENGTH: usize = 64;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
