// FwReport - core/report.rs
//
// The three report generators. Each is a fixed composition of a pattern
// template, a column schema, and a sink kind; this module builds the report
// data and names the output file, while core::export writes it.
// Core layer: pure logic; filter emission goes to any Write sink.

use crate::core::filter::{filter_lines, FilterOptions};
use crate::core::model::{LogLine, RawReport, TabularReport};
use crate::util::constants;
use crate::util::error::FilterError;
use std::fmt;
use std::io::Write;

/// Which generator produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    PortTraffic,
    InvalidUser,
    SourceIp,
}

impl ReportKind {
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::PortTraffic => "port-traffic",
            ReportKind::InvalidUser => "invalid-user",
            ReportKind::SourceIp => "source-ip",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Options shared by all generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Matching mode and emission flags for the underlying filter pass.
    pub filter: FilterOptions,

    /// Escape parameters (port, IP) before splicing them into a template so
    /// they match literally. When false they are spliced as regex source.
    pub literal_parameters: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            filter: FilterOptions::default(),
            literal_parameters: true,
        }
    }
}

// =============================================================================
// Pattern templates
// =============================================================================

fn splice(template: &str, placeholder: &str, value: &str, literal: bool) -> String {
    if literal {
        template.replace(placeholder, &regex::escape(value))
    } else {
        template.replace(placeholder, value)
    }
}

/// Port-traffic pattern for destination port `port`.
pub fn port_traffic_pattern(port: &str, literal: bool) -> String {
    splice(
        constants::PORT_TRAFFIC_TEMPLATE,
        constants::PORT_PLACEHOLDER,
        port,
        literal,
    )
}

/// Source-IP pattern for address `ip`.
pub fn source_ip_pattern(ip: &str, literal: bool) -> String {
    splice(
        constants::SOURCE_IP_TEMPLATE,
        constants::IP_PLACEHOLDER,
        ip,
        literal,
    )
}

// =============================================================================
// Output file names
// =============================================================================

/// Replace anything that could act as a path component separator.
fn file_name_safe(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `destination_port_<port>_report.csv`
pub fn port_traffic_file_name(port: &str) -> String {
    format!("destination_port_{}_report.csv", file_name_safe(port))
}

/// `invalid_users.csv`
pub fn invalid_user_file_name() -> &'static str {
    constants::INVALID_USER_FILE_NAME
}

/// `source_ip_<ip with dots as underscores>.log`
pub fn source_ip_file_name(ip: &str) -> String {
    format!("source_ip_{}.log", file_name_safe(&ip.replace('.', "_")))
}

// =============================================================================
// Generators
// =============================================================================

/// Rows for every line whose destination port equals `port`.
///
/// Columns: Date, Time, Source IP Address, Destination IP Address,
/// Source Port, Destination Port.
pub fn port_traffic_report<W: Write + ?Sized>(
    lines: &[LogLine],
    port: &str,
    options: &ReportOptions,
    sink: &mut W,
) -> Result<TabularReport, FilterError> {
    let pattern = port_traffic_pattern(port, options.literal_parameters);
    let result = filter_lines(lines, &pattern, &options.filter, sink)?;
    Ok(TabularReport::new(
        constants::PORT_TRAFFIC_COLUMNS,
        result.captured_rows,
    ))
}

/// Rows for every "Invalid user <name> from <ip>" event.
///
/// Columns: Date, Time, Username, IP Address.
pub fn invalid_user_report<W: Write + ?Sized>(
    lines: &[LogLine],
    options: &ReportOptions,
    sink: &mut W,
) -> Result<TabularReport, FilterError> {
    let result = filter_lines(
        lines,
        constants::INVALID_USER_PATTERN,
        &options.filter,
        sink,
    )?;
    Ok(TabularReport::new(
        constants::INVALID_USER_COLUMNS,
        result.captured_rows,
    ))
}

/// Verbatim lines whose source address is `ip`.
pub fn source_ip_report<W: Write + ?Sized>(
    lines: &[LogLine],
    ip: &str,
    options: &ReportOptions,
    sink: &mut W,
) -> Result<RawReport, FilterError> {
    let pattern = source_ip_pattern(ip, options.literal_parameters);
    let result = filter_lines(lines, &pattern, &options.filter, sink)?;
    Ok(RawReport {
        lines: result.matched_lines,
    })
}
