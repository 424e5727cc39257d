// FwReport - core/filter.rs
//
// Log filter: one ordered pass of a pattern over every line, collecting
// matched lines and their capture rows.
// Core layer: pure logic; optional output goes to any Write sink.

use crate::core::matcher::PatternMatcher;
use crate::core::model::{FilterResult, LogLine};
use crate::util::error::FilterError;
use crate::util::logging::preview;
use std::io::Write;

/// How a filter pass matches and what it emits.
///
/// The two emit flags are independent and never change the returned
/// [`FilterResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    /// Ignore case while matching.
    pub case_insensitive: bool,

    /// After the scan, write one line with the match count, mode and pattern.
    pub emit_summary: bool,

    /// Write every matched line to the sink as it is found.
    pub emit_matches: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            emit_summary: false,
            emit_matches: false,
        }
    }
}

impl FilterOptions {
    /// Case-sensitive matching with no emission.
    pub fn case_sensitive() -> Self {
        Self {
            case_insensitive: false,
            ..Default::default()
        }
    }
}

/// Compile `pattern` and filter `lines` with it.
///
/// An invalid pattern fails before any line is scanned.
pub fn filter_lines<W: Write + ?Sized>(
    lines: &[LogLine],
    pattern: &str,
    options: &FilterOptions,
    sink: &mut W,
) -> Result<FilterResult, FilterError> {
    let matcher = PatternMatcher::new(pattern, options.case_insensitive)?;
    filter_with(lines, &matcher, options, sink)
}

/// Filter `lines` with an already-compiled matcher.
///
/// The matcher's own case mode is used; `options.case_insensitive` only
/// applies when compiling through [`filter_lines`].
pub fn filter_with<W: Write + ?Sized>(
    lines: &[LogLine],
    matcher: &PatternMatcher,
    options: &FilterOptions,
    sink: &mut W,
) -> Result<FilterResult, FilterError> {
    let mut result = FilterResult::default();

    for line in lines {
        let m = matcher.match_line(line);
        if !m.matched {
            continue;
        }
        tracing::trace!(line = preview(m.full_line), "Matched");
        if options.emit_matches {
            emit_line(sink, m.full_line)?;
        }
        result.push(m.full_line, m.groups);
    }

    if options.emit_summary {
        writeln!(
            sink,
            "{}",
            summary_line(result.len(), matcher.pattern(), matcher.case_insensitive())
        )
        .map_err(|e| FilterError::Emit { source: e })?;
    }

    tracing::debug!(
        pattern = matcher.pattern(),
        case_insensitive = matcher.case_insensitive(),
        groups = matcher.group_count(),
        scanned = lines.len(),
        matched = result.len(),
        "Filter pass complete"
    );

    Ok(result)
}

/// Human-readable summary of a filter pass.
pub fn summary_line(count: usize, pattern: &str, case_insensitive: bool) -> String {
    let mode = if case_insensitive {
        "case-insensitive match"
    } else {
        "match"
    };
    format!("The log file contains {count} records that {mode} the regex \"{pattern}\"")
}

fn emit_line<W: Write + ?Sized>(sink: &mut W, line: &str) -> Result<(), FilterError> {
    let emitted = if line.ends_with('\n') {
        sink.write_all(line.as_bytes())
    } else {
        writeln!(sink, "{line}")
    };
    emitted.map_err(|e| FilterError::Emit { source: e })
}
