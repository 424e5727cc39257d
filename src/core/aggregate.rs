// FwReport - core/aggregate.rs
//
// Frequency tally of one captured field across all lines.
// Core layer: pure logic, no I/O.

use crate::core::matcher::PatternMatcher;
use crate::core::model::{FrequencyTable, LogLine};
use crate::util::constants;
use crate::util::error::FilterError;

/// Count lines per value of the first capture group of `extraction_pattern`.
///
/// Matching is case-sensitive. Lines that do not match, or whose first group
/// did not participate, are skipped. A pattern without groups counts nothing.
pub fn aggregate(
    lines: &[LogLine],
    extraction_pattern: &str,
) -> Result<FrequencyTable, FilterError> {
    let matcher = PatternMatcher::new(extraction_pattern, false)?;
    let mut table = FrequencyTable::new();

    for line in lines {
        let m = matcher.match_line(line);
        if let Some(key) = m.group(0) {
            table.increment(key);
        }
    }

    tracing::debug!(
        pattern = extraction_pattern,
        keys = table.len(),
        total = table.total(),
        "Aggregation complete"
    );
    Ok(table)
}

/// Tally destination ports (`DPT=<port> `) across the log.
pub fn tally_port_traffic(lines: &[LogLine]) -> Result<FrequencyTable, FilterError> {
    aggregate(lines, constants::DEST_PORT_PATTERN)
}
