// FwReport - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

use std::collections::HashMap;

/// One line of the source log, including its trailing newline (the final
/// line of a file may lack one). Lines are held in file order.
pub type LogLine = String;

/// Ordered capture-group values of one match. `None` marks a group that did
/// not participate in the match (e.g. the untaken side of an alternation).
pub type CapturedRow = Vec<Option<String>>;

// =============================================================================
// Match results
// =============================================================================

/// Outcome of applying one pattern to one line.
///
/// When `matched` is true, `groups` has exactly one entry per capture group
/// in the pattern, in declaration order. When false, `groups` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a> {
    pub matched: bool,
    pub full_line: &'a str,
    pub groups: CapturedRow,
}

impl<'a> MatchResult<'a> {
    /// A non-match for `line`.
    pub fn no_match(line: &'a str) -> Self {
        Self {
            matched: false,
            full_line: line,
            groups: Vec::new(),
        }
    }

    /// Value of capture group `index` (0-based, not counting the whole
    /// match), if it participated.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|g| g.as_deref())
    }
}

/// Everything a filter pass collected, in source order.
///
/// `matched_lines[i]` is the line that produced `captured_rows[i]`; the two
/// vectors always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    pub matched_lines: Vec<LogLine>,
    pub captured_rows: Vec<CapturedRow>,
}

impl FilterResult {
    /// Record one match, keeping both vectors index-aligned.
    pub fn push(&mut self, line: &str, row: CapturedRow) {
        self.matched_lines.push(line.to_string());
        self.captured_rows.push(row);
    }

    /// Number of matched lines.
    pub fn len(&self) -> usize {
        self.matched_lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched_lines.is_empty()
    }
}

// =============================================================================
// Frequency table
// =============================================================================

/// Count of lines per extracted key.
///
/// Keys are raw captured substrings compared by exact string equality, so
/// "80" and "080" are distinct. Every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for `key`, inserting it at 1 if absent.
    pub fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    /// Count for `key`, or 0 if it was never seen.
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(key, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Keys whose count is at least `threshold`, sorted ascending.
    pub fn keys_at_or_above(&self, threshold: u64) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .counts
            .iter()
            .filter(|(_, count)| **count >= threshold)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

// =============================================================================
// Reports
// =============================================================================

/// A named-column record set destined for a CSV sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularReport {
    pub columns: Vec<String>,
    pub rows: Vec<CapturedRow>,
}

impl TabularReport {
    pub fn new(columns: &[&str], rows: Vec<CapturedRow>) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }
}

/// A verbatim subset of source lines destined for an append-only log sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReport {
    pub lines: Vec<LogLine>,
}

/// An output artifact produced by a report generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Tabular(TabularReport),
    Raw(RawReport),
}

impl Report {
    /// Number of data rows (tabular) or lines (raw).
    pub fn record_count(&self) -> usize {
        match self {
            Report::Tabular(t) => t.rows.len(),
            Report::Raw(r) => r.lines.len(),
        }
    }
}
