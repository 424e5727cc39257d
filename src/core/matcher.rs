// FwReport - core/matcher.rs
//
// Single-line regex matching with an explicit case-sensitivity mode.
// Core layer: pure logic, no I/O.

use crate::core::model::MatchResult;
use crate::util::error::FilterError;
use regex::{Regex, RegexBuilder};

/// A compiled pattern plus the mode it was compiled with.
///
/// Matching is an unanchored search. `^` anchors to the start of the line and
/// `$` to its end, just before a single trailing `\n` if the line has one.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
    case_insensitive: bool,
}

impl PatternMatcher {
    /// Compile `pattern`. Case-insensitive mode folds Unicode case.
    pub fn new(pattern: &str, case_insensitive: bool) -> Result<Self, FilterError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| FilterError::InvalidPattern {
                pattern: pattern.to_string(),
                source: e,
            })?;
        Ok(Self {
            regex,
            case_insensitive,
        })
    }

    /// Source text of the compiled pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Number of capture groups, not counting the implicit whole-match group.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Search `line` for the first match.
    ///
    /// The trailing newline is excluded from the searched text but kept in
    /// `full_line`.
    pub fn match_line<'a>(&self, line: &'a str) -> MatchResult<'a> {
        let text = line.strip_suffix('\n').unwrap_or(line);
        match self.regex.captures(text) {
            Some(caps) => MatchResult {
                matched: true,
                full_line: line,
                groups: caps
                    .iter()
                    .skip(1)
                    .map(|g| g.map(|m| m.as_str().to_string()))
                    .collect(),
            },
            None => MatchResult::no_match(line),
        }
    }
}

/// One-shot form: compile `pattern` and match a single line.
pub fn match_line<'a>(
    line: &'a str,
    pattern: &str,
    case_insensitive: bool,
) -> Result<MatchResult<'a>, FilterError> {
    Ok(PatternMatcher::new(pattern, case_insensitive)?.match_line(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unanchored_search() {
        let m = match_line("prefix DPT=22 suffix\n", r"DPT=(\d+)", false).unwrap();
        assert!(m.matched);
        assert_eq!(m.group(0), Some("22"));
    }

    #[test]
    fn test_anchor_respected() {
        let m = match_line("xx Jan  1", r"^Jan", false).unwrap();
        assert!(!m.matched);
        assert!(m.groups.is_empty());
    }

    #[test]
    fn test_zero_groups_yields_empty_row() {
        let matcher = PatternMatcher::new(r"SRC=1\.2\.3\.4", false).unwrap();
        assert_eq!(matcher.group_count(), 0);
        let m = matcher.match_line("SRC=1.2.3.4 DST=5.6.7.8");
        assert!(m.matched);
        assert!(m.groups.is_empty());
    }

    #[test]
    fn test_end_anchor_before_trailing_newline() {
        let line = "Jan  1 00:00:01 sshd: session closed\n";
        let m = match_line(line, r"closed$", false).unwrap();
        assert!(m.matched);
        assert_eq!(m.full_line, line);
    }

    #[test]
    fn test_empty_line_pattern_does_not_match_text() {
        assert!(!match_line("abc\n", r"^$", false).unwrap().matched);
        assert!(match_line("\n", r"^$", false).unwrap().matched);
    }

    #[test]
    fn test_only_one_newline_is_excluded() {
        assert!(!match_line("closed\n\n", r"closed$", false).unwrap().matched);
        assert!(!match_line("closed\r\n", r"closed$", false).unwrap().matched);
    }

    #[test]
    fn test_unparticipating_group_is_absent() {
        let m = match_line("port=ssh", r"port=(?:(\d+)|(\w+))", false).unwrap();
        assert!(m.matched);
        assert_eq!(m.groups, vec![None, Some("ssh".to_string())]);
    }

    #[test]
    fn test_case_mode() {
        let line = "sshd: invalid USER bob";
        assert!(match_line(line, "Invalid user", true).unwrap().matched);
        assert!(!match_line(line, "Invalid user", false).unwrap().matched);
    }

    #[test]
    fn test_unicode_case_folding() {
        assert!(match_line("ÉCHEC", "échec", true).unwrap().matched);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = PatternMatcher::new("DPT=([0-9", false).unwrap_err();
        assert!(matches!(err, FilterError::InvalidPattern { .. }));
    }

    #[test]
    fn test_group_count_matches_row_width() {
        let matcher = PatternMatcher::new(r"(a)(b)?(c)", false).unwrap();
        let m = matcher.match_line("ac");
        assert_eq!(m.groups.len(), matcher.group_count());
    }
}
