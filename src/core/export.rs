// FwReport - core/export.rs
//
// Report sinks: CSV for tabular reports, verbatim lines for raw reports.
// Core layer: writes to any Write trait object; opening files (truncate vs
// append) is the caller's concern.

use crate::core::model::{RawReport, TabularReport};
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Write a tabular report as CSV: header row, then one row per record.
///
/// Absent capture groups become empty cells. Records are `\n`-terminated and
/// quoted only when a cell needs it. A report with no rows still gets its
/// header. Returns the number of data rows written.
pub fn export_csv<W: Write>(
    report: &TabularReport,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(&report.columns).map_err(csv_err)?;

    let mut count = 0;
    for row in &report.rows {
        csv_writer
            .write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Write a raw report's lines byte-for-byte. Returns the number of lines.
pub fn export_raw<W: Write>(
    report: &RawReport,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let io_err = |e: std::io::Error| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    };

    for line in &report.lines {
        writer.write_all(line.as_bytes()).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    Ok(report.lines.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_csv_export() {
        let report = TabularReport::new(
            &["Date", "Time", "Username", "IP Address"],
            vec![
                vec![
                    Some("Jan  1".to_string()),
                    Some("00:00:01".to_string()),
                    Some("alice".to_string()),
                    Some("10.0.0.1".to_string()),
                ],
                vec![Some("Jan  2".to_string()), None, Some("bob".to_string()), None],
            ],
        );
        let mut buf = Vec::new();
        let count = export_csv(&report, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert_eq!(
            output,
            "Date,Time,Username,IP Address\n\
             Jan  1,00:00:01,alice,10.0.0.1\n\
             Jan  2,,bob,\n"
        );
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        let report = TabularReport::new(&["Date", "Time"], Vec::new());
        let mut buf = Vec::new();
        let count = export_csv(&report, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 0);
        assert_eq!(String::from_utf8(buf).unwrap(), "Date,Time\n");
    }

    #[test]
    fn test_csv_quotes_cells_with_commas() {
        let report = TabularReport::new(&["A"], vec![vec![Some("x,y".to_string())]]);
        let mut buf = Vec::new();
        export_csv(&report, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "A\n\"x,y\"\n");
    }

    #[test]
    fn test_csv_row_width_mismatch_is_error() {
        let report = TabularReport::new(&["A", "B"], vec![vec![Some("only".to_string())]]);
        let result = export_csv(&report, Vec::new(), &PathBuf::from("out.csv"));
        assert!(matches!(result, Err(ExportError::Csv { .. })));
    }

    #[test]
    fn test_raw_export_is_verbatim() {
        let report = RawReport {
            lines: vec!["one\n".to_string(), "two\r\n".to_string(), "three".to_string()],
        };
        let mut buf = Vec::new();
        let count = export_raw(&report, &mut buf, &PathBuf::from("out.log")).unwrap();
        assert_eq!(count, 3);
        assert_eq!(buf, b"one\ntwo\r\nthree");
    }
}
