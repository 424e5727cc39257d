// FwReport - app/run.rs
//
// One reporting run, start to finish:
//   load log once -> tally destination ports -> per-port reports for ports
//   at or above the threshold -> invalid-user report -> source-IP log.
//
// The in-memory line set is shared read-only by every step. Any error
// aborts the run; reports already written stay on disk.

use crate::core::aggregate;
use crate::core::export;
use crate::core::model::{FrequencyTable, LogLine, Report};
use crate::core::report::{self, ReportKind, ReportOptions};
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{ExportError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Everything a run needs, already merged from config file and CLI.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub log_file: PathBuf,
    pub output_dir: PathBuf,
    pub threshold: u64,
    pub source_ip: String,
    pub report: ReportOptions,
}

impl RunConfig {
    /// Defaults for `log_file`, writing into `output_dir`.
    pub fn new(log_file: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_file: log_file.into(),
            output_dir: output_dir.into(),
            threshold: constants::DEFAULT_PORT_THRESHOLD,
            source_ip: constants::DEFAULT_SOURCE_IP.to_string(),
            report: ReportOptions::default(),
        }
    }
}

/// One report file produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub kind: ReportKind,
    pub path: PathBuf,
    /// Data rows (CSV) or lines appended (source-IP log).
    pub records: usize,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub lines_read: usize,
    pub tally: FrequencyTable,
    /// Ports that met the threshold, in the order their reports were written.
    pub qualifying_ports: Vec<String>,
    pub reports: Vec<WrittenReport>,
}

/// Execute a full run. Filter emission (matched lines, summaries) goes to
/// `sink`.
pub fn run<W: Write + ?Sized>(config: &RunConfig, sink: &mut W) -> Result<RunSummary> {
    fs::validate_input(&config.log_file)?;
    let lines = fs::read_log_lines(&config.log_file)?;

    tracing::info!(
        path = %config.log_file.display(),
        lines = lines.len(),
        "Log loaded"
    );

    run_on_lines(&lines, config, sink)
}

/// Execute a run over lines already in memory.
pub fn run_on_lines<W: Write + ?Sized>(
    lines: &[LogLine],
    config: &RunConfig,
    sink: &mut W,
) -> Result<RunSummary> {
    ensure_output_dir(&config.output_dir)?;

    let tally = aggregate::tally_port_traffic(lines)?;
    let qualifying_ports: Vec<String> = tally
        .keys_at_or_above(config.threshold)
        .into_iter()
        .map(str::to_string)
        .collect();

    tracing::info!(
        ports = tally.len(),
        qualifying = qualifying_ports.len(),
        threshold = config.threshold,
        "Destination ports tallied"
    );
    for (port, count) in tally.iter() {
        tracing::debug!(port, count, "Port count");
    }

    let mut reports = Vec::with_capacity(qualifying_ports.len() + 2);

    for port in &qualifying_ports {
        let table = report::port_traffic_report(lines, port, &config.report, sink)?;
        let path = config.output_dir.join(report::port_traffic_file_name(port));
        reports.push(write_report(ReportKind::PortTraffic, &Report::Tabular(table), path)?);
    }

    let table = report::invalid_user_report(lines, &config.report, sink)?;
    let path = config.output_dir.join(report::invalid_user_file_name());
    reports.push(write_report(ReportKind::InvalidUser, &Report::Tabular(table), path)?);

    let raw = report::source_ip_report(lines, &config.source_ip, &config.report, sink)?;
    let path = config
        .output_dir
        .join(report::source_ip_file_name(&config.source_ip));
    reports.push(write_report(ReportKind::SourceIp, &Report::Raw(raw), path)?);

    Ok(RunSummary {
        lines_read: lines.len(),
        tally,
        qualifying_ports,
        reports,
    })
}

fn ensure_output_dir(dir: &Path) -> std::result::Result<(), ExportError> {
    if dir.is_dir() {
        return Ok(());
    }
    tracing::debug!(dir = %dir.display(), "Creating output directory");
    std::fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Write `report` to `path`. Tabular reports replace the file as CSV; raw
/// reports are appended so earlier contents are kept.
fn write_report(
    kind: ReportKind,
    report: &Report,
    path: PathBuf,
) -> std::result::Result<WrittenReport, ExportError> {
    let records = match report {
        Report::Tabular(table) => {
            let writer = fs::create_report_file(&path)?;
            export::export_csv(table, writer, &path)?
        }
        Report::Raw(raw) => {
            let writer = fs::open_append_file(&path)?;
            export::export_raw(raw, writer, &path)?
        }
    };
    debug_assert_eq!(records, report.record_count());

    tracing::info!(report = %kind, path = %path.display(), records, "Report written");
    Ok(WrittenReport {
        kind,
        path,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fw_line(dpt: u32) -> LogLine {
        format!(
            "Feb 14 08:15:00 gw kernel: IN=eth0 SRC=10.0.0.2 DST=10.0.0.1 LEN=40 PROTO=TCP SPT=1234 DPT={dpt} WINDOW=0\n"
        )
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let dir = tempfile::tempdir().unwrap();
        let mut lines: Vec<LogLine> = (0..3).map(|_| fw_line(22)).collect();
        lines.extend((0..2).map(|_| fw_line(80)));

        let config = RunConfig {
            threshold: 3,
            ..RunConfig::new("unused.log", dir.path())
        };
        let summary = run_on_lines(&lines, &config, &mut Vec::new()).unwrap();

        assert_eq!(summary.qualifying_ports, vec!["22"]);
        assert!(dir.path().join("destination_port_22_report.csv").exists());
        assert!(!dir.path().join("destination_port_80_report.csv").exists());
    }

    #[test]
    fn test_fixed_reports_always_written() {
        let dir = tempfile::tempdir().unwrap();
        let summary =
            run_on_lines(&[], &RunConfig::new("unused.log", dir.path()), &mut Vec::new()).unwrap();

        assert!(summary.tally.is_empty());
        let kinds: Vec<ReportKind> = summary.reports.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ReportKind::InvalidUser, ReportKind::SourceIp]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("invalid_users.csv")).unwrap(),
            "Date,Time,Username,IP Address\n"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("source_ip_220_195_35_40.log")).unwrap(),
            ""
        );
    }

    #[test]
    fn test_output_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        run_on_lines(&[], &RunConfig::new("unused.log", &nested), &mut Vec::new()).unwrap();
        assert!(nested.join("invalid_users.csv").exists());
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::new(dir.path().join("nope.log"), dir.path().join("out"));
        let err = run(&config, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            crate::util::error::FwReportError::Read(crate::util::error::ReadError::NotFound { .. })
        ));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_directory_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("logs");
        std::fs::create_dir(&input).unwrap();
        let config = RunConfig::new(&input, dir.path().join("out"));

        let err = run(&config, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            crate::util::error::FwReportError::Read(crate::util::error::ReadError::NotAFile { .. })
        ));
        assert_eq!(err.exit_code(), 2);
        assert!(!dir.path().join("out").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_input_is_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("auth.log");
        std::fs::write(&log, fw_line(22)).unwrap();
        std::fs::set_permissions(&log, std::fs::Permissions::from_mode(0o000)).unwrap();
        if std::fs::read(&log).is_ok() {
            // Privileged users bypass file modes.
            return;
        }

        let config = RunConfig::new(&log, dir.path().join("out"));
        let err = run(&config, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            crate::util::error::FwReportError::Read(crate::util::error::ReadError::Io { .. })
        ));
        assert_eq!(err.exit_code(), 1);
        assert!(!dir.path().join("out").exists());
    }
}
