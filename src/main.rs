// FwReport - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing and input path validation
// 2. config.toml loading (CLI flags take precedence)
// 3. Logging initialisation
// 4. One reporting run

use clap::Parser;
use fwreport::app::run::{self, RunConfig};
use fwreport::core::filter::FilterOptions;
use fwreport::core::report::ReportOptions;
use fwreport::platform::{self, config::AppConfig};
use fwreport::util;
use std::path::PathBuf;
use std::process::ExitCode;

/// FwReport - firewall and auth log reporter.
///
/// Tallies destination ports in a log, writes a CSV per port seen at least
/// THRESHOLD times, a CSV of invalid-user login attempts, and appends every
/// line from SOURCE_IP to a per-address log.
#[derive(Parser, Debug)]
#[command(name = "fwreport", version, about)]
struct Cli {
    /// Log file to scan.
    #[arg(value_name = "LOG_FILE")]
    log_file: PathBuf,

    /// Directory reports are written to (default: the executable's directory).
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Source address whose lines are appended to source_ip_<ip>.log.
    #[arg(short = 's', long = "source-ip", value_name = "IP")]
    source_ip: Option<String>,

    /// Minimum line count for a destination port to get its own report.
    #[arg(short = 't', long = "threshold", value_name = "COUNT",
          value_parser = clap::value_parser!(u64).range(1..))]
    threshold: Option<u64>,

    /// Print a match-count summary after each filter pass.
    #[arg(long = "summary")]
    summary: bool,

    /// Print every matched line.
    #[arg(long = "matches")]
    matches: bool,

    /// Match report patterns case-sensitively.
    #[arg(long = "case-sensitive")]
    case_sensitive: bool,

    /// Config file (default: platform config directory).
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl Cli {
    /// Merge CLI flags over the file config.
    fn into_run_config(self, file: AppConfig) -> RunConfig {
        let output_dir = self
            .output_dir
            .or(file.output_dir)
            .unwrap_or_else(platform::fs::default_output_dir);

        RunConfig {
            log_file: self.log_file,
            output_dir,
            threshold: self.threshold.unwrap_or(file.threshold),
            source_ip: self.source_ip.unwrap_or(file.source_ip),
            report: ReportOptions {
                filter: FilterOptions {
                    case_insensitive: file.case_insensitive && !self.case_sensitive,
                    emit_summary: file.print_summary || self.summary,
                    emit_matches: file.print_matches || self.matches,
                },
                literal_parameters: file.literal_parameters,
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = platform::fs::validate_input(&cli.log_file) {
        eprintln!("{}", e.user_message());
        return ExitCode::from(e.exit_code());
    }

    let (config_path, required) = match cli.config {
        Some(ref path) => (path.clone(), true),
        None => (platform::config::PlatformPaths::resolve().config_file(), false),
    };
    let (file_config, warnings) = match platform::config::load_config(&config_path, required) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    util::logging::init(cli.debug, file_config.log_level.as_deref());
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "FwReport starting"
    );

    let run_config = cli.into_run_config(file_config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match run::run(&run_config, &mut out) {
        Ok(summary) => {
            tracing::info!(
                lines = summary.lines_read,
                ports = summary.tally.len(),
                qualifying = ?summary.qualifying_ports,
                reports = summary.reports.len(),
                output_dir = %run_config.output_dir.display(),
                "Run complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
