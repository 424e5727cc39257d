// FwReport - platform/config.rs
//
// Config directory resolution and config.toml loading with startup
// validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for FwReport configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/fwreport/ or %APPDATA%\fwreport\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[report]` section.
    pub report: ReportSection,
    /// `[filter]` section.
    pub filter: FilterSection,
    /// `[patterns]` section.
    pub patterns: PatternsSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[report]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Minimum line count for a destination port to get its own report.
    pub threshold: Option<i64>,
    /// Source address collected into the per-IP log.
    pub source_ip: Option<String>,
    /// Directory reports are written to.
    pub output_dir: Option<String>,
}

/// `[filter]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FilterSection {
    pub case_insensitive: Option<bool>,
    pub print_summary: Option<bool>,
    pub print_matches: Option<bool>,
}

/// `[patterns]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PatternsSection {
    /// Escape port / IP parameters before splicing them into patterns.
    pub literal_parameters: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Report --
    pub threshold: u64,
    pub source_ip: String,
    /// `None` = directory of the executable.
    pub output_dir: Option<PathBuf>,

    // -- Filter --
    pub case_insensitive: bool,
    pub print_summary: bool,
    pub print_matches: bool,

    // -- Patterns --
    pub literal_parameters: bool,

    // -- Logging --
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            threshold: constants::DEFAULT_PORT_THRESHOLD,
            source_ip: constants::DEFAULT_SOURCE_IP.to_string(),
            output_dir: None,
            case_insensitive: true,
            print_summary: false,
            print_matches: false,
            literal_parameters: true,
            log_level: None,
        }
    }
}

/// Load and validate a config file.
///
/// With `required == false` (the platform default location), a missing file
/// yields defaults silently and an unreadable or unparseable file yields
/// defaults plus a warning. With `required == true` (a path the user named)
/// those cases are errors.
///
/// Returns the validated config and a list of non-fatal warnings.
pub fn load_config(
    config_path: &Path,
    required: bool,
) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let mut warnings: Vec<String> = Vec::new();

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
            return Ok((AppConfig::default(), warnings));
        }
        Err(e) if !required => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return Ok((AppConfig::default(), warnings));
        }
        Err(e) => {
            return Err(ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            })
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) if !required => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return Ok((AppConfig::default(), warnings));
        }
        Err(e) => {
            return Err(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            })
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    Ok((config, warnings))
}

/// Validate each raw field, accumulating a warning for every rejected value.
pub fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Report: threshold --
    if let Some(threshold) = raw.report.threshold {
        match u64::try_from(threshold) {
            Ok(t) if t >= constants::MIN_PORT_THRESHOLD => config.threshold = t,
            _ => warnings.push(format!(
                "{} Using default ({}).",
                ConfigError::ValueOutOfRange {
                    field: "[report] threshold".to_string(),
                    value: threshold.to_string(),
                    expected: format!("an integer >= {}", constants::MIN_PORT_THRESHOLD),
                },
                constants::DEFAULT_PORT_THRESHOLD,
            )),
        }
    }

    // -- Report: source_ip --
    if let Some(ip) = raw.report.source_ip {
        let trimmed = ip.trim();
        if !trimmed.is_empty() && trimmed.len() <= constants::MAX_SOURCE_IP_LENGTH {
            config.source_ip = trimmed.to_string();
        } else {
            warnings.push(format!(
                "{} Using default ({}).",
                ConfigError::ValueOutOfRange {
                    field: "[report] source_ip".to_string(),
                    value: ip.clone(),
                    expected: format!(
                        "a non-empty address of at most {} characters",
                        constants::MAX_SOURCE_IP_LENGTH
                    ),
                },
                constants::DEFAULT_SOURCE_IP,
            ));
        }
    }

    // -- Report: output_dir --
    if let Some(dir) = raw.report.output_dir {
        if !dir.is_empty() {
            config.output_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Filter --
    if let Some(v) = raw.filter.case_insensitive {
        config.case_insensitive = v;
    }
    if let Some(v) = raw.filter.print_summary {
        config.print_summary = v;
    }
    if let Some(v) = raw.filter.print_matches {
        config.print_matches = v;
    }

    // -- Patterns --
    if let Some(v) = raw.patterns.literal_parameters {
        config.literal_parameters = v;
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_text: &str) -> (AppConfig, Vec<String>) {
        let raw: RawConfig = toml::from_str(toml_text).unwrap();
        let mut warnings = Vec::new();
        let config = validate(raw, &mut warnings);
        (config, warnings)
    }

    #[test]
    fn test_empty_config_is_default() {
        let (config, warnings) = parse("");
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_all_sections() {
        let (config, warnings) = parse(
            r#"
            [report]
            threshold = 5
            source_ip = "10.0.0.7"
            output_dir = "/tmp/reports"

            [filter]
            case_insensitive = false
            print_summary = true
            print_matches = true

            [patterns]
            literal_parameters = false

            [logging]
            level = "DEBUG"

            [unknown]
            key = 1
            "#,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.threshold, 5);
        assert_eq!(config.source_ip, "10.0.0.7");
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/reports")));
        assert!(!config.case_insensitive);
        assert!(config.print_summary);
        assert!(config.print_matches);
        assert!(!config.literal_parameters);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let (config, warnings) = parse(
            r#"
            [report]
            threshold = 0
            source_ip = "   "

            [logging]
            level = "loud"
            "#,
        );
        assert_eq!(warnings.len(), 3);
        assert_eq!(config.threshold, constants::DEFAULT_PORT_THRESHOLD);
        assert_eq!(config.source_ip, constants::DEFAULT_SOURCE_IP);
        assert!(config.log_level.is_none());
        assert!(warnings[0].contains("[report] threshold"));
    }

    #[test]
    fn test_missing_optional_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("config.toml"), false).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_required_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(&dir.path().join("config.toml"), true);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[report\nthreshold = ").unwrap();

        let (config, warnings) = load_config(&path, false).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);

        assert!(matches!(
            load_config(&path, true),
            Err(ConfigError::TomlParse { .. })
        ));
    }
}
