// FwReport - platform/fs.rs
//
// Filesystem access: input validation, reading the log once into memory,
// and opening report sinks with the right write mode.

use crate::core::model::LogLine;
use crate::util::error::{ExportError, ReadError};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Check that `path` names an existing regular file.
pub fn validate_input(path: &Path) -> Result<(), ReadError> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ReadError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(ReadError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    if !metadata.is_file() {
        return Err(ReadError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Read the full log into lines, each keeping its trailing newline.
///
/// Invalid UTF-8 is replaced lossily rather than aborting the run.
pub fn read_log_lines(path: &Path) -> Result<Vec<LogLine>, ReadError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ReadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let content = String::from_utf8_lossy(&bytes);
    if matches!(content, std::borrow::Cow::Owned(_)) {
        tracing::warn!(path = %path.display(), "Log contains invalid UTF-8; replaced lossily");
    }

    let lines = split_lines(&content);
    tracing::debug!(path = %path.display(), lines = lines.len(), "Log loaded");
    Ok(lines)
}

/// Split text into lines that keep their `\n` terminator.
pub fn split_lines(content: &str) -> Vec<LogLine> {
    content.split_inclusive('\n').map(str::to_string).collect()
}

/// Create (or truncate) a report file for writing.
pub fn create_report_file(path: &Path) -> Result<BufWriter<File>, ExportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Open a report file for appending, creating it if absent.
pub fn open_append_file(path: &Path) -> Result<BufWriter<File>, ExportError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(BufWriter::new)
        .map_err(|e| ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Directory containing the running executable, where reports go by default.
///
/// Falls back to the current directory if the executable path is unknown.
pub fn default_output_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
        Err(e) => {
            tracing::warn!(error = %e, "Could not resolve executable path; writing reports to current directory");
            PathBuf::from(".")
        }
    }
}
