use directories::ProjectDirs;
use log::LevelFilter;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::Result;

/// Initialize the logger with file and console output
///
/// # Arguments
///
/// * `verbose` - Enable debug level logging
/// * `quiet` - Suppress console output (logs still written to file)
///
/// Console output goes to stderr so that text and JSON reports on stdout stay clean.
///
/// # Platform-specific log locations
///
/// * **macOS**: `~/Library/Application Support/dev.lifecycle-calc.lifecycle-calc/lifecycle-calc.log`
/// * **Linux**: `~/.local/share/lifecycle-calc/lifecycle-calc.log`
/// * **Windows**: `C:\Users\<User>\AppData\Local\lifecycle-calc\lifecycle-calc\data\lifecycle-calc.log`
///
pub fn init_logger(verbose: bool, quiet: bool) -> Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_path = log_file_path()?;

    // Open log file for writing
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| crate::ConfigError::InvalidValue(format!("Failed to open log file: {}", e)))?;

    // Build logger
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level).format_timestamp_secs();

    if quiet {
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(env_logger::Target::Pipe(Box::new(TeeWriter {
            stderr: std::io::stderr(),
            file: log_file,
        })));
    }

    builder.init();

    if !quiet {
        log::debug!("Logging to: {}", log_path.display());
    }

    Ok(())
}

/// Resolve the platform log file, falling back to the current directory
fn log_file_path() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "lifecycle-calc", "lifecycle-calc") {
        let log_dir = proj_dirs.data_local_dir();
        fs::create_dir_all(log_dir).map_err(|e| {
            crate::ConfigError::InvalidValue(format!("Failed to create log directory: {}", e))
        })?;
        Ok(log_dir.join("lifecycle-calc.log"))
    } else {
        Ok(std::env::current_dir()
            .map_err(|e| {
                crate::ConfigError::InvalidValue(format!("Failed to get current directory: {}", e))
            })?
            .join("lifecycle-calc.log"))
    }
}

/// Writes every record to stderr and the log file
struct TeeWriter {
    stderr: std::io::Stderr,
    file: fs::File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stderr.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stderr.flush()?;
        self.file.flush()?;
        Ok(())
    }
}
