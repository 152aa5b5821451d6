//! File-based debug logger
//!
//! The extension host swallows stderr, so the binding logs here instead.
//! Controlled by environment variables:
//! - `MCP_GIST_DEBUG`: `0`/`false` disables the log (enabled otherwise)
//! - `MCP_GIST_LOG_LEVEL`: minimum level (default `debug`)
//! - `MCP_GIST_LOG_FILE`: log path (default `<temp dir>/mcp-gist-debug.log`)

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::SystemTime;

use parking_lot::Mutex;

use super::traits::{LogLevel, Logger};

/// Appends log lines to a file
pub struct FileLogger {
    path: PathBuf,
    file: Mutex<Option<File>>,
    min_level: LogLevel,
    enabled: bool,
}

impl FileLogger {
    /// Open (or create) a log file at `path`
    pub fn new(path: impl Into<PathBuf>, min_level: LogLevel) -> Self {
        let path = path.into();
        let file = open_append(&path);
        Self {
            path,
            file: Mutex::new(file),
            min_level,
            enabled: true,
        }
    }

    /// Configure from `MCP_GIST_*` environment variables
    pub fn from_env() -> Self {
        let path = std::env::var_os("MCP_GIST_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_log_path);
        let min_level = std::env::var("MCP_GIST_LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(LogLevel::Debug);
        let enabled = std::env::var("MCP_GIST_DEBUG")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        let mut logger = Self::new(path, min_level);
        logger.enabled = enabled;
        logger
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncate the log file
    pub fn clear(&self) {
        if let Ok(file) = File::create(&self.path) {
            drop(file);
        }
        *self.file.lock() = open_append(&self.path);
    }

    fn write(&self, level: LogLevel, message: &str) {
        if !self.enabled || level < self.min_level {
            return;
        }

        if let Some(file) = self.file.lock().as_mut() {
            let _ = writeln!(file, "[{}] [{}] {}", timestamp(), level, message);
            let _ = file.flush();
        }
    }
}

impl Logger for FileLogger {
    fn debug(&self, message: &str) {
        self.write(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.write(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.write(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.write(LogLevel::Error, message);
    }

    fn log(&self, level: LogLevel, message: &str) {
        self.write(level, message);
    }
}

impl std::fmt::Debug for FileLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLogger")
            .field("path", &self.path)
            .field("min_level", &self.min_level)
            .field("enabled", &self.enabled)
            .finish()
    }
}

fn open_append(path: &Path) -> Option<File> {
    OpenOptions::new().create(true).append(true).open(path).ok()
}

fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("mcp-gist-debug.log")
}

/// `HH:MM:SS.mmm` (UTC)
fn timestamp() -> String {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs();
            format!(
                "{:02}:{:02}:{:02}.{:03}",
                (secs % 86400) / 3600,
                (secs % 3600) / 60,
                secs % 60,
                d.subsec_millis()
            )
        })
        .unwrap_or_else(|_| "??:??:??.???".to_string())
}

static GLOBAL: OnceLock<Arc<FileLogger>> = OnceLock::new();

/// Process-wide file logger, configured from the environment on first use
pub fn global() -> Arc<FileLogger> {
    GLOBAL.get_or_init(|| Arc::new(FileLogger::from_env())).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_writes_at_or_above_level() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug.log");
        let logger = FileLogger::new(&path, LogLevel::Info);

        logger.debug("hidden");
        logger.info("fetched 2 urls");
        logger.error("boom");

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("hidden"));
        assert!(content.contains("[INFO ] fetched 2 urls"));
        assert!(content.contains("[ERROR] boom"));
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug.log");
        let logger = FileLogger::new(&path, LogLevel::Trace);

        logger.warn("before");
        logger.clear();
        logger.warn("after");

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("before"));
        assert!(content.contains("after"));
    }

    #[test]
    fn test_trace_via_log() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug.log");
        let logger = FileLogger::new(&path, LogLevel::Trace);

        logger.log(LogLevel::Trace, "fine detail");
        assert!(fs::read_to_string(&path).unwrap().contains("[TRACE] fine detail"));
    }
}
