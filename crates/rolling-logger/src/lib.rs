//! Rolling Logger
//!
//! Installs a global `tracing` subscriber that writes to `<dir>/<app>.log`,
//! rotating the file once it reaches a size limit and keeping a bounded
//! number of older files. Records emitted through the `log` facade are
//! bridged into the same subscriber. The last few formatted lines are also
//! kept in memory and can be read back with [`recent_lines`].

mod writer;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use writer::{RollingFile, SharedWriter};

pub use tracing::Level;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger already initialized")]
    AlreadyInitialized,

    #[error("logger not initialized")]
    NotInitialized,

    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub dir: PathBuf,
    pub app_name: String,
    pub level: Level,
    /// Rotate once the live file would grow past this size
    pub max_file_bytes: u64,
    /// Live file included
    pub max_files: usize,
    /// Lines kept in memory for [`recent_lines`]
    pub buffer_lines: usize,
}

impl LoggerConfig {
    pub fn new(dir: impl Into<PathBuf>, app_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            app_name: app_name.into(),
            level: Level::INFO,
            max_file_bytes: 1024 * 1024,
            max_files: 5,
            buffer_lines: 200,
        }
    }
}

static ACTIVE: OnceLock<Arc<Mutex<RollingFile>>> = OnceLock::new();

/// Local wall-clock timestamps with millisecond precision
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize with default limits
pub fn init_logger(dir: impl Into<PathBuf>, app_name: &str) -> Result<(), LoggerError> {
    init_with(LoggerConfig::new(dir, app_name))
}

pub fn init_with(config: LoggerConfig) -> Result<(), LoggerError> {
    if ACTIVE.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let file = Arc::new(Mutex::new(RollingFile::open(&config)?));
    let writer = SharedWriter(file.clone());

    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_max_level(config.level)
        .with_writer(move || writer.clone())
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    ACTIVE.set(file).map_err(|_| LoggerError::AlreadyInitialized)
}

fn ensure_active() -> Result<(), LoggerError> {
    ACTIVE.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_active()?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    ensure_active()?;
    tracing::warn!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_active()?;
    tracing::error!("{}", message);
    Ok(())
}

/// Most recent formatted lines, oldest first; empty before initialization
pub fn recent_lines() -> Vec<String> {
    ACTIVE
        .get()
        .and_then(|file| file.lock().ok().map(|file| file.recent_lines()))
        .unwrap_or_default()
}
