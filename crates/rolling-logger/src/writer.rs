//! Size-rotated log file with an in-memory ring of recent lines.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::LoggerConfig;

/// `<app>.log` is the live file, `<app>.1.log` the previous one, and so on.
pub(crate) struct RollingFile {
    dir: PathBuf,
    app_name: String,
    file: File,
    written: u64,
    max_file_bytes: u64,
    max_files: usize,
    recent: VecDeque<String>,
    buffer_lines: usize,
}

impl RollingFile {
    pub(crate) fn open(config: &LoggerConfig) -> io::Result<Self> {
        fs::create_dir_all(&config.dir)?;
        let path = log_path(&config.dir, &config.app_name, 0);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            dir: config.dir.clone(),
            app_name: config.app_name.clone(),
            file,
            written,
            max_file_bytes: config.max_file_bytes.max(1),
            max_files: config.max_files.max(1),
            recent: VecDeque::with_capacity(config.buffer_lines),
            buffer_lines: config.buffer_lines,
        })
    }

    pub(crate) fn recent_lines(&self) -> Vec<String> {
        self.recent.iter().cloned().collect()
    }

    /// Shift every file up one slot, dropping the oldest, and start a fresh live file
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let oldest = log_path(&self.dir, &self.app_name, self.max_files - 1);
        if self.max_files > 1 && oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.max_files).rev() {
            let from = log_path(&self.dir, &self.app_name, index - 1);
            if from.exists() {
                fs::rename(&from, log_path(&self.dir, &self.app_name, index))?;
            }
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path(&self.dir, &self.app_name, 0))?;
        self.written = 0;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        if self.buffer_lines == 0 {
            return;
        }
        for line in String::from_utf8_lossy(buf).lines() {
            if self.recent.len() == self.buffer_lines {
                self.recent.pop_front();
            }
            self.recent.push_back(line.to_string());
        }
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_file_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        self.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

pub(crate) fn log_path(dir: &Path, app_name: &str, index: usize) -> PathBuf {
    if index == 0 {
        dir.join(format!("{}.log", app_name))
    } else {
        dir.join(format!("{}.{}.log", app_name, index))
    }
}

/// Cloneable handle handed to the subscriber, one per event
#[derive(Clone)]
pub(crate) struct SharedWriter(pub(crate) Arc<Mutex<RollingFile>>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        file.flush()
    }
}
