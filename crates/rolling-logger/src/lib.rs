//! Rolling File Logger
//!
//! A `tracing` subscriber that writes plain-text lines to a size-rotated log
//! file, mirrors them to stderr and keeps the most recent lines in memory.
//! Records emitted through the `log` facade are bridged in as well.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Logger tuning
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Rotate once the active file would grow past this many bytes
    pub max_file_size: u64,
    /// Rotated files kept next to the active one
    pub max_files: usize,
    /// Lines kept for `recent_logs`
    pub buffer_capacity: usize,
    /// trace, debug, info, warn or error
    pub level: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_file_size: 5 * 1024 * 1024,
            max_files: 3,
            buffer_capacity: 500,
            level: "info".to_string(),
        }
    }
}

/// Size-rotated log file: `<name>.log`, `<name>.log.1` (newest) .. `<name>.log.<max_files>`
pub struct RollingFile {
    dir: PathBuf,
    base_name: String,
    max_file_size: u64,
    max_files: usize,
    file: Option<File>,
    size: u64,
}

impl RollingFile {
    pub fn open(dir: impl AsRef<Path>, base_name: &str, max_file_size: u64, max_files: usize) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        let mut rolling = Self {
            dir,
            base_name: base_name.to_string(),
            max_file_size,
            max_files,
            file: None,
            size: 0,
        };
        rolling.open_active()?;
        Ok(rolling)
    }

    pub fn active_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.base_name))
    }

    fn rotated_path(&self, n: usize) -> PathBuf {
        self.dir.join(format!("{}.log.{}", self.base_name, n))
    }

    fn open_active(&mut self) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(self.active_path())?;
        self.size = file.metadata()?.len();
        self.file = Some(file);
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file = None;
        if self.max_files == 0 {
            fs::remove_file(self.active_path())?;
            return self.open_active();
        }
        let oldest = self.rotated_path(self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.max_files).rev() {
            let from = self.rotated_path(n);
            if from.exists() {
                fs::rename(&from, self.rotated_path(n + 1))?;
            }
        }
        fs::rename(self.active_path(), self.rotated_path(1))?;
        self.open_active()
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // An oversized single line still goes into a fresh file
        if self.size > 0 && self.size + buf.len() as u64 > self.max_file_size {
            self.rotate()?;
        }
        let file = self.file.as_mut().ok_or_else(|| io::Error::other("log file closed"))?;
        let written = file.write(buf)?;
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Fixed-capacity buffer of the latest lines
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

struct Sink {
    file: RollingFile,
    recent: RingBuffer,
}

/// Writer handed to the fmt layer; one formatted event per `write` call
#[derive(Clone)]
struct SinkWriter(Arc<Mutex<Sink>>);

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut sink = self.0.lock().map_err(|_| io::Error::other("log sink poisoned"))?;
        sink.file.write_all(buf)?;
        let text = String::from_utf8_lossy(buf);
        for line in text.lines().filter(|l| !l.is_empty()) {
            sink.recent.push(line.to_string());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut sink = self.0.lock().map_err(|_| io::Error::other("log sink poisoned"))?;
        sink.file.flush()
    }
}

/// Local wall-clock timestamps with millisecond precision
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

static SINK: OnceLock<Arc<Mutex<Sink>>> = OnceLock::new();

/// Initialize with default settings, logging to `<log_dir>/<app_name>.log`
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    init_logger_with(log_dir, app_name, LoggerConfig::default())
}

/// Install the global subscriber. Calling again after a successful init is a no-op.
pub fn init_logger_with(log_dir: impl AsRef<Path>, app_name: &str, config: LoggerConfig) -> Result<(), String> {
    if SINK.get().is_some() {
        return Ok(());
    }
    let level = LevelFilter::from_str(&config.level)
        .map_err(|e| format!("Invalid log level '{}': {}", config.level, e))?;
    let file = RollingFile::open(log_dir, app_name, config.max_file_size, config.max_files)
        .map_err(|e| format!("Failed to open log file: {}", e))?;
    let sink = Arc::new(Mutex::new(Sink {
        file,
        recent: RingBuffer::new(config.buffer_capacity),
    }));

    let writer = SinkWriter(sink.clone());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_target(true)
        .with_writer(move || writer.clone());
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_timer(LocalTime)
        .with_target(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(level)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    let _ = SINK.set(sink);
    tracing::info!(app = app_name, "logger initialized");
    Ok(())
}

fn ensure_init() -> Result<(), String> {
    match SINK.get() {
        Some(_) => Ok(()),
        None => Err("logger not initialized".to_string()),
    }
}

pub fn info(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::error!("{}", msg);
    Ok(())
}

/// Most recent log lines, oldest first. Empty before `init_logger`.
pub fn recent_logs() -> Vec<String> {
    match SINK.get() {
        Some(sink) => match sink.lock() {
            Ok(sink) => sink.recent.lines(),
            Err(_) => Vec::new(),
        },
        None => Vec::new(),
    }
}
