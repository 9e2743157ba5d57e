// src/utils/logger.rs

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::io::Write;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Writes one tagged line per record to stderr, keeping stdout for results.
struct ConsoleLogger;

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
  log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

fn tag(level: Level) -> &'static str {
  match level {
    Level::Error => "ERROR",
    Level::Warn => "WARN ",
    Level::Info => "INFO ",
    Level::Debug => "DEBUG",
    Level::Trace => "TRACE",
  }
}

impl log::Log for ConsoleLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      // Format: "[WARN ] gapscope::pipeline: analysis of "Xx" failed"
      let msg = format!("[{}] {}: {}\n", tag(record.level()), record.target(), record.args());
      let _ = std::io::stderr().lock().write_all(msg.as_bytes());
    }
  }

  fn flush(&self) {
    let _ = std::io::stderr().flush();
  }
}
