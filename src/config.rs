// src/config.rs

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

// --- Log level ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  Off,
  Error,
  Warn,
  Info,
  Debug,
  Trace,
}

impl From<LogLevel> for log::LevelFilter {
  fn from(level: LogLevel) -> Self {
    match level {
      LogLevel::Off => log::LevelFilter::Off,
      LogLevel::Error => log::LevelFilter::Error,
      LogLevel::Warn => log::LevelFilter::Warn,
      LogLevel::Info => log::LevelFilter::Info,
      LogLevel::Debug => log::LevelFilter::Debug,
      LogLevel::Trace => log::LevelFilter::Trace,
    }
  }
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
  /// Directory holding the three artifacts.
  pub models_dir: PathBuf,
  pub schema_file: String,
  pub gatekeeper_file: String,
  pub specialist_file: String,
  pub log_level: LogLevel,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      models_dir: PathBuf::from("models"),
      schema_file: "features.json".to_string(),
      gatekeeper_file: "gatekeeper.json".to_string(),
      specialist_file: "specialist.json".to_string(),
      log_level: LogLevel::Warn,
    }
  }
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/gapscope/settings.json)
  pub fn load() -> (Self, String) {
    Self::load_from(&Self::get_path())
  }

  /// Loads from an explicit file. Never fails: problems fall back to the
  /// defaults and are described in the returned message.
  pub fn load_from(path: &Path) -> (Self, String) {
    if path.exists() {
      match File::open(path) {
        Ok(file) => {
          let reader = BufReader::new(file);
          match serde_json::from_reader(reader) {
            Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
            Err(e) => (Self::default(), format!("Error parsing config: {}", e)),
          }
        }
        Err(e) => (Self::default(), format!("Error opening config: {}", e)),
      }
    } else {
      (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      )
    }
  }

  /// Saves config to an explicit file
  pub fn save_to(&self, path: &Path) -> String {
    if let Some(parent) = path.parent() {
      if let Err(e) = fs::create_dir_all(parent) {
        return format!("Could not create config directory {:?}: {}", parent, e);
      }
    }

    match File::create(path) {
      Ok(file) => {
        let writer = BufWriter::new(file);
        match serde_json::to_writer_pretty(writer, self) {
          Ok(_) => format!("Config saved to {:?}", path),
          Err(e) => format!("Failed to save config: {}", e),
        }
      }
      Err(e) => format!("Could not create config file: {}", e),
    }
  }

  pub fn schema_path(&self) -> PathBuf {
    self.models_dir.join(&self.schema_file)
  }

  pub fn gatekeeper_path(&self) -> PathBuf {
    self.models_dir.join(&self.gatekeeper_file)
  }

  pub fn specialist_path(&self) -> PathBuf {
    self.models_dir.join(&self.specialist_file)
  }

  pub fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("com", "example", "gapscope") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}
