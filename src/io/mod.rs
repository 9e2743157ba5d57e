// src/io/mod.rs
pub mod forest;
pub mod schema;
pub mod xgboost;

use crate::error::StartupError;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use forest::load_gatekeeper;
pub use schema::load_schema;
pub use xgboost::load_specialist;

/// Opens and deserializes one JSON artifact.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StartupError> {
    let file = File::open(path).map_err(|source| StartupError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| StartupError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(path: &Path, reason: impl Into<String>) -> StartupError {
    StartupError::InvalidArtifact {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}
