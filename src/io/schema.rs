// src/io/schema.rs
//! Feature schema: a JSON array of column names in training order.

use super::{invalid, read_json};
use crate::error::StartupError;
use crate::features::FeatureSchema;
use std::path::Path;

pub fn load_schema(path: &Path) -> Result<FeatureSchema, StartupError> {
    let columns: Vec<String> = read_json(path)?;
    let schema = FeatureSchema::new(columns).map_err(|reason| invalid(path, reason))?;
    log::info!("Schema: {} columns from {}", schema.len(), path.display());
    Ok(schema)
}
