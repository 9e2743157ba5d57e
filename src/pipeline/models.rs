// src/pipeline/models.rs

use crate::config::Config;
use crate::error::StartupError;
use crate::features::FeatureSchema;
use crate::inference::{Gatekeeper, Specialist};
use crate::io;

/// The schema and both models, checked against each other.
#[derive(Debug, Clone)]
pub struct Models {
    schema: FeatureSchema,
    gatekeeper: Gatekeeper,
    specialist: Specialist,
}

impl Models {
    /// # Errors
    ///
    /// `WidthMismatch` if a model expects a different number of columns than
    /// the schema has, `NameMismatch` if a model records column names that
    /// differ from the schema's.
    pub fn new(
        schema: FeatureSchema,
        gatekeeper: Gatekeeper,
        specialist: Specialist,
    ) -> Result<Self, StartupError> {
        check_columns(&schema, "gatekeeper", gatekeeper.n_features(), gatekeeper.feature_names())?;
        check_columns(&schema, "specialist", specialist.n_features(), specialist.feature_names())?;
        Ok(Self {
            schema,
            gatekeeper,
            specialist,
        })
    }

    /// Ordered startup load: schema, then gatekeeper, then specialist.
    pub fn load(config: &Config) -> Result<Self, StartupError> {
        let schema = io::load_schema(&config.schema_path())?;
        let gatekeeper = io::load_gatekeeper(&config.gatekeeper_path())?;
        let specialist = io::load_specialist(&config.specialist_path())?;
        Self::new(schema, gatekeeper, specialist)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn gatekeeper(&self) -> &Gatekeeper {
        &self.gatekeeper
    }

    pub fn specialist(&self) -> &Specialist {
        &self.specialist
    }
}

fn check_columns(
    schema: &FeatureSchema,
    model: &'static str,
    width: usize,
    names: Option<&[String]>,
) -> Result<(), StartupError> {
    if width != schema.len() {
        return Err(StartupError::WidthMismatch {
            model,
            expected: width,
            actual: schema.len(),
        });
    }
    if let Some(names) = names {
        let mismatch = schema
            .columns()
            .iter()
            .zip(names)
            .enumerate()
            .find(|(_, (ours, theirs))| ours != theirs);
        if let Some((index, (ours, theirs))) = mismatch {
            return Err(StartupError::NameMismatch {
                model,
                index,
                expected: ours.clone(),
                found: theirs.clone(),
            });
        }
    }
    Ok(())
}
