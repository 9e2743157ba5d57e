// src/features/vectorizer.rs

use super::element_property;
use super::schema::{FeatureSchema, FeatureVector};
use crate::error::FeaturizationError;
use crate::model::composition::Composition;

/// Formula -> schema-conformant feature vector.
///
/// Pure: the only inputs are the formula, the schema and the embedded
/// element table.
pub fn vectorize(formula: &str, schema: &FeatureSchema) -> Result<FeatureVector, FeaturizationError> {
    let comp = Composition::parse(formula).map_err(|source| FeaturizationError::InvalidFormula {
        formula: formula.to_string(),
        source,
    })?;

    let computed = element_property::featurize(&comp);
    let (vector, report) = schema.align_with_report(&computed);

    log::trace!(
        "{}: {} columns matched, {} zero-filled, {} dropped",
        comp.formula(),
        report.matched,
        report.zero_filled,
        report.dropped
    );

    Ok(vector)
}
