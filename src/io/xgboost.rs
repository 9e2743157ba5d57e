// src/io/xgboost.rs
//! Specialist artifact: XGBoost's native JSON model.

use super::{invalid, read_json};
use crate::error::StartupError;
use crate::inference::boosted::{GradientBoostedTrees, XgbModelFile};
use crate::inference::Specialist;
use std::path::Path;
use std::sync::Arc;

pub fn load_specialist(path: &Path) -> Result<Specialist, StartupError> {
    let file: XgbModelFile = read_json(path)?;
    let model = GradientBoostedTrees::from_xgboost(file).map_err(|reason| invalid(path, reason))?;
    log::info!(
        "Specialist: {} trees, base score {} from {}",
        model.n_estimators(),
        model.base_score(),
        path.display()
    );
    Ok(Specialist::new(Arc::new(model)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    fn model(objective: &str) -> String {
        format!(
            r#"{{"learner": {{
                "learner_model_param": {{"base_score": "[5E-1]", "num_feature": "1"}},
                "objective": {{"name": "{}"}},
                "gradient_booster": {{"name": "gbtree", "model": {{"trees": [{{
                    "left_children": [-1], "right_children": [-1],
                    "split_indices": [0], "split_conditions": [0.25],
                    "default_left": [false]
                }}]}}}}
            }}}}"#,
            objective
        )
    }

    #[test]
    fn loads_model() {
        let f = write_tmp(&model("reg:squarederror"));
        let sp = load_specialist(f.path()).unwrap();
        assert_eq!(sp.n_features(), 1);
    }

    #[test]
    fn rejects_classifier_objective() {
        let f = write_tmp(&model("binary:logistic"));
        assert!(matches!(
            load_specialist(f.path()).unwrap_err(),
            StartupError::InvalidArtifact { .. }
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load_specialist(Path::new("/nonexistent/specialist.json")).unwrap_err(),
            StartupError::Io { .. }
        ));
    }
}
