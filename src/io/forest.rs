// src/io/forest.rs
//! Gatekeeper artifact: a random forest exported from sklearn as JSON.

use super::{invalid, read_json};
use crate::error::StartupError;
use crate::inference::random_forest::{ForestExport, RandomForest};
use crate::inference::Gatekeeper;
use std::path::Path;
use std::sync::Arc;

pub fn load_gatekeeper(path: &Path) -> Result<Gatekeeper, StartupError> {
    let export: ForestExport = read_json(path)?;
    let forest = RandomForest::from_export(export).map_err(|reason| invalid(path, reason))?;
    if forest.classes().iter().any(|&c| c != 0 && c != 1) {
        return Err(invalid(
            path,
            format!("class labels {:?} are not 0/1", forest.classes()),
        ));
    }
    log::info!(
        "Gatekeeper: {} trees from {}",
        forest.n_trees(),
        path.display()
    );
    Ok(Gatekeeper::new(Arc::new(forest)))
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

    const STUMP: &str = r#"{
        "children_left": [1, -1, -1],
        "children_right": [2, -1, -1],
        "feature": [0, -2, -2],
        "threshold": [0.5, -2.0, -2.0],
        "value": [[1.0, 1.0], [1.0, 0.0], [0.0, 1.0]]
    }"#;

    #[test]
    fn loads_forest() {
        let f = write_tmp(&format!(
            r#"{{"n_features": 3, "classes": [0, 1], "trees": [{}]}}"#,
            STUMP
        ));
        let gk = load_gatekeeper(f.path()).unwrap();
        assert_eq!(gk.n_features(), 3);
    }

    #[test]
    fn rejects_foreign_labels() {
        let f = write_tmp(&format!(
            r#"{{"n_features": 1, "classes": [0, 2], "trees": [{}]}}"#,
            STUMP
        ));
        assert!(matches!(
            load_gatekeeper(f.path()).unwrap_err(),
            StartupError::InvalidArtifact { .. }
        ));
    }

    #[test]
    fn rejects_malformed_tree() {
        let f = write_tmp(
            r#"{"n_features": 1, "classes": [0, 1], "trees": [{
                "children_left": [0], "children_right": [0],
                "feature": [0], "threshold": [0.0], "value": [[1.0, 0.0]]
            }]}"#,
        );
        assert!(matches!(
            load_gatekeeper(f.path()).unwrap_err(),
            StartupError::InvalidArtifact { .. }
        ));
    }
}
