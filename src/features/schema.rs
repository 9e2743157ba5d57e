// src/features/schema.rs

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Ordered column names the trained models expect. Cheap to clone.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Arc<[String]>,
}

impl FeatureSchema {
    /// # Errors
    ///
    /// Returns `Err` for an empty schema or duplicated column names.
    pub fn new(columns: Vec<String>) -> Result<Self, String> {
        if columns.is_empty() {
            return Err("schema has no columns".into());
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(format!("duplicate column {:?}", name));
            }
        }
        Ok(Self {
            columns: columns.into(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Projects computed features onto the schema: matching columns are
    /// copied, missing ones become 0, extras are dropped.
    pub fn align(&self, computed: &[(String, f64)]) -> FeatureVector {
        self.align_with_report(computed).0
    }

    pub fn align_with_report(&self, computed: &[(String, f64)]) -> (FeatureVector, Alignment) {
        let lookup: HashMap<&str, f64> = computed.iter().map(|(n, v)| (n.as_str(), *v)).collect();

        let mut matched = 0;
        let values: Vec<f64> = self
            .columns
            .iter()
            .map(|col| match lookup.get(col.as_str()) {
                Some(&v) => {
                    matched += 1;
                    v
                }
                None => 0.0,
            })
            .collect();

        let report = Alignment {
            matched,
            zero_filled: self.columns.len() - matched,
            dropped: lookup.len() - matched,
        };
        let vector = FeatureVector {
            schema: self.clone(),
            values,
        };
        (vector, report)
    }
}

/// Column bookkeeping from one alignment pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    pub matched: usize,
    pub zero_filled: usize,
    pub dropped: usize,
}

/// Values laid out exactly in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    schema: FeatureSchema,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.schema.position(column).map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.schema
            .columns()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
