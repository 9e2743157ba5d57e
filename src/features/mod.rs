// src/features/mod.rs
pub mod element_property;
pub mod schema;
pub mod stats;
pub mod vectorizer;

// Re-exports for cleaner imports
pub use element_property::{magpie_feature_labels, Property};
pub use schema::{Alignment, FeatureSchema, FeatureVector};
pub use stats::Stat;
pub use vectorizer::vectorize;
