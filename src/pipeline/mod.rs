// src/pipeline/mod.rs
pub mod models;
pub mod predictor;
pub mod response;
pub mod stage;

// Re-exports for cleaner imports
pub use models::Models;
pub use predictor::{Health, PredictionResult, Predictor};
pub use response::PredictionResponse;
pub use stage::Stage;
