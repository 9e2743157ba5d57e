//! gapscope: band-gap and electronic-score prediction from a chemical
//! formula.
//!
//! A formula is turned into magpie-style composition features, a random
//! forest decides metallic vs. insulating, and for insulators a boosted
//! tree ensemble estimates the gap, which is then scored.
//!
//! ```no_run
//! use gapscope::{Config, PredictionResponse, Predictor};
//!
//! let (config, _) = Config::load();
//! let predictor = Predictor::load(&config);
//! let response = PredictionResponse::from(predictor.predict("Fe2O3"));
//! println!("{}", response.to_json());
//! ```

pub mod config;
pub mod error;
pub mod features;
pub mod inference;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod scoring;
pub mod utils;

pub use config::Config;
pub use error::{FeaturizationError, ModelError, PredictionError, StartupError};
pub use features::{vectorize, FeatureSchema, FeatureVector};
pub use inference::ConductivityClass;
pub use pipeline::{Health, PredictionResponse, PredictionResult, Predictor};
pub use scoring::RadarVector;
