//src/model/mod.rs
pub mod composition;
pub mod elements;

// Re-exports for cleaner imports
pub use composition::{Composition, CompositionError};
pub use elements::Element;
