//! Filter implementations for the browse pipeline.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline.

pub mod mood;
pub mod search;

// Re-export for convenience
pub use mood::MoodFilter;
pub use search::SearchFilter;
