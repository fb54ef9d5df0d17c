//! Pipeline for filtering and ranking catalog movies for the browse view.
//!
//! This crate provides:
//! - Filter trait and implementations (mood, free-text search)
//! - FilterPipeline for composing filters
//! - Ranking by weighted score, with title-prefix matches first
//! - Fixed-size pagination
//!
//! ## Architecture
//! A browse request is processed in stages:
//! 1. Filters remove movies that do not fit the mood or the query
//! 2. The survivors are ranked
//! 3. The ranked list is cut into pages of `PAGE_SIZE`
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{filter_and_rank, paginate, PAGE_SIZE};
//! use classifier::BrowseMood;
//!
//! let ranked = filter_and_rank(&catalog, Some(BrowseMood::Happy), Some("toy"))?;
//! let page = paginate(&ranked, 1, PAGE_SIZE);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod ranking;
pub mod pagination;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use ranking::{by_score_desc, filter_and_rank, rank, ranking_score};
pub use pagination::{paginate, Page, PAGE_SIZE};
