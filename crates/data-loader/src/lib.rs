//! # Data Loader Crate
//!
//! This crate loads the movie dataset into an in-memory, read-only catalog.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Genre, Catalog)
//! - **parser**: Split CSV rows and parse them into `Movie` records
//! - **index**: Build the `Catalog`, skipping bad rows and duplicate ids
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/movies_dataset.csv"))?;
//! let movie = catalog.get_movie(603).unwrap();
//! println!("{} ({:?}): {}", movie.title, movie.year(), movie.genre_names().join(", "));
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::LoadStats;
pub use types::{
    // Type aliases
    MovieId,
    GenreId,
    // Core types
    Movie,
    Catalog,
    Genre,
    genre_name,
};
