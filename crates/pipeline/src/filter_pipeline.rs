//! Ordered chain of movie filters.
//!
//! Filters run in the order they were added. Each stage sees only what the
//! previous stage kept, so cheap filters with high rejection rates belong
//! first. Once a stage empties the list the rest are skipped.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::Movie;
use tracing::debug;

/// Browse filters applied one after another.
///
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(MoodFilter::new(BrowseMood::Happy))
///     .add_filter(SearchFilter::new("toy"));
///
/// let kept = pipeline.apply(catalog.movies().iter().collect())?;
/// ```
pub struct FilterPipeline {
    stages: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.stages.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in run order
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage over `movies`, keeping input order
    pub fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Result<Vec<&'a Movie>> {
        let mut kept = movies;
        for stage in &self.stages {
            if kept.is_empty() {
                debug!("Nothing left to filter, skipping {}", stage.name());
                continue;
            }
            let before = kept.len();
            kept = stage.apply(kept)?;
            debug!("{} kept {} of {} movies", stage.name(), kept.len(), before);
        }
        Ok(kept)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
