//! Error types for the classifier crate.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// A mood label that is not in the table being parsed against
    #[error("Unknown mood: {0}")]
    UnknownMood(String),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
