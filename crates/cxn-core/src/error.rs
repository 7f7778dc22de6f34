use crate::provider::PuzzleSource;
use thiserror::Error;

/// Structural problem found while validating a puzzle record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The puzzle has no categories at all.
    #[error("puzzle has no categories")]
    NoGroups,
    /// A category does not hold exactly four distinct words.
    #[error("category {commonality:?} has {size} distinct members, expected 4")]
    GroupSize { commonality: String, size: usize },
    /// A word belongs to more than one category.
    #[error("word {0:?} appears in more than one category")]
    DuplicateMember(String),
    /// A starting row is wider than the grid.
    #[error("starting row {row} holds {len} words, at most 4 allowed")]
    RowTooWide { row: usize, len: usize },
    /// The starting layout does not contain exactly the category members.
    #[error("starting layout does not match the category members")]
    LayoutMismatch,
}

/// Failure surfaced by a [`crate::PuzzleProvider`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No record with the requested id exists in the dataset.
    #[error("no {dataset} puzzle with id {index}")]
    NotFound { dataset: PuzzleSource, index: u32 },
    /// The bundled dataset could not be parsed.
    #[error("{dataset} dataset is malformed: {error}")]
    Dataset {
        dataset: PuzzleSource,
        #[source]
        error: serde_json::Error,
    },
    /// The record was found but breaks the puzzle invariants.
    #[error("{dataset} puzzle {index} is invalid: {error}")]
    Invalid {
        dataset: PuzzleSource,
        index: u32,
        #[source]
        error: PuzzleError,
    },
}
