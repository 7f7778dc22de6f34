//! Core engine for a word-grouping puzzle.
//!
//! - [`provider`]: bundled datasets, normalized into [`Puzzle`]
//! - [`session`]: the play state machine for one puzzle
//! - [`board`]: the active puzzle selection and stale-fetch guard

pub mod board;
pub mod error;
pub mod feedback;
pub mod provider;
pub mod puzzle;
pub mod session;

pub use board::{Board, FetchTicket};
pub use error::{ProviderError, PuzzleError};
pub use feedback::{ExpiryHandle, Feedback, DEFAULT_FEEDBACK_DELAY};
pub use provider::{BundledProvider, PuzzleProvider, PuzzleSource, RawGroups, RawPuzzle};
pub use puzzle::{chunk_rows, Category, Puzzle, GROUP_SIZE, ROW_WIDTH};
pub use session::{GuessOutcome, Session, SessionConfig, Toggle};
