//! Coordinates which puzzle is active and owns the session playing it.
//!
//! Loading goes through a [`FetchTicket`]: a request makes an (index, source)
//! pair active and bumps a generation counter, and a fetch result is applied
//! only if its ticket is still current. An immediate in-memory fetch and a
//! deferred one therefore take the same path, and a slow response cannot
//! overwrite a newer puzzle.

use crate::error::ProviderError;
use crate::provider::{PuzzleProvider, PuzzleSource};
use crate::puzzle::Puzzle;
use crate::session::{Session, SessionConfig};
use std::sync::Arc;

/// Receipt for one puzzle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub index: u32,
    pub source: PuzzleSource,
}

/// The active puzzle selection and its session
pub struct Board<P> {
    provider: P,
    config: SessionConfig,
    seed: Option<u64>,
    index: u32,
    source: PuzzleSource,
    generation: u64,
    session: Option<Session>,
    last_error: Option<ProviderError>,
}

impl<P: PuzzleProvider> Board<P> {
    pub fn new(provider: P, config: SessionConfig) -> Self {
        Self {
            provider,
            config,
            seed: None,
            index: 1,
            source: PuzzleSource::default(),
            generation: 0,
            session: None,
            last_error: None,
        }
    }

    /// Seed shuffles for reproducible play
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn source(&self) -> PuzzleSource {
        self.source
    }

    /// The session for the active puzzle, once it has loaded
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Why the most recent load failed, if it did
    pub fn last_error(&self) -> Option<&ProviderError> {
        self.last_error.as_ref()
    }

    pub fn count_puzzles(&self) -> usize {
        self.provider.count_puzzles(self.source)
    }

    /// Make (index, source) the active puzzle and return a ticket for its fetch.
    ///
    /// The previous session is dropped right away, so nothing from the old
    /// puzzle can be played while the new one is in flight.
    pub fn request(&mut self, index: u32, source: PuzzleSource) -> FetchTicket {
        self.generation += 1;
        self.index = index;
        self.source = source;
        self.session = None;
        self.last_error = None;
        FetchTicket {
            generation: self.generation,
            index,
            source,
        }
    }

    /// Apply a fetch result.
    ///
    /// Returns `Ok(false)` when the ticket is stale and the result was
    /// discarded, `Ok(true)` when a fresh session was started. A failed fetch
    /// leaves the board without a session and is returned to the caller.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Puzzle, ProviderError>,
    ) -> Result<bool, ProviderError> {
        if ticket.generation != self.generation {
            tracing::warn!(
                index = ticket.index,
                source = %ticket.source,
                "discarding stale puzzle fetch"
            );
            return Ok(false);
        }

        match result {
            Ok(puzzle) => {
                self.start_session(Arc::new(puzzle));
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(error = %err, "puzzle fetch failed");
                self.last_error = Some(clone_error(&err));
                Err(err)
            }
        }
    }

    /// Request and fetch in one step
    pub fn open(&mut self, index: u32, source: PuzzleSource) -> Result<bool, ProviderError> {
        let ticket = self.request(index, source);
        let result = self.provider.fetch_puzzle(index, source);
        self.complete(ticket, result)
    }

    /// Restart the active puzzle from scratch
    pub fn restart(&mut self) -> Result<bool, ProviderError> {
        match self.session.as_mut() {
            Some(session) => {
                let puzzle = session.shared_puzzle();
                session.initialize(puzzle);
                Ok(true)
            }
            None => self.open(self.index, self.source),
        }
    }

    /// Move to the next puzzle in the active source, if there is one
    pub fn next_puzzle(&mut self) -> Result<bool, ProviderError> {
        self.step_to(self.index.saturating_add(1))
    }

    /// Move to the previous puzzle in the active source, if there is one
    pub fn previous_puzzle(&mut self) -> Result<bool, ProviderError> {
        self.step_to(self.index.saturating_sub(1))
    }

    /// Open `target` clamped into `1..=count`. Returns `Ok(false)` when the
    /// clamp lands back on the puzzle that is already loaded.
    fn step_to(&mut self, target: u32) -> Result<bool, ProviderError> {
        let count = self.count_puzzles() as u32;
        if count == 0 {
            return Ok(false);
        }
        let target = target.clamp(1, count);
        if target == self.index && self.session.is_some() {
            return Ok(false);
        }
        self.open(target, self.source)
    }

    /// Cycle to the next source, starting at its first puzzle
    pub fn switch_source(&mut self) -> Result<bool, ProviderError> {
        self.open(1, self.source.next())
    }

    fn start_session(&mut self, puzzle: Arc<Puzzle>) {
        tracing::info!(index = self.index, source = %self.source, "puzzle loaded");
        let session = match self.seed {
            Some(seed) => Session::with_seed(puzzle, &self.config, seed),
            None => Session::new(puzzle, &self.config),
        };
        self.session = Some(session);
    }
}

// serde_json::Error is not Clone; keep its message for display
fn clone_error(err: &ProviderError) -> ProviderError {
    match err {
        ProviderError::NotFound { dataset, index } => ProviderError::NotFound {
            dataset: *dataset,
            index: *index,
        },
        ProviderError::Invalid {
            dataset,
            index,
            error,
        } => ProviderError::Invalid {
            dataset: *dataset,
            index: *index,
            error: error.clone(),
        },
        ProviderError::Dataset { dataset, error } => ProviderError::Dataset {
            dataset: *dataset,
            error: serde::de::Error::custom(error.to_string()),
        },
    }
}
