use crate::feedback::{Feedback, DEFAULT_FEEDBACK_DELAY};
use crate::puzzle::{chunk_rows, Category, Puzzle, GROUP_SIZE};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;

/// Feedback shown when the selection repeats an earlier wrong guess
pub const ALREADY_GUESSED: &str = "You've already guessed that combination";
/// Feedback shown when three of the four words share a category
pub const ONE_AWAY: &str = "One away";
/// Feedback shown for any other wrong guess
pub const SORRY: &str = "Sorry";
/// Feedback shown when submitting fewer than four words
pub const SELECT_FOUR: &str = "Select four words";

/// Tunables for a play session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a feedback message stays visible
    pub feedback_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
        }
    }
}

/// Result of toggling a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The word was added to the selection
    Selected,
    /// The word was removed from the selection
    Deselected,
    /// Four words are already selected; nothing changed
    Full,
}

/// Result of submitting the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The selection is exactly this category
    Correct(Category),
    /// Wrong, but three words share a category
    OneAway,
    /// Wrong
    Incorrect,
    /// The same set was already submitted and was wrong
    AlreadyGuessed,
    /// Fewer than four words selected; nothing recorded
    Incomplete,
}

/// Live play state for one puzzle.
///
/// The puzzle itself is shared and never mutated; everything else is owned
/// here and changes only through the player operations and [`Session::initialize`].
pub struct Session<R = StdRng> {
    puzzle: Arc<Puzzle>,
    remaining_words: Vec<Vec<String>>,
    selected_cells: Vec<String>,
    wrong_guesses: Vec<Vec<String>>,
    correct_guesses: Vec<Category>,
    feedback: Feedback,
    rng: R,
}

impl Session<StdRng> {
    /// Start a session with an entropy-seeded shuffle source
    pub fn new(puzzle: Arc<Puzzle>, config: &SessionConfig) -> Self {
        Self::with_rng(puzzle, config, StdRng::from_entropy())
    }

    /// Start a session with reproducible shuffles
    pub fn with_seed(puzzle: Arc<Puzzle>, config: &SessionConfig, seed: u64) -> Self {
        Self::with_rng(puzzle, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Start a session drawing shuffles from `rng`
    pub fn with_rng(puzzle: Arc<Puzzle>, config: &SessionConfig, rng: R) -> Self {
        let mut session = Self {
            remaining_words: Vec::new(),
            puzzle,
            selected_cells: Vec::new(),
            wrong_guesses: Vec::new(),
            correct_guesses: Vec::new(),
            feedback: Feedback::new(config.feedback_delay),
            rng,
        };
        session.reset();
        session
    }

    /// Reset all play state to the start of `puzzle`
    pub fn initialize(&mut self, puzzle: Arc<Puzzle>) {
        self.puzzle = puzzle;
        self.reset();
    }

    fn reset(&mut self) {
        self.remaining_words = self.puzzle.starting_groups.clone();
        self.selected_cells.clear();
        self.wrong_guesses.clear();
        self.correct_guesses.clear();
        self.feedback.clear();
        tracing::info!(
            puzzle = self.puzzle.id,
            categories = self.puzzle.groups.len(),
            "session initialized"
        );
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Shared handle to the puzzle, for re-initializing
    pub fn shared_puzzle(&self) -> Arc<Puzzle> {
        Arc::clone(&self.puzzle)
    }

    pub fn remaining_words(&self) -> &[Vec<String>] {
        &self.remaining_words
    }

    pub fn selected_cells(&self) -> &[String] {
        &self.selected_cells
    }

    pub fn wrong_guesses(&self) -> &[Vec<String>] {
        &self.wrong_guesses
    }

    pub fn correct_guesses(&self) -> &[Category] {
        &self.correct_guesses
    }

    /// The current feedback message, if it has not expired
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.message()
    }

    pub fn is_selected(&self, word: &str) -> bool {
        self.selected_cells.iter().any(|w| w == word)
    }

    /// Number of wrong guesses so far
    pub fn mistakes(&self) -> usize {
        self.wrong_guesses.len()
    }

    /// Whether the selection is full and may be submitted
    pub fn can_submit(&self) -> bool {
        self.selected_cells.len() == GROUP_SIZE
    }

    /// Every category has been found
    pub fn is_complete(&self) -> bool {
        self.correct_guesses.len() == self.puzzle.groups.len()
    }

    /// Select or deselect a word; selection is capped at four
    pub fn toggle_cell(&mut self, word: &str) -> Toggle {
        self.feedback.clear();
        if let Some(pos) = self.selected_cells.iter().position(|w| w == word) {
            self.selected_cells.remove(pos);
            return Toggle::Deselected;
        }
        if self.selected_cells.len() >= GROUP_SIZE {
            return Toggle::Full;
        }
        self.selected_cells.push(word.to_string());
        Toggle::Selected
    }

    /// Evaluate the current selection against every category
    pub fn submit_guess(&mut self) -> GuessOutcome {
        self.feedback.clear();

        if self.selected_cells.len() != GROUP_SIZE {
            self.feedback.show(SELECT_FOUR);
            return GuessOutcome::Incomplete;
        }

        if self
            .wrong_guesses
            .iter()
            .any(|guess| same_words(guess, &self.selected_cells))
        {
            self.feedback.show(ALREADY_GUESSED);
            return GuessOutcome::AlreadyGuessed;
        }

        let mut largest = 0;
        let mut found = None;
        for group in &self.puzzle.groups {
            let overlap = group.overlap(&self.selected_cells);
            largest = largest.max(overlap);
            if overlap == GROUP_SIZE {
                found = Some(group.clone());
                break;
            }
        }

        if let Some(category) = found {
            let still_remaining: Vec<String> = self
                .remaining_words
                .drain(..)
                .flatten()
                .filter(|w| !category.contains(w))
                .collect();
            self.remaining_words = chunk_rows(still_remaining);
            self.selected_cells.clear();
            self.correct_guesses.push(category.clone());
            tracing::debug!(
                commonality = %category.commonality,
                found = self.correct_guesses.len(),
                "correct guess"
            );
            return GuessOutcome::Correct(category);
        }

        self.wrong_guesses.push(self.selected_cells.clone());
        tracing::debug!(largest, guess = ?self.selected_cells, "wrong guess");
        if largest == GROUP_SIZE - 1 {
            self.feedback.show(ONE_AWAY);
            GuessOutcome::OneAway
        } else {
            self.feedback.show(SORRY);
            GuessOutcome::Incorrect
        }
    }

    /// Randomly rearrange the remaining words
    pub fn shuffle(&mut self) {
        self.feedback.clear();
        let mut words: Vec<String> = self.remaining_words.drain(..).flatten().collect();
        words.shuffle(&mut self.rng);
        self.remaining_words = chunk_rows(words);
    }

    pub fn deselect_all(&mut self) {
        self.feedback.clear();
        self.selected_cells.clear();
    }

    /// Advance the feedback expiry; returns true if the message just expired
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.feedback.advance(elapsed)
    }
}

/// Order-independent comparison of two word sets
fn same_words(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().all(|w| b.contains(w)) && b.iter().all(|w| a.contains(w))
}
