use crate::error::PuzzleError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of words in every category
pub const GROUP_SIZE: usize = 4;

/// Number of words shown per grid row
pub const ROW_WIDTH: usize = 4;

/// One hidden grouping of words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Label describing why the members belong together
    pub commonality: String,
    /// Difficulty rank, only used for display
    pub level: u32,
    /// The words in this category
    pub members: Vec<String>,
}

impl Category {
    /// Check if a word belongs to this category
    pub fn contains(&self, word: &str) -> bool {
        self.members.iter().any(|m| m == word)
    }

    /// Count how many of `words` belong to this category
    pub fn overlap<S: AsRef<str>>(&self, words: &[S]) -> usize {
        words.iter().filter(|w| self.contains(w.as_ref())).count()
    }
}

/// A complete puzzle record in canonical shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Identifier, unique within a source
    pub id: u32,
    /// The hidden categories, in display order
    pub groups: Vec<Category>,
    /// Initial grid layout, rows of at most [`ROW_WIDTH`] words
    #[serde(rename = "startingGroups")]
    pub starting_groups: Vec<Vec<String>>,
}

impl Puzzle {
    /// Total number of words in the puzzle
    pub fn word_count(&self) -> usize {
        self.groups.iter().map(|g| g.members.len()).sum()
    }

    /// Find the category a word belongs to
    pub fn category_for(&self, word: &str) -> Option<&Category> {
        self.groups.iter().find(|g| g.contains(word))
    }

    /// Difficulty position of a category within this puzzle, 0 for the easiest.
    ///
    /// Datasets number levels differently (1..=4 or 0..=3), so display code
    /// should use this rather than the raw level.
    pub fn difficulty_rank(&self, category: &Category) -> usize {
        self.groups
            .iter()
            .filter(|g| g.level < category.level)
            .count()
    }

    /// Check the structural invariants of the record.
    ///
    /// Every category must hold exactly [`GROUP_SIZE`] distinct words, no word
    /// may be shared between categories, and the starting layout must contain
    /// each member exactly once.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.groups.is_empty() {
            return Err(PuzzleError::NoGroups);
        }

        let mut members: HashSet<&str> = HashSet::new();
        for group in &self.groups {
            let distinct: HashSet<&str> = group.members.iter().map(String::as_str).collect();
            if group.members.len() != GROUP_SIZE || distinct.len() != GROUP_SIZE {
                return Err(PuzzleError::GroupSize {
                    commonality: group.commonality.clone(),
                    size: distinct.len(),
                });
            }
            for word in distinct {
                if !members.insert(word) {
                    return Err(PuzzleError::DuplicateMember(word.to_string()));
                }
            }
        }

        let mut laid_out: HashSet<&str> = HashSet::new();
        for (row, words) in self.starting_groups.iter().enumerate() {
            if words.len() > ROW_WIDTH {
                return Err(PuzzleError::RowTooWide {
                    row,
                    len: words.len(),
                });
            }
            for word in words {
                if !laid_out.insert(word.as_str()) {
                    return Err(PuzzleError::LayoutMismatch);
                }
            }
        }

        if laid_out != members {
            return Err(PuzzleError::LayoutMismatch);
        }

        Ok(())
    }
}

/// Split a flat word list into grid rows of [`ROW_WIDTH`]
pub fn chunk_rows(words: Vec<String>) -> Vec<Vec<String>> {
    words.chunks(ROW_WIDTH).map(<[String]>::to_vec).collect()
}
