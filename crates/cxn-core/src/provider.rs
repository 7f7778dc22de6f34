//! Puzzle datasets and their normalization into the canonical [`Puzzle`] shape.
//!
//! Two storage shapes exist for category data. The canonical one is an ordered
//! list of `{commonality, level, members}`; the keyed one maps each label to
//! `{level, members}`. Both are read into [`RawGroups`] and resolved here, so a
//! session only ever sees [`Puzzle`].

use crate::error::ProviderError;
use crate::puzzle::{Category, Puzzle};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ORIG_DATASET: &str = include_str!("../data/orig.json");
const NYT_DATASET: &str = include_str!("../data/nyt.json");

/// Identifies a puzzle dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleSource {
    /// House puzzles, stored in canonical shape
    Orig,
    /// Archive puzzles, stored keyed by category label
    Nyt,
}

impl PuzzleSource {
    pub const ALL: [PuzzleSource; 2] = [PuzzleSource::Orig, PuzzleSource::Nyt];

    /// The next source in cycling order
    pub fn next(self) -> Self {
        match self {
            PuzzleSource::Orig => PuzzleSource::Nyt,
            PuzzleSource::Nyt => PuzzleSource::Orig,
        }
    }
}

impl Default for PuzzleSource {
    fn default() -> Self {
        Self::Orig
    }
}

impl fmt::Display for PuzzleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleSource::Orig => write!(f, "orig"),
            PuzzleSource::Nyt => write!(f, "nyt"),
        }
    }
}

impl FromStr for PuzzleSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "orig" => Ok(PuzzleSource::Orig),
            "nyt" => Ok(PuzzleSource::Nyt),
            other => Err(format!("unknown puzzle source '{}' (expected orig or nyt)", other)),
        }
    }
}

/// Category body in the keyed shape; the label lives in the map key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeyedCategory {
    pub level: u32,
    pub members: Vec<String>,
}

/// Category data as stored, before normalization
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawGroups {
    /// Already an ordered list of categories
    Canonical(Vec<Category>),
    /// Label -> category, in document order
    KeyedByLabel(IndexMap<String, KeyedCategory>),
}

impl RawGroups {
    /// Resolve into canonical categories, keeping document order
    pub fn into_categories(self) -> Vec<Category> {
        match self {
            RawGroups::Canonical(groups) => groups,
            RawGroups::KeyedByLabel(groups) => groups
                .into_iter()
                .map(|(label, body)| Category {
                    commonality: label,
                    level: body.level,
                    members: body.members,
                })
                .collect(),
        }
    }
}

/// A dataset record as stored
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawPuzzle {
    pub id: u32,
    pub groups: RawGroups,
    #[serde(rename = "startingGroups")]
    pub starting_groups: Vec<Vec<String>>,
}

impl RawPuzzle {
    /// Convert into the canonical shape
    pub fn normalize(self) -> Puzzle {
        Puzzle {
            id: self.id,
            groups: self.groups.into_categories(),
            starting_groups: self.starting_groups,
        }
    }
}

/// Supplies canonical puzzles on demand
pub trait PuzzleProvider {
    /// Look up the puzzle whose declared id equals `index`
    fn fetch_puzzle(&self, index: u32, source: PuzzleSource) -> Result<Puzzle, ProviderError>;

    /// Number of puzzles available for a source
    fn count_puzzles(&self, source: PuzzleSource) -> usize;
}

/// Serves puzzles from datasets compiled into the binary
#[derive(Debug, Clone)]
pub struct BundledProvider {
    orig: Vec<RawPuzzle>,
    nyt: Vec<RawPuzzle>,
}

impl BundledProvider {
    /// Load the bundled datasets
    pub fn new() -> Result<Self, ProviderError> {
        Self::from_json(ORIG_DATASET, NYT_DATASET)
    }

    /// Load datasets from JSON text
    pub fn from_json(orig: &str, nyt: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            orig: parse_dataset(PuzzleSource::Orig, orig)?,
            nyt: parse_dataset(PuzzleSource::Nyt, nyt)?,
        })
    }

    fn dataset(&self, source: PuzzleSource) -> &[RawPuzzle] {
        match source {
            PuzzleSource::Orig => &self.orig,
            PuzzleSource::Nyt => &self.nyt,
        }
    }

    /// Declared ids of every puzzle in a source, in dataset order
    pub fn ids(&self, source: PuzzleSource) -> Vec<u32> {
        self.dataset(source).iter().map(|p| p.id).collect()
    }
}

fn parse_dataset(source: PuzzleSource, json: &str) -> Result<Vec<RawPuzzle>, ProviderError> {
    let puzzles: Vec<RawPuzzle> = serde_json::from_str(json).map_err(|error| {
        ProviderError::Dataset {
            dataset: source,
            error,
        }
    })?;
    tracing::debug!(%source, count = puzzles.len(), "parsed puzzle dataset");
    Ok(puzzles)
}

impl PuzzleProvider for BundledProvider {
    fn fetch_puzzle(&self, index: u32, source: PuzzleSource) -> Result<Puzzle, ProviderError> {
        let raw = self
            .dataset(source)
            .iter()
            .find(|p| p.id == index)
            .ok_or(ProviderError::NotFound {
                dataset: source,
                index,
            })?;

        let puzzle = raw.clone().normalize();
        puzzle.validate().map_err(|error| ProviderError::Invalid {
            dataset: source,
            index,
            error,
        })?;
        Ok(puzzle)
    }

    fn count_puzzles(&self, source: PuzzleSource) -> usize {
        self.dataset(source).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;
    use std::collections::HashSet;

    const KEYED: &str = r#"[
        {
            "id": 4,
            "groups": {
                "ZEBRA LABEL": { "level": 3, "members": ["a", "b", "c", "d"] },
                "ALPHA LABEL": { "level": 0, "members": ["e", "f", "g", "h"] }
            },
            "startingGroups": [["a", "e", "b", "f"], ["c", "g", "d", "h"]]
        }
    ]"#;

    const CANONICAL: &str = r#"[
        {
            "id": 9,
            "groups": [
                { "commonality": "Firsts", "level": 1, "members": ["a", "b", "c", "d"] },
                { "commonality": "Seconds", "level": 2, "members": ["e", "f", "g", "h"] }
            ],
            "startingGroups": [["a", "e", "b", "f"], ["c", "g", "d", "h"]]
        },
        {
            "id": 10,
            "groups": [
                { "commonality": "Broken", "level": 1, "members": ["a", "b", "c"] }
            ],
            "startingGroups": [["a", "b", "c"]]
        }
    ]"#;

    #[test]
    fn test_bundled_datasets_hold_invariants() {
        let provider = BundledProvider::new().unwrap();
        for source in PuzzleSource::ALL {
            assert!(provider.count_puzzles(source) > 0);
            for id in provider.ids(source) {
                let puzzle = provider.fetch_puzzle(id, source).unwrap();

                let laid_out: HashSet<&String> = puzzle.starting_groups.iter().flatten().collect();
                let members: HashSet<&String> =
                    puzzle.groups.iter().flat_map(|g| g.members.iter()).collect();
                assert_eq!(laid_out, members, "{} puzzle {}", source, id);
                assert_eq!(
                    puzzle.starting_groups.iter().map(Vec::len).sum::<usize>(),
                    puzzle.word_count()
                );
            }
        }
    }

    #[test]
    fn test_keyed_groups_normalized_in_document_order() {
        let provider = BundledProvider::from_json("[]", KEYED).unwrap();
        let puzzle = provider.fetch_puzzle(4, PuzzleSource::Nyt).unwrap();

        let labels: Vec<&str> = puzzle.groups.iter().map(|g| g.commonality.as_str()).collect();
        assert_eq!(labels, vec!["ZEBRA LABEL", "ALPHA LABEL"]);
        assert_eq!(puzzle.groups[0].level, 3);
        assert_eq!(puzzle.groups[1].members, vec!["e", "f", "g", "h"]);
    }

    #[test]
    fn test_canonical_groups_pass_through() {
        let provider = BundledProvider::from_json(CANONICAL, "[]").unwrap();
        let puzzle = provider.fetch_puzzle(9, PuzzleSource::Orig).unwrap();
        assert_eq!(puzzle.id, 9);
        assert_eq!(puzzle.groups[1].commonality, "Seconds");
        assert_eq!(provider.count_puzzles(PuzzleSource::Orig), 2);
        assert_eq!(provider.count_puzzles(PuzzleSource::Nyt), 0);
    }

    #[test]
    fn test_lookup_is_by_declared_id() {
        let provider = BundledProvider::from_json(CANONICAL, KEYED).unwrap();

        // Position 0 in the orig dataset is id 9, so index 0 does not exist
        let err = provider.fetch_puzzle(0, PuzzleSource::Orig).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::NotFound {
                dataset: PuzzleSource::Orig,
                index: 0
            }
        ));

        let err = provider.fetch_puzzle(9, PuzzleSource::Nyt).unwrap_err();
        assert!(matches!(err, ProviderError::NotFound { index: 9, .. }));
    }

    #[test]
    fn test_invalid_record_rejected() {
        let provider = BundledProvider::from_json(CANONICAL, "[]").unwrap();
        let err = provider.fetch_puzzle(10, PuzzleSource::Orig).unwrap_err();
        match err {
            ProviderError::Invalid { index, error, .. } => {
                assert_eq!(index, 10);
                assert!(matches!(error, PuzzleError::GroupSize { size: 3, .. }));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_malformed_dataset() {
        let err = BundledProvider::from_json("{ not json", "[]").unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Dataset {
                dataset: PuzzleSource::Orig,
                ..
            }
        ));
    }

    #[test]
    fn test_source_parsing() {
        assert_eq!("orig".parse::<PuzzleSource>(), Ok(PuzzleSource::Orig));
        assert_eq!("NYT".parse::<PuzzleSource>(), Ok(PuzzleSource::Nyt));
        assert!("daily".parse::<PuzzleSource>().is_err());
        assert_eq!(PuzzleSource::Orig.next(), PuzzleSource::Nyt);
        assert_eq!(PuzzleSource::Nyt.next().to_string(), "orig");
    }
}
