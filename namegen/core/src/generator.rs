//! Name Generator
//!
//! Produces `"<word1> <word2>"` by sampling one word from each of a preset's
//! lists. Each word is capped at [`WORD_MAX_LEN`] characters; the combined
//! string gets no further cap, so a name is at most `2 * 40 + 1` characters.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::preset::Preset;
use crate::text::{pick_random, truncate, WORD_MAX_LEN};

/// Identifies one of a preset's two word lists
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordList {
    /// `wordlist1`, sampled for the first word
    First,
    /// `wordlist2`, sampled for the second word
    Second,
}

impl fmt::Display for WordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "wordlist1"),
            Self::Second => write!(f, "wordlist2"),
        }
    }
}

/// Generation precondition failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The preset has nothing to sample from
    #[error("preset '{preset}' has an empty {list}")]
    EmptyWordList {
        /// Name of the offending preset
        preset: String,
        /// Which list was empty
        list: WordList,
    },

    /// Regenerate was requested with no preset selected
    #[error("no preset selected")]
    NoPresetSelected,
}

/// Random two-word name generator
///
/// Holds its own RNG so tests can seed it; no other state survives between
/// calls.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    rng: StdRng,
}

impl NameGenerator {
    /// Generator seeded from OS entropy
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for tests and reproducible runs
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a name from `preset`
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::EmptyWordList`] if either list is empty.
    pub fn generate(&mut self, preset: &Preset) -> Result<String, GenerateError> {
        let first = self.pick_word(preset, WordList::First)?;
        let second = self.pick_word(preset, WordList::Second)?;
        Ok(format!("{first} {second}"))
    }

    fn pick_word(&mut self, preset: &Preset, list: WordList) -> Result<String, GenerateError> {
        let words = match list {
            WordList::First => &preset.wordlist1,
            WordList::Second => &preset.wordlist2,
        };

        pick_random(words, &mut self.rng)
            .map(|word| truncate(word, WORD_MAX_LEN))
            .ok_or_else(|| GenerateError::EmptyWordList {
                preset: preset.name.clone(),
                list,
            })
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}
