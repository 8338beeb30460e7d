//! Presets and the Preset Catalog
//!
//! A preset is a named bundle of two word lists. Presets are parsed from JSON
//! documents of the form:
//!
//! ```json
//! {
//!   "name": "Elegant Penguin",
//!   "author": "namegen",
//!   "wordlist1": ["Elegant", "Quiet"],
//!   "wordlist2": ["Penguin", "Otter"]
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generator::WordList;
use crate::text::{truncate, SELECTOR_LABEL_MAX_LEN};

/// Errors produced while turning a resource body into a [`Preset`]
#[derive(Debug, Error)]
pub enum PresetError {
    /// Body was not a valid preset document
    #[error("malformed preset document: {0}")]
    Parse(#[from] serde_json::Error),

    /// One of the word lists has no entries
    #[error("preset has an empty {list}")]
    EmptyWordList {
        /// Which list was empty
        list: WordList,
    },
}

/// A named bundle of two word lists
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Display name
    pub name: String,
    /// Who put the lists together
    pub author: String,
    /// Candidates for the first word
    pub wordlist1: Vec<String>,
    /// Candidates for the second word
    pub wordlist2: Vec<String>,
}

impl Preset {
    /// Create a preset from its parts
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        wordlist1: Vec<String>,
        wordlist2: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            wordlist1,
            wordlist2,
        }
    }

    /// Parse and validate a preset document
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::Parse`] for malformed JSON and
    /// [`PresetError::EmptyWordList`] if either list is empty.
    pub fn from_json(body: &str) -> Result<Self, PresetError> {
        let preset: Preset = serde_json::from_str(body)?;
        preset.validate()?;
        Ok(preset)
    }

    /// Check that both word lists can be sampled
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::EmptyWordList`] naming the first empty list.
    pub fn validate(&self) -> Result<(), PresetError> {
        if self.wordlist1.is_empty() {
            return Err(PresetError::EmptyWordList {
                list: WordList::First,
            });
        }
        if self.wordlist2.is_empty() {
            return Err(PresetError::EmptyWordList {
                list: WordList::Second,
            });
        }
        Ok(())
    }

    /// Label shown for this preset in the selector
    #[must_use]
    pub fn selector_label(&self) -> String {
        truncate(
            &format!("{} by {}", self.name, self.author),
            SELECTOR_LABEL_MAX_LEN,
        )
    }
}

/// Ordered set of loaded presets plus the current selection
///
/// The selected index, when set, always points at an existing preset.
#[derive(Clone, Debug, Default)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
    selected: Option<usize>,
}

impl PresetCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with freshly loaded presets
    ///
    /// Selects the first preset, or nothing if `presets` is empty.
    pub fn populate(&mut self, presets: Vec<Preset>) {
        self.selected = if presets.is_empty() { None } else { Some(0) };
        self.presets = presets;
    }

    /// Select the preset at `index`
    ///
    /// Out-of-range indices are ignored and return `None`.
    pub fn select(&mut self, index: usize) -> Option<&Preset> {
        if index >= self.presets.len() {
            return None;
        }
        self.selected = Some(index);
        self.presets.get(index)
    }

    /// Currently selected preset
    #[must_use]
    pub fn current(&self) -> Option<&Preset> {
        self.selected.and_then(|i| self.presets.get(i))
    }

    /// Index of the currently selected preset
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Whether `index` names a loaded preset
    #[must_use]
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.presets.len()
    }

    /// All presets in load order
    #[must_use]
    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Number of loaded presets
    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether nothing has been loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// One selector option label per preset, in catalog order
    #[must_use]
    pub fn selector_options(&self) -> Vec<String> {
        self.presets.iter().map(Preset::selector_label).collect()
    }
}
