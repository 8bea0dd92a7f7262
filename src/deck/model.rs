//! The finalized deck.

use serde::{Deserialize, Serialize};

use super::entry::{DeckEntry, UnresolvedEntry};
use super::section::Section;

/// Entries of one section, in insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSection {
    pub section: Section,
    pub entries: Vec<DeckEntry>,
}

impl DeckSection {
    /// Total number of cards (sum of quantities), capped at `u32::MAX`.
    #[must_use]
    pub fn card_count(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |total, e| total.saturating_add(e.quantity))
    }
}

/// A structured deck, read-only once assembled.
///
/// Every canonical section is present, empty or not, in canonical order.
/// Build one with `DeckBuilder`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub(super) name: String,
    pub(super) format: Option<String>,
    pub(super) sections: Vec<DeckSection>,
    pub(super) unresolved: Vec<UnresolvedEntry>,
}

impl Deck {
    /// Deck name; empty if none was given or derived.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// All sections in canonical order.
    #[must_use]
    pub fn sections(&self) -> &[DeckSection] {
        &self.sections
    }

    /// Entries of one section. Always empty for `Section::Unknown`.
    #[must_use]
    pub fn section(&self, section: Section) -> &[DeckEntry] {
        section
            .canonical_index()
            .and_then(|i| self.sections.get(i))
            .map_or(&[], |s| s.entries.as_slice())
    }

    /// Lines whose card could not be found in the catalog.
    #[must_use]
    pub fn unresolved(&self) -> &[UnresolvedEntry] {
        &self.unresolved
    }

    /// Number of entries across all sections.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    /// True if no section holds any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}
