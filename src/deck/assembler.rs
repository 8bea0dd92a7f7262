//! Deck assembly.
//!
//! `DeckBuilder` accumulates resolved entries during a pass, merging
//! duplicates per section, and finalizes them into an immutable `Deck`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::entry::{DeckEntry, UnresolvedEntry};
use super::model::{Deck, DeckSection};
use super::section::Section;
use crate::cards::{CardId, SetCode};
use crate::core::{ConvertError, Diagnostic};

/// Where a deck name came from. Higher sources win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NameSource {
    /// Supplied by the caller, e.g. from the input file name.
    Derived,
    /// Written in the deck text itself.
    Explicit,
}

/// Result of a successful conversion: the deck plus everything worth
/// reporting about how it was built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub deck: Deck,
    pub diagnostics: Vec<Diagnostic>,
}

type MergeKey = (Section, CardId, Option<SetCode>, bool);

/// Accumulates a deck during a conversion pass.
///
/// ## Usage
///
/// ```
/// use rust_deckconv::cards::CardId;
/// use rust_deckconv::deck::{DeckBuilder, DeckEntry, NameSource, Section};
///
/// let mut builder = DeckBuilder::new();
/// let bolt = DeckEntry { card: CardId::new(0), quantity: 2, printing: None, foil: false };
///
/// builder.add_entry(Section::Main, bolt.clone());
/// builder.add_entry(Section::Main, bolt);
/// builder.set_name("Burn", NameSource::Explicit);
/// assert!(!builder.set_name("burn.txt", NameSource::Derived));
///
/// let conversion = builder.finish(Vec::new()).unwrap();
/// assert_eq!(conversion.deck.section(Section::Main)[0].quantity, 4);
/// assert_eq!(conversion.deck.name(), "Burn");
/// ```
#[derive(Clone, Debug)]
pub struct DeckBuilder {
    name: Option<(String, NameSource)>,
    format: Option<String>,
    sections: Vec<DeckSection>,
    /// Position of each merge key within its section's entries.
    index: FxHashMap<MergeKey, usize>,
    unresolved: Vec<UnresolvedEntry>,
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckBuilder {
    /// Create a builder with every canonical section present and empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            format: None,
            sections: Section::CANONICAL
                .iter()
                .map(|&section| DeckSection {
                    section,
                    entries: Vec::new(),
                })
                .collect(),
            index: FxHashMap::default(),
            unresolved: Vec::new(),
        }
    }

    /// Offer a deck name.
    ///
    /// The name is taken only if no name is set yet or `source` outranks
    /// the current one. Returns whether it was taken. Blank names are
    /// never taken.
    pub fn set_name(&mut self, name: impl Into<String>, source: NameSource) -> bool {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return false;
        }
        match &self.name {
            Some((_, current)) if *current >= source => false,
            _ => {
                self.name = Some((name, source));
                true
            }
        }
    }

    /// Offer a format tag. The first one wins.
    pub fn set_format(&mut self, format: impl Into<String>) -> bool {
        let format = format.into().trim().to_string();
        if format.is_empty() || self.format.is_some() {
            return false;
        }
        self.format = Some(format);
        true
    }

    /// Source of the current name, if any.
    #[must_use]
    pub fn name_source(&self) -> Option<NameSource> {
        self.name.as_ref().map(|(_, source)| *source)
    }

    /// Add an entry to a section, merging with an existing entry for the
    /// same card, printing and foil flag.
    ///
    /// Entries for `Section::Unknown` or with zero quantity are dropped.
    /// Returns `true` if the merged quantity had to be capped at `u32::MAX`.
    pub fn add_entry(&mut self, section: Section, entry: DeckEntry) -> bool {
        let Some(slot) = section.canonical_index() else {
            return false;
        };
        if entry.quantity == 0 {
            return false;
        }

        let key = (section, entry.card, entry.printing.clone(), entry.foil);
        let entries = &mut self.sections[slot].entries;
        match self.index.get(&key) {
            Some(&pos) => {
                let existing = &mut entries[pos];
                match existing.quantity.checked_add(entry.quantity) {
                    Some(total) => {
                        existing.quantity = total;
                        false
                    }
                    None => {
                        existing.quantity = u32::MAX;
                        true
                    }
                }
            }
            None => {
                self.index.insert(key, entries.len());
                entries.push(entry);
                false
            }
        }
    }

    /// Record a line whose card was not found.
    pub fn add_unresolved(&mut self, entry: UnresolvedEntry) {
        self.unresolved.push(entry);
    }

    /// True if no section holds any entry yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.entries.is_empty())
    }

    /// Finalize the deck.
    ///
    /// Fails with `ConvertError::EmptyDeck` if no section holds an entry;
    /// unresolved lines alone do not make a deck.
    pub fn finish(self, diagnostics: Vec<Diagnostic>) -> Result<Conversion, ConvertError> {
        if self.is_empty() {
            return Err(ConvertError::EmptyDeck { diagnostics });
        }

        let deck = Deck {
            name: self.name.map(|(name, _)| name).unwrap_or_default(),
            format: self.format,
            sections: self.sections,
            unresolved: self.unresolved,
        };
        Ok(Conversion { deck, diagnostics })
    }
}
