//! Resolved and unresolved deck entries.

use serde::{Deserialize, Serialize};

use super::section::Section;
use crate::cards::{CardId, SetCode};

/// A resolved line of a deck: a card identity, how many, which printing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: CardId,

    /// Always at least 1.
    pub quantity: u32,

    /// Resolved printing. `None` only for cards the catalog lists without
    /// any available printing.
    pub printing: Option<SetCode>,

    pub foil: bool,
}

/// A card line whose name matched nothing in the catalog.
///
/// Kept for reporting; never part of the playable deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedEntry {
    /// Name exactly as written in the input.
    pub name: String,
    pub quantity: u32,
    pub section: Section,
    /// 1-based line number in the input.
    pub line: usize,
}
