//! Canonical deck format.
//!
//! Writes a finalized `Deck` as DCK text:
//!
//! ```text
//! [metadata]
//! Name=Burn
//! Format=Modern
//! [Main]
//! 4 Lightning Bolt
//! 2 Counterspell|7ED
//! 1 Island|UNH *F*
//! [Sideboard]
//! 2 Negate
//! ```
//!
//! `[Main]` is always written, other sections only when they hold entries.
//! A set code is written only when the entry's printing is not the
//! catalog's default printing. Output is deterministic and reads back
//! through the recognizer into the same deck.

use std::fmt::Write;

use crate::cards::CardCatalog;
use crate::core::SerializeError;
use crate::deck::{Deck, DeckEntry, DeckSection, Section};
use crate::recognizer::MetadataKey;

/// Marker appended to foil entries.
pub const FOIL_MARKER: &str = "*F*";

/// Serialize a deck to a string.
///
/// `catalog` must be the catalog the deck was resolved against.
pub fn serialize_deck<C: CardCatalog + ?Sized>(
    deck: &Deck,
    catalog: &C,
) -> Result<String, SerializeError> {
    let mut out = String::new();
    write_deck(deck, catalog, &mut out)?;
    Ok(out)
}

/// Write a deck to any `fmt::Write` sink.
pub fn write_deck<C: CardCatalog + ?Sized>(
    deck: &Deck,
    catalog: &C,
    out: &mut impl Write,
) -> Result<(), SerializeError> {
    writeln!(out, "[metadata]")?;
    if !deck.name().is_empty() {
        writeln!(out, "{}={}", MetadataKey::Name.as_str(), deck.name())?;
    }
    if let Some(format) = deck.format() {
        writeln!(out, "{}={}", MetadataKey::Format.as_str(), format)?;
    }

    for DeckSection { section, entries } in deck.sections() {
        if entries.is_empty() && *section != Section::Main {
            continue;
        }
        writeln!(out, "[{}]", section.header_name())?;
        for entry in entries {
            write_entry(entry, catalog, out)?;
        }
    }
    Ok(())
}

fn write_entry<C: CardCatalog + ?Sized>(
    entry: &DeckEntry,
    catalog: &C,
    out: &mut impl Write,
) -> Result<(), SerializeError> {
    let card = catalog
        .card(entry.card)
        .ok_or(SerializeError::UnknownCard(entry.card))?;

    write!(out, "{} {}", entry.quantity, card.name)?;

    let default = card.default_printing(None).map(|p| &p.set);
    if let Some(printing) = entry.printing.as_ref().filter(|&p| Some(p) != default) {
        write!(out, "|{printing}")?;
    }
    if entry.foil {
        write!(out, " {FOIL_MARKER}")?;
    }
    writeln!(out)?;
    Ok(())
}
