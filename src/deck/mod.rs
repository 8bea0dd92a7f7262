//! Deck data model and assembly.
//!
//! ## Key Types
//!
//! - `Section`: Named deck partition (main, sideboard, commander, ...)
//! - `DeckEntry`: Resolved card, quantity, printing and foil flag
//! - `UnresolvedEntry`: Card line the catalog had no match for
//! - `Deck`: Finalized, read-only deck
//! - `DeckBuilder`: Accumulator that merges duplicates and finalizes

pub mod assembler;
pub mod entry;
pub mod model;
pub mod section;

pub use assembler::{Conversion, DeckBuilder, NameSource};
pub use entry::{DeckEntry, UnresolvedEntry};
pub use model::{Deck, DeckSection};
pub use section::Section;
