//! Shared catalog fixture for integration tests.

#![allow(dead_code)]

use rust_deckconv::{CardDefinition, InMemoryCatalog, Printing, ReleaseDate};

fn printing(set: &str, year: u16, month: u8) -> Printing {
    Printing::new(set, ReleaseDate::new(year, month))
}

/// Names registered by `catalog()`, in ID order.
pub const CARD_NAMES: [&str; 10] = [
    "Lightning Bolt",
    "Lightning Helix",
    "Negate",
    "Counterspell",
    "Island",
    "Sol Ring",
    "Fire // Ice",
    "Plains",
    "Goblin Guide",
    "Akroma, Angel of Wrath",
];

/// Small catalog with multi-printing cards, a designated default, a split
/// card and a card without printings.
pub fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::from_cards([
        CardDefinition::new("Lightning Bolt")
            .with_printing(printing("LEA", 1993, 8))
            .with_printing(printing("M10", 2009, 7)),
        CardDefinition::new("Lightning Helix").with_printing(printing("RAV", 2005, 10)),
        CardDefinition::new("Negate").with_printing(printing("M19", 2018, 7)),
        CardDefinition::new("Counterspell")
            .with_printing(printing("7ED", 2001, 4))
            .with_printing(printing("MH2", 2021, 6)),
        CardDefinition::new("Island")
            .with_printing(printing("UNH", 2004, 11))
            .with_printing(printing("M10", 2009, 7))
            .with_printing(printing("DMU", 2022, 9))
            .with_default_printing("M10"),
        CardDefinition::new("Sol Ring").with_printing(printing("C21", 2021, 4)),
        CardDefinition::new("Fire // Ice").with_printing(printing("APC", 2001, 6)),
        CardDefinition::new("Plains"),
        CardDefinition::new("Goblin Guide").with_printing(printing("ZEN", 2009, 10)),
        CardDefinition::new("Akroma, Angel of Wrath")
            .with_printing(printing("LGN", 2003, 1))
            .with_printing(printing("TSB", 2006, 10)),
    ])
    .expect("fixture catalog is valid")
}
