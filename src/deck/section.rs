//! Deck sections.

use serde::{Deserialize, Serialize};

/// A named partition of a deck.
///
/// `Unknown` is only ever produced by section headers the recognizer does
/// not understand; no deck entry is ever filed under it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    #[default]
    Main,
    Sideboard,
    Commander,
    Planes,
    Scheme,
    Unknown,
}

impl Section {
    /// Sections a deck holds, in canonical output order.
    pub const CANONICAL: [Section; 5] = [
        Section::Main,
        Section::Sideboard,
        Section::Commander,
        Section::Planes,
        Section::Scheme,
    ];

    /// Position in `CANONICAL`, or `None` for `Unknown`.
    #[must_use]
    pub const fn canonical_index(self) -> Option<usize> {
        match self {
            Section::Main => Some(0),
            Section::Sideboard => Some(1),
            Section::Commander => Some(2),
            Section::Planes => Some(3),
            Section::Scheme => Some(4),
            Section::Unknown => None,
        }
    }

    /// Name used for this section's header in the canonical format.
    #[must_use]
    pub const fn header_name(self) -> &'static str {
        match self {
            Section::Main => "Main",
            Section::Sideboard => "Sideboard",
            Section::Commander => "Commander",
            Section::Planes => "Planes",
            Section::Scheme => "Schemes",
            Section::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header_name())
    }
}
