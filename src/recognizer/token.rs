//! Tokens produced by the line classifier.
//!
//! One token per input line. Tokens are plain values: once classified, a
//! line's token never changes; section routing travels alongside it.

use serde::{Deserialize, Serialize};

use crate::cards::SetCode;
use crate::deck::Section;

/// A classified input line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// 1-based line number in the input.
    pub line: usize,
    pub kind: TokenKind,
}

impl Token {
    #[must_use]
    pub fn new(line: usize, kind: TokenKind) -> Self {
        Self { line, kind }
    }
}

/// What a line was recognized as.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// `<quantity> <card name>` with optional printing and foil marker.
    Card(CardLine),
    /// A line that switches the current section.
    SectionHeader { tag: SectionTag, label: String },
    /// `Name=...` or `Format: ...`.
    Metadata(MetadataField),
    /// Any other field of a metadata block, such as `Description=...`.
    /// The deck model has no place for it.
    ExtraMetadata { key: String, value: String },
    /// Card-type grouping line such as `Creatures (20)`. Carries no content.
    Category(String),
    Comment(String),
    Blank,
    /// Anything else, verbatim.
    Unrecognized(String),
}

/// A parsed card line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLine {
    /// Always at least 1.
    pub quantity: u32,
    /// Card name with whitespace normalized.
    pub name: String,
    /// Requested printing.
    pub set: Option<SetCode>,
    pub foil: bool,
    /// Section forced by a per-line prefix (`SB:`), overriding the cursor.
    pub section_override: Option<Section>,
}

impl CardLine {
    /// Card line with quantity and name only.
    #[must_use]
    pub fn new(quantity: u32, name: impl Into<String>) -> Self {
        Self {
            quantity,
            name: name.into(),
            set: None,
            foil: false,
            section_override: None,
        }
    }
}

/// Target of a section header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionTag {
    /// A deck section. `Section::Unknown` for headers not understood.
    Deck(Section),
    /// The metadata block (`[metadata]`, `About`). Holds no cards.
    Metadata,
}

/// Metadata fields understood in deck text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetadataKey {
    Name,
    Format,
}

impl MetadataKey {
    /// Key as written in the canonical format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetadataKey::Name => "Name",
            MetadataKey::Format => "Format",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    pub key: MetadataKey,
    pub value: String,
}
