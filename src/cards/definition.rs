//! Card definitions - identity and printings.
//!
//! A `CardDefinition` is one card identity ("Lightning Bolt") together
//! with every printing of it that the catalog knows about. The identity
//! is addressed by an opaque `CardId`; a printing by its `SetCode`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ReleaseDate;

/// Opaque handle to a card identity in a catalog.
///
/// Only meaningful for the catalog that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Set code identifying a printing ("M10", "7ED").
///
/// Set codes are case-insensitive; they are stored upper-cased.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SetCode(String);

impl SetCode {
    /// Create a set code, normalizing case and surrounding whitespace.
    ///
    /// ```
    /// use rust_deckconv::cards::SetCode;
    ///
    /// assert_eq!(SetCode::new(" m10 ").as_str(), "M10");
    /// assert_eq!(SetCode::new("m10"), SetCode::new("M10"));
    /// ```
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the code can be written after a `|` in a deck line and read
    /// back: non-empty, with no whitespace, `|` or `*`.
    ///
    /// ```
    /// use rust_deckconv::cards::SetCode;
    ///
    /// assert!(SetCode::new("DD3_EVG").is_well_formed());
    /// assert!(!SetCode::new("M 10").is_well_formed());
    /// assert!(!SetCode::new("").is_well_formed());
    /// ```
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && !self
                .0
                .chars()
                .any(|c| c.is_whitespace() || c == '|' || c == '*')
    }
}

impl From<String> for SetCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&str> for SetCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<SetCode> for String {
    fn from(code: SetCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for SetCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One published edition of a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Printing {
    pub set: SetCode,

    /// Release month. Printings without a date sort before dated ones.
    #[serde(default)]
    pub released: Option<ReleaseDate>,
}

impl Printing {
    #[must_use]
    pub fn new(set: impl Into<SetCode>, released: Option<ReleaseDate>) -> Self {
        Self {
            set: set.into(),
            released,
        }
    }

    /// Is this printing available under an optional release cutoff?
    #[must_use]
    pub fn released_by(&self, cutoff: Option<ReleaseDate>) -> bool {
        match (cutoff, self.released) {
            (Some(cutoff), Some(released)) => released <= cutoff,
            _ => true,
        }
    }
}

/// A card identity and its printings.
///
/// ## Example
///
/// ```
/// use rust_deckconv::cards::{CardDefinition, Printing, SetCode};
/// use rust_deckconv::core::ReleaseDate;
///
/// let bolt = CardDefinition::new("Lightning Bolt")
///     .with_printing(Printing::new("LEA", ReleaseDate::new(1993, 8)))
///     .with_printing(Printing::new("M10", ReleaseDate::new(2009, 7)));
///
/// assert_eq!(bolt.default_printing(None).unwrap().set, SetCode::new("M10"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Canonical card name.
    pub name: String,

    /// Known printings, in catalog order.
    #[serde(default)]
    pub printings: SmallVec<[Printing; 4]>,

    /// Printing designated as the default. When absent the most recent
    /// printing is the default.
    #[serde(default)]
    pub default_printing: Option<SetCode>,
}

impl CardDefinition {
    /// Create a card with no printings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            printings: SmallVec::new(),
            default_printing: None,
        }
    }

    /// Add a printing (builder pattern).
    #[must_use]
    pub fn with_printing(mut self, printing: Printing) -> Self {
        self.printings.push(printing);
        self
    }

    /// Designate the default printing (builder pattern).
    #[must_use]
    pub fn with_default_printing(mut self, set: impl Into<SetCode>) -> Self {
        self.default_printing = Some(set.into());
        self
    }

    /// Find the printing with the given set code.
    #[must_use]
    pub fn printing(&self, set: &SetCode) -> Option<&Printing> {
        self.printings.iter().find(|p| &p.set == set)
    }

    /// The default printing among those available under `cutoff`.
    ///
    /// The designated default wins when it is available; otherwise the
    /// most recent available printing, the last listed one on ties.
    #[must_use]
    pub fn default_printing(&self, cutoff: Option<ReleaseDate>) -> Option<&Printing> {
        if let Some(designated) = &self.default_printing {
            if let Some(printing) = self.printing(designated).filter(|p| p.released_by(cutoff)) {
                return Some(printing);
            }
        }

        self.printings
            .iter()
            .filter(|p| p.released_by(cutoff))
            .max_by_key(|p| p.released)
    }
}
