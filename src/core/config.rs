//! Conversion configuration.
//!
//! Hosts configure a conversion by providing a `ConvertOptions` value:
//! - `prefix_matching`: allow unique-prefix name resolution
//! - `release_cutoff`: ignore printings released after a given month
//!
//! The pipeline never asks anything interactively - every choice it makes
//! is driven by this value.

use serde::{Deserialize, Serialize};

/// A release month, used to restrict which printings are candidates.
///
/// Ordered chronologically: `2009-07 < 2010-01`. Serialized as `"YYYY-MM"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReleaseDate {
    pub year: u16,
    pub month: u8,
}

impl ReleaseDate {
    /// Create a new release date.
    ///
    /// Returns `None` if `month` is not in `1..=12`.
    #[must_use]
    pub const fn new(year: u16, month: u8) -> Option<Self> {
        if month >= 1 && month <= 12 {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Parse a `YYYY-MM` string.
    ///
    /// ```
    /// use rust_deckconv::core::ReleaseDate;
    ///
    /// let date = ReleaseDate::parse("2009-07").unwrap();
    /// assert_eq!(date, ReleaseDate::new(2009, 7).unwrap());
    /// assert!(ReleaseDate::parse("2009-13").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (year, month) = text.trim().split_once('-')?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }
}

impl std::fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for ReleaseDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("expected YYYY-MM, got '{s}'"))
    }
}

impl TryFrom<String> for ReleaseDate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReleaseDate> for String {
    fn from(date: ReleaseDate) -> Self {
        date.to_string()
    }
}

/// Options for a single conversion pass.
///
/// Immutable once handed to a `Converter`; share it freely between
/// concurrent conversions.
///
/// ## Example
///
/// ```
/// use rust_deckconv::core::{ConvertOptions, ReleaseDate};
///
/// let options = ConvertOptions::new()
///     .without_prefix_matching()
///     .with_release_cutoff(ReleaseDate::new(2012, 1).unwrap());
///
/// assert!(!options.prefix_matching);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Resolve a name by a unique case-insensitive prefix when no exact
    /// match exists.
    pub prefix_matching: bool,

    /// Only printings released on or before this month are candidates.
    /// `None` considers every printing.
    pub release_cutoff: Option<ReleaseDate>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            prefix_matching: true,
            release_cutoff: None,
        }
    }
}

impl ConvertOptions {
    /// Create options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable unique-prefix name resolution.
    #[must_use]
    pub fn without_prefix_matching(mut self) -> Self {
        self.prefix_matching = false;
        self
    }

    /// Restrict printings to those released on or before `cutoff`.
    #[must_use]
    pub fn with_release_cutoff(mut self, cutoff: ReleaseDate) -> Self {
        self.release_cutoff = Some(cutoff);
        self
    }
}
