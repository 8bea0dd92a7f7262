//! Line classifier.
//!
//! Maps one line of text to exactly one `Token`. Rules are tried in a
//! fixed priority order and the first that matches wins:
//!
//! 1. blank
//! 2. comment (`//`, `#`)
//! 3. section header (`Sideboard`, `[Main]`, `Commander:`, `Deck (60)`)
//! 4. metadata field (`Name=...`, `Format: ...`)
//! 5. category line (`Creatures (20)`)
//! 6. card line (`4 Lightning Bolt`, `4x Lightning Bolt (M10) 146 *F*`,
//!    `SB: 2 Negate`, `1 Island|UNH`)
//! 7. unrecognized
//!
//! Inside a metadata block (`[metadata]`, `About`) `classify_metadata_line`
//! runs first, so `Name Mono Red` and `Description=...` are read as fields
//! rather than card lines.
//!
//! Classification never fails.

use std::sync::LazyLock;

use regex::Regex;

use super::token::{CardLine, MetadataField, MetadataKey, SectionTag, Token, TokenKind};
use crate::cards::SetCode;
use crate::deck::Section;

static BRACKETED_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\s*([^\]]*?)\s*\]\s*:?$").unwrap());

static PLAIN_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z ]*?)\s*(?:\(\s*\d+\s*\))?\s*:?$").unwrap()
});

static METADATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(name|format)\s*[=:]\s*(\S.*)$").unwrap());

/// Arena `About` block field: `Name Mono Red`.
static BARE_METADATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(name|format)\s+(\S.*)$").unwrap());

/// Any `key=value` field of a metadata block, e.g. `Deck Type=constructed`.
static BLOCK_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9 _\-]*?)\s*[=:]\s*(.*)$").unwrap()
});

static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(creatures?|lands?|instants?|sorcery|sorceries|artifacts?|enchantments?|planeswalkers?|battles?|spells?|others?)\s*(?:\(\s*\d+\s*\))?\s*:?$",
    )
    .unwrap()
});

static CARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:(?P<sb>(?i:sb)):\s*)?",
        r"(?:(?P<qty>\d+)\s*[xX]?\s+)?",
        r"(?P<name>[^|]+?)",
        r"(?:\s+[\(\[](?P<set>[0-9_]*[A-Za-z][A-Za-z0-9_\-]*)[\)\]](?:\s+[0-9A-Za-z\-]+)?)?",
        r"(?:\s*\|\s*(?P<pipe_set>[^\s|*]+)(?:\|\S*)?)?",
        r"(?:\s+(?P<foil>\*[Ff]\*))?",
        r"$",
    ))
    .unwrap()
});

/// Classify one input line.
///
/// ```
/// use rust_deckconv::recognizer::{classify_line, TokenKind};
///
/// let token = classify_line(1, "4 Lightning Bolt");
/// let TokenKind::Card(card) = token.kind else { panic!("expected a card line") };
/// assert_eq!(card.quantity, 4);
/// assert_eq!(card.name, "Lightning Bolt");
/// ```
#[must_use]
pub fn classify_line(line: usize, text: &str) -> Token {
    Token::new(line, classify(text))
}

/// Classify a line read inside a metadata block.
///
/// Returns `None` for lines the block does not claim (blank lines,
/// comments, headers, card lines), which fall back to `classify_line`.
///
/// ```
/// use rust_deckconv::recognizer::{classify_metadata_line, TokenKind};
///
/// let token = classify_metadata_line(2, "Name Mono Red").unwrap();
/// let TokenKind::Metadata(field) = token.kind else { panic!("expected a field") };
/// assert_eq!(field.value, "Mono Red");
///
/// assert!(classify_metadata_line(3, "4 Lightning Bolt").is_none());
/// ```
#[must_use]
pub fn classify_metadata_line(line: usize, text: &str) -> Option<Token> {
    let trimmed = text.trim();
    if trimmed.is_empty()
        || trimmed.starts_with("//")
        || trimmed.starts_with('#')
        || section_header(trimmed).is_some()
    {
        return None;
    }

    let field = metadata_field(trimmed).or_else(|| {
        let caps = BARE_METADATA_RE.captures(trimmed)?;
        Some(MetadataField {
            key: metadata_key(&caps[1]),
            value: caps[2].trim().to_string(),
        })
    });
    if let Some(field) = field {
        return Some(Token::new(line, TokenKind::Metadata(field)));
    }

    let caps = BLOCK_FIELD_RE.captures(trimmed)?;
    Some(Token::new(
        line,
        TokenKind::ExtraMetadata {
            key: caps[1].trim().to_string(),
            value: caps[2].trim().to_string(),
        },
    ))
}

fn classify(text: &str) -> TokenKind {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return TokenKind::Blank;
    }
    if trimmed.starts_with("//") || trimmed.starts_with('#') {
        return TokenKind::Comment(trimmed.to_string());
    }
    if let Some(tag) = section_header(trimmed) {
        return TokenKind::SectionHeader {
            tag,
            label: trimmed.to_string(),
        };
    }
    if let Some(field) = metadata_field(trimmed) {
        return TokenKind::Metadata(field);
    }
    if CATEGORY_RE.is_match(trimmed) {
        return TokenKind::Category(trimmed.to_string());
    }
    match card_line(trimmed) {
        Some(card) => TokenKind::Card(card),
        None => TokenKind::Unrecognized(text.to_string()),
    }
}

fn section_header(text: &str) -> Option<SectionTag> {
    if let Some(caps) = BRACKETED_HEADER_RE.captures(text) {
        return Some(header_keyword(&caps[1]).unwrap_or(SectionTag::Deck(Section::Unknown)));
    }
    PLAIN_HEADER_RE
        .captures(text)
        .and_then(|caps| header_keyword(&caps[1]))
}

fn header_keyword(keyword: &str) -> Option<SectionTag> {
    let keyword = keyword
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let tag = match keyword.as_str() {
        "main" | "maindeck" | "main deck" | "mainboard" | "deck" => SectionTag::Deck(Section::Main),
        "sideboard" | "side" | "side board" | "sb" | "companion" => {
            SectionTag::Deck(Section::Sideboard)
        }
        "commander" | "commanders" => SectionTag::Deck(Section::Commander),
        "planes" | "planar deck" => SectionTag::Deck(Section::Planes),
        "schemes" | "scheme" | "scheme deck" => SectionTag::Deck(Section::Scheme),
        "metadata" | "about" => SectionTag::Metadata,
        _ => return None,
    };
    Some(tag)
}

fn metadata_field(text: &str) -> Option<MetadataField> {
    let caps = METADATA_RE.captures(text)?;
    Some(MetadataField {
        key: metadata_key(&caps[1]),
        value: caps[2].trim().to_string(),
    })
}

fn metadata_key(key: &str) -> MetadataKey {
    if key.eq_ignore_ascii_case("name") {
        MetadataKey::Name
    } else {
        MetadataKey::Format
    }
}

fn card_line(text: &str) -> Option<CardLine> {
    let caps = CARD_RE.captures(text)?;

    let quantity = match caps.name("qty") {
        Some(qty) => qty.as_str().parse::<u32>().ok().filter(|&q| q > 0)?,
        None => 1,
    };

    let name = normalize_name(caps.name("name")?.as_str());
    if !name.chars().any(char::is_alphabetic) {
        return None;
    }
    // Without a quantity, only accept lines that look like a card name.
    if caps.name("qty").is_none() && !name.chars().next().is_some_and(char::is_alphabetic) {
        return None;
    }

    Some(CardLine {
        quantity,
        name,
        set: caps
            .name("set")
            .or_else(|| caps.name("pipe_set"))
            .map(|m| SetCode::new(m.as_str())),
        foil: caps.name("foil").is_some(),
        section_override: caps.name("sb").map(|_| Section::Sideboard),
    })
}

fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
