use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Deserialize)]
struct GlyphConfig {
    #[serde(alias = "ascii_to_wingdings")]
    ascii_to_glyph: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GlyphConfigError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("glyph table is empty")]
    Empty,
    #[error("key must be a single character: {0:?}")]
    InvalidKey(String),
    #[error("non-ASCII key: {0:?}")]
    NonAsciiKey(char),
    #[error("glyph for {key:?} must be a single character, got {value:?}")]
    InvalidGlyph { key: char, value: String },
    #[error("source {0:?} is mapped twice")]
    DuplicateSource(char),
    #[error("glyph {glyph:?} is shared by {first:?} and {second:?}")]
    DuplicateGlyph { glyph: char, first: char, second: char },
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn validate(config: GlyphConfig) -> Result<Vec<(char, char)>, GlyphConfigError> {
    let mut pairs = Vec::with_capacity(config.ascii_to_glyph.len());
    for (key, value) in config.ascii_to_glyph {
        let source = single_char(&key).ok_or_else(|| GlyphConfigError::InvalidKey(key.clone()))?;
        if !source.is_ascii() {
            return Err(GlyphConfigError::NonAsciiKey(source));
        }
        let glyph = single_char(&value).ok_or(GlyphConfigError::InvalidGlyph {
            key: source,
            value: value.clone(),
        })?;
        pairs.push((source, glyph));
    }
    Ok(pairs)
}

/// Parse an `[ascii_to_glyph]` TOML table into (source, glyph) pairs.
///
/// Invertibility is checked by `GlyphMap::from_pairs`, not here.
pub fn parse_glyph_toml(toml_str: &str) -> Result<Vec<(char, char)>, GlyphConfigError> {
    let config: GlyphConfig =
        toml::from_str(toml_str).map_err(|e| GlyphConfigError::Parse(e.to_string()))?;
    validate(config)
}

/// Parse a `{"ascii_to_glyph": {...}}` JSON document into (source, glyph) pairs.
/// `ascii_to_wingdings` is accepted as the table name too.
pub fn parse_glyph_json(json: &str) -> Result<Vec<(char, char)>, GlyphConfigError> {
    let config: GlyphConfig =
        serde_json::from_str(json).map_err(|e| GlyphConfigError::Parse(e.to_string()))?;
    validate(config)
}
