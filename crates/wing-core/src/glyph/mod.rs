//! Character-substitution cipher between ASCII and a symbol alphabet.
//!
//! `GlyphMap` is a validated bijection: the inverse is built once at load
//! time and a glyph shared by two source characters is a configuration
//! error. The forward direction uppercases its input first, so round trips
//! are exact only for text that was already uppercase.

mod config;
#[cfg(test)]
mod tests;

pub use config::{parse_glyph_json, parse_glyph_toml, GlyphConfigError};

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use tracing::debug;

const DEFAULT_TOML: &str = include_str!("default_glyphs.toml");

/// Returns the embedded glyph table TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

#[derive(Debug, Clone)]
pub struct GlyphMap {
    forward: BTreeMap<char, char>,
    inverse: HashMap<char, char>,
}

impl GlyphMap {
    /// Get or initialize the bundled Wingdings table.
    pub fn builtin() -> &'static GlyphMap {
        static INSTANCE: OnceLock<GlyphMap> = OnceLock::new();
        INSTANCE.get_or_init(|| GlyphMap::from_toml(DEFAULT_TOML).expect("glyph TOML must be valid"))
    }

    /// Build from (source, glyph) pairs, rejecting duplicate sources and
    /// duplicate glyphs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, GlyphConfigError>
    where
        I: IntoIterator<Item = (char, char)>,
    {
        let mut forward = BTreeMap::new();
        let mut inverse = HashMap::new();
        for (source, glyph) in pairs {
            if forward.insert(source, glyph).is_some() {
                return Err(GlyphConfigError::DuplicateSource(source));
            }
            if let Some(first) = inverse.insert(glyph, source) {
                return Err(GlyphConfigError::DuplicateGlyph {
                    glyph,
                    first,
                    second: source,
                });
            }
        }
        if forward.is_empty() {
            return Err(GlyphConfigError::Empty);
        }
        debug!(entries = forward.len(), "glyph map loaded");
        Ok(Self { forward, inverse })
    }

    /// Load an `[ascii_to_glyph]` TOML table.
    pub fn from_toml(toml_str: &str) -> Result<Self, GlyphConfigError> {
        Self::from_pairs(parse_glyph_toml(toml_str)?)
    }

    /// Load a `{"ascii_to_glyph": {...}}` JSON document.
    pub fn from_json(json: &str) -> Result<Self, GlyphConfigError> {
        Self::from_pairs(parse_glyph_json(json)?)
    }

    pub fn glyph(&self, source: char) -> Option<char> {
        self.forward.get(&source).copied()
    }

    pub fn source(&self, glyph: char) -> Option<char> {
        self.inverse.get(&glyph).copied()
    }

    /// Uppercase `text`, then substitute every mapped character.
    pub fn to_glyphs(&self, text: &str) -> String {
        text.to_uppercase()
            .chars()
            .map(|c| self.glyph(c).unwrap_or(c))
            .collect()
    }

    /// Substitute every glyph back to its source character.
    pub fn from_glyphs(&self, text: &str) -> String {
        text.chars().map(|c| self.source(c).unwrap_or(c)).collect()
    }

    /// (source, glyph) pairs in source order.
    pub fn entries(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.forward.iter().map(|(s, g)| (*s, *g))
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}
