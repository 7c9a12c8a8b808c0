//! Kana-to-romaji transliteration engine.
//!
//! A longest-match scanner over a bundled katakana table, handling yōon and
//! foreign-sound digraphs (キャ, ファ), sokuon (ッ) gemination and chōon (ー)
//! elongation. Hiragana input is folded to katakana first.

mod config;
mod table;
mod transliterate;

pub use config::{parse_kana_toml, KanaTableConfig, KanaTableError};
pub use table::{default_toml, KanaTable, KanaUnit};
pub use transliterate::{transliterate, transliterate_with};
