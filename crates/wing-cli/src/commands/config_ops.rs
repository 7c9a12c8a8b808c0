use std::fs;
use std::process;

use tracing::debug;

use wing_core::glyph::GlyphMap;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Load a glyph table from `file` (`.json` or TOML), or the bundled one.
pub fn load_glyphs(file: Option<&str>) -> GlyphMap {
    let Some(file) = file else {
        return GlyphMap::builtin().clone();
    };
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let parsed = if file.ends_with(".json") {
        GlyphMap::from_json(&content)
    } else {
        GlyphMap::from_toml(&content)
    };
    let map = die!(parsed, "Error in glyph table {file}: {}");
    debug!(file, glyphs = map.len(), "custom glyph table");
    map
}

/// Apply a custom settings file before anything reads `settings()`.
pub fn init_settings(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(
        wing_core::settings::init_custom(content),
        "Error in settings {file}: {}"
    );
}

pub fn glyphs_export() {
    print!("{}", wing_core::glyph::default_toml());
}

pub fn glyphs_validate(file: &str) {
    let map = load_glyphs(Some(file));
    println!("OK: {} glyphs", map.len());
}

pub fn kana_export() {
    print!("{}", wing_core::romaji::default_toml());
}

pub fn kana_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let config = die!(wing_core::romaji::parse_kana_toml(&content), "Error: {}");
    println!(
        "OK: {} mappings, sokuon={}, chouon={}",
        config.mappings.len(),
        config.sokuon,
        config.chouon
    );
}

pub fn settings_export() {
    print!("{}", wing_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        wing_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: dictionary.max_entries={}, dictionary.max_storage_bytes={}, search.default_limit={}",
        s.dictionary.max_entries, s.dictionary.max_storage_bytes, s.search.default_limit
    );
}
