use std::process;

use serde::Serialize;
use unicode_width::UnicodeWidthChar;

use wing_core::glyph::GlyphMap;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, Serialize)]
pub struct TableRow {
    pub source: char,
    pub glyph: char,
    pub codepoint: String,
}

pub fn table_rows(glyphs: &GlyphMap) -> Vec<TableRow> {
    glyphs
        .entries()
        .map(|(source, glyph)| TableRow {
            source,
            glyph,
            codepoint: format!("U+{:04X}", glyph as u32),
        })
        .collect()
}

/// Pad a glyph to two terminal columns; emoji-presentation symbols are
/// already double width.
fn pad_glyph(glyph: char) -> String {
    let width = glyph.width().unwrap_or(1);
    format!("{glyph}{}", " ".repeat(2usize.saturating_sub(width)))
}

pub fn table_cmd(glyphs: &GlyphMap, json: bool) {
    let rows = table_rows(glyphs);
    if json {
        let out = die!(serde_json::to_string_pretty(&rows), "Error: {}");
        println!("{out}");
        return;
    }
    for row in &rows {
        println!("{}  {}  {}", row.source, pad_glyph(row.glyph), row.codepoint);
    }
    println!("---");
    println!("{} glyphs", rows.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_source_order() {
        let map = GlyphMap::from_pairs([('B', '☝'), ('A', '✌')]).unwrap();
        let rows = table_rows(&map);
        assert_eq!(rows[0].source, 'A');
        assert_eq!(rows[0].codepoint, "U+270C");
        assert_eq!(rows[1].glyph, '☝');
    }

    #[test]
    fn pad_glyph_aligns_columns() {
        assert_eq!(pad_glyph('x'), "x ");
        assert_eq!(pad_glyph('👍'), "👍");
    }
}
