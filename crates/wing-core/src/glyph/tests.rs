use proptest::prelude::*;

use super::*;

fn small_map() -> GlyphMap {
    GlyphMap::from_pairs([('A', '\u{F041}'), ('B', '\u{F042}'), ('1', '\u{F031}')]).unwrap()
}

#[test]
fn to_glyphs_maps_letters() {
    let map = small_map();
    assert_eq!(map.to_glyphs("AB"), "\u{F041}\u{F042}");
}

#[test]
fn to_glyphs_unknown_passes_through() {
    let map = small_map();
    assert_eq!(map.to_glyphs("AC"), "\u{F041}C");
    assert_eq!(map.to_glyphs("猫"), "猫");
}

#[test]
fn to_glyphs_maps_digits() {
    let map = small_map();
    assert_eq!(map.to_glyphs("1"), "\u{F031}");
}

#[test]
fn to_glyphs_uppercases_first() {
    let map = small_map();
    assert_eq!(map.to_glyphs("ab"), "\u{F041}\u{F042}");
    // case is lost on the way back
    assert_eq!(map.from_glyphs(&map.to_glyphs("ab")), "AB");
}

#[test]
fn from_glyphs_inverts() {
    let map = small_map();
    assert_eq!(map.from_glyphs("\u{F041}\u{F042}\u{F031}"), "AB1");
}

#[test]
fn from_glyphs_unknown_passes_through() {
    let map = small_map();
    assert_eq!(map.from_glyphs("x\u{F041}?"), "xA?");
}

#[test]
fn duplicate_glyph_rejected() {
    let err = GlyphMap::from_pairs([('A', '★'), ('B', '★')]).unwrap_err();
    match err {
        GlyphConfigError::DuplicateGlyph {
            glyph,
            first,
            second,
        } => {
            assert_eq!(glyph, '★');
            assert_eq!(first, 'A');
            assert_eq!(second, 'B');
        }
        other => panic!("expected DuplicateGlyph, got {other:?}"),
    }
}

#[test]
fn duplicate_source_rejected() {
    let err = GlyphMap::from_pairs([('A', '★'), ('A', '☆')]).unwrap_err();
    assert!(matches!(err, GlyphConfigError::DuplicateSource('A')));
}

#[test]
fn empty_rejected() {
    let err = GlyphMap::from_pairs(std::iter::empty()).unwrap_err();
    assert!(matches!(err, GlyphConfigError::Empty));
}

#[test]
fn from_toml_valid() {
    let toml = "[ascii_to_glyph]\nA = \"✌\"\n\"?\" = \"✍\"\n";
    let map = GlyphMap::from_toml(toml).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.glyph('A'), Some('✌'));
    assert_eq!(map.source('✍'), Some('?'));
}

#[test]
fn from_toml_duplicate_glyph() {
    let toml = "[ascii_to_glyph]\nA = \"✌\"\nB = \"✌\"\n";
    let err = GlyphMap::from_toml(toml).unwrap_err();
    assert!(matches!(err, GlyphConfigError::DuplicateGlyph { .. }));
    assert!(err.to_string().contains("shared"));
}

#[test]
fn from_toml_multi_char_key() {
    let toml = "[ascii_to_glyph]\nAB = \"✌\"\n";
    let err = GlyphMap::from_toml(toml).unwrap_err();
    assert!(matches!(err, GlyphConfigError::InvalidKey(_)));
}

#[test]
fn from_toml_non_ascii_key() {
    let toml = "[ascii_to_glyph]\n\"ア\" = \"✌\"\n";
    let err = GlyphMap::from_toml(toml).unwrap_err();
    assert!(matches!(err, GlyphConfigError::NonAsciiKey('ア')));
}

#[test]
fn from_toml_multi_char_glyph() {
    let toml = "[ascii_to_glyph]\nA = \"✌✌\"\n";
    let err = GlyphMap::from_toml(toml).unwrap_err();
    assert!(matches!(err, GlyphConfigError::InvalidGlyph { key: 'A', .. }));
}

#[test]
fn from_toml_invalid() {
    let err = GlyphMap::from_toml("not valid toml {{{").unwrap_err();
    assert!(matches!(err, GlyphConfigError::Parse(_)));
}

#[test]
fn from_json_table() {
    let json = r#"{"ascii_to_glyph": {"A": "\uF041", "B": "\uF042"}}"#;
    let map = GlyphMap::from_json(json).unwrap();
    assert_eq!(map.to_glyphs("ba"), "\u{F042}\u{F041}");
}

#[test]
fn from_json_wingdings_table_name() {
    let json = r#"{"ascii_to_wingdings": {"A": "\uF041"}, "version": 1}"#;
    let map = GlyphMap::from_json(json).unwrap();
    assert_eq!(map.glyph('A'), Some('\u{F041}'));
}

#[test]
fn from_json_missing_table() {
    let err = GlyphMap::from_json(r#"{"other": {}}"#).unwrap_err();
    assert!(matches!(err, GlyphConfigError::Parse(_)));
}

#[test]
fn builtin_covers_romaji_alphabet() {
    let map = GlyphMap::builtin();
    for c in ('A'..='Z').chain('0'..='9') {
        assert!(map.glyph(c).is_some(), "no glyph for {c}");
    }
    assert_eq!(map.glyph('A'), Some('✌'));
    assert_eq!(map.glyph(' '), None);
}

#[test]
fn entries_sorted_by_source() {
    let map = small_map();
    let entries: Vec<(char, char)> = map.entries().collect();
    assert_eq!(
        entries,
        vec![('1', '\u{F031}'), ('A', '\u{F041}'), ('B', '\u{F042}')]
    );
}

fn builtin_domain() -> Vec<char> {
    GlyphMap::builtin().entries().map(|(s, _)| s).collect()
}

proptest! {
    #[test]
    fn round_trip_over_domain(
        s in prop::collection::vec(prop::sample::select(builtin_domain()), 0..64)
    ) {
        let map = GlyphMap::builtin();
        let text: String = s.into_iter().collect();
        prop_assert_eq!(map.from_glyphs(&map.to_glyphs(&text)), text);
    }

    #[test]
    fn forward_output_is_all_glyphs(s in "[A-Z0-9 ]{0,32}") {
        let map = GlyphMap::builtin();
        let out = map.to_glyphs(&s);
        prop_assert!(out.chars().all(|c| c == ' ' || map.source(c).is_some()));
    }
}
