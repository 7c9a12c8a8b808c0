//! Character-level Unicode classification for Japanese text.

/// Check the full Hiragana block (U+3040..U+309F).
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF). Includes the prolonged
/// sound mark ー (U+30FC).
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

/// Any character that only a Japanese reading can make sense of.
pub fn is_japanese(c: char) -> bool {
    is_hiragana(c) || is_katakana(c) || is_kanji(c)
}

pub fn contains_japanese(s: &str) -> bool {
    s.chars().any(is_japanese)
}

/// Convert a hiragana string to katakana.
///
/// Only syllables with a katakana twin are shifted (ぁ..ゖ and the iteration
/// marks ゝゞ). Combining sound marks (U+3099..U+309C) and everything else,
/// ー and ASCII included, pass through unchanged.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if ('\u{3041}'..='\u{3096}').contains(&c) || ('\u{309D}'..='\u{309E}').contains(&c) {
                char::from_u32(c as u32 + 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Coarse script class, used to split text into same-script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Hiragana,
    Katakana,
    Kanji,
    Other,
}

pub fn script_of(c: char) -> Script {
    if is_hiragana(c) {
        Script::Hiragana
    } else if is_katakana(c) {
        Script::Katakana
    } else if is_kanji(c) {
        Script::Kanji
    } else {
        Script::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiragana_to_katakana() {
        assert_eq!(hiragana_to_katakana("きょうは"), "キョウハ");
        assert_eq!(hiragana_to_katakana("らーめん"), "ラーメン");
        assert_eq!(hiragana_to_katakana("がっこう"), "ガッコウ");
        assert_eq!(hiragana_to_katakana(""), "");
        assert_eq!(hiragana_to_katakana("abc"), "abc");
        assert_eq!(hiragana_to_katakana("カタカナ"), "カタカナ");
    }

    #[test]
    fn test_combining_marks_untouched() {
        assert_eq!(hiragana_to_katakana("\u{3099}"), "\u{3099}");
        assert_eq!(hiragana_to_katakana("ゝ"), "ヽ");
    }

    #[test]
    fn test_char_classification() {
        assert!(is_hiragana('あ'));
        assert!(!is_hiragana('ア'));
        assert!(is_katakana('ア'));
        assert!(is_katakana('ー'));
        assert!(!is_katakana('あ'));
        assert!(is_kanji('漢'));
        assert!(!is_kanji('あ'));
        assert!(is_japanese('猫'));
        assert!(!is_japanese('a'));
    }

    #[test]
    fn test_contains_japanese() {
        assert!(contains_japanese("Hi ネコ"));
        assert!(contains_japanese("猫"));
        assert!(!contains_japanese("Hello, world!"));
        assert!(!contains_japanese(""));
    }

    #[test]
    fn test_script_of() {
        assert_eq!(script_of('ね'), Script::Hiragana);
        assert_eq!(script_of('ネ'), Script::Katakana);
        assert_eq!(script_of('ー'), Script::Katakana);
        assert_eq!(script_of('猫'), Script::Kanji);
        assert_eq!(script_of('A'), Script::Other);
        assert_eq!(script_of('、'), Script::Other);
    }
}
