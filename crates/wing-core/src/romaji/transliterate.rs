use tracing::{debug, debug_span};

use super::table::{KanaTable, KanaUnit};
use crate::unicode::hiragana_to_katakana;

/// Output of the scan pass, before elongation is resolved.
#[derive(Debug, PartialEq)]
enum Segment<'t> {
    Fragment(&'t str),
    /// Doubled consonant produced by sokuon lookahead.
    Geminate(char),
    /// Input character with no table entry, passed through verbatim.
    Verbatim(char),
    /// Chōon placeholder.
    Elongation,
}

/// Transliterate kana to uppercase romaji using the bundled table.
///
/// Total over any input: unmapped characters pass through, and the only
/// characters that can vanish are sokuon/chōon sentinels without usable
/// context.
pub fn transliterate(kana: &str) -> String {
    transliterate_with(KanaTable::global(), kana)
}

pub fn transliterate_with(table: &KanaTable, kana: &str) -> String {
    if kana.is_empty() {
        return String::new();
    }
    let _span = debug_span!("transliterate", len = kana.len()).entered();

    let chars: Vec<char> = hiragana_to_katakana(kana).chars().collect();
    let segments = scan(table, &chars);
    let out = resolve_elongation(&segments).to_uppercase();
    debug!(segments = segments.len(), out_len = out.len());
    out
}

fn scan<'t>(table: &'t KanaTable, chars: &[char]) -> Vec<Segment<'t>> {
    let mut segments = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let rest = &chars[i..];

        // 1. Digraph wins over any single-char reading of the same position.
        if let [a, b, ..] = rest {
            if let Some(KanaUnit::Romaji(s)) = table.digraph(*a, *b) {
                segments.push(Segment::Fragment(s));
                i += 2;
                continue;
            }
        }

        match table.single(rest[0]) {
            // 2. Gemination: borrow the first letter of the next unit. The
            //    next unit itself is converted on the following iteration.
            Some(KanaUnit::Sokuon) => {
                if let Some(c) = geminate(table, &rest[1..]) {
                    segments.push(Segment::Geminate(c));
                }
            }
            Some(KanaUnit::Chouon) => segments.push(Segment::Elongation),
            Some(KanaUnit::Romaji(s)) => segments.push(Segment::Fragment(s)),
            // 3. Unmapped: pass through.
            None => segments.push(Segment::Verbatim(rest[0])),
        }
        i += 1;
    }

    segments
}

/// First letter of the unit following a sokuon. `N` is never doubled, and a
/// sentinel or unmapped char after the sokuon yields nothing.
fn geminate(table: &KanaTable, next: &[char]) -> Option<char> {
    let (unit, _) = table.unit_at(next)?;
    let first = unit.fragment()?.chars().next()?;
    (first != 'N').then_some(first)
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), 'A' | 'I' | 'U' | 'E' | 'O')
}

/// Replace each chōon placeholder with the vowel right before it, or drop it.
fn resolve_elongation(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for seg in segments {
        match seg {
            Segment::Fragment(s) => out.push_str(s),
            Segment::Geminate(c) | Segment::Verbatim(c) => out.push(*c),
            Segment::Elongation => {
                if let Some(prev) = out.chars().next_back().filter(|c| is_vowel(*c)) {
                    out.push(prev);
                }
            }
        }
    }
    out
}
