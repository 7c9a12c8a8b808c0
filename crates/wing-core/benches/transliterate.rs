use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use wing_core::convert::Converter;
use wing_core::glyph::GlyphMap;
use wing_core::romaji::transliterate;
use wing_core::tokenize::ScriptTokenizer;

static INPUTS: &[(&str, &str)] = &[
    ("short", "コンニチハ"),
    ("medium", "きょうはいいてんきですね"),
    ("long", "マッチャラーメンをたべたいとおもいます、ジェットコースターにものりたい"),
];

static MIXED: &[(&str, &str)] = &[
    ("ascii", "Hello, World! 2024"),
    ("mixed", "今日はラーメン day です"),
];

fn bench_transliterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("romaji/transliterate");
    for &(label, kana) in INPUTS {
        group.bench_with_input(BenchmarkId::new(label, kana.len()), &kana, |b, &kana| {
            b.iter(|| transliterate(kana));
        });
    }
    group.finish();
}

fn bench_cipher(c: &mut Criterion) {
    let glyphs = GlyphMap::builtin();
    let mut group = c.benchmark_group("glyph/cipher");
    for &(label, text) in MIXED {
        let encoded = glyphs.to_glyphs(text);
        group.bench_with_input(BenchmarkId::new("to_glyphs", label), &text, |b, &text| {
            b.iter(|| glyphs.to_glyphs(text));
        });
        group.bench_with_input(
            BenchmarkId::new("from_glyphs", label),
            &encoded,
            |b, encoded| {
                b.iter(|| glyphs.from_glyphs(encoded));
            },
        );
    }
    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let converter = Converter::default();
    let tokenizer = ScriptTokenizer::new();
    let mut group = c.benchmark_group("convert/script_tokenizer");
    for &(label, text) in INPUTS.iter().chain(MIXED) {
        group.bench_with_input(BenchmarkId::new(label, text.len()), &text, |b, &text| {
            b.iter(|| converter.convert(text, Some(&tokenizer)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transliterate, bench_cipher, bench_convert);
criterion_main!(benches);
