//! Text → glyph pipeline: tokenize, transliterate Japanese tokens to romaji,
//! then encipher.

use tracing::{debug, debug_span, warn};

use crate::glyph::GlyphMap;
use crate::romaji::transliterate;
use crate::tokenize::Tokenizer;
use crate::unicode::contains_japanese;

#[derive(Debug, Clone, Copy)]
pub struct Converter<'g> {
    glyphs: &'g GlyphMap,
}

impl Default for Converter<'static> {
    fn default() -> Self {
        Self::new(GlyphMap::builtin())
    }
}

impl<'g> Converter<'g> {
    pub fn new(glyphs: &'g GlyphMap) -> Self {
        Self { glyphs }
    }

    pub fn glyphs(&self) -> &'g GlyphMap {
        self.glyphs
    }

    /// Romanize `text` token by token. `None` when no tokenizer is available
    /// or it fails; the caller then enciphers the raw input.
    fn try_romanize(&self, text: &str, tokenizer: Option<&dyn Tokenizer>) -> Option<String> {
        let Some(tokenizer) = tokenizer else {
            warn!("no tokenizer available, enciphering input directly");
            return None;
        };
        let tokens = match tokenizer.tokenize(text) {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(error = %e, "tokenizer failed, enciphering input directly");
                return None;
            }
        };
        debug!(tokens = tokens.len());

        let mut out = String::with_capacity(text.len());
        for token in &tokens {
            let reading = token.effective_reading();
            if contains_japanese(reading) {
                out.push_str(&transliterate(reading));
            } else {
                out.push_str(reading);
            }
        }
        Some(out)
    }

    /// Romaji form of `text`, before enciphering. Falls back to the raw input
    /// under the same conditions as [`Converter::convert`].
    pub fn romanize(&self, text: &str, tokenizer: Option<&dyn Tokenizer>) -> String {
        let _span = debug_span!("romanize", len = text.len()).entered();
        self.try_romanize(text, tokenizer)
            .unwrap_or_else(|| text.to_string())
    }

    /// Full forward conversion. Without a working tokenizer the whole input
    /// goes straight to the cipher.
    pub fn convert(&self, text: &str, tokenizer: Option<&dyn Tokenizer>) -> String {
        let _span = debug_span!("convert", len = text.len()).entered();
        match self.try_romanize(text, tokenizer) {
            Some(romaji) => self.glyphs.to_glyphs(&romaji),
            None => self.glyphs.to_glyphs(text),
        }
    }

    /// Inverse cipher only; romanization is not reversible.
    pub fn revert(&self, glyph_text: &str) -> String {
        self.glyphs.from_glyphs(glyph_text)
    }
}
