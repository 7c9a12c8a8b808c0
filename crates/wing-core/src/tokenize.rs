//! Tokenizer seam: segments raw text into (surface, reading) units.
//!
//! A real morphological analyzer lives outside this crate and plugs in
//! through [`Tokenizer`]. [`ScriptTokenizer`] is the bundled fallback: it
//! splits on script boundaries and can borrow readings from the personal
//! dictionary.

use tracing::{debug, debug_span};

use crate::unicode::{script_of, Script};
use crate::user_dict::UserDictionary;

/// One morphological unit. An empty `reading` means "read as written".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanaToken {
    pub surface: String,
    pub reading: String,
}

impl KanaToken {
    pub fn new(surface: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            reading: reading.into(),
        }
    }

    /// Reading if present, otherwise the surface form.
    pub fn effective_reading(&self) -> &str {
        if self.reading.is_empty() {
            &self.surface
        } else {
            &self.reading
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenizeError {
    #[error("tokenizer unavailable: {0}")]
    Unavailable(String),
    #[error("tokenization failed: {0}")]
    Failed(String),
}

/// Splits text into ordered tokens covering the whole input.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<KanaToken>, TokenizeError>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Result<Vec<KanaToken>, TokenizeError> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Result<Vec<KanaToken>, TokenizeError> {
        self(text)
    }
}

/// Script-run segmenter. Each maximal run of hiragana, katakana, kanji or
/// other characters becomes one token whose reading is its surface, unless a
/// registered dictionary word matches first.
#[derive(Default)]
pub struct ScriptTokenizer<'d> {
    dict: Option<&'d UserDictionary>,
}

impl<'d> ScriptTokenizer<'d> {
    pub fn new() -> Self {
        Self { dict: None }
    }

    pub fn with_dictionary(dict: &'d UserDictionary) -> Self {
        Self { dict: Some(dict) }
    }

    /// Longest registered surface starting at `chars[0]`.
    fn dict_match(&self, chars: &[char]) -> Option<(usize, String)> {
        let dict = self.dict?;
        let max = dict.max_surface_chars().min(chars.len());
        (1..=max).rev().find_map(|len| {
            let surface: String = chars[..len].iter().collect();
            dict.get(&surface).map(|e| (len, e.reading.clone()))
        })
    }

    pub fn segment(&self, text: &str) -> Vec<KanaToken> {
        let _span = debug_span!("segment", len = text.len()).entered();
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            if let Some((len, reading)) = self.dict_match(&chars[i..]) {
                let surface: String = chars[i..i + len].iter().collect();
                tokens.push(KanaToken::new(surface, reading));
                i += len;
                continue;
            }

            let script = script_of(chars[i]);
            let start = i;
            i += 1;
            while i < chars.len() && script_of(chars[i]) == script && !self.starts_word(&chars[i..]) {
                i += 1;
            }
            let surface: String = chars[start..i].iter().collect();
            let reading = match script {
                Script::Hiragana | Script::Katakana => surface.clone(),
                // no reading available; the surface passes through as-is
                Script::Kanji | Script::Other => String::new(),
            };
            tokens.push(KanaToken::new(surface, reading));
        }

        debug!(tokens = tokens.len());
        tokens
    }

    fn starts_word(&self, chars: &[char]) -> bool {
        self.dict.is_some() && self.dict_match(chars).is_some()
    }
}

impl Tokenizer for ScriptTokenizer<'_> {
    fn tokenize(&self, text: &str) -> Result<Vec<KanaToken>, TokenizeError> {
        Ok(self.segment(text))
    }
}
