use std::collections::HashMap;
use std::sync::OnceLock;

use super::config::{parse_kana_toml, KanaTableConfig, KanaTableError};

const DEFAULT_TOML: &str = include_str!("default_kana.toml");

/// Returns the embedded kana table TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

/// What a kana unit turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KanaUnit {
    /// Uppercase romaji fragment.
    Romaji(String),
    /// Small tsu: emits nothing itself, doubles the next unit's first letter.
    Sokuon,
    /// Long vowel mark: placeholder resolved against the preceding vowel.
    Chouon,
}

impl KanaUnit {
    pub fn fragment(&self) -> Option<&str> {
        match self {
            KanaUnit::Romaji(s) => Some(s),
            KanaUnit::Sokuon | KanaUnit::Chouon => None,
        }
    }
}

/// Immutable katakana → romaji table with digraph priority.
pub struct KanaTable {
    digraphs: HashMap<[char; 2], KanaUnit>,
    singles: HashMap<char, KanaUnit>,
}

impl KanaTable {
    /// Get or initialize the bundled table.
    pub fn global() -> &'static KanaTable {
        static INSTANCE: OnceLock<KanaTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let cfg = parse_kana_toml(DEFAULT_TOML).expect("kana TOML must be valid");
            KanaTable::from_config(cfg)
        })
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, KanaTableError> {
        parse_kana_toml(toml_str).map(Self::from_config)
    }

    fn from_config(cfg: KanaTableConfig) -> Self {
        let mut digraphs = HashMap::new();
        let mut singles = HashMap::new();
        singles.insert(cfg.sokuon, KanaUnit::Sokuon);
        singles.insert(cfg.chouon, KanaUnit::Chouon);
        for (kana, romaji) in cfg.mappings {
            let mut chars = kana.chars();
            match (chars.next(), chars.next()) {
                (Some(a), Some(b)) => {
                    digraphs.insert([a, b], KanaUnit::Romaji(romaji));
                }
                (Some(a), None) => {
                    singles.insert(a, KanaUnit::Romaji(romaji));
                }
                // keys are validated to be 1..=2 chars
                (None, _) => {}
            }
        }
        Self { digraphs, singles }
    }

    pub fn digraph(&self, first: char, second: char) -> Option<&KanaUnit> {
        self.digraphs.get(&[first, second])
    }

    pub fn single(&self, c: char) -> Option<&KanaUnit> {
        self.singles.get(&c)
    }

    /// Longest unit starting at `chars[0]`, with the number of chars it spans.
    pub fn unit_at(&self, chars: &[char]) -> Option<(&KanaUnit, usize)> {
        if let [a, b, ..] = chars {
            if let Some(unit) = self.digraph(*a, *b) {
                return Some((unit, 2));
            }
        }
        chars
            .first()
            .and_then(|c| self.single(*c))
            .map(|unit| (unit, 1))
    }

    pub fn len(&self) -> usize {
        self.digraphs.len() + self.singles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
