use std::collections::BTreeMap;

use serde::Deserialize;

use crate::unicode::is_katakana;

#[derive(Deserialize)]
struct RawKanaConfig {
    sentinels: RawSentinels,
    mappings: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct RawSentinels {
    sokuon: String,
    chouon: String,
}

#[derive(Debug, thiserror::Error)]
pub enum KanaTableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("key must be one or two characters: {0}")]
    KeyLength(String),
    #[error("non-katakana key: {0}")]
    NonKatakanaKey(String),
    #[error("value for {key} must be uppercase ASCII letters, got {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("sentinel {0} must be a single katakana character")]
    InvalidSentinel(String),
    #[error("sentinel {0} is also listed in [mappings]")]
    SentinelMapped(char),
}

/// Validated contents of a kana table file.
#[derive(Debug)]
pub struct KanaTableConfig {
    pub mappings: BTreeMap<String, String>,
    pub sokuon: char,
    pub chouon: char,
}

fn single_katakana(name: &str, value: &str) -> Result<char, KanaTableError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if is_katakana(c) => Ok(c),
        _ => Err(KanaTableError::InvalidSentinel(name.to_string())),
    }
}

/// Parse and validate a kana table (`[sentinels]` + `[mappings]`).
pub fn parse_kana_toml(toml_str: &str) -> Result<KanaTableConfig, KanaTableError> {
    let raw: RawKanaConfig =
        toml::from_str(toml_str).map_err(|e| KanaTableError::Parse(e.to_string()))?;

    if raw.mappings.is_empty() {
        return Err(KanaTableError::Empty);
    }

    let sokuon = single_katakana("sokuon", &raw.sentinels.sokuon)?;
    let chouon = single_katakana("chouon", &raw.sentinels.chouon)?;

    for (key, value) in &raw.mappings {
        let len = key.chars().count();
        if !(1..=2).contains(&len) {
            return Err(KanaTableError::KeyLength(key.clone()));
        }
        if !key.chars().all(is_katakana) {
            return Err(KanaTableError::NonKatakanaKey(key.clone()));
        }
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(KanaTableError::InvalidValue {
                key: key.clone(),
                value: value.clone(),
            });
        }
        for sentinel in [sokuon, chouon] {
            if len == 1 && key.starts_with(sentinel) {
                return Err(KanaTableError::SentinelMapped(sentinel));
            }
        }
    }

    Ok(KanaTableConfig {
        mappings: raw.mappings,
        sokuon,
        chouon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINELS: &str = "[sentinels]\nsokuon = \"ッ\"\nchouon = \"ー\"\n";

    #[test]
    fn parse_valid_toml() {
        let toml = format!("{SENTINELS}[mappings]\n\"カ\" = \"KA\"\n\"キャ\" = \"KYA\"\n");
        let cfg = parse_kana_toml(&toml).unwrap();
        assert_eq!(cfg.mappings.len(), 2);
        assert_eq!(cfg.mappings["キャ"], "KYA");
        assert_eq!(cfg.sokuon, 'ッ');
        assert_eq!(cfg.chouon, 'ー');
    }

    #[test]
    fn parse_default_toml() {
        let cfg = parse_kana_toml(super::super::table::default_toml()).unwrap();
        assert!(
            cfg.mappings.len() > 140,
            "expected 140+ mappings, got {}",
            cfg.mappings.len()
        );
    }

    #[test]
    fn error_empty_mappings() {
        let toml = format!("{SENTINELS}[mappings]\n");
        let err = parse_kana_toml(&toml).unwrap_err();
        assert!(matches!(err, KanaTableError::Empty));
    }

    #[test]
    fn error_long_key() {
        let toml = format!("{SENTINELS}[mappings]\n\"キャア\" = \"KYAA\"\n");
        let err = parse_kana_toml(&toml).unwrap_err();
        assert!(matches!(err, KanaTableError::KeyLength(_)));
    }

    #[test]
    fn error_hiragana_key() {
        let toml = format!("{SENTINELS}[mappings]\n\"か\" = \"KA\"\n");
        let err = parse_kana_toml(&toml).unwrap_err();
        assert!(matches!(err, KanaTableError::NonKatakanaKey(_)));
    }

    #[test]
    fn error_lowercase_value() {
        let toml = format!("{SENTINELS}[mappings]\n\"カ\" = \"ka\"\n");
        let err = parse_kana_toml(&toml).unwrap_err();
        assert!(matches!(err, KanaTableError::InvalidValue { .. }));
    }

    #[test]
    fn error_empty_value() {
        let toml = format!("{SENTINELS}[mappings]\n\"カ\" = \"\"\n");
        let err = parse_kana_toml(&toml).unwrap_err();
        assert!(matches!(err, KanaTableError::InvalidValue { .. }));
    }

    #[test]
    fn error_sentinel_in_mappings() {
        let toml = format!("{SENTINELS}[mappings]\n\"ッ\" = \"TSU\"\n");
        let err = parse_kana_toml(&toml).unwrap_err();
        assert!(matches!(err, KanaTableError::SentinelMapped('ッ')));
    }

    #[test]
    fn error_bad_sentinel() {
        let toml = "[sentinels]\nsokuon = \"ッッ\"\nchouon = \"ー\"\n[mappings]\n\"カ\" = \"KA\"\n";
        let err = parse_kana_toml(toml).unwrap_err();
        assert!(matches!(err, KanaTableError::InvalidSentinel(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_kana_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, KanaTableError::Parse(_)));
    }
}
