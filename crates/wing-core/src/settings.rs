//! Global settings loaded from TOML, following the same OnceLock pattern as
//! the bundled kana and glyph tables.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub dictionary: DictionarySettings,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionarySettings {
    pub max_entries: usize,
    pub max_storage_bytes: usize,
    pub cleanup_fraction: f64,
    pub recency_window_days: f64,
    pub max_frequency_score: u32,
    pub recent_days: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub default_limit: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(dictionary.max_entries);
    check_positive!(dictionary.max_storage_bytes);
    check_positive!(search.default_limit);

    let fraction = s.dictionary.cleanup_fraction;
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(SettingsError::InvalidValue {
            field: "dictionary.cleanup_fraction".to_string(),
            reason: "must be in (0, 1]".to_string(),
        });
    }
    if s.dictionary.recency_window_days < 0.0 {
        return Err(SettingsError::InvalidValue {
            field: "dictionary.recency_window_days".to_string(),
            reason: "must be non-negative".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_dictionary(section: &str) -> String {
        format!("[dictionary]\n{section}\n[search]\ndefault_limit = 50\n")
    }

    const VALID_DICTIONARY: &str = "max_entries = 10
max_storage_bytes = 2048
cleanup_fraction = 0.5
recency_window_days = 7.0
max_frequency_score = 10
recent_days = 1";

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.dictionary.max_entries, 5000);
        assert_eq!(s.dictionary.max_storage_bytes, 95 * 1024);
        assert!((s.dictionary.cleanup_fraction - 0.25).abs() < f64::EPSILON);
        assert!((s.dictionary.recency_window_days - 30.0).abs() < f64::EPSILON);
        assert_eq!(s.dictionary.max_frequency_score, 50);
        assert_eq!(s.dictionary.recent_days, 7);
        assert_eq!(s.search.default_limit, 50);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let s = parse_settings_toml(&with_dictionary(VALID_DICTIONARY)).unwrap();
        assert_eq!(s.dictionary.max_entries, 10);
        assert!((s.dictionary.cleanup_fraction - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn error_zero_max_entries() {
        let toml = with_dictionary(&VALID_DICTIONARY.replace("max_entries = 10", "max_entries = 0"));
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("dictionary.max_entries"));
    }

    #[test]
    fn error_cleanup_fraction_out_of_range() {
        let toml = with_dictionary(
            &VALID_DICTIONARY.replace("cleanup_fraction = 0.5", "cleanup_fraction = 1.5"),
        );
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("cleanup_fraction"));
    }

    #[test]
    fn error_negative_window() {
        let toml = with_dictionary(
            &VALID_DICTIONARY.replace("recency_window_days = 7.0", "recency_window_days = -1.0"),
        );
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("recency_window_days"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let err = parse_settings_toml("[search]\ndefault_limit = 5\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
