//! Personal dictionary: registered words with their reading and romaji.
//!
//! Entries carry usage frequency and recency, which drive both search
//! relevance and capacity-bounded eviction. Persisted as a small binary file
//! (magic + version + bincode body) and exchangeable as JSON.

mod persistence;

pub use persistence::{ImportMode, ImportSummary};

use std::cmp::Ordering;
use std::collections::HashMap;
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::settings::{settings, DictionarySettings};

const MAGIC: &[u8; 4] = b"WGUD";
const VERSION: u8 = 1;

const SECS_PER_DAY: f64 = 86_400.0;

/// Relevance weights for exact and prefix matches.
const EXACT_SURFACE: f64 = 100.0;
const EXACT_READING: f64 = 90.0;
const EXACT_ROMAJI: f64 = 80.0;
const PREFIX_SURFACE: f64 = 50.0;
const PREFIX_READING: f64 = 40.0;
const PREFIX_ROMAJI: f64 = 30.0;

#[derive(Debug, thiserror::Error)]
pub enum UserDictError {
    #[error("dictionary limit reached: {0} words")]
    LimitReached(usize),
    #[error("romaji is required to add a word")]
    MissingRomaji,
    #[error("invalid dictionary format: {0}")]
    InvalidFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] bincode::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub reading: String,
    pub romaji: String,
    pub frequency: u32,
    pub last_used: u64,
    pub date_added: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub surface: String,
    pub entry: WordEntry,
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryStatistics {
    pub total_words: usize,
    pub average_frequency: f64,
    pub most_used: Option<String>,
    pub recently_added: usize,
    /// Serialized size as a percentage of `max_storage_bytes`.
    pub storage_usage: u32,
    pub last_update: String,
}

pub fn now_epoch() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn days_since(then: u64, now: u64) -> f64 {
    now.saturating_sub(then) as f64 / SECS_PER_DAY
}

/// Local "YYYY-MM-DD HH:MM" for an epoch timestamp.
fn format_timestamp(secs: u64) -> String {
    let offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    time::OffsetDateTime::from_unix_timestamp(secs as i64)
        .map(|t| {
            let t = t.to_offset(offset);
            format!(
                "{:04}-{:02}-{:02} {:02}:{:02}",
                t.year(),
                t.month() as u8,
                t.day(),
                t.hour(),
                t.minute()
            )
        })
        .unwrap_or_default()
}

pub struct UserDictionary {
    /// surface → entry
    words: HashMap<String, WordEntry>,
    last_update: u64,
    limits: DictionarySettings,
}

impl Default for UserDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDictionary {
    pub fn new() -> Self {
        Self::with_settings(settings().dictionary.clone())
    }

    pub fn with_settings(limits: DictionarySettings) -> Self {
        Self {
            words: HashMap::new(),
            last_update: 0,
            limits,
        }
    }

    pub fn add_word(
        &mut self,
        surface: &str,
        reading: &str,
        romaji: Option<&str>,
    ) -> Result<WordEntry, UserDictError> {
        self.add_word_at(surface, reading, romaji, now_epoch())
    }

    /// Register a word, or bump its frequency if the surface is known.
    ///
    /// Romaji is mandatory; new words are refused once `max_entries` is hit.
    pub fn add_word_at(
        &mut self,
        surface: &str,
        reading: &str,
        romaji: Option<&str>,
        now: u64,
    ) -> Result<WordEntry, UserDictError> {
        let romaji = romaji
            .filter(|r| !r.is_empty())
            .ok_or(UserDictError::MissingRomaji)?;

        if let Some(entry) = self.words.get_mut(surface) {
            entry.frequency = entry.frequency.saturating_add(1);
            entry.last_used = now;
            self.last_update = now;
            return Ok(entry.clone());
        }

        if self.words.len() >= self.limits.max_entries {
            return Err(UserDictError::LimitReached(self.limits.max_entries));
        }
        self.last_update = now;
        let entry = WordEntry {
            reading: reading.to_string(),
            romaji: romaji.to_string(),
            frequency: 1,
            last_used: now,
            date_added: now,
        };
        self.words.insert(surface.to_string(), entry.clone());
        Ok(entry)
    }

    /// Remove a word. Returns `true` if it was present.
    pub fn remove_word(&mut self, surface: &str) -> bool {
        let removed = self.words.remove(surface).is_some();
        if removed {
            self.last_update = now_epoch();
        }
        removed
    }

    pub fn get(&self, surface: &str) -> Option<&WordEntry> {
        self.words.get(surface)
    }

    /// All words sorted by surface.
    pub fn list(&self) -> Vec<(&str, &WordEntry)> {
        let mut result: Vec<(&str, &WordEntry)> =
            self.words.iter().map(|(s, e)| (s.as_str(), e)).collect();
        result.sort_by(|a, b| a.0.cmp(b.0));
        result
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn last_update(&self) -> u64 {
        self.last_update
    }

    /// Length in chars of the longest registered surface.
    pub fn max_surface_chars(&self) -> usize {
        self.words
            .keys()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        self.search_at(query, limit, now_epoch())
    }

    /// Words whose surface or reading contains `query`, or whose romaji
    /// contains it case-insensitively, best first.
    pub fn search_at(&self, query: &str, limit: usize, now: u64) -> Vec<SearchHit> {
        let _span = debug_span!("search", query, limit).entered();
        let query_lower = query.to_lowercase();
        let mut hits: Vec<SearchHit> = self
            .words
            .iter()
            .filter(|(surface, e)| {
                surface.contains(query)
                    || e.reading.contains(query)
                    || e.romaji.to_lowercase().contains(&query_lower)
            })
            .map(|(surface, e)| SearchHit {
                surface: surface.clone(),
                entry: e.clone(),
                relevance: self.relevance(query, surface, e, now),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.surface.cmp(&b.surface))
        });
        hits.truncate(limit);
        debug!(hits = hits.len());
        hits
    }

    fn relevance(&self, query: &str, surface: &str, e: &WordEntry, now: u64) -> f64 {
        let query_lower = query.to_lowercase();
        let romaji_lower = e.romaji.to_lowercase();
        let mut score = 0.0;

        if surface == query {
            score += EXACT_SURFACE;
        }
        if e.reading == query {
            score += EXACT_READING;
        }
        if romaji_lower == query_lower {
            score += EXACT_ROMAJI;
        }
        if surface.starts_with(query) {
            score += PREFIX_SURFACE;
        }
        if e.reading.starts_with(query) {
            score += PREFIX_READING;
        }
        if romaji_lower.starts_with(&query_lower) {
            score += PREFIX_ROMAJI;
        }

        score += e.frequency.min(self.limits.max_frequency_score) as f64;
        score + self.recency_bonus(e, now)
    }

    fn recency_bonus(&self, e: &WordEntry, now: u64) -> f64 {
        (self.limits.recency_window_days - days_since(e.last_used, now)).max(0.0)
    }

    fn retention_score(&self, e: &WordEntry, now: u64) -> f64 {
        e.frequency as f64 + self.recency_bonus(e, now)
    }

    /// Drop the lowest-scoring `cleanup_fraction` of words. Returns how many
    /// were removed.
    pub fn cleanup_at(&mut self, now: u64) -> usize {
        let to_remove = (self.words.len() as f64 * self.limits.cleanup_fraction).floor() as usize;
        if to_remove == 0 {
            return 0;
        }
        let mut scored: Vec<(String, f64)> = self
            .words
            .iter()
            .map(|(s, e)| (s.clone(), self.retention_score(e, now)))
            .collect();
        // Partial sort: the lowest `to_remove` scores end up in scored[..to_remove].
        scored.select_nth_unstable_by(to_remove - 1, |a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        for (surface, _) in &scored[..to_remove] {
            self.words.remove(surface);
        }
        self.last_update = now;
        debug!(removed = to_remove, remaining = self.words.len(), "dictionary cleanup");
        to_remove
    }

    pub fn statistics(&self) -> Result<DictionaryStatistics, UserDictError> {
        self.statistics_at(now_epoch())
    }

    pub fn statistics_at(&self, now: u64) -> Result<DictionaryStatistics, UserDictError> {
        let total_words = self.words.len();
        let average_frequency = if total_words == 0 {
            0.0
        } else {
            self.words.values().map(|e| e.frequency as f64).sum::<f64>() / total_words as f64
        };
        let most_used = self
            .words
            .iter()
            .max_by(|a, b| a.1.frequency.cmp(&b.1.frequency).then_with(|| b.0.cmp(a.0)))
            .map(|(s, _)| s.clone());
        let recent_window = self.limits.recent_days as f64;
        let recently_added = self
            .words
            .values()
            .filter(|e| days_since(e.date_added, now) < recent_window)
            .count();
        let size = self.to_bytes()?.len();
        let storage_usage =
            (size as f64 / self.limits.max_storage_bytes as f64 * 100.0).round() as u32;

        Ok(DictionaryStatistics {
            total_words,
            average_frequency,
            most_used,
            recently_added,
            storage_usage,
            last_update: format_timestamp(self.last_update),
        })
    }
}

/// Flat serialization format for bincode.
#[derive(Serialize, Deserialize)]
struct UserDictData {
    words: Vec<WordRecord>,
    last_update: u64,
}

#[derive(Serialize, Deserialize)]
struct WordRecord {
    surface: String,
    entry: WordEntry,
}
