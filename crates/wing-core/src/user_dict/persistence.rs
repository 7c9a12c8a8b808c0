use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    now_epoch, UserDictData, UserDictError, UserDictionary, WordEntry, WordRecord, MAGIC, VERSION,
};
use crate::settings::settings;

/// How `import_json` combines imported words with the current ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    Replace,
    /// Imported entries overwrite existing ones with the same surface.
    Merge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub total: usize,
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    version: u8,
    export_date: u64,
    last_update: u64,
    words: BTreeMap<&'a str, &'a WordEntry>,
}

#[derive(Deserialize)]
struct ImportDocument {
    #[serde(default)]
    words: Option<HashMap<String, WordEntry>>,
}

impl UserDictionary {
    /// Serialize to bytes (WGUD format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, UserDictError> {
        let mut words: Vec<WordRecord> = self
            .words
            .iter()
            .map(|(surface, entry)| WordRecord {
                surface: surface.clone(),
                entry: entry.clone(),
            })
            .collect();
        words.sort_by(|a, b| a.surface.cmp(&b.surface));
        let data = UserDictData {
            words,
            last_update: self.last_update,
        };
        let body = bincode::serialize(&data)?;

        let mut buf = Vec::with_capacity(5 + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Deserialize from bytes (WGUD format).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, UserDictError> {
        if bytes.len() < 5 {
            return Err(UserDictError::InvalidFormat("too short".to_string()));
        }
        if &bytes[0..4] != MAGIC {
            return Err(UserDictError::InvalidFormat("bad magic".to_string()));
        }
        if bytes[4] != VERSION {
            return Err(UserDictError::InvalidFormat(format!(
                "unsupported version: {}",
                bytes[4]
            )));
        }
        let data: UserDictData = bincode::deserialize(&bytes[5..])?;

        let mut dict = Self::with_settings(settings().dictionary.clone());
        dict.last_update = data.last_update;
        dict.words = data
            .words
            .into_iter()
            .map(|rec| (rec.surface, rec.entry))
            .collect();
        Ok(dict)
    }

    /// Atomic write: write to .tmp then rename. Runs a cleanup pass first
    /// when the serialized form exceeds `max_storage_bytes`.
    pub fn save(&mut self, path: &Path) -> Result<(), UserDictError> {
        let mut bytes = self.to_bytes()?;
        if bytes.len() > self.limits.max_storage_bytes {
            debug!(size = bytes.len(), "dictionary over storage quota");
            self.cleanup_at(now_epoch());
            bytes = self.to_bytes()?;
        }
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Open from file, returning an empty dictionary if the file doesn't exist.
    pub fn open(path: &Path) -> Result<Self, UserDictError> {
        match fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Pretty-printed JSON export of every word.
    pub fn export_json(&self) -> Result<String, UserDictError> {
        let doc = ExportDocument {
            version: VERSION,
            export_date: now_epoch(),
            last_update: self.last_update,
            words: self.words.iter().map(|(s, e)| (s.as_str(), e)).collect(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    pub fn import_json(
        &mut self,
        json: &str,
        mode: ImportMode,
    ) -> Result<ImportSummary, UserDictError> {
        self.import_json_at(json, mode, now_epoch())
    }

    /// Import a JSON document carrying a `words` object. Unknown top-level
    /// fields are ignored, so exports round-trip.
    pub fn import_json_at(
        &mut self,
        json: &str,
        mode: ImportMode,
        now: u64,
    ) -> Result<ImportSummary, UserDictError> {
        let doc: ImportDocument = serde_json::from_str(json)?;
        let words = doc
            .words
            .ok_or_else(|| UserDictError::InvalidFormat("missing words object".to_string()))?;
        let imported = words.len();

        match mode {
            ImportMode::Replace => self.words = words,
            ImportMode::Merge => self.words.extend(words),
        }
        self.last_update = now;

        Ok(ImportSummary {
            imported,
            total: self.words.len(),
        })
    }
}
