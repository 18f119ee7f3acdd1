pub mod repository;

use icu_normalizer::ComposingNormalizerBorrowed;
use serde::{Deserialize, Serialize};

pub use repository::{WordRepository, WordSetInfo};

/// One vocabulary entry: Japanese term, its reading, Korean translation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordEntry {
    #[serde(rename = "ja")]
    pub source_text: String,
    #[serde(rename = "reading", default)]
    pub source_reading: String,
    #[serde(rename = "ko")]
    pub target_text: String,
}

impl WordEntry {
    pub fn new(source_text: &str, source_reading: &str, target_text: &str) -> Self {
        Self {
            source_text: source_text.to_string(),
            source_reading: source_reading.to_string(),
            target_text: target_text.to_string(),
        }
        .normalized()
    }

    /// NFC-normalize and trim every field so exact answer comparison holds
    /// regardless of how the source file encoded Hangul or kana.
    pub fn normalized(self) -> Self {
        Self {
            source_text: nfc(&self.source_text),
            source_reading: nfc(&self.source_reading),
            target_text: nfc(&self.target_text),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.source_text.is_empty() || self.target_text.is_empty()
    }
}

fn nfc(text: &str) -> String {
    let normalizer = ComposingNormalizerBorrowed::new_nfc();
    normalizer.normalize(text.trim()).into_owned()
}
