use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::Embed;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::words::WordEntry;

#[derive(Embed)]
#[folder = "assets/wordsets/"]
struct WordSetAssets;

#[derive(Debug, Deserialize)]
struct WordSetFile {
    name: String,
    #[serde(default)]
    words: Vec<WordEntry>,
}

#[derive(Clone, Debug)]
struct WordSet {
    name: String,
    words: Vec<WordEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordSetInfo {
    pub id: String,
    pub name: String,
    pub len: usize,
}

/// Named word sets: the bundled ones plus any `*.json` in the user's word-set
/// directory. A user file with the same id as a bundled set replaces it.
pub struct WordRepository {
    sets: BTreeMap<String, WordSet>,
}

impl WordRepository {
    pub fn load() -> Self {
        Self::with_user_dir(Self::user_dir().as_deref())
    }

    pub fn with_user_dir(user_dir: Option<&Path>) -> Self {
        let mut sets = BTreeMap::new();

        for filename in WordSetAssets::iter() {
            let Some(id) = filename.strip_suffix(".json") else {
                continue;
            };
            let Some(file) = WordSetAssets::get(&filename) else {
                continue;
            };
            match parse_word_set(file.data.as_ref()) {
                Some(set) => {
                    sets.insert(id.to_string(), set);
                }
                None => warn!(set = id, "bundled word set failed to parse"),
            }
        }

        if let Some(dir) = user_dir {
            load_user_sets(dir, &mut sets);
        }

        debug!(count = sets.len(), "word sets loaded");
        Self { sets }
    }

    fn user_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tango").join("wordsets"))
    }

    /// Words of the set, empty when the id is unknown.
    pub fn get_word_set(&self, id: &str) -> Vec<WordEntry> {
        self.sets
            .get(id)
            .map(|set| set.words.clone())
            .unwrap_or_default()
    }

    pub fn available_sets(&self) -> Vec<WordSetInfo> {
        self.sets
            .iter()
            .map(|(id, set)| WordSetInfo {
                id: id.clone(),
                name: set.name.clone(),
                len: set.words.len(),
            })
            .collect()
    }

    pub fn display_name(&self, id: &str) -> String {
        self.sets
            .get(id)
            .map(|set| set.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sets.contains_key(id)
    }
}

fn parse_word_set(bytes: &[u8]) -> Option<WordSet> {
    let file: WordSetFile = serde_json::from_slice(bytes).ok()?;
    let words = file
        .words
        .into_iter()
        .map(WordEntry::normalized)
        .filter(|w| !w.is_blank())
        .collect();
    Some(WordSet {
        name: file.name,
        words,
    })
}

fn load_user_sets(dir: &Path, sets: &mut BTreeMap<String, WordSet>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let parsed = fs::read(&path).ok().and_then(|bytes| parse_word_set(&bytes));
        match parsed {
            Some(set) => {
                debug!(set = id, words = set.words.len(), "user word set loaded");
                sets.insert(id.to_string(), set);
            }
            None => warn!(path = %path.display(), "skipping unreadable word set"),
        }
    }
}
