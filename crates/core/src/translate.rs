//! Phrase translation.
//!
//! Text shown to the user goes through a [`TranslationLookup`] keyed by the
//! English phrase. A missing translation falls back to the key itself, so an
//! empty table is a valid (English) configuration.
//!
//! The pseudo-language [`COMMAND_LANGUAGE`] maps option names to the short
//! command tokens users may type instead.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::phrases::BUILTIN_TRANSLATIONS;

/// Pseudo-language holding command tokens.
pub const COMMAND_LANGUAGE: &str = "command";

pub trait TranslationLookup {
    /// Text for `key` in `language`, or `key` when there is none.
    fn get_text(&self, key: &str, language: &str) -> String;
}

/// Phrase first, then language. The layout of shared translation files.
pub type PhraseTable = HashMap<String, HashMap<String, String>>;

/// Phrase to text, for a single language. The layout of per-language files.
pub type LanguageTable = HashMap<String, String>;

/// In-memory translation table.
#[derive(Debug, Default, Clone)]
pub struct Translations {
    languages: HashMap<String, LanguageTable>,
}

impl Translations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table preloaded with the translations of the built-in phrases.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled table is malformed.
    pub fn builtin() -> Result<Self> {
        let mut translations = Self::new();
        translations.merge_phrases_str("built-in", BUILTIN_TRANSLATIONS)?;
        Ok(translations)
    }

    pub fn insert(&mut self, language: &str, key: &str, text: &str) {
        self.languages
            .entry(language.to_string())
            .or_default()
            .insert(key.to_string(), text.to_string());
    }

    pub fn merge_phrases(&mut self, phrases: PhraseTable) -> usize {
        let mut count = 0;
        for (key, texts) in phrases {
            for (language, text) in texts {
                self.insert(&language, &key, &text);
                count += 1;
            }
        }
        count
    }

    pub fn merge_language(&mut self, language: &str, table: LanguageTable) -> usize {
        let count = table.len();
        for (key, text) in table {
            self.insert(language, &key, &text);
        }
        count
    }

    /// Merges a phrase-first YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] if the document does not parse.
    pub fn merge_phrases_str(&mut self, source: &str, yaml: &str) -> Result<usize> {
        let phrases: PhraseTable = serde_yaml::from_str(yaml).map_err(|e| {
            Error::yaml_error(
                "parsing".to_string(),
                "translations".to_string(),
                source.to_string(),
                e,
            )
        })?;
        let count = self.merge_phrases(phrases);
        debug!("Loaded {count} translations from {source}");
        Ok(count)
    }

    /// Merges a phrase-first YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn merge_phrases_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io_error("translations".to_string(), path.display().to_string(), e)
        })?;
        self.merge_phrases_str(&path.display().to_string(), &content)
    }

    /// Merges a single-language YAML file, if it exists.
    ///
    /// Returns the number of entries loaded, zero when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn merge_language_file(&mut self, language: &str, path: &Path) -> Result<usize> {
        if !path.exists() {
            debug!("No translations file at `{}`", path.display());
            return Ok(0);
        }

        let reader = File::open(path).map_err(|e| {
            Error::io_error("translations".to_string(), path.display().to_string(), e)
        })?;

        let table: serde_yaml::Result<LanguageTable> = serde_yaml::from_reader(reader);
        match table {
            Ok(table) => {
                let count = self.merge_language(language, table);
                debug!("Loaded {count} `{language}` translations from `{}`", path.display());
                Ok(count)
            }
            Err(e) => {
                warn!("Invalid translations file `{}`", path.display());
                Err(Error::yaml_error(
                    "reading".to_string(),
                    "translations".to_string(),
                    path.display().to_string(),
                    e,
                ))
            }
        }
    }

    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }
}

impl TranslationLookup for Translations {
    fn get_text(&self, key: &str, language: &str) -> String {
        self.languages
            .get(language)
            .and_then(|table| table.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
