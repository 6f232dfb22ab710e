// Declare modules
pub mod assemble;
pub mod classify;
pub mod conjugation;
pub mod document;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod inflection;
pub mod languages;
pub mod models;
pub mod progress;
pub mod scrape;
pub mod section;
pub mod vocab;
pub mod wordlist;

// Re-export key types for easier use
pub use document::{Document, Element, Node};
pub use error::{Result, WiktError};
pub use fetch::{FetchOptions, FetchOutcome, PageFetcher, WiktionaryFetcher};
pub use languages::Language;
pub use models::{ConjugationTable, LexicalRecord, Mood, PersonKey, Tense, WordClass};
pub use scrape::{ScrapeOptions, Scraper};

use crate::classify::classify;
use crate::extract::extract_fields;
use crate::inflection::{InflectionStrategy, strategy_for};
use crate::section::isolate_language_section;
use log::debug;

/// Turns a parsed page into a [`LexicalRecord`] for one target language.
///
/// Holds only immutable configuration, so one extractor can serve any number
/// of documents, concurrently if needed.
#[derive(Clone)]
pub struct Extractor {
    language: Language,
    inflection: Option<&'static dyn InflectionStrategy>,
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("language", &self.language)
            .field("inflection", &self.inflection.map(|s| s.language_code()))
            .finish()
    }
}

impl Extractor {
    /// Creates an extractor for the language with code `lang_code`.
    pub fn new(lang_code: &str) -> Self {
        Self::for_language(Language::from_code(lang_code))
    }

    pub fn for_language(language: Language) -> Self {
        let inflection = strategy_for(&language.code);
        Extractor {
            language,
            inflection,
        }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Extracts the record for `key` from `document`.
    ///
    /// Returns `None` when the page has no section for the target language.
    pub fn extract(&self, key: &str, document: &Document) -> Option<LexicalRecord> {
        let span = isolate_language_section(document, &self.language.name)?;
        let classified = classify(&span);
        let fields = extract_fields(&classified, self.inflection);
        debug!(
            "Extracted '{}': {} definitions, {} translation languages",
            key,
            fields.definitions.len(),
            fields.translations.len()
        );
        Some(assemble::assemble(key, &self.language.code, fields))
    }

    /// Parses `markup` and extracts the record for `key`.
    pub fn extract_markup(&self, key: &str, markup: &str) -> Result<Option<LexicalRecord>> {
        let document = Document::parse(markup)?;
        Ok(self.extract(key, &document))
    }
}
