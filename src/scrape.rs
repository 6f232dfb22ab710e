//! Batch orchestration: fetch, parse and extract records for lookup keys.

use crate::error::Result;
use crate::fetch::{FetchOptions, FetchOutcome, PageFetcher, WiktionaryFetcher};
use crate::models::LexicalRecord;
use crate::progress::{ProgressCallback, ProgressUpdate};
use crate::Extractor;
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Options for a scraping run.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Target language code, e.g. `es`.
    pub lang_code: String,
    pub fetch: FetchOptions,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        ScrapeOptions {
            lang_code: "es".to_string(),
            fetch: FetchOptions::default(),
        }
    }
}

pub struct Scraper<F> {
    extractor: Extractor,
    fetcher: F,
}

impl Scraper<WiktionaryFetcher> {
    /// Creates a scraper that fetches pages over HTTP.
    pub fn new(options: ScrapeOptions) -> Result<Self> {
        let fetcher = WiktionaryFetcher::new(options.fetch)?;
        Ok(Scraper::with_fetcher(Extractor::new(&options.lang_code), fetcher))
    }
}

impl<F: PageFetcher> Scraper<F> {
    pub fn with_fetcher(extractor: Extractor, fetcher: F) -> Self {
        Scraper { extractor, fetcher }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Fetches and extracts one key. `Ok(None)` covers pages that do not exist,
    /// pages without a section for the target language, and fetches that
    /// failed after all retries.
    pub async fn scrape_word(&self, key: &str) -> Result<Option<LexicalRecord>> {
        debug!("Scraping '{}'", key);
        let markup = match self.fetcher.fetch(key).await {
            FetchOutcome::Found(markup) => markup,
            FetchOutcome::NotFound => return Ok(None),
            FetchOutcome::TransientFailure(reason) => {
                warn!("Giving up on '{}': {}", key, reason);
                return Ok(None);
            }
        };
        let record = self.extractor.extract_markup(key, &markup)?;
        if record.is_none() {
            info!(
                "No {} section found for '{}'",
                self.extractor.language().name,
                key
            );
        }
        Ok(record)
    }

    /// Scrapes `keys` in order. Keys without a record are skipped, and a key
    /// that fails is logged and skipped without stopping the batch. A progress
    /// callback returning `false` stops the batch after the current key.
    pub async fn scrape_words(
        &self,
        keys: &[String],
        mut progress: Option<ProgressCallback>,
    ) -> BTreeMap<String, LexicalRecord> {
        let stage = ProgressUpdate::new_stage(
            format!("Scraping {}", self.extractor.language().name),
            Some(keys.len() as u64),
        );
        if let Some(callback) = progress.as_mut() {
            callback(stage.clone());
        }

        let mut records = BTreeMap::new();
        for (index, key) in keys.iter().enumerate() {
            match self.scrape_word(key).await {
                Ok(Some(record)) => {
                    records.insert(key.clone(), record);
                }
                Ok(None) => debug!("No record for '{}'", key),
                Err(e) => warn!("Skipping '{}': {}", key, e),
            }
            if let Some(callback) = progress.as_mut() {
                if !callback(stage.advance(index as u64 + 1, key.as_str())) {
                    info!("Batch stopped after {} of {} keys", index + 1, keys.len());
                    break;
                }
            }
        }
        info!("Scraped {} records from {} keys", records.len(), keys.len());
        records
    }
}

/// Sets each record's frequency to the 1-based position of its key in
/// `ranked_keys`.
pub fn assign_frequency_ranks(records: &mut BTreeMap<String, LexicalRecord>, ranked_keys: &[String]) {
    for (index, key) in ranked_keys.iter().enumerate() {
        if let Some(record) = records.get_mut(key) {
            record.frequency = Some(index as u32 + 1);
        }
    }
}
