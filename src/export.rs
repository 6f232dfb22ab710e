//! JSON export of scraped records.

use crate::error::{Result, WiktError};
use crate::models::LexicalRecord;
use directories_next::ProjectDirs;
use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectory name within user's data directory
pub const DATA_SUBDIR: &str = "wikt-rs";

/// Gets the default output directory, creating it if it doesn't exist.
pub fn default_output_dir() -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from("org", "WiktRs", DATA_SUBDIR).ok_or(WiktError::DataDirNotFound)?;
    let data_dir = proj_dirs.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

/// `wiktionary_{lang}_{word}.json`
pub fn word_file_name(lang_code: &str, word: &str) -> String {
    format!("wiktionary_{}_{}.json", lang_code, word)
}

/// `wiktionary_{lang}_{count}_words.json`
pub fn batch_file_name(lang_code: &str, count: usize) -> String {
    format!("wiktionary_{}_{}_words.json", lang_code, count)
}

/// Writes `records` as a pretty-printed JSON object keyed by lookup key.
pub fn export_json(path: &Path, records: &BTreeMap<String, LexicalRecord>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    info!("Wrote {} records to {:?}", records.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use crate::extract::ExtractedFields;
    use tempfile::tempdir;

    #[test]
    fn test_export_creates_parent_dirs_and_reloads() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join(batch_file_name("es", 1));

        let mut fields = ExtractedFields::default();
        fields.definitions.push("house".to_string());
        fields.etymology = Some("From Latin casa.".to_string());
        let mut records = BTreeMap::new();
        records.insert("casa".to_string(), assemble("casa", "es", fields));

        export_json(&path, &records).unwrap();
        assert!(path.exists());
        let raw = fs::read_to_string(&path).unwrap();
        let reloaded: BTreeMap<String, LexicalRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(reloaded, records);
        assert!(raw.contains("\"casa\": {"));
        assert!(raw.contains("\"word_forms\": {}"));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(word_file_name("es", "hablar"), "wiktionary_es_hablar.json");
        assert_eq!(batch_file_name("es", 20), "wiktionary_es_20_words.json");
    }
}
