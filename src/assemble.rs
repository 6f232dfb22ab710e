//! Record assembler: merges extractor output into a [`LexicalRecord`].

use crate::extract::ExtractedFields;
use crate::models::LexicalRecord;
use std::collections::HashSet;

/// Removes repeated entries, keeping the first occurrence of each.
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Builds the final record. Relation lists and tags are deduplicated; a
/// missing word class becomes "unknown" and missing word forms an empty table.
pub fn assemble(text: &str, language_code: &str, fields: ExtractedFields) -> LexicalRecord {
    LexicalRecord {
        text: text.to_string(),
        language_code: language_code.to_string(),
        translations: fields.translations,
        ipa_transcriptions: fields.ipa_transcriptions,
        definitions: fields.definitions,
        examples: fields.examples,
        word_class: fields.word_class.unwrap_or_default(),
        word_forms: fields.word_forms.unwrap_or_default(),
        synonyms: dedup_preserving_order(fields.synonyms),
        antonyms: dedup_preserving_order(fields.antonyms),
        etymology: fields.etymology,
        related_words: dedup_preserving_order(fields.related_words),
        frequency: None,
        tags: fields.tags.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WordClass;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_for_empty_fields() {
        let record = assemble("casa", "es", ExtractedFields::default());
        assert_eq!(record.text, "casa");
        assert_eq!(record.language_code, "es");
        assert_eq!(record.word_class, WordClass::Unknown);
        assert!(record.word_forms.is_empty());
        assert!(record.etymology.is_none());
        assert!(record.definitions.is_empty());
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_relation_lists_and_tags_are_deduplicated() {
        let fields = ExtractedFields {
            synonyms: strings(&["decir", "charlar", "decir"]),
            antonyms: strings(&["callar", "callar"]),
            related_words: strings(&["habla", "hablador", "habla"]),
            tags: strings(&["slang", "formal", "slang"]),
            ipa_transcriptions: strings(&["a", "a"]),
            ..ExtractedFields::default()
        };
        let record = assemble("hablar", "es", fields);
        assert_eq!(record.synonyms, strings(&["decir", "charlar"]));
        assert_eq!(record.antonyms, strings(&["callar"]));
        assert_eq!(record.related_words, strings(&["habla", "hablador"]));
        assert_eq!(record.tags.len(), 2);
        // Pronunciations are kept as found.
        assert_eq!(record.ipa_transcriptions.len(), 2);
    }

    #[test]
    fn test_serialized_record_has_every_field() {
        let record = assemble("casa", "es", ExtractedFields::default());
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "text",
            "language_code",
            "translations",
            "ipa_transcriptions",
            "definitions",
            "examples",
            "word_class",
            "word_forms",
            "synonyms",
            "antonyms",
            "etymology",
            "related_words",
            "frequency",
            "tags",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(object["word_class"], "unknown");
        assert!(object["etymology"].is_null());
    }
}
